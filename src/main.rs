mod action;
mod app;
mod bookmarks;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod logging;
mod preview;
mod selection;
mod status;
mod task;
mod theme;
mod tui;
mod ui;
mod viewport;

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, info};

use crate::app::App;
use crate::config::{AppConfig, GeneralConfig, SortConfig};
use crate::event::{Event, EventHandler};
use crate::task::{Task, TaskRunner};
use crate::tui::{install_panic_hook, Tui};

/// A keyboard-driven terminal directory browser.
#[derive(Parser, Debug)]
#[command(name = "nfm", version, about)]
struct Cli {
    /// Directory to start in (defaults to the current directory)
    path: Option<PathBuf>,

    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a debug log to this file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Show dotfiles
    #[arg(long)]
    show_hidden: bool,

    /// List directories only
    #[arg(long)]
    dirs_only: bool,

    /// Start with the preview pane hidden
    #[arg(long)]
    no_preview: bool,

    /// Sort key: name, modified or size
    #[arg(long, value_parser = ["name", "modified", "size"])]
    sort: Option<String>,
}

impl Cli {
    /// Flags as a partial config; unset flags leave lower sources alone.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                show_hidden: self.show_hidden.then_some(true),
                dirs_only: self.dirs_only.then_some(true),
                preview: self.no_preview.then_some(false),
                ..GeneralConfig::default()
            },
            sort: SortConfig {
                by: self.sort.clone(),
                ..SortConfig::default()
            },
        }
    }
}

/// Polling interval for terminal input.
const INPUT_POLL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init(cli.log.as_deref())?;

    let start_dir = match &cli.path {
        Some(path) => path.canonicalize().map_err(|_| {
            error::AppError::InvalidPath(format!("{} does not exist", path.display()))
        })?,
        None => std::env::current_dir()?,
    };

    let settings = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides())).settings();
    info!(dir = %start_dir.display(), ?settings, "starting");

    let home = dirs::home_dir();
    let mut app = App::new(&start_dir, &settings, home.as_deref());

    install_panic_hook();
    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(INPUT_POLL);
    let runner = TaskRunner::new(events.sender());

    let result = run(&mut app, &mut tui, &mut events, &runner).await;
    tui.restore()?;
    info!("exiting");
    result
}

async fn run(
    app: &mut App,
    tui: &mut Tui,
    events: &mut EventHandler,
    runner: &TaskRunner,
) -> error::Result<()> {
    let (width, height) = tui.size()?;
    app.update(Event::Resize(width, height));
    for task in app.init() {
        runner.spawn(task);
    }

    let mut pending = VecDeque::new();
    loop {
        tui.terminal_mut().draw(|frame| ui::render(app, frame))?;

        let event = events.next().await?;
        pending.extend(app.update(event));

        while let Some(task) = pending.pop_front() {
            match task {
                Task::LaunchForeground(launch) => {
                    debug!(program = %launch.program, "handing terminal to child");
                    events.pause();
                    tui.suspend()?;
                    let finished = task::execute(Task::LaunchForeground(launch)).await;
                    tui.resume()?;
                    events.resume();
                    if let Some(event) = finished {
                        pending.extend(app.update(event));
                    }
                }
                other => runner.spawn(other),
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
