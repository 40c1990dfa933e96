//! Background work requested by the event loop.
//!
//! A [`Task`] never touches engine state. Each one runs to completion on the
//! tokio runtime and reports back exactly one [`Event`] through the loop's
//! channel. Nothing is cancelled; stale completions are filtered when they
//! are applied.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::event::{Event, ListingResult, MutationKind, MutationResult, PreviewResult};
use crate::fs::{self, operations, preview};

/// A file mutation together with its operands, captured at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Copy { paths: Vec<PathBuf>, dest: PathBuf },
    Move { paths: Vec<PathBuf>, dest: PathBuf },
    Delete { paths: Vec<PathBuf> },
    Create { name: String, dir: PathBuf },
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Copy { .. } => MutationKind::Copy,
            Mutation::Move { .. } => MutationKind::Move,
            Mutation::Delete { .. } => MutationKind::Delete,
            Mutation::Create { .. } => MutationKind::Create,
        }
    }

    fn apply(&self) -> Result<()> {
        match self {
            Mutation::Copy { paths, dest } => operations::copy(paths, dest),
            Mutation::Move { paths, dest } => operations::move_to(paths, dest),
            Mutation::Delete { paths } => operations::delete(paths),
            Mutation::Create { name, dir } => operations::create(name, dir),
        }
    }
}

/// An external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    ListDirectory(PathBuf),
    LoadPreview(PathBuf),
    Mutate(Mutation),
    /// Emit [`Event::ClearStatus`] for `generation` after `delay`.
    ClearStatusAfter { generation: u64, delay: Duration },
    /// Run a program that takes over the terminal until it exits.
    LaunchForeground(Launch),
    /// Start a detached program and report as soon as it has spawned.
    LaunchBackground(Launch),
    /// Run tasks one after another, each reporting before the next starts.
    Sequence(Vec<Task>),
}

/// Spawns tasks onto the runtime and routes their completions to the loop.
#[derive(Clone)]
pub struct TaskRunner {
    tx: mpsc::UnboundedSender<Event>,
}

impl TaskRunner {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> Self {
        Self { tx }
    }

    pub fn spawn(&self, task: Task) {
        debug!(?task, "dispatching task");
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let steps = match task {
                Task::Sequence(steps) => steps,
                single => vec![single],
            };
            for step in steps {
                if let Some(event) = execute(step).await {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }
        });
    }
}

/// Run a single task to completion and produce its completion message.
pub async fn execute(task: Task) -> Option<Event> {
    match task {
        Task::ListDirectory(path) => {
            let dir = path.clone();
            let entries = run_blocking(move || fs::list_directory(&dir)).await;
            Some(Event::ListingComplete(ListingResult { path, entries }))
        }
        Task::LoadPreview(path) => {
            let target = path.clone();
            let lines =
                run_blocking(move || preview::read_preview(&target, preview::MAX_PREVIEW_LINES))
                    .await;
            Some(Event::PreviewComplete(PreviewResult { path, lines }))
        }
        Task::Mutate(mutation) => {
            let kind = mutation.kind();
            let error = run_blocking(move || mutation.apply()).await.err();
            Some(Event::MutationComplete(MutationResult { kind, error }))
        }
        Task::ClearStatusAfter { generation, delay } => {
            tokio::time::sleep(delay).await;
            Some(Event::ClearStatus(generation))
        }
        Task::LaunchForeground(launch) => Some(Event::ProcessFinished(run_foreground(launch).await)),
        Task::LaunchBackground(launch) => Some(Event::ProcessFinished(run_background(launch))),
        Task::Sequence(_) => {
            warn!("nested task sequence ignored");
            None
        }
    }
}

async fn run_blocking<T, F>(f: F) -> std::result::Result<T, String>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(e.to_string()),
        Err(join) => Err(join.to_string()),
    }
}

fn command(launch: &Launch) -> Command {
    let mut cmd = Command::new(&launch.program);
    cmd.args(&launch.args).current_dir(&launch.cwd);
    cmd
}

async fn run_foreground(launch: Launch) -> std::result::Result<(), String> {
    let status = command(&launch)
        .status()
        .await
        .map_err(|source| process_error(&launch, source))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("{} exited with {}", launch.program, status))
    }
}

fn run_background(launch: Launch) -> std::result::Result<(), String> {
    command(&launch)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_child| ())
        .map_err(|source| process_error(&launch, source))
}

fn process_error(launch: &Launch, source: std::io::Error) -> String {
    AppError::Process {
        program: launch.program.clone(),
        source,
    }
    .to_string()
}
