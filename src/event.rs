use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::error::Result;
use crate::fs::Entry;

/// Result of listing a directory.
#[derive(Debug)]
pub struct ListingResult {
    /// Directory that was listed.
    pub path: PathBuf,
    /// Entries in provider order, or the error text.
    pub entries: std::result::Result<Vec<Entry>, String>,
}

/// Result of loading a preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Entry the preview was requested for.
    pub path: PathBuf,
    pub lines: std::result::Result<Vec<String>, String>,
}

/// Kind of file mutation dispatched against the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Copy,
    Move,
    Delete,
    Create,
}

/// Result of a completed file mutation.
#[derive(Debug)]
pub struct MutationResult {
    pub kind: MutationKind,
    /// Error text, if the mutation failed.
    pub error: Option<String>,
}

/// Every message the event loop applies.
#[derive(Debug)]
pub enum Event {
    /// A key press event.
    Key(KeyEvent),
    /// Terminal resize event.
    Resize(u16, u16),
    /// Directory listing finished.
    ListingComplete(ListingResult),
    /// Preview load finished.
    PreviewComplete(PreviewResult),
    /// Copy/move/delete/create finished.
    MutationComplete(MutationResult),
    /// Deferred status clear for the given generation.
    ClearStatus(u64),
    /// External process exited (or failed to start).
    ProcessFinished(std::result::Result<(), String>),
}

impl Event {
    /// Short label for logging; payloads can be large.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Key(_) => "key",
            Event::Resize(..) => "resize",
            Event::ListingComplete(_) => "listing",
            Event::PreviewComplete(_) => "preview",
            Event::MutationComplete(_) => "mutation",
            Event::ClearStatus(_) => "clear-status",
            Event::ProcessFinished(_) => "process",
        }
    }
}

/// Async event handler that polls crossterm events and forwards them via a channel.
///
/// Background tasks send their completions through [`EventHandler::sender`],
/// so key input and completions arrive on one ordered queue.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::UnboundedSender<Event>,
    paused: Arc<AtomicBool>,
}

impl EventHandler {
    /// Create a new EventHandler polling the terminal every `poll_rate`.
    pub fn new(poll_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();
        let paused = Arc::new(AtomicBool::new(false));
        let paused_reader = paused.clone();

        tokio::task::spawn_blocking(move || loop {
            if event_tx.is_closed() {
                break;
            }
            // Leave stdin alone while a foreground child owns the terminal
            if paused_reader.load(Ordering::Relaxed) {
                std::thread::sleep(poll_rate);
                continue;
            }
            if !input_ready(&paused_reader, || event::poll(poll_rate).unwrap_or(false)) {
                continue;
            }
            let forwarded = match event::read() {
                Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    event_tx.send(Event::Key(key))
                }
                Ok(CrosstermEvent::Resize(w, h)) => event_tx.send(Event::Resize(w, h)),
                _ => Ok(()),
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx, tx, paused }
    }

    /// Get a sender clone for async tasks to send completion events.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Stop reading terminal input until [`EventHandler::resume`].
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Relaxed);
    }

    /// Receive the next event (blocks until available).
    pub async fn next(&mut self) -> Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| crate::error::AppError::Terminal("Event channel closed".into()))
    }
}

/// Whether the reader may call `event::read`. A pause that lands while
/// `poll` is blocked wins, so the child gets the pending input.
fn input_ready(paused: &AtomicBool, poll: impl FnOnce() -> bool) -> bool {
    !paused.load(Ordering::Relaxed) && poll() && !paused.load(Ordering::Relaxed)
}
