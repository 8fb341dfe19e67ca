//! Sequential batch computation over a selected set of beatmaps.
//!
//! One batch runs on one dedicated worker thread; the calculator is
//! stateful and not reentrant, so there is no fan-out across items.
//! Progress crosses back to the caller over an `mpsc` channel in
//! production order. Cancellation is cooperative: the flag is polled once
//! per item, before the next calculator call, and never interrupts an
//! in-flight call.

use crate::{
    calc::{CalcError, SkillCalculator},
    mods,
    params::ParamStore,
    skills::BeatmapRecord,
};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender, TryRecvError},
        Arc,
    },
    thread::{self, JoinHandle},
};
use thiserror::Error;
use tracing::{debug, warn};

/// One batch input: the beatmap file plus its free-text modifier string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapInput {
    pub path: String,
    pub mods: String,
}

impl MapInput {
    pub fn new(path: impl Into<String>, mods: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mods: mods.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// Everything a finished or cancelled batch produced. Partial results are
/// retained on cancellation, never rolled back.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub records: Vec<BeatmapRecord>,
    /// Items the worker got through, successful or not.
    pub processed: usize,
    /// Items the calculator rejected; absent from `records`.
    pub skipped: usize,
}

/// Events delivered from the worker to the caller, in production order.
/// `Finished` and `Cancelled` are terminal: nothing follows them for a
/// given run.
#[derive(Debug, Clone)]
pub enum CalcMessage {
    /// Sent before an item's calculator call; carries the path about to be
    /// processed.
    Processing { path: String },
    /// Sent after an item's calculator call, success or failure.
    Progress { processed: usize },
    Finished { outcome: BatchOutcome },
    Cancelled { outcome: BatchOutcome },
}

#[derive(Debug, Error)]
pub enum BatchError {
    /// The calculator's parameter reload failed. Fatal: the batch never
    /// starts.
    #[error("calculator initialization failed: {0}")]
    Init(#[source] CalcError),
    /// A batch is still running. The calculator is not reentrant, so
    /// overlapping starts are rejected outright rather than queued.
    #[error("a batch is already running")]
    AlreadyRunning,
}

/// Drives the calculator over an input list on a background thread.
///
/// `Idle -> Running -> {Completed, Cancelled}`; a finished engine can be
/// started again. State flips to the terminal value when [`poll`] or
/// [`wait`] observes the terminal event.
///
/// [`poll`]: BatchEngine::poll
/// [`wait`]: BatchEngine::wait
pub struct BatchEngine {
    calculator: Arc<dyn SkillCalculator>,
    state: BatchState,
    cancel: Arc<AtomicBool>,
    rx: Option<Receiver<CalcMessage>>,
    handle: Option<JoinHandle<()>>,
}

impl BatchEngine {
    pub fn new(calculator: Arc<dyn SkillCalculator>) -> Self {
        Self {
            calculator,
            state: BatchState::Idle,
            cancel: Arc::new(AtomicBool::new(false)),
            rx: None,
            handle: None,
        }
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Start a batch over `inputs`.
    ///
    /// Reloads the calculator's parameters from `store` before spawning
    /// the worker; a reload failure is fatal and the engine stays in its
    /// prior state. Returns [`BatchError::AlreadyRunning`] while a batch
    /// is in flight (the caller must drain events until the terminal one
    /// before restarting).
    pub fn start(&mut self, inputs: Vec<MapInput>, store: &ParamStore) -> Result<(), BatchError> {
        if self.state == BatchState::Running {
            return Err(BatchError::AlreadyRunning);
        }
        self.calculator.reload_params(store).map_err(BatchError::Init)?;

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let calculator = Arc::clone(&self.calculator);
        let worker_cancel = Arc::clone(&cancel);
        debug!(inputs = inputs.len(), "batch started");
        let handle = thread::spawn(move || run_batch(calculator, inputs, worker_cancel, tx));

        self.cancel = cancel;
        self.rx = Some(rx);
        self.handle = Some(handle);
        self.state = BatchState::Running;
        Ok(())
    }

    /// Request cancellation of the running batch. Advisory: takes effect
    /// before the next item starts; an in-flight calculator call runs to
    /// completion. No-op outside `Running`.
    pub fn cancel(&self) {
        if self.state == BatchState::Running {
            self.cancel.store(true, Ordering::Relaxed);
        }
    }

    /// Drain all currently available events without blocking. Flips the
    /// engine state when the terminal event is among them.
    pub fn poll(&mut self) -> Vec<CalcMessage> {
        let mut events = Vec::new();
        loop {
            let message = match &self.rx {
                Some(rx) => match rx.try_recv() {
                    Ok(message) => message,
                    Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                },
                None => break,
            };
            self.note_terminal(&message);
            events.push(message);
        }
        events
    }

    /// Block until the running batch reaches its terminal event and return
    /// every event in production order. Returns immediately with no events
    /// when no batch is in flight.
    pub fn wait(&mut self) -> Vec<CalcMessage> {
        let mut events = Vec::new();
        while self.state == BatchState::Running {
            let message = match &self.rx {
                Some(rx) => match rx.recv() {
                    Ok(message) => message,
                    Err(_) => break,
                },
                None => break,
            };
            self.note_terminal(&message);
            events.push(message);
        }
        events
    }

    fn note_terminal(&mut self, message: &CalcMessage) {
        let state = match message {
            CalcMessage::Finished { .. } => BatchState::Completed,
            CalcMessage::Cancelled { .. } => BatchState::Cancelled,
            _ => return,
        };
        self.state = state;
        self.rx = None;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_batch(
    calculator: Arc<dyn SkillCalculator>,
    inputs: Vec<MapInput>,
    cancel: Arc<AtomicBool>,
    tx: Sender<CalcMessage>,
) {
    let mut outcome = BatchOutcome::default();
    for input in inputs {
        if cancel.load(Ordering::Relaxed) {
            debug!(processed = outcome.processed, "batch cancelled");
            let _ = tx.send(CalcMessage::Cancelled { outcome });
            return;
        }
        let _ = tx.send(CalcMessage::Processing {
            path: input.path.clone(),
        });
        let mask = mods::parse_mods(&input.mods);
        match calculator.calculate(&input.path, mask) {
            Ok(output) => outcome.records.push(BeatmapRecord {
                path: input.path,
                name: output.name,
                mods: input.mods,
                ar: output.ar,
                cs: output.cs,
                skills: output.skills,
            }),
            Err(err) => {
                outcome.skipped += 1;
                warn!(%err, "skipping beatmap");
            }
        }
        outcome.processed += 1;
        let _ = tx.send(CalcMessage::Progress {
            processed: outcome.processed,
        });
    }
    debug!(
        processed = outcome.processed,
        skipped = outcome.skipped,
        "batch finished"
    );
    let _ = tx.send(CalcMessage::Finished { outcome });
}
