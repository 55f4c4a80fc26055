//! Acquisition and scoring loops and the one-slot mailbox between them.
//!
//! The acquisition side owns the frames and runs the whole throw pipeline
//! synchronously; it only ever hands a finished [`ThrowReport`] across the
//! thread boundary. The scoring side takes reports out of the
//! [`ResultSlot`], groups darts into visits and applies them to a
//! [`Scoreboard`]. Both loops watch the same [`RunFlag`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use dart_vision_board::SectorResult;
use dart_vision_core::{Frame, ViewTriple};
use dart_vision_game::{CheckoutRule, GameState, ThrowDecomposition, Visit, VisitStatus};
use log::{info, warn};

use crate::pipeline::{ThrowError, ThrowProcessor, ThrowReport};

/// Process-wide cooperative cancellation flag.
#[derive(Clone, Debug)]
pub struct RunFlag(Arc<AtomicBool>);

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl RunFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One-slot mailbox. A newer report replaces an unread one.
#[derive(Clone, Debug, Default)]
pub struct ResultSlot {
    inner: Arc<Mutex<Option<ThrowReport>>>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `report`; returns the unread report it replaced, if any.
    pub fn publish(&self, report: ThrowReport) -> Option<ThrowReport> {
        let mut guard = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        guard.replace(report)
    }

    /// Read and clear under one lock: each report is taken at most once.
    pub fn take(&self) -> Option<ThrowReport> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner()).take()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap_or_else(|p| p.into_inner()).is_none()
    }
}

/// What a frame source had to offer on one poll.
#[derive(Clone, Debug)]
pub enum FramePoll {
    Frames(ViewTriple<Frame>),
    /// Nothing new yet; poll again later.
    Pending,
    /// The source is exhausted or shut down.
    Closed,
}

/// Camera side: synchronized frames for the three views.
pub trait FrameSource {
    fn poll_frames(&mut self) -> FramePoll;
}

/// Counters returned by [`run_acquisition`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AcquisitionStats {
    pub frames: usize,
    pub changes: usize,
    pub published: usize,
    pub failures: usize,
    pub rejected_frames: usize,
}

/// Acquisition loop.
///
/// Keeps the previous frame triple, runs change detection on every view and,
/// when any view changed, runs the full pipeline and publishes the report.
/// Returns when `flag` clears or the source closes.
pub fn run_acquisition(
    source: &mut dyn FrameSource,
    processor: &ThrowProcessor,
    slot: &ResultSlot,
    flag: &RunFlag,
    idle: Duration,
) -> AcquisitionStats {
    let mut stats = AcquisitionStats::default();
    let mut previous: Option<ViewTriple<Frame>> = None;

    while flag.is_running() {
        let current = match source.poll_frames() {
            FramePoll::Frames(frames) => frames,
            FramePoll::Pending => {
                thread::sleep(idle);
                continue;
            }
            FramePoll::Closed => break,
        };
        stats.frames += 1;

        let Some(prev) = previous.as_ref() else {
            previous = Some(current);
            continue;
        };

        match processor.detect_and_process(prev, &current) {
            Ok(None) => {}
            // the flag is checked again so a stop never publishes a half cycle
            Ok(Some(_)) if !flag.is_running() => break,
            Ok(Some(report)) => {
                stats.changes += 1;
                if let Some(stale) = slot.publish(report) {
                    warn!("unread throw dropped: {}", stale.result());
                }
                stats.published += 1;
            }
            Err(ThrowError::Frame(err)) => {
                warn!("frame rejected: {err}");
                stats.rejected_frames += 1;
                continue;
            }
            Err(err) => {
                warn!("throw discarded: {err}");
                stats.changes += 1;
                stats.failures += 1;
            }
        }
        previous = Some(current);
    }
    info!(
        "acquisition stopped after {} frames ({} throws published)",
        stats.frames, stats.published
    );
    stats
}

/// Scoreboard side.
pub trait Scoreboard {
    /// Remaining score of the player at the oche.
    fn remaining(&self) -> u32;

    /// Checkout rule in force; decides when a visit busts early.
    fn checkout_rule(&self) -> CheckoutRule;

    /// Apply a visit total; returns `0` to continue or `player index + 1`
    /// when that player finished the leg.
    fn apply_throw_score(&mut self, total: u32, last_label: &str) -> usize;

    /// Show a single dart as it lands.
    fn dart_scored(&mut self, _dart: &SectorResult) {}
}

impl Scoreboard for GameState {
    fn remaining(&self) -> u32 {
        self.current().score
    }

    fn checkout_rule(&self) -> CheckoutRule {
        self.params().checkout
    }

    fn apply_throw_score(&mut self, total: u32, last_label: &str) -> usize {
        self.apply_throw(total, last_label).completion_code()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("reporting channel closed")]
    Closed,
    #[error("report rejected: {0}")]
    Rejected(String),
}

/// External reporting collaborator.
pub trait ThrowReporter: Send {
    fn report(&self, throw: ThrowDecomposition) -> Result<(), ReportError>;
}

/// Delivers reports from a background thread; the caller never blocks on
/// the inner reporter and delivery failures are only logged.
pub struct AsyncReporter {
    tx: Option<mpsc::Sender<ThrowDecomposition>>,
    worker: Option<JoinHandle<()>>,
}

impl AsyncReporter {
    pub fn spawn(inner: impl ThrowReporter + 'static) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<ThrowDecomposition>();
        let worker = thread::Builder::new()
            .name("reporter".into())
            .spawn(move || {
                for throw in rx {
                    if let Err(err) = inner.report(throw) {
                        warn!("throw report failed: {err}");
                    }
                }
            })?;
        Ok(Self {
            tx: Some(tx),
            worker: Some(worker),
        })
    }
}

impl ThrowReporter for AsyncReporter {
    fn report(&self, throw: ThrowDecomposition) -> Result<(), ReportError> {
        self.tx
            .as_ref()
            .ok_or(ReportError::Closed)?
            .send(throw)
            .map_err(|_| ReportError::Closed)
    }
}

impl Drop for AsyncReporter {
    fn drop(&mut self) {
        // closing the channel ends the worker's loop
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Groups darts into visits and applies them to a scoreboard.
#[derive(Default)]
pub struct Scorer {
    visit: Visit,
    reporter: Option<Box<dyn ThrowReporter>>,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reporter(mut self, reporter: Box<dyn ThrowReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn visit(&self) -> &Visit {
        &self.visit
    }

    /// Feed one dart. Returns the completion code when the dart closed a visit.
    pub fn on_report(
        &mut self,
        board: &mut dyn Scoreboard,
        report: &ThrowReport,
    ) -> Option<usize> {
        let dart = report.result();
        board.dart_scored(dart);
        if let Some(reporter) = &self.reporter {
            match ThrowDecomposition::from_result(dart) {
                Some(throw) => {
                    if let Err(err) = reporter.report(throw) {
                        warn!("throw report not delivered: {err}");
                    }
                }
                None => warn!("cannot decompose label {:?}", dart.label),
            }
        }

        let status = self
            .visit
            .push(dart.clone(), board.remaining(), board.checkout_rule());
        if status == VisitStatus::Open {
            return None;
        }
        let visit = self.visit.take();
        let last = visit.last_label().unwrap_or_default();
        let code = board.apply_throw_score(visit.total(), last);
        if code != 0 {
            info!("leg finished (completion code {code})");
        }
        Some(code)
    }
}

/// Scoring loop: poll the slot every `poll` until `flag` clears.
///
/// Returns the number of visits applied.
pub fn run_scoring(
    slot: &ResultSlot,
    board: &mut dyn Scoreboard,
    scorer: &mut Scorer,
    flag: &RunFlag,
    poll: Duration,
) -> usize {
    let mut visits = 0;
    while flag.is_running() {
        match slot.take() {
            Some(report) => {
                if scorer.on_report(board, &report).is_some() {
                    visits += 1;
                }
            }
            None => thread::sleep(poll),
        }
    }
    visits
}
