//! Microphone session lifecycle, shared by every consumer on a page.
//!
//! The platform side (WebAudio, a mock in tests) implements
//! [`CaptureDevice`]/[`CaptureHandle`]; [`AudioSession`] owns the lifecycle
//! and [`AudioProvider`] is the handle passed down from the app root.

use crate::bands::FrequencyBands;
use crate::constants::{DEFAULT_ANALYSER_SMOOTHING, DEFAULT_FFT_SIZE};
use crate::error::AudioError;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

/// Frequency analyser settings applied when capture is wired up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalyserConfig {
    pub fft_size: u32,
    pub smoothing_time_constant: f64,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: DEFAULT_FFT_SIZE,
            smoothing_time_constant: DEFAULT_ANALYSER_SMOOTHING,
        }
    }
}

impl AnalyserConfig {
    #[inline]
    pub fn bin_count(&self) -> usize {
        (self.fft_size / 2) as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    Idle,
    Requesting,
    Active,
    Failed(AudioError),
    Closed,
}

/// Source of capture handles. `open` asks the platform for the microphone
/// and may suspend on a permission prompt indefinitely.
pub trait CaptureDevice {
    type Handle: CaptureHandle;

    fn open(&self, config: AnalyserConfig)
        -> impl Future<Output = Result<Self::Handle, AudioError>>;
}

/// A live capture: stream, processing context and analyser.
pub trait CaptureHandle {
    fn bin_count(&self) -> usize;
    /// Copy the latest byte magnitudes into `out` (length `bin_count`).
    fn read_bins(&mut self, out: &mut [u8]);
    fn is_suspended(&self) -> bool;
    fn resume(&mut self);
    /// Stop all tracks, disconnect the analyser and close the context.
    /// The session calls this exactly once per handle.
    fn close(&mut self);
}

/// Outcome of asking a session to start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartDecision {
    /// Caller should acquire a device and report back with this generation.
    Proceed(u64),
    AlreadyActive,
    InFlight,
}

pub struct AudioSession<H: CaptureHandle> {
    state: SessionState,
    handle: Option<H>,
    bins: Vec<u8>,
    config: AnalyserConfig,
    generation: u64,
}

impl<H: CaptureHandle> AudioSession<H> {
    pub fn new(config: AnalyserConfig) -> Self {
        Self {
            state: SessionState::Idle,
            handle: None,
            bins: Vec::new(),
            config,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> AnalyserConfig {
        self.config
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn begin_start(&mut self) -> StartDecision {
        match self.state {
            SessionState::Active => {
                if let Some(h) = &mut self.handle {
                    if h.is_suspended() {
                        log::info!("[audio] resuming suspended context");
                        h.resume();
                    }
                }
                StartDecision::AlreadyActive
            }
            SessionState::Requesting => StartDecision::InFlight,
            SessionState::Idle | SessionState::Failed(_) | SessionState::Closed => {
                self.generation += 1;
                self.state = SessionState::Requesting;
                StartDecision::Proceed(self.generation)
            }
        }
    }

    /// Record the result of an acquisition started with `generation`.
    /// A result for a request that was stopped (or superseded) meanwhile is
    /// closed on arrival. Returns whether the session is now active.
    pub fn finish_start(&mut self, generation: u64, result: Result<H, AudioError>) -> bool {
        let current = self.state == SessionState::Requesting && generation == self.generation;
        match result {
            Ok(mut handle) if !current => {
                log::info!("[audio] discarding capture that finished after stop");
                handle.close();
                false
            }
            Err(e) if !current => {
                log::debug!("[audio] stale capture request failed: {}", e);
                false
            }
            Ok(handle) => {
                self.bins.clear();
                self.bins.resize(handle.bin_count(), 0);
                log::info!("[audio] active, {} bins", self.bins.len());
                self.handle = Some(handle);
                self.state = SessionState::Active;
                true
            }
            Err(e) => {
                log::warn!("[audio] capture failed: {}", e);
                self.state = SessionState::Failed(e);
                false
            }
        }
    }

    /// Release everything held. Safe in every state.
    pub fn stop(&mut self) {
        if let Some(mut h) = self.handle.take() {
            h.close();
            log::info!("[audio] stopped");
        }
        if matches!(self.state, SessionState::Active | SessionState::Requesting) {
            self.state = SessionState::Closed;
        }
    }

    /// Latest bands, or all zeros when not active.
    pub fn frequency_bands(&mut self) -> FrequencyBands {
        match (&self.state, &mut self.handle) {
            (SessionState::Active, Some(h)) => {
                if self.bins.len() != h.bin_count() {
                    self.bins.resize(h.bin_count(), 0);
                }
                h.read_bins(&mut self.bins);
                FrequencyBands::from_bins(&self.bins)
            }
            _ => FrequencyBands::SILENT,
        }
    }
}

impl<H: CaptureHandle> Drop for AudioSession<H> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Shared handle to the page's single audio session.
///
/// Construct once at the app root and clone it into every consumer. The
/// session is torn down when the last clone is dropped or `stop` is called.
pub struct AudioProvider<D: CaptureDevice> {
    device: Rc<D>,
    session: Rc<RefCell<AudioSession<D::Handle>>>,
}

impl<D: CaptureDevice> Clone for AudioProvider<D> {
    fn clone(&self) -> Self {
        Self {
            device: self.device.clone(),
            session: self.session.clone(),
        }
    }
}

impl<D: CaptureDevice> AudioProvider<D> {
    pub fn new(device: D, config: AnalyserConfig) -> Self {
        Self {
            device: Rc::new(device),
            session: Rc::new(RefCell::new(AudioSession::new(config))),
        }
    }

    /// Request the microphone. Must be called from a user gesture. A second
    /// call while active (or while a request is pending) acquires nothing.
    pub async fn start(&self) -> bool {
        let generation = match self.session.borrow_mut().begin_start() {
            StartDecision::Proceed(g) => g,
            StartDecision::AlreadyActive => return true,
            StartDecision::InFlight => return false,
        };
        let config = self.session.borrow().config();
        log::info!("[audio] requesting microphone");
        let result = self.device.open(config).await;
        self.session.borrow_mut().finish_start(generation, result)
    }

    pub fn stop(&self) {
        self.session.borrow_mut().stop();
    }

    pub fn frequency_bands(&self) -> FrequencyBands {
        self.session.borrow_mut().frequency_bands()
    }

    pub fn is_ready(&self) -> bool {
        self.session.borrow().is_ready()
    }

    pub fn state(&self) -> SessionState {
        self.session.borrow().state().clone()
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}
