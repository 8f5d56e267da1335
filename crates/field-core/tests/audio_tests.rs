// Audio session lifecycle against a mock capture device.

use field_core::*;
use pollster::block_on;
use std::cell::{Cell, RefCell};
use std::future::{ready, Future};
use std::rc::Rc;

#[derive(Default)]
struct Counters {
    opens: Cell<u32>,
    track_stops: Cell<u32>,
    closes: Cell<u32>,
    resumes: Cell<u32>,
}

fn bump(c: &Cell<u32>) {
    c.set(c.get() + 1);
}

struct MockDevice {
    counters: Rc<Counters>,
    failure: RefCell<Option<AudioError>>,
    start_suspended: bool,
    level: u8,
}

impl MockDevice {
    fn new(counters: Rc<Counters>) -> Self {
        Self {
            counters,
            failure: RefCell::new(None),
            start_suspended: false,
            level: 255,
        }
    }
}

struct MockHandle {
    counters: Rc<Counters>,
    bins: usize,
    tracks: u32,
    level: u8,
    suspended: bool,
    closed: bool,
}

impl CaptureDevice for MockDevice {
    type Handle = MockHandle;

    fn open(
        &self,
        config: AnalyserConfig,
    ) -> impl Future<Output = Result<MockHandle, AudioError>> {
        bump(&self.counters.opens);
        let result = match self.failure.borrow().clone() {
            Some(e) => Err(e),
            None => Ok(MockHandle {
                counters: self.counters.clone(),
                bins: config.bin_count(),
                tracks: 2,
                level: self.level,
                suspended: self.start_suspended,
                closed: false,
            }),
        };
        ready(result)
    }
}

impl CaptureHandle for MockHandle {
    fn bin_count(&self) -> usize {
        self.bins
    }

    fn read_bins(&mut self, out: &mut [u8]) {
        out.fill(self.level);
    }

    fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn resume(&mut self) {
        bump(&self.counters.resumes);
        self.suspended = false;
    }

    fn close(&mut self) {
        assert!(!self.closed, "handle closed twice");
        self.closed = true;
        for _ in 0..self.tracks {
            bump(&self.counters.track_stops);
        }
        bump(&self.counters.closes);
    }
}

fn provider() -> (AudioProvider<MockDevice>, Rc<Counters>) {
    let counters = Rc::new(Counters::default());
    let p = AudioProvider::new(MockDevice::new(counters.clone()), AnalyserConfig::default());
    (p, counters)
}

#[test]
fn bands_before_start_are_silent() {
    let (audio, _) = provider();
    assert!(!audio.is_ready());
    assert_eq!(audio.state(), SessionState::Idle);
    assert_eq!(audio.frequency_bands(), FrequencyBands::SILENT);
}

#[test]
fn second_start_while_active_acquires_nothing() {
    let (audio, counters) = provider();
    assert!(block_on(audio.start()));
    assert!(block_on(audio.start()));
    assert_eq!(counters.opens.get(), 1);
    assert_eq!(audio.state(), SessionState::Active);
}

#[test]
fn clones_share_one_session() {
    let (audio, counters) = provider();
    let other = audio.clone();
    assert!(block_on(audio.start()));
    assert!(other.is_ready());
    assert!(block_on(other.start()));
    assert_eq!(counters.opens.get(), 1);
}

#[test]
fn active_session_reports_analyser_levels() {
    let (audio, _) = provider();
    block_on(audio.start());
    let bands = audio.frequency_bands();
    assert!((bands.bass - 1.0).abs() < 1e-6);
    assert!((bands.mid - 1.0).abs() < 1e-6);
    assert!((bands.high - 1.0).abs() < 1e-6);
}

#[test]
fn stop_releases_tracks_and_context_once() {
    let (audio, counters) = provider();
    block_on(audio.start());
    audio.stop();
    assert_eq!(counters.track_stops.get(), 2);
    assert_eq!(counters.closes.get(), 1);
    assert_eq!(audio.state(), SessionState::Closed);
    assert_eq!(audio.frequency_bands(), FrequencyBands::SILENT);

    // a second stop and the final drop release nothing further
    audio.stop();
    drop(audio);
    assert_eq!(counters.track_stops.get(), 2);
    assert_eq!(counters.closes.get(), 1);
}

#[test]
fn dropping_last_handle_tears_down() {
    let (audio, counters) = provider();
    let consumer = audio.clone();
    block_on(audio.start());
    drop(audio);
    assert_eq!(counters.closes.get(), 0, "a consumer still holds the session");
    drop(consumer);
    assert_eq!(counters.track_stops.get(), 2);
    assert_eq!(counters.closes.get(), 1);
}

#[test]
fn stop_without_start_is_a_noop() {
    let (audio, counters) = provider();
    audio.stop();
    assert_eq!(audio.state(), SessionState::Idle);
    assert_eq!(counters.closes.get(), 0);
}

#[test]
fn permission_denied_leaves_session_failed() {
    let (audio, counters) = provider();
    *audio.device().failure.borrow_mut() = Some(AudioError::PermissionDenied);
    assert!(!block_on(audio.start()));
    assert!(!audio.is_ready());
    assert_eq!(
        audio.state(),
        SessionState::Failed(AudioError::PermissionDenied)
    );
    assert_eq!(audio.frequency_bands(), FrequencyBands::SILENT);
    assert_eq!(counters.closes.get(), 0);
}

#[test]
fn user_may_retry_after_failure() {
    let (audio, counters) = provider();
    *audio.device().failure.borrow_mut() =
        Some(AudioError::DeviceUnavailable("no input".into()));
    assert!(!block_on(audio.start()));
    *audio.device().failure.borrow_mut() = None;
    assert!(block_on(audio.start()));
    assert_eq!(counters.opens.get(), 2);
    assert!(audio.is_ready());
}

#[test]
fn restart_after_stop_reacquires() {
    let (audio, counters) = provider();
    block_on(audio.start());
    audio.stop();
    assert!(block_on(audio.start()));
    assert_eq!(counters.opens.get(), 2);
    assert_eq!(counters.closes.get(), 1);
}

#[test]
fn suspended_context_is_resumed_not_recreated() {
    let counters = Rc::new(Counters::default());
    let mut device = MockDevice::new(counters.clone());
    device.start_suspended = true;
    let audio = AudioProvider::new(device, AnalyserConfig::default());
    block_on(audio.start());
    assert_eq!(counters.resumes.get(), 0);
    block_on(audio.start());
    assert_eq!(counters.resumes.get(), 1);
    assert_eq!(counters.opens.get(), 1);
}

#[test]
fn request_in_flight_is_not_duplicated() {
    let counters = Rc::new(Counters::default());
    let mut session: AudioSession<MockHandle> = AudioSession::new(AnalyserConfig::default());
    let generation = match session.begin_start() {
        StartDecision::Proceed(g) => g,
        other => panic!("expected to proceed, got {other:?}"),
    };
    assert_eq!(session.begin_start(), StartDecision::InFlight);
    assert_eq!(*session.state(), SessionState::Requesting);

    let handle = block_on(MockDevice::new(counters.clone()).open(AnalyserConfig::default()));
    assert!(session.finish_start(generation, handle));
    assert!(session.is_ready());
}

#[test]
fn capture_finishing_after_stop_is_closed_immediately() {
    let counters = Rc::new(Counters::default());
    let device = MockDevice::new(counters.clone());
    let mut session: AudioSession<MockHandle> = AudioSession::new(AnalyserConfig::default());
    let StartDecision::Proceed(generation) = session.begin_start() else {
        panic!("expected to proceed");
    };
    session.stop();
    assert_eq!(*session.state(), SessionState::Closed);

    let late = block_on(device.open(AnalyserConfig::default()));
    assert!(!session.finish_start(generation, late));
    assert_eq!(*session.state(), SessionState::Closed);
    assert_eq!(counters.closes.get(), 1);
    assert_eq!(counters.track_stops.get(), 2);
}

#[test]
fn superseded_request_does_not_clobber_newer_one() {
    let counters = Rc::new(Counters::default());
    let device = MockDevice::new(counters.clone());
    let mut session: AudioSession<MockHandle> = AudioSession::new(AnalyserConfig::default());
    let StartDecision::Proceed(first) = session.begin_start() else {
        panic!("expected to proceed");
    };
    session.stop();
    let StartDecision::Proceed(second) = session.begin_start() else {
        panic!("expected to proceed");
    };
    assert_ne!(first, second);

    let stale = block_on(device.open(AnalyserConfig::default()));
    assert!(!session.finish_start(first, stale));
    assert_eq!(*session.state(), SessionState::Requesting);

    let fresh = block_on(device.open(AnalyserConfig::default()));
    assert!(session.finish_start(second, fresh));
    assert!(session.is_ready());
    assert_eq!(counters.closes.get(), 1);
}

#[test]
fn analyser_config_defaults_to_128_bins() {
    let config = AnalyserConfig::default();
    assert_eq!(config.fft_size, 256);
    assert_eq!(config.bin_count(), 128);
}
