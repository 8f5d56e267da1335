use thiserror::Error;

/// Failures at the capture boundary. These never reach the simulation or
/// render layers; the session records them and reports all-zero bands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    #[error("microphone permission denied")]
    PermissionDenied,
    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("audio capture is not supported in this environment")]
    Unsupported,
    #[error("audio session was closed before capture completed")]
    Closed,
}

/// Authoring errors for mode bundles, raised when a registry is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModeError {
    #[error("mode `{id}` has tension {value} outside (0, 1]")]
    InvalidTension { id: String, value: f32 },
    #[error("mode `{id}` has friction {value} outside (0, 1]")]
    InvalidFriction { id: String, value: f32 },
    #[error("duplicate mode id `{0}`")]
    DuplicateId(String),
    #[error("mode registry is empty")]
    Empty,
    #[error("unknown mode id `{0}`")]
    UnknownId(String),
}
