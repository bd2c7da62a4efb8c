use thiserror::Error;

/// Errors raised while loading or validating externally authored profile data.
///
/// These are load-time errors only. Once a profile passes validation the
/// simulation never surfaces a fatal error to the host: runtime anomalies
/// (missing animation, out-of-range frame index, bad delta time) are
/// recovered locally and logged.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("profile '{profile}' is missing required animation '{state}'")]
    MissingAnimation { profile: String, state: String },

    #[error("animation '{state}' has no frames")]
    EmptyAnimation { state: String },

    #[error("animation '{state}' frame {frame} has zero duration")]
    ZeroFrameDuration { state: String, frame: usize },

    #[error("animation '{state}' has non-positive base frame rate")]
    BadFrameRate { state: String },

    #[error("'{from}' transitions to unknown state '{target}'")]
    UnknownTargetState { from: String, target: String },

    #[error("move '{name}' has an empty motion sequence")]
    EmptyMotion { name: String },

    #[error("move '{name}' uses unknown motion token '{token}'")]
    UnknownMotionToken { name: String, token: String },

    #[error("move '{name}' has negative meter cost")]
    NegativeMeterCost { name: String },
}

pub type Result<T> = std::result::Result<T, ProfileError>;
