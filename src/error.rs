// file: src/error.rs
// version: 3.0.0
// guid: 57b83a63-07b6-4534-aa6c-51e8797254e0

use std::fmt;
use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, OtpError>;

/// Stage of a QR reissue that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReissueStage {
    Delete,
    Resync,
}

impl fmt::Display for ReissueStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReissueStage::Delete => write!(f, "del user"),
            ReissueStage::Resync => write!(f, "resync users"),
        }
    }
}

/// Error types for the multiOTP facade
#[derive(Error, Debug)]
pub enum OtpError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User doesn't exist: {user}")]
    UserNotFound { user: String },

    #[error("{operation} output doesn't match '^otpauth:', output: {output}")]
    FormatMismatch { operation: String, output: String },

    #[error("Unknown {} from {operation}: {output}", describe_code(.code))]
    UnknownExit {
        operation: String,
        code: Option<i32>,
        output: String,
    },

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("reissue qr: failed to {stage}: {source}")]
    Reissue {
        stage: ReissueStage,
        #[source]
        source: Box<OtpError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "termination by signal".to_string(),
    }
}

impl OtpError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new precondition error
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn user_not_found(user: impl Into<String>) -> Self {
        Self::UserNotFound { user: user.into() }
    }

    /// Wrap a failure from one stage of a reissue
    pub fn reissue(stage: ReissueStage, source: OtpError) -> Self {
        Self::Reissue {
            stage,
            source: Box::new(source),
        }
    }

    /// True when the external binary reported that the user is absent,
    /// looking through reissue wrappers.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::UserNotFound { .. } => true,
            Self::Reissue { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Raw exit code carried by an unknown-exit error
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::UnknownExit { code, .. } => *code,
            Self::Reissue { source, .. } => source.exit_code(),
            _ => None,
        }
    }
}
