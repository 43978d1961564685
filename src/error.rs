//! Error types for the layout engine.
//!
//! Only caller mistakes and malformed payloads are errors. Flow cycles,
//! missing anchors and snap misses are ordinary outcomes and never surface
//! here.

use crate::element::ElementId;

/// Maps an error to a stable code the host can switch on.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("unknown element id: {0}")]
    UnknownElementTag(String),
    #[error("element not found: {0}")]
    UnknownElement(ElementId),
    #[error("element is hidden: {0}")]
    ElementHidden(ElementId),
    #[error("gesture already in progress on {0}")]
    GestureInProgress(ElementId),
    #[error("invalid layout payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ErrorCode for LayoutError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownElementTag(_) => "E_UNKNOWN_ELEMENT_TAG",
            Self::UnknownElement(_) => "E_ELEMENT_NOT_FOUND",
            Self::ElementHidden(_) => "E_ELEMENT_HIDDEN",
            Self::GestureInProgress(_) => "E_GESTURE_IN_PROGRESS",
            Self::Payload(_) => "E_PAYLOAD",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a number: {value}")]
    NotANumber { var: &'static str, value: String },
    #[error("{var} must be a boolean (true/false/1/0), got {value}")]
    NotABool { var: &'static str, value: String },
    #[error("{var} must be greater than zero, got {value}")]
    NotPositive { var: &'static str, value: f64 },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotANumber { .. } => "E_CONFIG_NUMBER",
            Self::NotABool { .. } => "E_CONFIG_BOOL",
            Self::NotPositive { .. } => "E_CONFIG_RANGE",
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
