use thiserror::Error;

pub type I13nResult<T> = Result<T, I13nError>;

pub type DispatchResult = Result<(), DispatchError>;

/// Contract violations raised while shaping a hit. These are programming
/// errors on the caller's side and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("hit type {0} not supported")]
    UnsupportedHitType(String),

    #[error("missing argument for {hit_type}: {field}")]
    MissingField { hit_type: String, field: String },
}

#[derive(Error, Debug)]
pub enum I13nError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Plugin {plugin} has no handler for event {event}")]
    UnhandledEvent { plugin: String, event: String },

    #[error("Handler {event} cannot accept a {payload} payload")]
    PayloadMismatch { event: String, payload: &'static str },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
