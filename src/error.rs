use thiserror::Error;

/// Structurally invalid input surfaced to the caller.
///
/// Numerically degenerate situations (flat likelihood, zero test information)
/// are not represented here; they are recovered where they occur.
#[derive(Debug, Error)]
pub enum IrtError {
    #[error("invalid item parameters: a={discrimination}, b={difficulty}, c={guessing}")]
    InvalidParameters {
        discrimination: f64,
        difficulty: f64,
        guessing: f64,
    },
    #[error("ability estimation requires at least one response")]
    InsufficientData,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IrtError>;
