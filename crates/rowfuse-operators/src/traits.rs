//! Operator error type shared by the merger, reconciler, and stages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("planning error: {0}")]
    Plan(String),

    #[error("execution error: {0}")]
    Exec(String),

    #[error("schema error: {0}")]
    Schema(String),

    /// An output field that no input stream carries.
    #[error("field '{0}' not found in any input schema")]
    MissingField(String),
}

pub type Result<T> = std::result::Result<T, OpError>;

impl OpError {
    /// Add context to an error, creating an error chain.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        let ctx = context.into();
        match self {
            OpError::Plan(msg) => OpError::Plan(format!("{}: {}", ctx, msg)),
            OpError::Exec(msg) => OpError::Exec(format!("{}: {}", ctx, msg)),
            OpError::Schema(msg) => OpError::Schema(format!("{}: {}", ctx, msg)),
            OpError::MissingField(name) => {
                OpError::Schema(format!("{}: field '{}' not found in any input schema", ctx, name))
            }
        }
    }

    /// Get suggestions for common errors.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            OpError::MissingField(name) => {
                vec![format!("Check that some upstream stage produces '{}'", name),
                     "Build the output schema by merging the input schemas".into(),
                     "Use the null missing-field policy to tolerate absent fields".into()]
            }
            OpError::Plan(msg) => {
                if msg.contains("schemas") || msg.contains("rows") {
                    vec!["Pass one schema per input row, in stream order".into()]
                } else {
                    vec![]
                }
            }
            _ => vec![],
        }
    }
}

impl From<rowfuse_core::error::Error> for OpError {
    fn from(e: rowfuse_core::error::Error) -> Self {
        use rowfuse_core::error::Error;
        match e {
            Error::Config(msg) => OpError::Plan(msg),
            other => OpError::Exec(other.to_string()),
        }
    }
}
