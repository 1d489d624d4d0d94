use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A row operation was called with indices or lengths that do not fit the
    /// row it was given.
    #[error("Row shape error: {0}")]
    Shape(String),

    /// Error with context chain for better debugging
    #[error("Error in {context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Add context to an error, creating an error chain.
    ///
    /// # Example
    /// ```rust,no_run
    /// use rowfuse_core::error::Error;
    /// let err = Error::Shape("index 7 out of bounds for row of 5 slots".into());
    /// let err = err.with_context("while removing projected columns");
    /// ```
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Error::Context {
            context: context.into(),
            source: Box::new(self) as Box<dyn std::error::Error + Send + Sync>,
        }
    }

    /// Get suggestions for common errors.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Error::Shape(msg) => {
                if msg.contains("sorted") || msg.contains("duplicate") {
                    vec!["Pass removal indices sorted ascending with no repeats".into()]
                } else if msg.contains("out of bounds") || msg.contains("exceeds") {
                    vec!["Check the row's slot count before slicing or removing".into(),
                         "Verify the schema used to compute positions matches the row".into()]
                } else {
                    vec![]
                }
            }
            Error::Config(msg) => {
                if msg.contains("slack") {
                    vec!["Set ROWFUSE_SLACK to a non-negative integer".into()]
                } else {
                    vec!["Check the ROWFUSE_* environment variables".into()]
                }
            }
            _ => vec![],
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
