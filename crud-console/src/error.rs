use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// A bound element id is not present in the document.
    #[error("element not found: #{0}")]
    ElementNotFound(String),

    /// Presence check failed before a request was built.
    #[error("{0} is required")]
    MissingInput(&'static str),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
