use thiserror::Error;

/// Tool failure; the display text is what the model reads back
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("{0}")]
    Rejected(String),

    #[error("Tool '{0}' is not available.")]
    UnknownTool(String),

    #[error("Tool '{tool}' was called with invalid arguments: {message}")]
    InvalidArguments { tool: String, message: String },
}

impl ToolError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}
