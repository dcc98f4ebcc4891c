use thiserror::Error;

/// Errors raised by a language model provider
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model provider unavailable: {0}")]
    Unavailable(String),

    #[error("Model returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Model response could not be decoded: {0}")]
    Decode(String),

    #[error("Model returned no candidates")]
    EmptyResponse,

    #[error("Model response was blocked: {0}")]
    Blocked(String),

    #[error("No API key configured; set GEMINI_API_KEY or GOOGLE_API_KEY")]
    MissingApiKey,

    #[error("No canned response registered for flow '{0}'")]
    NoCannedResponse(String),

    #[error("{0}")]
    Scripted(String),
}

/// Errors raised while rendering a prompt template
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unclosed block '{{{{#{0}}}}}'")]
    UnclosedBlock(String),

    #[error("Unexpected '{{{{{0}}}}}' without an open block")]
    UnexpectedTag(String),

    #[error("Unsupported template helper '{0}'")]
    UnsupportedHelper(String),

    #[error("Media field '{field}' is not a valid data URI: {reason}")]
    InvalidMedia { field: String, reason: String },

    #[error("Template variables must be a JSON object")]
    NotAnObject,
}

/// Errors raised while parsing a `data:` URI
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DataUriError {
    #[error("Data URI is empty")]
    Empty,

    #[error("Missing 'data:' scheme")]
    MissingScheme,

    #[error("Missing ';base64,' marker")]
    MissingBase64Marker,

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Errors raised while running a flow against a model
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Flow '{flow}' input could not be serialized: {reason}")]
    InvalidInput { flow: String, reason: String },

    #[error("Prompt template error: {0}")]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Flow '{flow}' returned malformed output: {reason}")]
    MalformedOutput { flow: String, reason: String },
}
