use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlowError>;

/// Errors produced inside the inference flows. These never cross the flow
/// boundary: the public flow functions substitute a safe default and log
/// instead of surfacing them.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("inference call failed: {0}")]
    Inference(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed model output: {0}")]
    MalformedOutput(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from the frame-capture payload contract. Unlike flow errors
/// these are reported to the caller, since no inference call is made for
/// a frame that never existed.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("capture unavailable")]
    Unavailable,

    #[error("invalid frame payload: {0}")]
    InvalidPayload(String),
}
