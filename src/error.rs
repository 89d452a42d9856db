use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Input was not a collection at all. Callers guard against this before
    /// handing records to the aggregators.
    #[error("invalid input shape: {0}")]
    InvalidShape(String),

    #[error("json error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ChartError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value.to_string())
    }
}
