use thiserror::Error;

pub type HistogramResult<T> = Result<T, HistogramError>;

#[derive(Debug, Error)]
pub enum HistogramError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid scale: {0}")]
    InvalidScale(String),

    #[error("invalid primitive: {0}")]
    InvalidPrimitive(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
