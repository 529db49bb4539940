use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("time {0} cannot be expressed relative to the element epoch")]
    Epoch(String),
    #[error("propagation error: {0}")]
    Propagation(String),
    #[error("invalid time window: {0}")]
    Window(String),
}

impl From<sgp4::Error> for PredictError {
    fn from(err: sgp4::Error) -> Self {
        PredictError::Propagation(err.to_string())
    }
}
