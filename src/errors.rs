use thiserror::Error;

pub type ParleyResult<T> = Result<T, ParleyError>;

#[derive(Debug, Error)]
pub enum ParleyError {
    #[error("API error: {0}")]
    Api(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("voice error: {0}")]
    Voice(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ParleyError {
    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn voice_error(msg: impl Into<String>) -> Self {
        Self::Voice(msg.into())
    }
}
