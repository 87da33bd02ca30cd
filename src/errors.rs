use thiserror::Error;
#[derive(Error, Debug)]
pub enum MediawikiApiError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("configuration error: {0}")]
    ConfigurationError(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server error {status}: {body}")]
    ServerError {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("api error {code}: {info}")]
    ApiError { code: String, info: String },
    #[error("login failed: {0}")]
    LoginFailed(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MediawikiApiError>;
