#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    #[error("image search request failed: {0}")]
    Http(String),

    #[error("image search timed out")]
    Timeout,

    #[error("image search returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("image search response could not be read: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ImageError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ImageError::Timeout
        } else if e.is_decode() {
            ImageError::Decode(e.to_string())
        } else {
            ImageError::Http(e.to_string())
        }
    }
}
