use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    /// Connectivity failure or a non-success HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body does not match the expected schema.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ShelfError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ShelfError::Decode(err.to_string())
        } else {
            ShelfError::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ShelfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let err: ShelfError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, ShelfError::Io(_)));
        assert_eq!(err.to_string(), "IO error: boom");
    }

    #[test]
    fn display_names_the_kind() {
        assert_eq!(
            ShelfError::Network("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
        assert_eq!(
            ShelfError::Decode("missing field `id`".into()).to_string(),
            "Decode error: missing field `id`"
        );
    }
}
