use thiserror::Error;

/// Every failure the dashboard can show to a moderator.
///
/// None of these are fatal: views surface them as an inline message or a
/// toast and the user retries by hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered but reported a failure.
    #[error("{0}")]
    Api(String),

    /// The backend answered with a body we could not read.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Caught on the client before any request was built.
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<gloo_net::Error> for AppError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => AppError::Decode(e.to_string()),
            other => AppError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_display_the_backend_message_verbatim() {
        let err = AppError::Api("DB error".into());
        assert_eq!(err.to_string(), "DB error");
    }

    #[test]
    fn json_errors_become_decode_errors() {
        let err: AppError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, AppError::Decode(_)));
        assert!(!err.is_validation());
    }
}
