use thiserror::Error;

/// Errors a ledger API call can come back with, bucketed by HTTP status.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_server_detail() {
        assert_eq!(
            ClientError::Validation("date is closed".to_string()).to_string(),
            "validation failed: date is closed"
        );
        assert_eq!(
            ClientError::Conflict("duplicate".to_string()).to_string(),
            "conflict: duplicate"
        );
        assert_eq!(ClientError::NotFound.to_string(), "not found");
    }
}
