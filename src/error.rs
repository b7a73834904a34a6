//! Application error types with user-facing code mapping.

use thiserror::Error;

/// Application-level errors for pokedex.
#[derive(Error, Debug)]
pub enum AppError {
    // Fetch errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    // Domain errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Capacity exceeded: {0}")]
    Capacity(String),

    #[error("Already present: {0}")]
    Duplicate(String),

    // Persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Api { .. } => "API_ERROR",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Timeout(_) => "TIMEOUT",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Capacity(_) => "CAPACITY_ERROR",
            AppError::Duplicate(_) => "DUPLICATE_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(_) => "Pokémon not found. Check the name or number.".to_string(),
            AppError::Api { .. } | AppError::Decode(_) => {
                "Error talking to the Pokémon API.".to_string()
            }
            AppError::Network(_) => "Connection error. Check your internet.".to_string(),
            AppError::Timeout(_) => "The search took too long. Try again.".to_string(),
            AppError::Validation(msg) | AppError::Capacity(msg) | AppError::Duplicate(msg) => {
                msg.clone()
            }
            AppError::Storage(_) | AppError::Json(_) => "Local storage is unavailable.".to_string(),
            AppError::Config(e) => format!("Invalid configuration: {}", e),
        }
    }

    /// Whether this error came from the network layer (fetch failures).
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_)
                | AppError::Api { .. }
                | AppError::Network(_)
                | AppError::Timeout(_)
                | AppError::Decode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotFound("x".into()).code(), "NOT_FOUND");
        assert_eq!(
            AppError::Api {
                status: 500,
                message: String::new()
            }
            .code(),
            "API_ERROR"
        );
        assert_eq!(AppError::Timeout("x".into()).code(), "TIMEOUT");
        assert_eq!(AppError::Capacity("x".into()).code(), "CAPACITY_ERROR");
    }

    #[test]
    fn test_user_message_passes_domain_text_through() {
        let err = AppError::Duplicate("Pikachu is already a favorite".into());
        assert_eq!(err.user_message(), "Pikachu is already a favorite");
    }

    #[test]
    fn test_fetch_error_classification() {
        assert!(AppError::Network("reset".into()).is_fetch_error());
        assert!(!AppError::Validation("empty".into()).is_fetch_error());
    }
}
