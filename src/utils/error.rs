use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShipError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Order {id} cannot be shipped: {reason}")]
    InvalidOrder { id: String, reason: String },

    #[error("Carrier API error: {message}")]
    CarrierError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ShipError {
    /// Carrier token rejections get a different hint than ordinary carrier
    /// failures: the usual cause is a sandbox token pointed at production or
    /// vice versa.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            ShipError::CarrierError { message } => {
                message.contains("Unauthenticated") || message.contains("401")
            }
            ShipError::ApiError(e) => e.status() == Some(reqwest::StatusCode::UNAUTHORIZED),
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ShipError::NotFound { entity, id } => {
                format!(
                    "{} '{}' was not found. Check the identifier and try again.",
                    entity, id
                )
            }
            ShipError::CarrierError { message } if self.is_auth_failure() => {
                format!(
                    "Carrier authentication failed ({}). Verify that the token matches the selected environment (sandbox vs production).",
                    message
                )
            }
            ShipError::CarrierError { message } => {
                format!("The carrier rejected the request: {}", message)
            }
            ShipError::ApiError(e) => format!("Upstream request failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failure_detected_from_carrier_message() {
        let err = ShipError::CarrierError {
            message: "Unauthenticated".to_string(),
        };
        assert!(err.is_auth_failure());
        assert!(err.user_friendly_message().contains("sandbox"));
    }

    #[test]
    fn plain_carrier_error_is_not_auth_failure() {
        let err = ShipError::CarrierError {
            message: "invalid postal code".to_string(),
        };
        assert!(!err.is_auth_failure());
    }
}
