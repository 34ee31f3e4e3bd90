use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrustError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("{service} responded with status {status}: {message}")]
    UpstreamError {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("Persistence error: {message}")]
    PersistenceError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Upstream,
    Persistence,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TrustError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrustError::ApiError(_) => ErrorCategory::Network,
            TrustError::UpstreamError { .. } => ErrorCategory::Upstream,
            TrustError::PersistenceError { .. } => ErrorCategory::Persistence,
            TrustError::IoError(_) => ErrorCategory::System,
            TrustError::SerializationError(_) => ErrorCategory::Data,
            TrustError::ConfigValidationError { .. }
            | TrustError::InvalidConfigValueError { .. }
            | TrustError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Persistence | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command-line flags, environment variables, or the TOML config file"
            }
            ErrorCategory::Network => "Check network connectivity to the upstream service",
            ErrorCategory::Upstream => "Check the upstream API key and quota",
            ErrorCategory::Persistence => "Check SUPABASE_URL, SUPABASE_ANON_KEY and the table name",
            ErrorCategory::Data => "Check the request payload",
            ErrorCategory::System => "Check file permissions and that the port is free",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TrustError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            TrustError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            TrustError::ConfigValidationError { field, message } => {
                format!("Setting '{}' is invalid: {}", field, message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrustError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = TrustError::MissingConfigError {
            field: "supabase_url".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(
            err.user_friendly_message(),
            "Missing required setting 'supabase_url'"
        );
    }

    #[test]
    fn test_upstream_error_display() {
        let err = TrustError::UpstreamError {
            service: "whois",
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "whois responded with status 503: unavailable");
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }
}
