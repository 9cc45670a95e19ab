use crate::application::ports::DuplicateKey;

/// Failure taxonomy shared by every use case.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Missing or malformed input, or a reference to a missing record.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// Missing, malformed or expired credential, or a failed login.
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Permission(String),
    #[error("store failure: {0:#}")]
    Store(anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ServiceError::NotFound(msg.into())
    }

    pub fn permission(msg: impl Into<String>) -> Self {
        ServiceError::Permission(msg.into())
    }
}

// Unique-key violations reported by a store are a caller mistake, not an outage.
impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DuplicateKey>() {
            Some(dup) => ServiceError::Validation(dup.to_string()),
            None => ServiceError::Store(err),
        }
    }
}

/// Trims a required text field, rejecting blanks.
pub fn required(field: &str, value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("`{field}` is required")));
    }
    Ok(trimmed.to_string())
}

/// Like [`required`] for an optional patch field: absent stays absent.
pub fn optional(field: &str, value: Option<&str>) -> ServiceResult<Option<String>> {
    value.map(|v| required(field, v)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_becomes_validation() {
        let err: ServiceError = anyhow::Error::new(DuplicateKey("email".into())).into();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn other_store_errors_stay_store() {
        let err: ServiceError = anyhow::anyhow!("connection reset").into();
        assert!(matches!(err, ServiceError::Store(_)));
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(required("name", "   ").is_err());
        assert_eq!(required("name", " Paris ").unwrap(), "Paris");
        assert_eq!(optional("name", None).unwrap(), None);
        assert!(optional("name", Some("")).is_err());
    }
}
