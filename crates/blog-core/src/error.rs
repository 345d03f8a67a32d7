//! Domain-level error types.

use thiserror::Error;

use crate::validation::FieldError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i64 },

    #[error("Validation failed: {}", format_fields(.0))]
    Validation(Vec<FieldError>),

    /// A foreign key points at a row that does not exist.
    #[error("{0}")]
    MissingReference(&'static str),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: i64) -> Self {
        Self::NotFound { entity_type, id }
    }
}

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    /// Unique index violation.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A foreign key points at a row that is not stored.
    #[error("Foreign key violation: {0}")]
    ForeignKey(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            other => DomainError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let err = DomainError::Validation(vec![
            FieldError::new("titulo", "obrigatório"),
            FieldError::new("texto", "curto"),
        ]);

        assert_eq!(
            err.to_string(),
            "Validation failed: titulo: obrigatório; texto: curto"
        );
    }

    #[test]
    fn test_constraint_maps_to_duplicate() {
        let err: DomainError = RepoError::Constraint("login".to_string()).into();
        assert!(matches!(err, DomainError::Duplicate(_)));

        let err: DomainError = RepoError::Query("boom".to_string()).into();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[test]
    fn test_foreign_key_is_not_a_duplicate() {
        let err: DomainError = RepoError::ForeignKey("tema_id".to_string()).into();
        assert!(!matches!(err, DomainError::Duplicate(_)));
    }
}
