use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

const SQLITE_UNIQUE_PREFIX: &str = "UNIQUE constraint failed: ";

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StorageError::ConstraintViolation(_) => true,
            StorageError::Database(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }

    /// Translate a write failure into a domain error, surfacing unique
    /// violations with the name of the offending constraint.
    pub(crate) fn from_write(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = error {
            if db_err.is_unique_violation() {
                let constraint = match db_err.constraint() {
                    Some(name) => name.to_string(),
                    None => constraint_from_message(db_err.message()),
                };
                return StorageError::ConstraintViolation(constraint);
            }
        }
        StorageError::from(error)
    }
}

/// SQLite names the column rather than the constraint. Rebuild the
/// PostgreSQL default name: `athlete.cpf` becomes `athlete_cpf_key`.
fn constraint_from_message(message: &str) -> String {
    match message.strip_prefix(SQLITE_UNIQUE_PREFIX) {
        Some(column) => format!("{}_key", column.replace('.', "_")),
        None => message.to_string(),
    }
}
