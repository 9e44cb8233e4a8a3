pub mod athletes;
pub mod categories;
pub mod training_centers;

use storage::{error::StorageError, models::Record, session::Session};

use crate::error::{ApiResult, WebError};

/// Insert `record` and commit the session. A violation of the `natural_key`
/// constraint becomes a `Conflict` carrying the message from `conflict`;
/// any other failure is passed through as a storage error.
pub(crate) async fn add_and_commit(
    mut session: Box<dyn Session>,
    record: Record,
    natural_key: &str,
    conflict: impl FnOnce() -> String,
) -> ApiResult<()> {
    let written = match session.add(record).await {
        Ok(()) => session.commit().await,
        Err(e) => Err(e),
    };

    written.map_err(|e| match e {
        StorageError::ConstraintViolation(ref constraint) if constraint == natural_key => {
            WebError::Conflict(conflict())
        }
        other => WebError::from(other),
    })
}
