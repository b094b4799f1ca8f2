//! Conversions from external infrastructure errors into domain errors.

use boqlens_domain::BoqLensError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BoqLensError);

impl From<InfraError> for BoqLensError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<rusqlite::Error> for InfraError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        let mapped = match err {
            RE::QueryReturnedNoRows => {
                BoqLensError::NotFound("no rows returned by query".into())
            }
            RE::SqliteFailure(code, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match code.code {
                    ErrorCode::DatabaseBusy => BoqLensError::Database("database is busy".into()),
                    ErrorCode::DatabaseLocked => {
                        BoqLensError::Database("database is locked".into())
                    }
                    ErrorCode::ConstraintViolation => BoqLensError::Database(format!(
                        "constraint violation (code {}): {message}",
                        code.extended_code
                    )),
                    _ => BoqLensError::Database(format!(
                        "sqlite failure {:?} (code {}): {message}",
                        code.code, code.extended_code
                    )),
                }
            }
            other => BoqLensError::Database(other.to_string()),
        };
        Self(mapped)
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(err: r2d2::Error) -> Self {
        Self(BoqLensError::Database(format!("connection pool error: {err}")))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(err: std::io::Error) -> Self {
        Self(BoqLensError::Storage(err.to_string()))
    }
}

impl From<csv::Error> for InfraError {
    fn from(err: csv::Error) -> Self {
        Self(BoqLensError::Decode(err.to_string()))
    }
}

/// Map a blocking-task join failure to a domain error.
pub fn map_join_error(err: tokio::task::JoinError) -> BoqLensError {
    BoqLensError::Internal(format!("blocking task failed: {err}"))
}
