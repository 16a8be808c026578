use rocket::http::Status;
use snafu::Snafu;

/// Failure taxonomy shared by every service operation.
///
/// Each variant carries enough context for the caller to render a message;
/// the HTTP layer only looks at the kind via [`ServiceError::status`].
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ServiceError {
    #[snafu(display("{entity} {id} not found"))]
    NotFound { entity: &'static str, id: i32 },

    #[snafu(display("invalid input: {reason}"))]
    InvalidInput { reason: String },

    #[snafu(display("unavailable: {reason}"))]
    Unavailable { reason: String },

    #[snafu(display("team {team_id} already has the maximum of {limit} cars"))]
    LimitExceeded { team_id: i32, limit: i64 },

    #[snafu(display("persistence failure: {source}"))]
    #[snafu(context(false))]
    Internal { source: diesel::result::Error },
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i32) -> ServiceError {
        ServiceError::NotFound { entity, id }
    }

    pub fn invalid_input(reason: impl Into<String>) -> ServiceError {
        ServiceError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> ServiceError {
        ServiceError::Unavailable {
            reason: reason.into(),
        }
    }

    /// Map the error kind onto the http status the routes answer with.
    pub fn status(&self) -> Status {
        match self {
            ServiceError::NotFound { .. } => Status::NotFound,
            ServiceError::InvalidInput { .. } => Status::BadRequest,
            ServiceError::Unavailable { .. } => Status::Conflict,
            ServiceError::LimitExceeded { .. } => Status::Conflict,
            ServiceError::Internal { .. } => Status::InternalServerError,
        }
    }
}
