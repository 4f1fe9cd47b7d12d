use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use thiserror::Error;

/// Errors surfaced to API callers. Detail is logged where the failure
/// happens; the response body only carries the generic message below.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("Email or username already exists")]
    Conflict,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Please authenticate.")]
    Unauthorized,
    #[error("Please verify your email before logging in")]
    NotVerified,
    #[error("Invalid or expired verification code")]
    InvalidCode,
    #[error("Too many verification attempts. Please try again later.")]
    RateLimited,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::Validation(_) | ApiError::InvalidCode => Status::BadRequest,
            ApiError::Conflict => Status::Conflict,
            ApiError::InvalidCredentials | ApiError::Unauthorized => Status::Unauthorized,
            ApiError::NotVerified => Status::Forbidden,
            ApiError::RateLimited => Status::TooManyRequests,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Internal => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        make_json_response!(status.code, self.to_string()).respond_to(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_expected_statuses() {
        assert_eq!(ApiError::Validation("x").status().code, 400);
        assert_eq!(ApiError::InvalidCode.status().code, 400);
        assert_eq!(ApiError::InvalidCredentials.status().code, 401);
        assert_eq!(ApiError::Unauthorized.status().code, 401);
        assert_eq!(ApiError::NotVerified.status().code, 403);
        assert_eq!(ApiError::NotFound("Video not found").status().code, 404);
        assert_eq!(ApiError::Conflict.status().code, 409);
        assert_eq!(ApiError::RateLimited.status().code, 429);
        assert_eq!(ApiError::Internal.status().code, 500);
    }

    #[test]
    fn internal_error_body_stays_generic() {
        assert_eq!(ApiError::Internal.to_string(), "Internal server error");
    }
}
