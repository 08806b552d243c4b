/// Error handling for the web server
///
/// Handlers return `Result<T, WebError>`; the error converts into a
/// server-rendered HTML response. The taxonomy is small:
///
/// - missing form field → 400, message page (never a crash)
/// - not found / not owned → 404, explicit not-found page
/// - no valid session → redirect to the login entry point
/// - store or hashing failure → 500, generic page, detail only logged
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use ticklist_shared::auth::{password::PasswordError, session::SessionError};

use crate::views;

/// Handler result type alias
pub type WebResult<T> = Result<T, WebError>;

/// Unified error type for request handling
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// A form was submitted without a required field (400)
    #[error("missing form field: {0}")]
    MissingField(&'static str),

    /// The requested task does not exist or is not owned by the caller (404)
    #[error("not found")]
    NotFound,

    /// No valid session; the caller is redirected to the login page
    #[error("authentication required")]
    AuthRequired,

    /// Database failure (500, detail logged but not exposed)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failure (500)
    #[error("password operation failed: {0}")]
    Password(#[from] PasswordError),

    /// Session token failure (500; validation failures redirect instead)
    #[error("session operation failed: {0}")]
    Session(#[from] SessionError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                Html(views::message_page(
                    "Bad request",
                    &format!("Missing form field: {}", field),
                )),
            )
                .into_response(),
            WebError::NotFound => {
                (StatusCode::NOT_FOUND, Html(views::not_found_page())).into_response()
            }
            WebError::AuthRequired => Redirect::to("/login").into_response(),
            WebError::Database(err) => {
                tracing::error!("Database error: {}", err);
                internal_error_response()
            }
            WebError::Password(err) => {
                tracing::error!("Password error: {}", err);
                internal_error_response()
            }
            WebError::Session(err) => {
                tracing::error!("Session error: {}", err);
                internal_error_response()
            }
        }
    }
}

/// 500 response with no sensitive detail exposed
fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(views::message_page(
            "Something went wrong",
            "An internal error occurred. Please try again later.",
        )),
    )
        .into_response()
}

/// Whether a sqlx error is a violation of the named unique constraint
///
/// Used by registration to turn a duplicate-email insert into a
/// user-visible conflict instead of a 500.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .constraint()
            .map(|c| c.contains(constraint))
            .unwrap_or(false),
        _ => false,
    }
}
