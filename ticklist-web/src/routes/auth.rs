/// Authentication endpoints
///
/// # Endpoints
///
/// - `GET /register` — registration form
/// - `POST /register` — create account, redirect to `/login`
/// - `GET /login` — login form (renders any pending flash message)
/// - `POST /login` — authenticate, set session cookie, redirect to `/`
/// - `GET /logout` — clear session cookie, redirect to `/login` (guarded)
///
/// Login failure never discloses which of email or password was wrong:
/// unknown email and bad password produce the identical flashed message.
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use ticklist_shared::{
    auth::{
        password,
        session::{issue_session, SESSION_COOKIE},
    },
    models::user::{CreateUser, User},
};
use validator::Validate;

use crate::{
    app::AppState,
    error::{is_unique_violation, WebError, WebResult},
    views,
};

/// Cookie carrying a one-shot flash message across a redirect
const FLASH_COOKIE: &str = "ticklist_flash";

/// Registration form payload
///
/// Fields default to empty when absent so a stripped-down POST renders a
/// validation message instead of crashing the extractor.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// Display name
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Login email
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,

    /// Raw password; only its hash is ever stored
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login form payload
///
/// `Option` distinguishes a missing field (400) from an empty one.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Login email
    pub email: Option<String>,

    /// Raw password
    pub password: Option<String>,
}

/// Shows the registration form
pub async fn show_register() -> Html<String> {
    Html(views::register_page(None))
}

/// Creates a new account
///
/// All three fields must be non-empty; violations re-render the form with
/// a 400. A duplicate email re-renders with a 409 — accounts are unique
/// per email by construction. On success the user is *not* logged in;
/// they are redirected to `/login` with a flash message.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> WebResult<Response> {
    if let Err(errors) = form.validate() {
        let message = first_validation_message(&errors);
        return Ok((
            StatusCode::BAD_REQUEST,
            Html(views::register_page(Some(&message))),
        )
            .into_response());
    }

    let password_hash = password::hash_password(&form.password)?;

    let created = User::create(
        &state.db,
        CreateUser {
            username: form.username,
            email: form.email,
            password_hash,
        },
    )
    .await;

    match created {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "Registered new user");

            let flash = Cookie::build((FLASH_COOKIE, "Account created. Please log in."))
                .path("/")
                .http_only(true)
                .build();

            Ok((jar.add(flash), Redirect::to("/login")).into_response())
        }
        Err(err) if is_unique_violation(&err, "users_email_key") => Ok((
            StatusCode::CONFLICT,
            Html(views::register_page(Some(
                "That email is already registered.",
            ))),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

/// Shows the login form, consuming any pending flash message
pub async fn show_login(jar: CookieJar) -> (CookieJar, Html<String>) {
    let flash = jar.get(FLASH_COOKIE).map(|c| c.value().to_string());

    let jar = if flash.is_some() {
        let mut removal = Cookie::from(FLASH_COOKIE);
        removal.set_path("/");
        jar.remove(removal)
    } else {
        jar
    };

    (jar, Html(views::login_page(flash.as_deref())))
}

/// Authenticates a user and establishes a session
///
/// Looks the user up by exact email and verifies the password against the
/// stored Argon2id hash. On success a signed session token bound to the
/// user id is set in an HttpOnly cookie and the caller lands on `/`.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> WebResult<Response> {
    let email = form.email.ok_or(WebError::MissingField("email"))?;
    let password = form.password.ok_or(WebError::MissingField("password"))?;

    let user = User::find_by_email(&state.db, &email).await?;

    let verified = match &user {
        Some(user) => password::verify_password(&password, &user.password_hash)?,
        None => false,
    };

    let user = match (user, verified) {
        (Some(user), true) => user,
        _ => {
            return Ok((
                StatusCode::UNAUTHORIZED,
                Html(views::login_page(Some("Invalid email or password."))),
            )
                .into_response());
        }
    };

    let token = issue_session(user.id, state.session_secret())?;
    tracing::info!(user_id = %user.id, "User logged in");

    let session = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(session), Redirect::to("/")).into_response())
}

/// Destroys the current session
///
/// Reached only through the session middleware, so an anonymous caller is
/// redirected to `/login` before getting here.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");

    (jar.remove(removal), Redirect::to("/login"))
}

/// Extracts the first human-readable message from validation errors
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .filter_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid form submission".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_form_requires_all_fields() {
        let form = RegisterForm {
            username: String::new(),
            email: "a@x.com".to_string(),
            password: "pw1".to_string(),
        };
        assert!(form.validate().is_err());

        let form = RegisterForm {
            username: "alice".to_string(),
            email: String::new(),
            password: "pw1".to_string(),
        };
        assert!(form.validate().is_err());

        let form = RegisterForm {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: String::new(),
        };
        assert!(form.validate().is_err());

        let form = RegisterForm {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "pw1".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_register_form_rejects_malformed_email() {
        let form = RegisterForm {
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            password: "pw1".to_string(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_first_validation_message_is_human_readable() {
        let form = RegisterForm {
            username: String::new(),
            email: String::new(),
            password: String::new(),
        };
        let errors = form.validate().unwrap_err();
        let message = first_validation_message(&errors);

        assert!(message.contains("required") || message.contains("Invalid"));
    }
}
