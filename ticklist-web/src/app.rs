/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use ticklist_web::{app::{build_router, AppState}, config::Config};
/// use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     max_connections: config.database.max_connections,
///     ..Default::default()
/// })
/// .await?;
/// let app = build_router(AppState::new(pool, config));
/// # Ok(())
/// # }
/// ```
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use sqlx::PgPool;
use std::sync::Arc;
use ticklist_shared::{
    auth::session::{validate_session, CurrentUser, SESSION_COOKIE},
    models::user::User,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::Config;

/// Shared application state
///
/// Cloned per request via Axum's `State` extractor; `Arc` keeps the clone
/// cheap. The pool is the only store handle in the process — opened in
/// `main`, closed at shutdown, never a module-level global.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Secret used to sign and validate session tokens
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete router
///
/// ```text
/// /
/// ├── GET  /health            # liveness + db probe (public)
/// ├── GET|POST /register      # create account (public)
/// ├── GET|POST /login         # authenticate (public)
/// ├── GET  /                  # task list           ┐
/// ├── GET|POST /add           # create task         │ session
/// ├── GET|POST /edit/:id      # update task         │ required
/// ├── GET  /delete/:id        # delete task         │
/// └── GET  /logout            # destroy session     ┘
/// ```
///
/// Every route below the session middleware sees a [`CurrentUser`]
/// extension — the immutable principal resolved once per request.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public: no session needed
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/register",
            get(routes::auth::show_register).post(routes::auth::register),
        )
        .route(
            "/login",
            get(routes::auth::show_login).post(routes::auth::login),
        );

    // Guarded: a valid session is required for every task operation and logout
    let protected_routes = Router::new()
        .route("/", get(routes::tasks::index))
        .route(
            "/add",
            get(routes::tasks::show_add).post(routes::tasks::add),
        )
        .route(
            "/edit/:task_id",
            get(routes::tasks::show_edit).post(routes::tasks::edit),
        )
        .route("/delete/:task_id", get(routes::tasks::delete))
        .route("/logout", get(routes::auth::logout))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Session authentication middleware
///
/// The only access-control gate in the system, and it is binary: either a
/// valid session resolves to an existing user, or the request is bounced
/// to `/login`. Resolution happens once here; handlers receive the result
/// as an immutable [`CurrentUser`] extension and never consult ambient
/// state.
///
/// A token whose user has disappeared is treated exactly like a missing
/// or tampered token: the stale cookie is cleared and the caller must
/// re-authenticate.
async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());

    let token = match jar.get(SESSION_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => return Redirect::to("/login").into_response(),
    };

    let claims = match validate_session(&token, state.session_secret()) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!("Rejecting session token: {}", err);
            return login_redirect_clearing_session(jar);
        }
    };

    let user = match User::find_by_id(&state.db, claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::debug!(user_id = %claims.sub, "Session references a deleted user");
            return login_redirect_clearing_session(jar);
        }
        Err(err) => {
            tracing::error!("Failed to resolve session user: {}", err);
            return crate::error::WebError::Database(err).into_response();
        }
    };

    let principal = CurrentUser {
        id: user.id,
        username: user.username,
        email: user.email,
    };
    req.extensions_mut().insert(principal);

    next.run(req).await
}

/// Redirects to the login page, dropping the session cookie on the way out
fn login_redirect_clearing_session(jar: CookieJar) -> Response {
    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");

    (jar.remove(removal), Redirect::to("/login")).into_response()
}
