//! Authentication route handlers.
//!
//! Login and registration validate input locally (never sending bad values
//! to the backend), then call the auth endpoints. Outcome messages ride on
//! redirect query parameters, the way the original surfaced its snackbars.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use quickbasket_core::credentials::{validate_login, validate_registration};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::MessageQuery;
use crate::state::AppState;

/// Connectivity message for auth calls.
pub const AUTH_UNAVAILABLE: &str =
    "Something went wrong. Check that the backend is running, reachable and returns valid JSON.";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Redirect carrying an error message in the query string.
fn redirect_with_error(path: &str, message: &str) -> Response {
    Redirect::to(&format!("{path}?error={}", urlencoding::encode(message))).into_response()
}

/// Redirect carrying a success message in the query string.
fn redirect_with_success(path: &str, message: &str) -> Response {
    Redirect::to(&format!("{path}?success={}", urlencoding::encode(message))).into_response()
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission.
///
/// On success, creates the session user (username, balance, token together)
/// and redirects home.
#[instrument(skip_all, fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if let Err(rule) = validate_login(&form.username, &form.password) {
        return Ok(redirect_with_error("/auth/login", &rule.to_string()));
    }

    match state.api().login(&form.username, &form.password).await {
        Ok(granted) => {
            let user = CurrentUser {
                username: granted.username,
                balance: granted.balance,
                token: granted.token,
            };

            set_current_user(&session, &user).await?;

            Ok(redirect_with_success("/", "Logged in Successfully"))
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            Ok(redirect_with_error(
                "/auth/login",
                e.backend_message().unwrap_or(AUTH_UNAVAILABLE),
            ))
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate { error: query.error }
}

/// Handle registration form submission.
///
/// Registration does not log the user in; it redirects to the login page,
/// as the original did.
#[instrument(skip_all, fields(username = %form.username))]
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    if let Err(rule) =
        validate_registration(&form.username, &form.password, &form.confirm_password)
    {
        return redirect_with_error("/auth/register", &rule.to_string());
    }

    match state.api().register(&form.username, &form.password).await {
        Ok(()) => redirect_with_success("/auth/login", "Registered Successfully"),
        Err(e) => {
            tracing::warn!("Registration failed: {e}");
            redirect_with_error(
                "/auth/register",
                e.backend_message().unwrap_or(AUTH_UNAVAILABLE),
            )
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Destroys the whole session, so token, username, and balance are cleared
/// together.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Response, AppError> {
    clear_current_user(&session).await?;
    session.flush().await?;

    Ok(Redirect::to("/").into_response())
}
