//! Session cookie endpoints

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, services::session::SESSION_COOKIE};

/// Login request; the email arrives pre-authenticated from an external
/// identity step, so no password is checked here.
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    pub success: bool,
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_path("/");
    if secure {
        // Cross-site deployments need SameSite=None, which browsers only
        // accept together with Secure.
        cookie.set_secure(true);
        cookie.set_same_site(SameSite::None);
    } else {
        cookie.set_same_site(SameSite::Lax);
    }
    cookie
}

/// Issue a session token and set it as an http-only cookie
#[utoipa::path(
    post,
    path = "/jwtLogin",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session cookie set", body = SessionResponse)
    )
)]
pub async fn jwt_login(
    State(state): State<crate::AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    let token = state.services.session.issue(&request.email)?;

    tracing::debug!("Issued session token for {}", request.email);

    let cookie = session_cookie(token, state.services.session.cookie_secure());
    Ok((jar.add(cookie), Json(SessionResponse { success: true })))
}

/// Clear the session cookie.
///
/// Logout is a client-side cookie clear only; a copy of the token held
/// elsewhere stays valid until it expires.
#[utoipa::path(
    post,
    path = "/jwtLogout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = SessionResponse)
    )
)]
pub async fn jwt_logout(jar: CookieJar) -> (CookieJar, Json<SessionResponse>) {
    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    (jar.remove(removal), Json(SessionResponse { success: true }))
}
