use actix_web::{HttpResponse, Responder, web};

use super::error_response;
use crate::auth::SessionError;
use crate::auth::middleware::AuthenticatedAdmin;
use crate::auth::session::{DASHBOARD_PATH, LoginRequest, SessionClient};

/// POST /api/auth/login — sign in with email and password.
///
/// On success returns the Supabase session and the path the admin frontend
/// should redirect to.
pub async fn login(
    sessions: web::Data<SessionClient>,
    body: web::Json<LoginRequest>,
) -> impl Responder {
    let credentials = body.into_inner();
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return error_response(
            HttpResponse::BadRequest(),
            "Email and password are required".to_string(),
        );
    }

    match sessions.sign_in(&credentials).await {
        Ok(session) => HttpResponse::Ok().json(serde_json::json!({
            "session": session,
            "redirect_to": DASHBOARD_PATH,
        })),
        Err(SessionError::Rejected { message, .. }) => {
            error_response(HttpResponse::Unauthorized(), message)
        }
        Err(e) => error_response(HttpResponse::BadGateway(), format!("Failed to sign in: {e}")),
    }
}

/// GET /api/auth/session — the current admin session, or 401.
pub async fn session(admin: AuthenticatedAdmin) -> impl Responder {
    HttpResponse::Ok().json(admin.0)
}

/// POST /api/auth/logout — revoke the current session.
pub async fn logout(
    admin: AuthenticatedAdmin,
    sessions: web::Data<SessionClient>,
) -> impl Responder {
    match sessions.sign_out(&admin.0.access_token).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Signed out",
        })),
        Err(e) => error_response(HttpResponse::BadGateway(), format!("Failed to sign out: {e}")),
    }
}
