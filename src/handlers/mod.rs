pub mod auth;
pub mod dashboard;
pub mod portfolio;
pub mod public;
pub mod services;
pub mod sitemap;
pub mod uploads;

use actix_web::{HttpResponse, web};
use sea_orm::DbErr;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Public routes (no authentication, published records only) ──
    cfg.service(
        web::scope("/public")
            .route("/home", web::get().to(public::home))
            .route("/portfolios", web::get().to(public::portfolios))
            .route("/portfolios/{slug}", web::get().to(public::portfolio_by_slug))
            .route("/services", web::get().to(public::services)),
    );

    // ── Session routes ──
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(auth::login))
            .route("/session", web::get().to(auth::session))
            .route("/logout", web::post().to(auth::logout)),
    );

    // ── Admin routes (all protected by the AuthenticatedAdmin extractor) ──
    cfg.service(
        web::scope("/admin")
            .route("/stats", web::get().to(dashboard::stats))
            .route("/uploads", web::post().to(uploads::upload_image))
            .service(
                web::scope("/portfolios")
                    .route("", web::get().to(portfolio::get_portfolios))
                    .route("", web::post().to(portfolio::create_portfolio))
                    .route("/reorder", web::post().to(portfolio::reorder_portfolios))
                    .route("/reorder/status", web::get().to(portfolio::reorder_status))
                    .route("/{id}", web::get().to(portfolio::get_portfolio))
                    .route("/{id}", web::put().to(portfolio::update_portfolio))
                    .route("/{id}", web::delete().to(portfolio::delete_portfolio))
                    .route("/{id}/status", web::put().to(portfolio::update_status)),
            )
            .service(
                web::scope("/services")
                    .route("", web::get().to(services::get_services))
                    .route("", web::post().to(services::create_service))
                    .route("/reorder", web::post().to(services::reorder_services))
                    .route("/reorder/status", web::get().to(services::reorder_status))
                    .route("/{id}", web::get().to(services::get_service))
                    .route("/{id}", web::put().to(services::update_service))
                    .route("/{id}", web::delete().to(services::delete_service))
                    .route("/{id}/status", web::put().to(services::update_status)),
            ),
    );
}

/// JSON body `{"error": message}` with the given status.
fn error_response(mut builder: actix_web::HttpResponseBuilder, message: String) -> HttpResponse {
    builder.json(serde_json::json!({ "error": message }))
}

/// Map a failed write to 404 when the record is gone, 500 otherwise.
fn write_error(context: &str, e: DbErr) -> HttpResponse {
    match e {
        DbErr::RecordNotFound(msg) => error_response(HttpResponse::NotFound(), msg),
        e => {
            tracing::error!("{context}: {e}");
            error_response(HttpResponse::InternalServerError(), format!("{context}: {e}"))
        }
    }
}
