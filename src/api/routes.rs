use actix_web::{error::JsonPayloadError, web, HttpRequest};

use super::handlers;
use crate::error::AppError;

/// Largest accepted investigation upload.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Register all API routes. The caller supplies `web::Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/", web::get().to(handlers::index))
        .service(
            web::scope("/api")
                .route("/triage", web::post().to(handlers::triage))
                .route("/cnp/validate", web::post().to(handlers::validate_cnp))
                .route("/patients", web::post().to(handlers::create_patient))
                .route("/patients", web::get().to(handlers::list_patients))
                .route("/patients/{id}", web::get().to(handlers::get_patient))
                .route("/admissions", web::post().to(handlers::create_admission))
                .route("/admissions", web::get().to(handlers::list_admissions))
                .route("/admissions/{id}", web::get().to(handlers::get_admission))
                .route(
                    "/admissions/{id}/discharge",
                    web::post().to(handlers::discharge_admission),
                )
                .route("/wardmap/suggest", web::post().to(handlers::suggest_ward))
                .route("/auth/login", web::post().to(handlers::login))
                .route("/auth/logout", web::post().to(handlers::logout))
                .route("/auth/me", web::get().to(handlers::me))
                .route("/discharge/suggest", web::post().to(handlers::suggest_discharge))
                .route("/discharge/confirm", web::post().to(handlers::confirm_discharge))
                .route(
                    "/uploads/investigatie",
                    web::post().to(handlers::upload_investigation),
                )
                .route("/pdf/externare", web::post().to(handlers::discharge_pdf)),
        );
}
