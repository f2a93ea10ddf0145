//! HTTP handlers.

use actix_multipart::{Multipart, MultipartError};
use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument, warn};
use validator::Validate;

use super::middleware::CurrentDoctor;
use super::routes::MAX_UPLOAD_BYTES;
use super::AppState;
use crate::clinical::{cnp, discharge, security, sheet, triage, wardmap};
use crate::error::{AppError, AppResult};
use crate::models::{
    AdmissionRequest, DischargeRecord, DischargeSheetRequest, DischargeSuggestRequest, DoctorPublic,
    Patient, PatientCreate, Sex, VitalsSnapshot, WardSuggestionRequest,
};
use crate::session::SESSION_COOKIE;

pub async fn index() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/static/login.html"))
        .finish()
}

// ===== Triage =====

#[instrument(skip_all)]
pub async fn triage(payload: web::Json<VitalsSnapshot>) -> HttpResponse {
    let result = triage::triage(payload.into_inner());
    info!(level = result.level, color = result.color.as_str(), "triage classified");
    HttpResponse::Ok().json(result)
}

#[derive(Debug, Deserialize)]
pub struct CnpRequest {
    pub cnp: String,
}

#[derive(Debug, Serialize)]
pub struct CnpInfo {
    pub birth_date: chrono::NaiveDate,
    pub sex: Sex,
    pub age: i32,
}

pub async fn validate_cnp(payload: web::Json<CnpRequest>) -> AppResult<HttpResponse> {
    let (birth_date, sex) = cnp::parse_identifier_strict(&payload.cnp)?;
    Ok(HttpResponse::Ok().json(CnpInfo {
        birth_date,
        sex,
        age: cnp::calculate_age(birth_date),
    }))
}

// ===== Patients =====

pub async fn create_patient(
    state: web::Data<AppState>,
    payload: web::Json<PatientCreate>,
) -> AppResult<HttpResponse> {
    let request = payload.into_inner();
    request.validate()?;
    let (birth_date, sex) = cnp::parse_identifier_strict(&request.cnp)?;

    let patient = state
        .db
        .records
        .add_patient(|id| Patient {
            id,
            cnp: request.cnp,
            name: request.name,
            birth_date,
            age: cnp::calculate_age(birth_date),
            sex,
            phone: request.phone,
            address: request.address,
        })
        .await?;
    Ok(HttpResponse::Ok().json(patient))
}

pub async fn list_patients(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.db.records.list_patients().await?))
}

pub async fn get_patient(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let patient = state
        .db
        .records
        .get_patient(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("patient {id}")))?;
    Ok(HttpResponse::Ok().json(patient))
}

// ===== Admissions =====

pub async fn create_admission(
    state: web::Data<AppState>,
    payload: web::Json<AdmissionRequest>,
) -> AppResult<HttpResponse> {
    let request = payload.into_inner();
    request.validate()?;
    let admission = state.db.records.add_admission(request).await?;
    Ok(HttpResponse::Ok().json(admission))
}

pub async fn list_admissions(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.db.records.list_admissions().await?))
}

pub async fn get_admission(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let admission = state
        .db
        .records
        .get_admission(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("admission {id}")))?;
    Ok(HttpResponse::Ok().json(admission))
}

pub async fn discharge_admission(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let admission = state
        .db
        .records
        .discharge_admission(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("admission {id}")))?;
    Ok(HttpResponse::Ok().json(admission))
}

pub async fn suggest_ward(payload: web::Json<WardSuggestionRequest>) -> HttpResponse {
    HttpResponse::Ok().json(wardmap::suggest_ward(&payload))
}

// ===== Auth =====

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub pin: String,
}

#[instrument(skip_all)]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    if !security::is_valid_pin(&payload.pin) {
        return Err(AppError::BadRequest("PIN invalid (4 cifre).".to_string()));
    }
    let found = state
        .db
        .doctors
        .find_by_pin(&state.config.auth.pin_salt, &payload.pin)
        .await?;
    let Some(doctor) = found else {
        warn!("login rejected");
        return Err(AppError::Unauthorized("PIN greșit.".to_string()));
    };

    let token = state.sessions.create(doctor.id);
    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(state.sessions.ttl().num_seconds()))
        .finish();
    info!(doctor_id = doctor.id, "doctor logged in");

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(DoctorPublic::from(&doctor)))
}

pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state.sessions.revoke(cookie.value());
    }
    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    removal.make_removal();
    HttpResponse::Ok().cookie(removal).json(json!({ "ok": true }))
}

pub async fn me(doctor: CurrentDoctor) -> HttpResponse {
    HttpResponse::Ok().json(doctor.0)
}

// ===== Discharge =====

pub async fn suggest_discharge(
    state: web::Data<AppState>,
    payload: web::Json<DischargeSuggestRequest>,
) -> AppResult<HttpResponse> {
    let history = state.db.history.load_or_empty().await;
    let suggestion =
        discharge::recall_discharge(payload.triage_level, payload.reason.as_deref(), &history)?;
    Ok(HttpResponse::Ok().json(suggestion))
}

pub async fn confirm_discharge(
    state: web::Data<AppState>,
    payload: web::Json<DischargeRecord>,
) -> AppResult<HttpResponse> {
    state.db.history.append(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

// ===== Uploads & discharge sheet =====

/// Form field carrying the investigation PDF.
const UPLOAD_FIELD: &str = "file";

pub async fn upload_investigation(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    while let Some(mut field) = payload.try_next().await.map_err(bad_upload)? {
        if field.name() != UPLOAD_FIELD {
            continue;
        }
        let name = field
            .content_disposition()
            .get_filename()
            .filter(|n| !n.is_empty())
            .unwrap_or("investigatie.pdf")
            .to_string();
        if !name.to_lowercase().ends_with(".pdf") {
            return Err(AppError::BadRequest("Se accepta doar fisiere PDF.".to_string()));
        }

        let mut body = web::BytesMut::new();
        while let Some(chunk) = field.try_next().await.map_err(bad_upload)? {
            if body.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::BadRequest("Fisier prea mare.".to_string()));
            }
            body.extend_from_slice(&chunk);
        }
        if !body.starts_with(b"%PDF") {
            return Err(AppError::BadRequest("Fisier PDF invalid.".to_string()));
        }

        let stored = state.db.uploads.save_pdf(&name, &body).await?;
        return Ok(HttpResponse::Ok().json(stored));
    }
    Err(AppError::BadRequest("Lipseste fisierul.".to_string()))
}

fn bad_upload(err: MultipartError) -> AppError {
    AppError::BadRequest(err.to_string())
}

#[instrument(skip_all, fields(doctor_id = doctor.0.id))]
pub async fn discharge_pdf(
    state: web::Data<AppState>,
    doctor: CurrentDoctor,
    payload: web::Json<DischargeSheetRequest>,
) -> AppResult<HttpResponse> {
    let request = payload.into_inner();
    let attachments = state.db.uploads.existing(request.attachments()).await;
    let sheet = sheet::compose(&request, &doctor.0, &state.config.hospital, &attachments);
    let pdf = sheet::render_pdf(&sheet);
    info!(pages = sheet.pages.len(), attachments = attachments.len(), "discharge sheet generated");

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            "attachment; filename=externare.pdf",
        ))
        .body(pdf))
}
