//! Request extractors.

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::Future;
use std::pin::Pin;

use super::AppState;
use crate::error::AppError;
use crate::models::DoctorPublic;
use crate::session::SESSION_COOKIE;

/// The doctor owning the request's session cookie. Extraction fails with
/// 401 when there is no valid session.
#[derive(Debug, Clone)]
pub struct CurrentDoctor(pub DoctorPublic);

impl FromRequest for CurrentDoctor {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

        Box::pin(async move {
            let unauthenticated = || AppError::Unauthorized("Neautentificat.".to_string());
            let (Some(state), Some(token)) = (state, token) else {
                return Err(unauthenticated());
            };
            let doctor_id = state.sessions.resolve(&token).ok_or_else(unauthenticated)?;
            let doctor = state
                .db
                .doctors
                .get_by_id(doctor_id)
                .await?
                .ok_or_else(unauthenticated)?;
            Ok(CurrentDoctor(DoctorPublic::from(&doctor)))
        })
    }
}
