// libs/reschedule-cell/src/handlers.rs
use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Form, FromRequest, Multipart, Path, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use messaging_cell::{InboundSms, TWIML_CONTENT_TYPE};
use shared_models::error::AppError;

use crate::models::{
    ConfirmTimeRequest, InitialMessageResponse, LogoUpload, NewAppointmentRequest,
    NewOptionsRequest, RescheduleError, SelectionOutcome,
};
use crate::services::{BrandingService, NotificationService, RescheduleService};
use crate::state::RescheduleState;

const LOGO_FIELD: &str = "facility_logo";

// ==============================================================================
// FORM PARSING
// ==============================================================================

struct InitialMessageForm {
    fields: HashMap<String, String>,
    logo: Option<LogoUpload>,
}

impl InitialMessageForm {
    async fn from_request(request: Request, state: &Arc<RescheduleState>) -> Result<Self, AppError> {
        let is_multipart = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(request, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(Self { fields, logo: None });
        }

        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let mut fields = HashMap::new();
        let mut logo = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == LOGO_FIELD {
                let filename = field.file_name().map(str::to_owned).unwrap_or_default();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                if !filename.is_empty() {
                    logo = Some(LogoUpload {
                        filename,
                        data: data.to_vec(),
                    });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                fields.insert(name, value);
            }
        }

        Ok(Self { fields, logo })
    }

    fn required(&mut self, name: &str) -> Result<String, AppError> {
        self.fields
            .remove(name)
            .ok_or_else(|| AppError::BadRequest(format!("Missing required field: {}", name)))
    }

    fn into_request(mut self) -> Result<(NewAppointmentRequest, Option<LogoUpload>), AppError> {
        let request = NewAppointmentRequest {
            phone: self.required("phone")?,
            name: self.required("name")?,
            missed_time: self.required("missed_time")?,
            provider_name: self.fields.remove("provider_name"),
            facility_name: self.fields.remove("facility_name"),
        };
        Ok((request, self.logo))
    }
}

// ==============================================================================
// HANDLERS
// ==============================================================================

/// Create a reschedule session and text the patient.
#[axum::debug_handler]
pub async fn send_initial_message(
    State(state): State<Arc<RescheduleState>>,
    request: Request,
) -> Result<Json<InitialMessageResponse>, AppError> {
    let (appointment, logo) = InitialMessageForm::from_request(request, &state)
        .await?
        .into_request()?;

    let record = RescheduleService::new(&state)
        .create_appointment(appointment, logo)
        .await
        .map_err(|e| match e {
            RescheduleError::InvalidTimeFormat(_) | RescheduleError::OutOfRange(_) => {
                AppError::ValidationError("Invalid missed_time format".to_string())
            }
            _ => AppError::Internal(e.to_string()),
        })?;

    NotificationService::new(&state)
        .send_initial_message(&record)
        .await
        .map_err(|_| AppError::ExternalService("Failed to send SMS".to_string()))?;

    Ok(Json(InitialMessageResponse {
        message: "Initial message sent".to_string(),
        token: record.token,
    }))
}

/// Forward a secure link to the front-end reschedule page.
#[axum::debug_handler]
pub async fn choose_time(
    State(state): State<Arc<RescheduleState>>,
    Path(token): Path<String>,
) -> Response {
    match RescheduleService::new(&state).get_appointment(&token).await {
        Ok(_) => (
            StatusCode::FOUND,
            [(header::LOCATION, state.config.secure_link(&token))],
        )
            .into_response(),
        Err(e) => {
            debug!("Rejected secure link for {}: {}", token, e);
            (StatusCode::NOT_FOUND, "Invalid or expired link").into_response()
        }
    }
}

#[axum::debug_handler]
pub async fn confirm_time(
    State(state): State<Arc<RescheduleState>>,
    Json(request): Json<ConfirmTimeRequest>,
) -> Result<Json<Value>, AppError> {
    let token = request
        .token
        .ok_or_else(|| AppError::BadRequest("Missing required field: token".to_string()))?;
    let time = request
        .time
        .ok_or_else(|| AppError::BadRequest("Missing required field: time".to_string()))?;

    let outcome = RescheduleService::new(&state)
        .select_time(&token, &time)
        .await
        .map_err(|e| match e {
            RescheduleError::NotFound => AppError::BadRequest("Invalid token".to_string()),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(match outcome {
        SelectionOutcome::Confirmed { .. } => json!({
            "message": "Appointment confirmed"
        }),
        SelectionOutcome::NewOptions(options) => json!({
            "message": "New options generated",
            "newOptions": [options.option1, options.option2]
        }),
    }))
}

#[axum::debug_handler]
pub async fn get_new_options(
    State(state): State<Arc<RescheduleState>>,
    Json(request): Json<NewOptionsRequest>,
) -> Result<Json<Value>, AppError> {
    let token = request
        .token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::BadRequest("Invalid token".to_string()))?;

    let options = RescheduleService::new(&state)
        .regenerate_options(&token)
        .await
        .map_err(|e| match e {
            RescheduleError::NotFound => AppError::BadRequest("Invalid token".to_string()),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!(options)))
}

#[axum::debug_handler]
pub async fn get_branding(
    State(state): State<Arc<RescheduleState>>,
    Path(token): Path<String>,
) -> Result<Json<Value>, AppError> {
    let branding = BrandingService::new(&state)
        .get_branding(&token)
        .await
        .map_err(|e| match e {
            RescheduleError::NotFound => AppError::NotFound("Invalid token".to_string()),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!(branding)))
}

/// Twilio incoming-message webhook. Always answers with TwiML.
#[axum::debug_handler]
pub async fn sms_webhook(
    State(state): State<Arc<RescheduleState>>,
    Form(sms): Form<InboundSms>,
) -> impl IntoResponse {
    let reply = NotificationService::new(&state).handle_inbound(&sms).await;

    ([(header::CONTENT_TYPE, TWIML_CONTENT_TYPE)], reply.to_xml())
}
