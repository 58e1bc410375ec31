// libs/reschedule-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::RescheduleState;

pub fn reschedule_routes(state: Arc<RescheduleState>) -> Router {
    // Patient-facing links carry the token; no other authentication
    Router::new()
        // Staff trigger
        .route("/send-initial-message", post(handlers::send_initial_message))

        // Secure link flow
        .route("/choose-time/{token}", get(handlers::choose_time))
        .route("/confirm-time", post(handlers::confirm_time))
        .route("/get-new-options", post(handlers::get_new_options))
        .route("/get-branding/{token}", get(handlers::get_branding))

        // Twilio webhook
        .route("/sms-webhook", post(handlers::sms_webhook))

        .with_state(state)
}
