//! # Notification Subscription Routes

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use pagopa_core::{NotificationSubscriptionRequest, NotificationSubscriptionRequestType};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::{AppState, SubscriptionRecord};

/// Build the notifications router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/notifications/activation", post(activate_subscription))
        .route("/v1/notifications/deactivation", post(deactivate_subscription))
}

/// Outcome of a subscription change.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub installation_id: String,
    pub request_type: NotificationSubscriptionRequestType,
    /// Whether the call changed the stored subscriptions.
    pub changed: bool,
}

/// POST /v1/notifications/activation
async fn activate_subscription(
    State(state): State<AppState>,
    body: Result<Json<NotificationSubscriptionRequest>, JsonRejection>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let request = extract_json(body)?;
    Ok(Json(update_subscription(
        &state,
        &request,
        NotificationSubscriptionRequestType::Activation,
    )))
}

/// POST /v1/notifications/deactivation
async fn deactivate_subscription(
    State(state): State<AppState>,
    body: Result<Json<NotificationSubscriptionRequest>, JsonRejection>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let request = extract_json(body)?;
    Ok(Json(update_subscription(
        &state,
        &request,
        NotificationSubscriptionRequestType::Deactivation,
    )))
}

/// Apply a subscription change. Both directions are idempotent.
fn update_subscription(
    state: &AppState,
    request: &NotificationSubscriptionRequest,
    request_type: NotificationSubscriptionRequestType,
) -> SubscriptionResponse {
    let installation_id = request.installation_id().to_string();
    let changed = match request_type {
        NotificationSubscriptionRequestType::Activation => {
            let record = SubscriptionRecord {
                installation_id: installation_id.clone(),
                fiscal_code: request.fiscal_code().clone(),
            };
            state
                .subscriptions
                .insert(installation_id.clone(), record.clone())
                .map_or(true, |previous| previous != record)
        }
        NotificationSubscriptionRequestType::Deactivation => {
            // Only the owner of the subscription may remove it.
            state
                .subscriptions
                .remove_if(&installation_id, |existing| {
                    existing.fiscal_code == *request.fiscal_code()
                })
                .is_some()
        }
    };

    tracing::info!(
        installation_id = %installation_id,
        request_type = %request_type,
        changed,
        "notification subscription updated"
    );

    SubscriptionResponse {
        installation_id,
        request_type,
        changed,
    }
}
