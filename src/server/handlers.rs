use crate::core::relay::ContactRelay;
use crate::domain::model::{ContactResponse, ContactSubmission, HealthReport, ServiceDescriptor};
use crate::server::error::ApiError;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

pub async fn home(State(relay): State<Arc<ContactRelay>>) -> Json<ServiceDescriptor> {
    Json(relay.descriptor())
}

pub async fn health(State(relay): State<Arc<ContactRelay>>) -> Json<HealthReport> {
    Json(relay.health())
}

pub async fn contact(
    State(relay): State<Arc<ContactRelay>>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(submission) = payload?;
    let response = relay.submit(&submission).await?;
    Ok(Json(response))
}
