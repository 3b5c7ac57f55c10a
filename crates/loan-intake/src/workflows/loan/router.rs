use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{ApplicationId, LoanApplicationForm};
use super::flow::FlowState;
use super::repository::{ApplicationStore, Notifier};
use super::service::{ApplicationServiceError, LoanApplicationService, SubmissionOutcome};

/// Router builder exposing the intake and lookup endpoints.
pub fn loan_router<S, N>(service: Arc<LoanApplicationService<S, N>>) -> Router
where
    S: ApplicationStore + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/api/v1/loan/applications", post(submit_handler::<S, N>))
        .route(
            "/api/v1/loan/applications/:application_id",
            get(status_handler::<S, N>),
        )
        .with_state(service)
}

/// Store and mail calls block, so the submission runs on the blocking pool.
async fn submit_blocking<S, N>(
    service: Arc<LoanApplicationService<S, N>>,
    form: LoanApplicationForm,
) -> Result<Result<SubmissionOutcome, ApplicationServiceError>, tokio::task::JoinError>
where
    S: ApplicationStore + 'static,
    N: Notifier + 'static,
{
    tokio::task::spawn_blocking(move || service.submit(form)).await
}

pub(crate) async fn submit_handler<S, N>(
    State(service): State<Arc<LoanApplicationService<S, N>>>,
    axum::Json(form): axum::Json<LoanApplicationForm>,
) -> Response
where
    S: ApplicationStore + 'static,
    N: Notifier + 'static,
{
    let result = match submit_blocking(service, form).await {
        Ok(result) => result,
        Err(join_error) => {
            error!(error = %join_error, "submission task failed");
            return internal_error("submission task failed");
        }
    };

    let status = match &result {
        Ok(_) => StatusCode::CREATED,
        Err(ApplicationServiceError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        Err(ApplicationServiceError::Duplicate) => StatusCode::CONFLICT,
        Err(other) => {
            error!(error = %other, "loan application submission failed");
            return internal_error(&other.to_string());
        }
    };

    let page = FlowState::start().submitted(result);
    (status, axum::Json(page)).into_response()
}

pub(crate) async fn status_handler<S, N>(
    State(service): State<Arc<LoanApplicationService<S, N>>>,
    Path(application_id): Path<i64>,
) -> Response
where
    S: ApplicationStore + 'static,
    N: Notifier + 'static,
{
    let id = ApplicationId(application_id);
    let result = match tokio::task::spawn_blocking(move || service.get(id)).await {
        Ok(result) => result,
        Err(join_error) => {
            error!(error = %join_error, "lookup task failed");
            return internal_error("lookup task failed");
        }
    };

    match result {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(ApplicationServiceError::NotFound(_)) => {
            let payload = json!({
                "application_id": id.0,
                "error": "application not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(&other.to_string()),
    }
}

fn internal_error(message: &str) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
