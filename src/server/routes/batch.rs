//! Batch upload endpoints
//!
//! Each route loads one window of rows and runs it through the batch
//! pipeline. The task scheduler retries a request whenever the response
//! status is not 2xx, so the status code is the whole contract; bodies are
//! plain text for humans reading logs.

use crate::core::batch::{BatchOutcome, Intent, UploadTask};
use crate::server::state::AppState;
use crate::utils::error::UploaderError;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::debug;

/// Configure batch upload routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/insert_items", web::post().to(insert_items))
        .route("/delete_items", web::post().to(delete_items))
        .route(
            "/prevent_expiring_items",
            web::post().to(prevent_expiring_items),
        );
}

/// Upsert a window of items
pub async fn insert_items(
    state: web::Data<AppState>,
    req: HttpRequest,
    task: web::Json<UploadTask>,
) -> Result<HttpResponse, UploaderError> {
    run_intent(&state, &req, Intent::Insert, task.into_inner()).await
}

/// Delete a window of items
pub async fn delete_items(
    state: web::Data<AppState>,
    req: HttpRequest,
    task: web::Json<UploadTask>,
) -> Result<HttpResponse, UploaderError> {
    run_intent(&state, &req, Intent::Delete, task.into_inner()).await
}

/// Re-upsert a window of items so they do not expire remotely
pub async fn prevent_expiring_items(
    state: web::Data<AppState>,
    req: HttpRequest,
    task: web::Json<UploadTask>,
) -> Result<HttpResponse, UploaderError> {
    run_intent(&state, &req, Intent::PreventExpiring, task.into_inner()).await
}

async fn run_intent(
    state: &AppState,
    req: &HttpRequest,
    intent: Intent,
    task: UploadTask,
) -> Result<HttpResponse, UploaderError> {
    let attempt = execution_count(req, &state.config().batch().execution_count_header);
    debug!("{} request, execution count {}", intent.as_str(), attempt);

    let outcome = state.orchestrator.run(intent, &task, attempt).await?;
    Ok(outcome_response(&outcome))
}

/// Scheduler execution count; missing or malformed values count as zero
pub(crate) fn execution_count(req: &HttpRequest, header: &str) -> u32 {
    req.headers()
        .get(header)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

pub(crate) fn outcome_response(outcome: &BatchOutcome) -> HttpResponse {
    let status =
        StatusCode::from_u16(outcome.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    HttpResponse::build(status)
        .insert_header(ContentType::plaintext())
        .body(outcome.body().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::batch::ProcessResult;
    use crate::core::clients::RemoteError;
    use actix_web::test::TestRequest;

    const HEADER: &str = "X-AppEngine-TaskExecutionCount";

    #[test]
    fn test_execution_count_parsing() {
        let req = TestRequest::default()
            .insert_header((HEADER, "3"))
            .to_http_request();
        assert_eq!(execution_count(&req, HEADER), 3);

        let req = TestRequest::default().to_http_request();
        assert_eq!(execution_count(&req, HEADER), 0);

        let req = TestRequest::default()
            .insert_header((HEADER, "three"))
            .to_http_request();
        assert_eq!(execution_count(&req, HEADER), 0);

        let req = TestRequest::default()
            .insert_header((HEADER, "-1"))
            .to_http_request();
        assert_eq!(execution_count(&req, HEADER), 0);
    }

    #[test]
    fn test_outcome_response_status() {
        let response = outcome_response(&BatchOutcome::Completed(ProcessResult::default()));
        assert_eq!(response.status(), StatusCode::OK);

        let response = outcome_response(&BatchOutcome::RetryRequested(RemoteError::api(
            503,
            "Service Unavailable",
        )));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = outcome_response(&BatchOutcome::RetryRequested(RemoteError::timeout("t")));
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_unrepresentable_status_falls_back_to_500() {
        let outcome = BatchOutcome::Rejected(RemoteError::Api {
            status: 1000,
            reason: "Odd".to_string(),
            retryable: false,
        });
        let response = outcome_response(&outcome);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
