use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Multipart, Query, Request, State},
    http::header,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use super::domain::PolicyInput;
use super::narrative::Narrator;
use super::parser::parse_policy_document;
use super::service::{AnalysisReport, CoverageAnalysisService};
use crate::error::AppError;

pub(crate) const POLICY_FILE_FIELD: &str = "policy_file";
const MAX_POLICY_BYTES: usize = 1024 * 1024;

/// Query parameters accepted by the upload endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AnalyzeParams {
    #[serde(default)]
    pub(crate) policy_json: Option<String>,
}

/// Router builder exposing the analysis endpoints.
pub fn analysis_router<N>(service: Arc<CoverageAnalysisService<N>>) -> Router
where
    N: Narrator + 'static,
{
    Router::new()
        .route("/api/v1/analyze", post(analyze_handler::<N>))
        .route("/api/v1/analyze-json", post(analyze_json_handler::<N>))
        .with_state(service)
}

/// Accepts a multipart `policy_file` upload, a `policy_json` query parameter, or a raw
/// JSON body, in that order of precedence.
pub(crate) async fn analyze_handler<N>(
    State(service): State<Arc<CoverageAnalysisService<N>>>,
    Query(params): Query<AnalyzeParams>,
    request: Request,
) -> Result<Json<AnalysisReport>, AppError>
where
    N: Narrator + 'static,
{
    let policy = read_policy(params, request).await?;
    info!(policy_number = %policy.policy_number, "received policy analysis request");

    let report = service.report(&policy).await;
    Ok(Json(report))
}

/// Typed variant of the upload endpoint. Body rejections share the invalid-input contract.
pub(crate) async fn analyze_json_handler<N>(
    State(service): State<Arc<CoverageAnalysisService<N>>>,
    payload: Result<Json<PolicyInput>, JsonRejection>,
) -> Result<Json<AnalysisReport>, AppError>
where
    N: Narrator + 'static,
{
    let Json(policy) = payload?;
    info!(policy_number = %policy.policy_number, "received policy analysis request");
    Ok(Json(service.report(&policy).await))
}

async fn read_policy(params: AnalyzeParams, request: Request) -> Result<PolicyInput, AppError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    if is_multipart {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|rejection| AppError::Upload(rejection.to_string()))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| AppError::Upload(err.to_string()))?
        {
            if field.name() != Some(POLICY_FILE_FIELD) {
                continue;
            }
            let content = field
                .text()
                .await
                .map_err(|err| AppError::Upload(err.to_string()))?;
            return Ok(parse_policy_document(&content)?);
        }

        return Err(AppError::Upload(format!(
            "multipart body has no '{POLICY_FILE_FIELD}' field"
        )));
    }

    if let Some(inline) = params.policy_json {
        return Ok(parse_policy_document(&inline)?);
    }

    let body = axum::body::to_bytes(request.into_body(), MAX_POLICY_BYTES)
        .await
        .map_err(|err| AppError::Upload(err.to_string()))?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::Upload(
            "either policy_file or policy_json must be provided".to_string(),
        ));
    }

    let content = std::str::from_utf8(&body)
        .map_err(|err| AppError::Upload(format!("policy body is not UTF-8: {err}")))?;
    Ok(parse_policy_document(content)?)
}
