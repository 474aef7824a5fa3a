use axum::{Json, body::Bytes, extract::State};
use serde::de::DeserializeOwned;
use tracing::Instrument;
use uuid::Uuid;

use super::AppState;
use crate::api_types::SensitivityRequest;
use crate::error::{ApiError, ApiResult};
use crate::validation;
use finproj_core::analysis::{SweepResult, sensitivity};
use finproj_core::{ConfigError, ProjectionInput, ProjectionResponse, project};

// ============================================================================
// Projection Handlers
// ============================================================================

pub async fn run_projection(body: Bytes) -> ApiResult<Json<ProjectionResponse>> {
    let span = tracing::info_span!("projection", request_id = %Uuid::new_v4());

    async move {
        let input: ProjectionInput = parse_body(&body)?;
        tracing::info!(
            years = input.config.time_horizon_years,
            accounts = input.accounts.len(),
            debts = input.debts.len(),
            events = input.config.events.len(),
            "running projection"
        );

        let response = run_blocking(move || project(&input)).await?;
        Ok::<_, ApiError>(Json(response))
    }
    .instrument(span)
    .await
}

pub async fn run_sensitivity(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<SweepResult>> {
    let span = tracing::info_span!("sensitivity", request_id = %Uuid::new_v4());

    async move {
        let SensitivityRequest { input, sweep } = parse_body(&body)?;
        validation::validate_sweep_steps(sweep.step_count, state.max_sweep_steps)?;
        tracing::info!(
            parameter = %sweep.parameter.label(),
            steps = sweep.step_count,
            "running sensitivity sweep"
        );

        let result = run_blocking(move || sensitivity(&input, &sweep)).await?;
        Ok::<_, ApiError>(Json(result))
    }
    .instrument(span)
    .await
}

pub async fn health() -> &'static str {
    "ok"
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    Ok(serde_json::from_slice(body)?)
}

/// Run a CPU-bound engine call off the async workers, keeping the request span
async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ConfigError> + Send + 'static,
{
    let span = tracing::Span::current();
    let result = tokio::task::spawn_blocking(move || span.in_scope(f))
        .await
        .map_err(|err| ApiError::Internal(format!("projection worker failed: {err}")))?;
    Ok(result?)
}
