use crate::error::{ApiError, ApiResult};

/// Validate the number of runs a sensitivity sweep asks for
pub fn validate_sweep_steps(step_count: usize, max_steps: usize) -> ApiResult<()> {
    if step_count > max_steps {
        return Err(ApiError::InvalidRequest {
            field: "sweep.step_count".to_string(),
            message: format!("Sweeps cannot exceed {max_steps} steps on this server"),
        });
    }

    Ok(())
}
