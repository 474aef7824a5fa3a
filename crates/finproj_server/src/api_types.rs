//! Request bodies that wrap core types

use finproj_core::ProjectionInput;
use finproj_core::analysis::SweepConfig;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/projections/sensitivity`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityRequest {
    pub input: ProjectionInput,
    pub sweep: SweepConfig,
}
