//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::config::ScenarioConfig;
use crate::projection::Summary;

/// Combined summary response: scenario config and headline figures.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Scenario configuration for this projection.
    pub scenario: ScenarioConfig,
    /// Headline figures for the configured variant.
    pub summary: Summary,
}

/// Optional range query parameters for the cashflow endpoint.
///
/// Years are 1-based and both bounds are inclusive.
#[derive(Debug, Deserialize)]
pub struct CashflowQuery {
    /// First year (inclusive).
    pub from: Option<usize>,
    /// Last year (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
