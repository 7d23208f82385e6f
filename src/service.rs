//! Request/response mapping for the HTTP projection service
//!
//! Kept free of any runtime so the Lambda binary only does HTTP glue.

use std::time::Instant;

use log::{info, warn};
use serde::Serialize;

use crate::error::{FieldViolation, ProjectionError};
use crate::projection::{
    MonthlyRecord, ProjectionConfig, ProjectionEngine, ProjectionSummary, TrendPoint,
};

/// Successful projection output
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub config: ProjectionConfig,
    pub summary: ProjectionSummary,
    pub records: Vec<MonthlyRecord>,
    pub trend: Vec<TrendPoint>,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

/// HTTP status plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReply {
    pub status: u16,
    pub body: String,
}

impl ServiceReply {
    fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self { status, body },
            Err(e) => Self {
                status: 500,
                body: format!(r#"{{"error":"Serialization failed: {}"}}"#, e),
            },
        }
    }

    fn error(status: u16, error: String, violations: Vec<FieldViolation>) -> Self {
        Self::json(status, &ErrorResponse { error, violations })
    }
}

/// Parse a request body into a config; blank bodies mean all defaults
pub fn parse_request(body: &str) -> Result<ProjectionConfig, serde_json::Error> {
    if body.trim().is_empty() {
        Ok(ProjectionConfig::default())
    } else {
        serde_json::from_str(body)
    }
}

/// Run one projection for a request body
pub fn handle(body: &str) -> ServiceReply {
    let start = Instant::now();

    let config = match parse_request(body) {
        Ok(c) => c,
        Err(e) => {
            warn!("Rejected request body: {}", e);
            return ServiceReply::error(400, format!("Invalid JSON: {}", e), Vec::new());
        }
    };

    let engine = match ProjectionEngine::new(config) {
        Ok(engine) => engine,
        Err(ProjectionError::InvalidConfiguration { violations }) => {
            warn!("Rejected configuration with {} violation(s)", violations.len());
            let message = "Invalid configuration".to_string();
            return ServiceReply::error(400, message, violations);
        }
        Err(e) => return ServiceReply::error(500, e.to_string(), Vec::new()),
    };

    let result = engine.project();
    let response = ProjectionResponse {
        config: engine.config().clone(),
        summary: result.summary(),
        trend: result.trend(),
        records: result.into_records(),
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Projected {} months, final student count {}",
        response.summary.total_months, response.summary.final_student_count
    );
    ServiceReply::json(200, &response)
}
