//! TDEE MCP Server Implementation
//!
//! Implements the MCP server with all calculator tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::metrics;
use crate::models::RawInput;
use crate::tools::calculator;
use crate::tools::reports;
use crate::tools::status::StatusTracker;

/// TDEE MCP Service
#[derive(Clone)]
pub struct TdeeService {
    status_tracker: Arc<StatusTracker>,
    tool_router: ToolRouter<TdeeService>,
}

impl TdeeService {
    pub fn new(report_dir: PathBuf) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(report_dir)),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

/// Calculator form fields, named as the form submits them
#[derive(Debug, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementParams {
    /// "metric" (default) or "imperial"
    pub unit_system: Option<String>,
    /// Age in whole years, 18-100
    pub age: Option<f64>,
    /// "male" or "female"
    pub gender: Option<String>,
    /// Metric only: 100-250
    pub height_cm: Option<f64>,
    /// Imperial only: 3-8
    pub height_feet: Option<f64>,
    /// Imperial only: 0-11, defaults to 0
    pub height_inches: Option<f64>,
    /// Metric only: 30-300
    pub weight_kg: Option<f64>,
    /// Imperial only: 66-660
    pub weight_lbs: Option<f64>,
    /// sedentary, light, moderate, active or very_active
    pub activity_level: Option<String>,
    /// Optional, 3-70. Switches BMR to Katch-McArdle.
    pub body_fat_percentage: Option<f64>,
}

impl From<MeasurementParams> for RawInput {
    fn from(p: MeasurementParams) -> Self {
        RawInput {
            unit_system: p.unit_system,
            age: p.age,
            gender: p.gender,
            height_cm: p.height_cm,
            height_feet: p.height_feet,
            height_inches: p.height_inches,
            weight_kg: p.weight_kg,
            weight_lbs: p.weight_lbs,
            activity_level: p.activity_level,
            body_fat_percentage: p.body_fat_percentage,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResultsLinkParams {
    /// Link returned by calculate_metrics (full link, query string or bare value)
    pub results_link: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportMarkdownParams {
    /// Results link from calculate_metrics. Takes precedence over the measurement fields.
    pub results_link: Option<String>,
    #[serde(flatten)]
    pub measurements: MeasurementParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportPdfParams {
    /// Results link from calculate_metrics. Takes precedence over the measurement fields.
    pub results_link: Option<String>,
    /// Full path for the PDF. Defaults to a timestamped file in the report directory.
    pub output_path: Option<String>,
    #[serde(flatten)]
    pub measurements: MeasurementParams,
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[tool_router]
impl TdeeService {
    // --- Status ---

    #[tool(description = "Health check: status, current UTC timestamp, environment, build info and process information")]
    fn tdee_status(&self) -> Result<CallToolResult, McpError> {
        let status = self.status_tracker.get_status();
        to_json(&status)
    }

    #[tool(description = "Get step-by-step instructions for collecting measurements and reading results. Call this when starting a calculation session or when unsure which fields to send.")]
    fn calculator_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CALCULATOR_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CALCULATOR_INSTRUCTIONS)]))
    }

    // --- Calculator ---

    #[tool(description = "Check measurements without calculating. Returns valid=true or every field error at once.")]
    fn validate_measurements(&self, Parameters(p): Parameters<MeasurementParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::validate_measurements(&p.into());
        to_json(&result)
    }

    #[tool(description = "Convert measurements to the canonical metric record (imperial input is converted, original values kept)")]
    fn normalize_measurements(&self, Parameters(p): Parameters<MeasurementParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::normalize_measurements(&p.into());
        to_json(&result)
    }

    #[tool(description = "Calculate BMR, TDEE, BMI, ideal weight, muscular potential and macros. Returns results plus a results_link for later recalculation. Invalid input returns success=false with every field error.")]
    fn calculate_metrics(&self, Parameters(p): Parameters<MeasurementParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::calculate_metrics(&p.into()).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Recalculate results from a results_link returned by calculate_metrics")]
    fn calculate_from_link(&self, Parameters(p): Parameters<ResultsLinkParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::calculate_from_link(&p.results_link).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Reports ---

    #[tool(description = "Export results as a Markdown summary. Provide results_link or the measurement fields.")]
    fn export_results_markdown(&self, Parameters(p): Parameters<ExportMarkdownParams>) -> Result<CallToolResult, McpError> {
        let measurement = calculator::resolve_measurement(&p.measurements.into(), p.results_link.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        let results = metrics::compute(&measurement);
        let result = reports::export_results_markdown(&measurement, &results)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Generate a PDF results report with an activity calorie chart. Provide results_link or the measurement fields. Returns the file path.")]
    fn export_results_pdf(&self, Parameters(p): Parameters<ExportPdfParams>) -> Result<CallToolResult, McpError> {
        let measurement = calculator::resolve_measurement(&p.measurements.into(), p.results_link.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        let results = metrics::compute(&measurement);

        let output_path = match p.output_path.filter(|s| !s.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => reports::default_report_path(self.status_tracker.report_dir()),
        };

        let result = reports::generate_results_report(&measurement, &results, &output_path)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        to_json(&result)
    }
}

#[tool_handler]
impl ServerHandler for TdeeService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tdee".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("TDEE Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "TDEE Calculator - energy expenditure, body composition and macro targets. \
                 IMPORTANT: Call calculator_instructions first for the field list and ranges. \
                 Check input: validate_measurements, normalize_measurements. \
                 Calculate: calculate_metrics (returns results_link), calculate_from_link. \
                 Export: export_results_markdown, export_results_pdf. \
                 Health: tdee_status. Nothing is stored between calls."
                    .into(),
            ),
        }
    }
}
