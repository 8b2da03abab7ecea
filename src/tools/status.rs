//! TDEE Status Tool
//!
//! Health check and runtime status for the calculator service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Environment label used when `TDEE_ENV` is unset
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Calculator usage instructions for AI assistants
pub const CALCULATOR_INSTRUCTIONS: &str = r#"
# TDEE Calculator Instructions

This guide explains how to turn a person's body measurements into energy
expenditure, body composition and macronutrient targets.

## Collecting Measurements

Ask for these, in ONE unit system:

| Field | Metric | Imperial |
|-------|--------|----------|
| Unit system | `unitSystem: "metric"` | `unitSystem: "imperial"` |
| Age | `age` (18-100, whole years) | same |
| Gender | `gender`: `male` or `female` | same |
| Height | `heightCm` (100-250) | `heightFeet` (3-8) + `heightInches` (0-11, optional) |
| Weight | `weightKg` (30-300) | `weightLbs` (66-660) |
| Activity | `activityLevel` | same |
| Body fat (optional) | `bodyFatPercentage` (3-70) | same |

Do NOT mix units (e.g. `heightCm` with `unitSystem: "imperial"`); the
calculator rejects it.

### Activity Levels

- `sedentary` - Little or no exercise (x1.2)
- `light` - Light exercise 1-3 days/week (x1.375)
- `moderate` - Moderate exercise 3-5 days/week (x1.55)
- `active` - Heavy exercise 6-7 days/week (x1.725)
- `very_active` - Athlete, 2x training per day (x1.9)

---

## Workflow

1. **Check input** (optional): `validate_measurements` returns every problem
   at once. Relay all of them to the user in one message.
2. **Calculate**: `calculate_metrics` with the same fields. Returns the
   canonical metric record, the results and a `results_link`.
3. **Share**: keep the `results_link`. `calculate_from_link` recomputes the
   same results later without re-entering anything.
4. **Export**: `export_results_markdown` for a summary in chat, or
   `export_results_pdf` for a printable report with a chart.

---

## Reading the Results

- **BMR** uses Katch-McArdle when body fat is given, Mifflin-St Jeor otherwise
  (`bmr_formula` says which). Suggest adding body fat for a better estimate.
- **TDEE** is BMR x activity multiplier: maintenance calories.
- **Cutting / Bulking** are TDEE -500 / +500 kcal per day.
- **BMI** is rounded to one decimal. It does not account for muscle mass.
- **Ideal weight** shows four published formulas and their min-max range.
- **Muscular potential** is the FFMI-based ceiling (25 men, 22 women).
- **Macros** come in three styles: moderate (30/40/30), lower carb
  (35/25/40) and higher carb (25/55/20) protein/carbs/fat.

---

## Notes

- All numbers are estimates for adults; they are not medical advice.
- Nothing is stored. Every call is independent.
"#;

/// Runtime status of the TDEE service
#[derive(Debug, Clone, Serialize)]
pub struct TdeeStatus {
    pub status: &'static str,
    /// Current time, RFC 3339 UTC
    pub timestamp: String,
    pub environment: String,

    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Where PDF reports go when no path is given
    pub report_dir: String,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    report_dir: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(report_dir: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            report_dir,
        }
    }

    pub fn report_dir(&self) -> &PathBuf {
        &self.report_dir
    }

    /// Get the current status
    pub fn get_status(&self) -> TdeeStatus {
        let build_info = BuildInfo::current();

        let environment = std::env::var("TDEE_ENV")
            .ok()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        TdeeStatus {
            status: "ok",
            timestamp: chrono::Utc::now().to_rfc3339(),
            environment,
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            report_dir: self.report_dir.display().to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_ok() {
        let tracker = StatusTracker::new(PathBuf::from("reports"));
        let status = tracker.get_status();
        assert_eq!(status.status, "ok");
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.report_dir, "reports");
        assert!(chrono::DateTime::parse_from_rfc3339(&status.timestamp).is_ok());
        assert!(!status.environment.is_empty());
    }

    #[test]
    fn test_instructions_name_every_tool() {
        for tool in [
            "validate_measurements",
            "calculate_metrics",
            "calculate_from_link",
            "export_results_markdown",
            "export_results_pdf",
        ] {
            assert!(CALCULATOR_INSTRUCTIONS.contains(tool), "missing {}", tool);
        }
    }
}
