//! Invite-table rows.
//!
//! One row per test code, operator-managed: the core only ever reads these
//! and performs a single targeted write (the start timestamp). Positional
//! columns after the header row:
//! `1=Code, 2=DurationHours, 3=StartTime, 4=ProblemRef, 5=FormRefTemplate,
//! 6=Enabled`.

use crate::errors::AppResult;
use crate::utils::time::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 1-based column written by Start. Everything else is read-only here.
pub const START_TIME_COLUMN: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct InviteRecord {
    pub code: String,
    pub enabled: bool,
    pub duration_hours: f64,
    /// Set exactly once per code; never reverts to None.
    pub start_time: Option<DateTime<Utc>>,
    pub problem_ref: String,
    pub form_ref_template: String,
    /// 1-based position in the backing table, header included. Used for the
    /// targeted start-time cell update.
    pub row_position: usize,
}

/// Canonical form used for all code comparisons: trimmed, lowercased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}

impl InviteRecord {
    /// Build a record from a raw data row.
    ///
    /// `enabled` must be the literal TRUE (any case) or the row counts as not
    /// invited; disabled rows skip field parsing entirely so stale operator
    /// data cannot fail an otherwise-invisible code. An unparsable non-empty
    /// start time on an enabled row is a data-integrity fault, not "not yet
    /// started" (that reading would let Start overwrite the cell).
    pub fn from_row(cells: &[String], row_position: usize) -> AppResult<Self> {
        let cell = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");

        let code = cell(0).to_string();
        let enabled = cell(5).trim().eq_ignore_ascii_case("TRUE");
        if !enabled {
            return Ok(Self {
                code,
                enabled: false,
                duration_hours: 0.0,
                start_time: None,
                problem_ref: String::new(),
                form_ref_template: String::new(),
                row_position,
            });
        }

        let duration_hours = cell(1).trim().parse::<f64>().unwrap_or(0.0);
        let start_raw = cell(2).trim();
        let start_time = if start_raw.is_empty() {
            None
        } else {
            Some(parse_timestamp(start_raw)?)
        };

        Ok(Self {
            code,
            enabled: true,
            duration_hours,
            start_time,
            problem_ref: cell(3).to_string(),
            form_ref_template: cell(4).to_string(),
            row_position,
        })
    }

    pub fn matches(&self, query: &str) -> bool {
        normalize_code(&self.code) == normalize_code(query)
    }
}
