//! Submission input and the wire-facing response shapes.
//!
//! Field names serialize camelCase to match the response log consumers.

use crate::models::phase::SessionPhase;
use serde::Serialize;

/// Identity block collected alongside a submission when the configured form
/// schema requires it.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// One submission attempt, exactly as received from the client.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub code: String,
    pub link1: String,
    pub link2: Option<String>,
    pub file_name: String,
    pub file_bytes: Vec<u8>,
    pub identity: Option<Identity>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum LookupResponse {
    /// Unknown and disabled codes collapse into this marker; nothing else
    /// about the row is revealed.
    NotInvited { phase: SessionPhase },
    Invited {
        phase: SessionPhase,
        code: String,
        duration_hours: f64,
        start_time: Option<String>,
        problem_ref: String,
        form_ref_template: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartStatus {
    Started,
    AlreadyStarted,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub status: StartStatus,
    pub start_time: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmitResponse {
    pub status: &'static str,
}

impl SubmitResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}
