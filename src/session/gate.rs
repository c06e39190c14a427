//! Submission gate: field validation and the at-most-once check.
//!
//! The duplicate check is the system's sole duplicate-prevention mechanism.
//! It is read-then-append against a store with no transactions, so a narrow
//! race window exists between the existence scan and the append; accepted for
//! human-paced form submission rather than paying for distributed locking.

use crate::errors::{AppError, AppResult};
use crate::models::invite::normalize_code;
use crate::models::submission::SubmitRequest;
use crate::store::RecordStore;
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

/// Server-side phone check, applied only when identity fields are part of the
/// configured form schema.
const PHONE_PATTERN: &str = r"^(\+91[\-\s]?)?[6789]\d{9}$";

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is valid"))
}

/// Reject a request with missing required fields or a malformed identity
/// block before any store traffic happens.
pub fn validate(req: &SubmitRequest, require_identity: bool) -> AppResult<()> {
    if req.code.trim().is_empty() {
        return Err(AppError::Validation("code".to_string()));
    }
    if req.link1.trim().is_empty() {
        return Err(AppError::Validation("link1".to_string()));
    }
    if req.file_name.trim().is_empty() || req.file_bytes.is_empty() {
        return Err(AppError::Validation("file".to_string()));
    }

    if require_identity {
        let identity = req
            .identity
            .as_ref()
            .ok_or_else(|| AppError::Validation("fullName, email, phone".to_string()))?;
        if identity.full_name.trim().is_empty() {
            return Err(AppError::Validation("fullName".to_string()));
        }
        if identity.email.trim().is_empty() {
            return Err(AppError::Validation("email".to_string()));
        }
        if identity.phone.trim().is_empty() {
            return Err(AppError::Validation("phone".to_string()));
        }
        if !phone_regex().is_match(identity.phone.trim()) {
            return Err(AppError::Format("phone".to_string()));
        }
    }
    Ok(())
}

/// Scan the response log for a row whose code matches.
///
/// The code column is located by name in the header row (case-insensitive
/// `code`); presence of any matching row is the sole submission-existence
/// signal, there is no flag on the invite table.
pub fn submission_exists<S: RecordStore>(
    store: &S,
    response_table: &str,
    code: &str,
) -> AppResult<bool> {
    let rows = store.read_all_rows(response_table)?;
    let Some(header) = rows.first() else {
        return Ok(false);
    };

    let Some(code_col) = header
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("code"))
    else {
        warn!(table = response_table, "no code column in response log header");
        return Ok(false);
    };

    let wanted = normalize_code(code);
    Ok(rows[1..].iter().any(|row| {
        row.get(code_col)
            .is_some_and(|cell| normalize_code(cell) == wanted)
    }))
}
