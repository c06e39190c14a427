//! Session lifecycle controller.
//!
//! Orchestrates lookup, one-time start and one-time submission over the
//! record and blob store seams. Every operation re-resolves the phase from
//! the store against the current clock; nothing a caller might have cached is
//! trusted.

pub mod gate;

use crate::errors::{AppError, AppResult};
use crate::models::invite::{InviteRecord, START_TIME_COLUMN, normalize_code};
use crate::models::phase::{self, SessionPhase};
use crate::models::submission::{
    LookupResponse, StartResponse, StartStatus, SubmitRequest, SubmitResponse,
};
use crate::store::{BlobStore, RecordStore};
use crate::utils::time::format_timestamp;
use chrono::{DateTime, Utc};
use tracing::{error, info};

pub struct SessionService<S: RecordStore, B: BlobStore> {
    store: S,
    blobs: B,
    invite_table: String,
    response_table: String,
    require_identity: bool,
}

impl<S: RecordStore, B: BlobStore> SessionService<S, B> {
    pub fn new(
        store: S,
        blobs: B,
        invite_table: impl Into<String>,
        response_table: impl Into<String>,
        require_identity: bool,
    ) -> Self {
        Self {
            store,
            blobs,
            invite_table: invite_table.into(),
            response_table: response_table.into(),
            require_identity,
        }
    }

    pub fn lookup(&self, code: &str) -> AppResult<LookupResponse> {
        self.lookup_at(code, Utc::now())
    }

    pub fn start(&self, code: &str) -> AppResult<StartResponse> {
        self.start_at(code, Utc::now())
    }

    pub fn submit(&self, req: &SubmitRequest) -> AppResult<SubmitResponse> {
        self.submit_at(req, Utc::now())
    }

    /// Current phase plus, for invited codes only, the session data the
    /// client needs. Unknown and disabled codes return the bare `NotInvited`
    /// marker, never an error.
    pub fn lookup_at(&self, code: &str, now: DateTime<Utc>) -> AppResult<LookupResponse> {
        require_code(code)?;
        let record = self.find_invite(code)?;
        let phase = phase::resolve(record.as_ref(), now, || {
            gate::submission_exists(&self.store, &self.response_table, code)
        })?;

        match record {
            Some(record) if phase.is_invited() => Ok(LookupResponse::Invited {
                phase,
                code: record.code,
                duration_hours: record.duration_hours,
                start_time: record.start_time.map(format_timestamp),
                problem_ref: record.problem_ref,
                form_ref_template: record.form_ref_template,
            }),
            _ => Ok(LookupResponse::NotInvited {
                phase: SessionPhase::NotInvited,
            }),
        }
    }

    /// Record the start timestamp, exactly once per code.
    ///
    /// Re-entry is safe: an already-set start time is returned as
    /// `already_started` instead of erroring, so a retried or double-clicked
    /// start cannot shorten anyone's session. The read-check-then-write below
    /// is not atomic against the store; two concurrent first starts may both
    /// pass the check and both write, resolved as last-write-wins on the cell
    /// (millisecond divergence on an hours-long session).
    pub fn start_at(&self, code: &str, now: DateTime<Utc>) -> AppResult<StartResponse> {
        // A blank code is simply a code no invite row matches.
        let record = self.find_invite(code)?;
        let record = match record {
            Some(record) if record.enabled => record,
            _ => return Err(AppError::InvalidCode),
        };

        if let Some(existing) = record.start_time {
            return Ok(StartResponse {
                status: StartStatus::AlreadyStarted,
                start_time: format_timestamp(existing),
            });
        }

        let stamp = format_timestamp(now);
        self.store.update_cell(
            &self.invite_table,
            record.row_position,
            START_TIME_COLUMN,
            &stamp,
        )?;
        info!(code = %record.code, start = %stamp, "session started");
        Ok(StartResponse {
            status: StartStatus::Started,
            start_time: stamp,
        })
    }

    /// Accept the one submission a code is entitled to.
    ///
    /// Allowed in any invited phase: finishing early is a supported path, so
    /// only invite validity and prior-submission state are re-checked here,
    /// never the clock. If the response-log append fails after the proof file
    /// is stored, the file is kept and the failure is surfaced; the log entry
    /// is never faked.
    pub fn submit_at(&self, req: &SubmitRequest, now: DateTime<Utc>) -> AppResult<SubmitResponse> {
        gate::validate(req, self.require_identity)?;

        let invited = self
            .find_invite(&req.code)?
            .is_some_and(|record| record.enabled);
        if !invited {
            return Err(AppError::InvalidCode);
        }

        if gate::submission_exists(&self.store, &self.response_table, &req.code)? {
            return Err(AppError::DuplicateSubmission);
        }

        // Prefix with the code so two codes reusing the same original
        // filename cannot collide.
        let code = req.code.trim();
        let blob_name = format!("{}_{}", code, req.file_name);
        let blob_ref = self.blobs.put(&blob_name, &req.file_bytes)?;

        let identity = req.identity.clone().unwrap_or_default();
        let row = vec![
            format_timestamp(now),
            req.link1.clone(),
            req.link2.clone().unwrap_or_default(),
            blob_ref.clone(),
            code.to_string(),
            identity.full_name,
            identity.email,
            identity.phone,
        ];
        self.store
            .append_row(&self.response_table, &row)
            .inspect_err(|e| {
                error!(
                    code,
                    blob = %blob_ref,
                    "response log append failed after upload; orphaned proof file kept: {e}"
                );
            })?;

        info!(code, blob = %blob_ref, "submission recorded");
        Ok(SubmitResponse::ok())
    }

    /// Find the invite row matching `code` (trimmed, case-insensitive).
    /// Row 1 is the header; data rows start at table position 2.
    fn find_invite(&self, code: &str) -> AppResult<Option<InviteRecord>> {
        let rows = self.store.read_all_rows(&self.invite_table)?;
        let wanted = normalize_code(code);
        for (idx, cells) in rows.iter().enumerate().skip(1) {
            let matches = cells
                .first()
                .is_some_and(|cell| normalize_code(cell) == wanted);
            if matches {
                return InviteRecord::from_row(cells, idx + 1).map(Some);
            }
        }
        Ok(None)
    }
}

fn require_code(code: &str) -> AppResult<()> {
    if code.trim().is_empty() {
        return Err(AppError::Validation("code".to_string()));
    }
    Ok(())
}
