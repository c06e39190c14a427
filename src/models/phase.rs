//! Session phase, derived and never stored.
//!
//! `resolve` is the single place the current phase is computed from stored
//! facts plus wall-clock time. Callers re-evaluate it on every request; a
//! phase is never cached across requests.

use crate::errors::AppResult;
use crate::models::invite::InviteRecord;
use crate::utils::time::session_end;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    NotInvited,
    PreStart,
    Running,
    Ended,
    Submitted,
}

impl SessionPhase {
    pub fn is_invited(&self) -> bool {
        !matches!(self, SessionPhase::NotInvited)
    }
}

/// Derive the phase from an invite row (or its absence), the current time and
/// a submission-existence probe.
///
/// Unknown and disabled codes are indistinguishable on purpose: both resolve
/// to `NotInvited` so no response reveals whether a code exists. The probe
/// only runs once the session is over, since earlier phases do not depend on
/// it. A zero duration with a set start time yields `Ended`/`Submitted`
/// immediately; that is valid operator data, not an error.
pub fn resolve<F>(
    record: Option<&InviteRecord>,
    now: DateTime<Utc>,
    submitted: F,
) -> AppResult<SessionPhase>
where
    F: FnOnce() -> AppResult<bool>,
{
    let Some(record) = record else {
        return Ok(SessionPhase::NotInvited);
    };
    if !record.enabled {
        return Ok(SessionPhase::NotInvited);
    }
    let Some(start) = record.start_time else {
        return Ok(SessionPhase::PreStart);
    };
    if now < session_end(start, record.duration_hours) {
        return Ok(SessionPhase::Running);
    }
    if submitted()? {
        Ok(SessionPhase::Submitted)
    } else {
        Ok(SessionPhase::Ended)
    }
}
