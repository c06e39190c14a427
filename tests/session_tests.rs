//! State-machine tests against the in-memory stores with an injected clock.

use chrono::{DateTime, Duration, TimeZone, Utc};
use testgate::errors::{AppError, AppResult};
use testgate::models::phase::SessionPhase;
use testgate::models::submission::{Identity, LookupResponse, StartStatus, SubmitRequest};
use testgate::session::SessionService;
use testgate::store::memory::{MemoryBlobStore, MemoryRecordStore};
use testgate::store::{RecordStore, Row};

const INVITES: &str = "TestCodes";
const RESPONSES: &str = "FormResponses";

fn invite_header() -> Row {
    ["Code", "DurationHours", "StartTime", "ProblemRef", "FormRefTemplate", "Enabled"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn response_header() -> Row {
    ["Timestamp", "Link1", "Link2", "ProofFileRef", "Code", "FullName", "Email", "Phone"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn invite_row(code: &str, hours: &str, start: &str, enabled: &str) -> Row {
    vec![
        code.to_string(),
        hours.to_string(),
        start.to_string(),
        "prob-123".to_string(),
        "https://forms.example/{code}".to_string(),
        enabled.to_string(),
    ]
}

fn seeded(invites: Vec<Row>) -> MemoryRecordStore {
    let store = MemoryRecordStore::new();
    let mut rows = vec![invite_header()];
    rows.extend(invites);
    store.seed(INVITES, rows);
    store.seed(RESPONSES, vec![response_header()]);
    store
}

fn service<'a>(
    store: &'a MemoryRecordStore,
    blobs: &'a MemoryBlobStore,
) -> SessionService<&'a MemoryRecordStore, &'a MemoryBlobStore> {
    SessionService::new(store, blobs, INVITES, RESPONSES, true)
}

fn request(code: &str) -> SubmitRequest {
    SubmitRequest {
        code: code.to_string(),
        link1: "https://github.com/u/r".to_string(),
        link2: None,
        file_name: "img.png".to_string(),
        file_bytes: vec![0x89, 0x50, 0x4e, 0x47],
        identity: Some(Identity {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
        }),
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 10, 9, 0, 0).unwrap()
}

#[test]
fn unknown_code_lookup_is_not_invited_never_an_error() {
    let store = seeded(vec![]);
    let blobs = MemoryBlobStore::new();
    let svc = service(&store, &blobs);

    let resp = svc.lookup_at("NOPE", t0()).unwrap();
    assert_eq!(
        resp,
        LookupResponse::NotInvited {
            phase: SessionPhase::NotInvited
        }
    );
}

#[test]
fn disabled_code_is_indistinguishable_from_unknown() {
    let store = seeded(vec![invite_row("T9", "2", "", "FALSE")]);
    let blobs = MemoryBlobStore::new();
    let svc = service(&store, &blobs);

    let disabled = svc.lookup_at("T9", t0()).unwrap();
    let unknown = svc.lookup_at("GHOST", t0()).unwrap();
    assert_eq!(disabled, unknown);
}

#[test]
fn empty_code_is_a_validation_error() {
    let store = seeded(vec![]);
    let blobs = MemoryBlobStore::new();
    let svc = service(&store, &blobs);

    assert!(matches!(
        svc.lookup_at("  ", t0()),
        Err(AppError::Validation(f)) if f == "code"
    ));
}

#[test]
fn start_is_idempotent_and_keeps_the_first_timestamp() {
    let store = seeded(vec![invite_row("T1", "2", "", "TRUE")]);
    let blobs = MemoryBlobStore::new();
    let svc = service(&store, &blobs);

    let first = svc.start_at("T1", t0()).unwrap();
    assert_eq!(first.status, StartStatus::Started);

    // A retried start five minutes later must not move the clock.
    let second = svc.start_at("T1", t0() + Duration::minutes(5)).unwrap();
    assert_eq!(second.status, StartStatus::AlreadyStarted);
    assert_eq!(second.start_time, first.start_time);

    // Exactly one cell write reached the store.
    assert_eq!(store.write_count(), 1);
}

#[test]
fn start_on_not_invited_code_fails_without_a_store_write() {
    let store = seeded(vec![invite_row("T9", "2", "", "FALSE")]);
    let blobs = MemoryBlobStore::new();
    let svc = service(&store, &blobs);

    assert!(matches!(svc.start_at("GHOST", t0()), Err(AppError::InvalidCode)));
    assert!(matches!(svc.start_at("T9", t0()), Err(AppError::InvalidCode)));
    // A blank code is an unmatched code, not a malformed request.
    assert!(matches!(svc.start_at("  ", t0()), Err(AppError::InvalidCode)));
    assert_eq!(store.write_count(), 0);
}

#[test]
fn code_match_is_trimmed_and_case_insensitive() {
    let store = seeded(vec![invite_row(" T1 ", "2", "", "TRUE")]);
    let blobs = MemoryBlobStore::new();
    let svc = service(&store, &blobs);

    let resp = svc.lookup_at("  t1", t0()).unwrap();
    assert!(matches!(
        resp,
        LookupResponse::Invited {
            phase: SessionPhase::PreStart,
            ..
        }
    ));
}

#[test]
fn zero_duration_with_start_set_is_immediately_ended() {
    let store = seeded(vec![invite_row("Z1", "0", "2026-05-10T09:00:00Z", "TRUE")]);
    let blobs = MemoryBlobStore::new();
    let svc = service(&store, &blobs);

    let resp = svc.lookup_at("Z1", t0()).unwrap();
    assert!(matches!(
        resp,
        LookupResponse::Invited {
            phase: SessionPhase::Ended,
            ..
        }
    ));
}

#[test]
fn submit_is_allowed_while_running() {
    let store = seeded(vec![invite_row("T1", "2", "2026-05-10T09:00:00Z", "TRUE")]);
    let blobs = MemoryBlobStore::new();
    let svc = service(&store, &blobs);

    // Early voluntary finish, one hour into a two-hour window.
    let resp = svc.submit_at(&request("T1"), t0() + Duration::hours(1)).unwrap();
    assert_eq!(resp.status, "ok");
    assert!(blobs.contains("T1_img.png"));
}

#[test]
fn submit_rejects_unknown_and_disabled_codes_before_any_write() {
    let store = seeded(vec![invite_row("T9", "2", "", "FALSE")]);
    let blobs = MemoryBlobStore::new();
    let svc = service(&store, &blobs);

    assert!(matches!(
        svc.submit_at(&request("GHOST"), t0()),
        Err(AppError::InvalidCode)
    ));
    assert!(matches!(
        svc.submit_at(&request("T9"), t0()),
        Err(AppError::InvalidCode)
    ));
    assert!(blobs.is_empty());
    assert_eq!(store.rows(RESPONSES).len(), 1);
}

#[test]
fn duplicate_submission_is_rejected_regardless_of_payload() {
    let store = seeded(vec![invite_row("T1", "2", "2026-05-10T09:00:00Z", "TRUE")]);
    let blobs = MemoryBlobStore::new();
    let svc = service(&store, &blobs);

    svc.submit_at(&request("T1"), t0() + Duration::hours(3)).unwrap();

    let mut different = request("T1");
    different.link1 = "https://github.com/u/other".to_string();
    different.file_name = "other.png".to_string();
    assert!(matches!(
        svc.submit_at(&different, t0() + Duration::hours(4)),
        Err(AppError::DuplicateSubmission)
    ));

    // Still exactly one logged response and one stored blob.
    assert_eq!(store.rows(RESPONSES).len(), 2);
    assert_eq!(blobs.len(), 1);
}

#[test]
fn response_row_has_the_fixed_column_order() {
    let store = seeded(vec![invite_row("T1", "2", "2026-05-10T09:00:00Z", "TRUE")]);
    let blobs = MemoryBlobStore::new();
    let svc = service(&store, &blobs);

    let mut req = request("T1");
    req.link2 = Some("https://app.example".to_string());
    svc.submit_at(&req, t0() + Duration::hours(3)).unwrap();

    let row = store.rows(RESPONSES)[1].clone();
    assert_eq!(row.len(), 8);
    assert_eq!(row[1], "https://github.com/u/r");
    assert_eq!(row[2], "https://app.example");
    assert_eq!(row[3], "mem://T1_img.png");
    assert_eq!(row[4], "T1");
    assert_eq!(row[5], "Asha Rao");
    assert_eq!(row[7], "9876543210");
    // Column 0 is the submission timestamp.
    assert!(row[0].starts_with("2026-05-10T12:00:00"));
}

#[test]
fn full_session_walkthrough() {
    let store = seeded(vec![invite_row("T1", "2", "", "TRUE")]);
    let blobs = MemoryBlobStore::new();
    let svc = service(&store, &blobs);

    let resp = svc.lookup_at("T1", t0()).unwrap();
    assert!(matches!(
        resp,
        LookupResponse::Invited {
            phase: SessionPhase::PreStart,
            ..
        }
    ));

    let started = svc.start_at("T1", t0()).unwrap();
    assert_eq!(started.status, StartStatus::Started);

    let resp = svc.lookup_at("T1", t0() + Duration::hours(1)).unwrap();
    assert!(matches!(
        resp,
        LookupResponse::Invited {
            phase: SessionPhase::Running,
            ..
        }
    ));

    let resp = svc.lookup_at("T1", t0() + Duration::hours(3)).unwrap();
    assert!(matches!(
        resp,
        LookupResponse::Invited {
            phase: SessionPhase::Ended,
            ..
        }
    ));

    let resp = svc.submit_at(&request("T1"), t0() + Duration::hours(3)).unwrap();
    assert_eq!(resp.status, "ok");
    assert_eq!(store.rows(RESPONSES).len(), 2);
    assert_eq!(store.rows(RESPONSES)[1][4], "T1");

    let resp = svc.lookup_at("T1", t0() + Duration::hours(3)).unwrap();
    assert!(matches!(
        resp,
        LookupResponse::Invited {
            phase: SessionPhase::Submitted,
            ..
        }
    ));

    assert!(matches!(
        svc.submit_at(&request("T1"), t0() + Duration::hours(3)),
        Err(AppError::DuplicateSubmission)
    ));
}

/// Delegates to the inner store but fails every append on one table,
/// simulating a response-log outage after the blob upload succeeded.
struct AppendOutage<'a> {
    inner: &'a MemoryRecordStore,
    table: &'a str,
}

impl RecordStore for AppendOutage<'_> {
    fn read_all_rows(&self, table: &str) -> AppResult<Vec<Row>> {
        self.inner.read_all_rows(table)
    }

    fn update_cell(&self, table: &str, row: usize, column: usize, value: &str) -> AppResult<()> {
        self.inner.update_cell(table, row, column, value)
    }

    fn append_row(&self, table: &str, values: &[String]) -> AppResult<()> {
        if table == self.table {
            return Err(AppError::StoreUnavailable("append quota exceeded".to_string()));
        }
        self.inner.append_row(table, values)
    }
}

#[test]
fn append_failure_keeps_the_blob_and_surfaces_the_error() {
    let store = seeded(vec![invite_row("T1", "2", "2026-05-10T09:00:00Z", "TRUE")]);
    let blobs = MemoryBlobStore::new();
    let flaky = AppendOutage {
        inner: &store,
        table: RESPONSES,
    };
    let svc = SessionService::new(&flaky, &blobs, INVITES, RESPONSES, true);

    let res = svc.submit_at(&request("T1"), t0() + Duration::hours(3));
    assert!(matches!(res, Err(AppError::StoreUnavailable(_))));

    // Leave-and-alert: the uploaded file stays, the log gains nothing, and a
    // retry is possible because no submission row exists.
    assert!(blobs.contains("T1_img.png"));
    assert_eq!(store.rows(RESPONSES).len(), 1);

    let phase = svc.lookup_at("T1", t0() + Duration::hours(3)).unwrap();
    assert!(matches!(
        phase,
        LookupResponse::Invited {
            phase: SessionPhase::Ended,
            ..
        }
    ));
}
