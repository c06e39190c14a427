pub mod init;
pub mod invite;
pub mod lookup;
pub mod start;
pub mod submit;

use crate::config::Config;
use crate::errors::AppResult;
use crate::session::SessionService;
use crate::store::blob::FsBlobStore;
use crate::store::sqlite::SqliteRecordStore;

/// Wire the configured stores into a session service.
pub(crate) fn open_service(
    cfg: &Config,
) -> AppResult<SessionService<SqliteRecordStore, FsBlobStore>> {
    let store = SqliteRecordStore::open(&cfg.database)?;
    let blobs = FsBlobStore::new(&cfg.blob_dir);
    Ok(SessionService::new(
        store,
        blobs,
        cfg.invite_table.clone(),
        cfg.response_table.clone(),
        cfg.require_identity,
    ))
}
