use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::RecordStore;
use crate::store::sqlite::SqliteRecordStore;

/// Operator data entry: append one enabled invite row. The start-time cell is
/// left empty; it is written exactly once by `start`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Invite {
        code,
        duration_hours,
        problem_ref,
        form_ref_template,
    } = cmd
    {
        let store = SqliteRecordStore::open(&cfg.database)?;
        let row = vec![
            code.trim().to_string(),
            duration_hours.to_string(),
            String::new(),
            problem_ref.clone(),
            form_ref_template.clone(),
            "TRUE".to_string(),
        ];
        store.append_row(&cfg.invite_table, &row)?;
        println!("Invite added: {} ({} h)", code.trim(), duration_hours);
    }
    Ok(())
}
