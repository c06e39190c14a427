use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::RecordStore;
use crate::store::sqlite::SqliteRecordStore;

pub const INVITE_HEADER: [&str; 6] = [
    "Code",
    "DurationHours",
    "StartTime",
    "ProblemRef",
    "FormRefTemplate",
    "Enabled",
];

pub const RESPONSE_HEADER: [&str; 8] = [
    "Timestamp",
    "Link1",
    "Link2",
    "ProofFileRef",
    "Code",
    "FullName",
    "Email",
    "Phone",
];

/// Create config + database and register both logical tables, seeding their
/// header rows. Safe to run repeatedly.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    let store = SqliteRecordStore::open(&cfg.database)?;
    seed_table(&store, &cfg.invite_table, &INVITE_HEADER)?;
    seed_table(&store, &cfg.response_table, &RESPONSE_HEADER)?;

    println!("Tables:      {:?}, {:?}", cfg.invite_table, cfg.response_table);
    Ok(())
}

fn seed_table(store: &SqliteRecordStore, table: &str, header: &[&str]) -> AppResult<()> {
    store.create_table(table)?;
    if store.read_all_rows(table)?.is_empty() {
        let cells: Vec<String> = header.iter().map(|h| h.to_string()).collect();
        store.append_row(table, &cells)?;
    }
    Ok(())
}
