use crate::cli::commands::open_service;
use crate::cli::parser::Commands;
use crate::cli::print_json;
use crate::config::Config;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { code } = cmd {
        let service = open_service(cfg)?;
        let resp = service.start(code)?;
        print_json(&resp)?;
    }
    Ok(())
}
