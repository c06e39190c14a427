use crate::cli::commands::open_service;
use crate::cli::parser::Commands;
use crate::cli::print_json;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::submission::{Identity, SubmitRequest};
use std::fs;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit {
        code,
        link1,
        link2,
        file,
        full_name,
        email,
        phone,
    } = cmd
    {
        let path = Path::new(file);
        // The proof path is the caller's own input; an unreadable file is
        // their mistake to fix, not an infrastructure failure to hide.
        let file_bytes = fs::read(path)
            .map_err(|e| AppError::Validation(format!("file ({}: {e})", path.display())))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let identity = if full_name.is_some() || email.is_some() || phone.is_some() {
            Some(Identity {
                full_name: full_name.clone().unwrap_or_default(),
                email: email.clone().unwrap_or_default(),
                phone: phone.clone().unwrap_or_default(),
            })
        } else {
            None
        };

        let req = SubmitRequest {
            code: code.clone(),
            link1: link1.clone(),
            link2: link2.clone(),
            file_name,
            file_bytes,
            identity,
        };

        let service = open_service(cfg)?;
        let resp = service.submit(&req)?;
        print_json(&resp)?;
    }
    Ok(())
}
