pub mod commands;
pub mod parser;

use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// Print a response the way the API surface shapes it: one JSON object on
/// stdout.
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let json =
        serde_json::to_string(value).map_err(|e| AppError::Other(format!("encode response: {e}")))?;
    println!("{json}");
    Ok(())
}
