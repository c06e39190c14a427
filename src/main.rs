//! testgate main entrypoint.

use testgate::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
}
