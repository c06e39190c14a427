use clap::{Parser, Subcommand};

/// Command-line interface definition for testgate
/// One subcommand per session operation, plus operator plumbing.
#[derive(Parser)]
#[command(
    name = "testgate",
    version = env!("CARGO_PKG_VERSION"),
    about = "One-shot timed test sessions: invite codes, countdown starts, single submissions",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the upload directory for proof files
    #[arg(global = true, long = "blobs")]
    pub blobs: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration, database and logical tables
    Init,

    /// Add an enabled invite row (operator data entry)
    Invite {
        /// Test code handed to the participant
        code: String,

        /// Session length in hours (fractional allowed)
        #[arg(long = "hours", default_value = "2")]
        duration_hours: f64,

        /// Opaque reference to the problem artifact
        #[arg(long = "problem")]
        problem_ref: String,

        /// Form link template; {code} is substituted client-side
        #[arg(long = "form")]
        form_ref_template: String,
    },

    /// Resolve the current phase for a code
    Lookup {
        code: String,
    },

    /// Start the countdown for a code (idempotent)
    Start {
        code: String,
    },

    /// Record the one submission a code is entitled to
    Submit {
        code: String,

        /// Repository link (required)
        #[arg(long = "link1")]
        link1: String,

        /// Live deployment link (optional)
        #[arg(long = "link2")]
        link2: Option<String>,

        /// Path of the proof file to upload
        #[arg(long = "file")]
        file: String,

        /// Participant full name
        #[arg(long = "name")]
        full_name: Option<String>,

        /// Participant email
        #[arg(long = "email")]
        email: Option<String>,

        /// Participant phone
        #[arg(long = "phone")]
        phone: Option<String>,
    },
}
