// src/cli/commands.rs
use std::path::PathBuf;

use clap::Subcommand;
use uuid::Uuid;

use crate::models::CodecScheme;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Encode text with a codec scheme (reads stdin when TEXT is omitted)
    Encode {
        /// Scheme: base64, url, html, toyhash, sha256, caesar, substitution
        #[arg(required = true)]
        scheme: CodecScheme,

        /// Text to encode
        text: Option<String>,

        /// Key for the substitution cipher
        #[arg(long, short)]
        key: Option<String>,
    },

    /// Decode text with a reversible codec scheme
    Decode {
        /// Scheme: base64, url, html, caesar, substitution
        #[arg(required = true)]
        scheme: CodecScheme,

        /// Text to decode
        text: Option<String>,

        /// Key for the substitution cipher
        #[arg(long, short)]
        key: Option<String>,
    },

    /// List the available codec schemes
    Schemes,

    /// Generate passwords
    Password {
        /// Password length (4-50)
        #[arg(long, short)]
        length: Option<usize>,

        /// Leave out lowercase letters
        #[arg(long)]
        no_lowercase: bool,

        /// Leave out uppercase letters
        #[arg(long)]
        no_uppercase: bool,

        /// Leave out digits
        #[arg(long)]
        no_numbers: bool,

        /// Include symbols
        #[arg(long)]
        symbols: bool,

        /// Digits only
        #[arg(long, conflicts_with = "letters_only")]
        numbers_only: bool,

        /// Letters only
        #[arg(long)]
        letters_only: bool,

        /// How many passwords to generate (1-100)
        #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=100))]
        count: u16,
    },

    /// Rate a password (reads stdin when PASSWORD is omitted)
    Strength {
        password: Option<String>,
    },

    /// Validate and decode an 18-character ID number
    Id {
        #[arg(required = true)]
        id_number: String,

        /// Exit with an error when the number is invalid
        #[arg(long)]
        strict: bool,
    },

    /// Format, compress or validate JSON
    Json {
        #[command(subcommand)]
        action: JsonAction,
    },

    /// Manage saved JSON history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Convert between timestamps and date-times
    Time {
        #[command(subcommand)]
        action: TimeAction,
    },

    /// Run the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long)]
        address: Option<String>,

        /// Port to listen on
        #[arg(long, short)]
        port: Option<u16>,

        /// Keep history in memory only
        #[arg(long)]
        memory: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum JsonAction {
    /// Pretty-print with two-space indentation
    Format {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Also save the input to history
        #[arg(long)]
        save: bool,
    },

    /// Strip all insignificant whitespace
    Compress {
        file: Option<PathBuf>,

        #[arg(long)]
        save: bool,
    },

    /// Check that the input parses
    Validate {
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List entries, oldest first
    List,

    /// Print one entry
    Show {
        #[arg(required = true)]
        id: Uuid,
    },

    /// Save JSON text from a file or stdin
    Save {
        file: Option<PathBuf>,
    },

    /// Delete one entry
    Delete {
        #[arg(required = true)]
        id: Uuid,
    },

    /// Delete every entry
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum TimeAction {
    /// Current time
    Now {
        #[arg(long, short)]
        zone: Option<String>,
    },

    /// Unix seconds to date-time
    Convert {
        #[arg(required = true, allow_negative_numbers = true)]
        timestamp: i64,

        #[arg(long, short)]
        zone: Option<String>,
    },

    /// Date-time (`YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`) to Unix seconds
    Parse {
        #[arg(required = true)]
        datetime: String,

        #[arg(long, short)]
        zone: Option<String>,
    },

    /// Distance between two timestamps
    Diff {
        #[arg(required = true, allow_negative_numbers = true)]
        from: i64,

        #[arg(required = true, allow_negative_numbers = true)]
        to: i64,
    },

    /// List supported zones
    Zones,
}
