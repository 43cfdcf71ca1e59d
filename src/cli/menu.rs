// src/cli/menu.rs
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use inquire::{Confirm, InquireError, MultiSelect, Password, Select, Text};

use crate::cli::commands::{HistoryAction, TimeAction};
use crate::cli::handlers::{self, JsonOp, Output};
use crate::core::config::Config;
use crate::core::history::HistoryStore;
use crate::core::storage::FileStore;
use crate::models::{CharClass, CharsetMode, CharsetOption, CodecScheme, Direction, PasswordSpec};
use crate::tools::time::TIMEZONES;
use crate::utils::truncate_string;

const CODEC: &str = "🔤  Encode / decode text";
const PASSWORD: &str = "🔐  Generate password";
const STRENGTH: &str = "📊  Check password strength";
const ID_CHECK: &str = "🪪  Validate ID number";
const JSON: &str = "🧾  JSON formatter";
const HISTORY: &str = "🗂️  JSON history";
const TIME: &str = "🕒  Time converter";
const EXIT: &str = "❌  Exit";

pub async fn run_cli_menu(config: Config, should_exit: Arc<AtomicBool>) -> Result<()> {
    println!("🦀🧰 Welcome to");
    println!("╔══════════════════════════════════════╗");
    println!("║          🦀 RUST TOOLBOX             ║");
    println!("╚══════════════════════════════════════╝");

    while !should_exit.load(Ordering::SeqCst) {
        let options = vec![CODEC, PASSWORD, STRENGTH, ID_CHECK, JSON, HISTORY, TIME, EXIT];

        let selection = tokio::task::spawn_blocking(move || {
            Select::new("Choose a tool:", options)
                .with_help_message("Use arrow keys to navigate, Enter to select. Ctrl+C to exit.")
                .with_page_size(10)
                .prompt_skippable()
        })
        .await?;

        if should_exit.load(Ordering::SeqCst) {
            break;
        }

        let choice = match selection {
            Ok(Some(choice)) => choice,
            Ok(None) => continue,
            Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let outcome = match choice {
            CODEC => codec_menu(),
            PASSWORD => password_menu(&config),
            STRENGTH => strength_menu(),
            ID_CHECK => id_menu(),
            JSON => json_menu(&config),
            HISTORY => history_menu(&config),
            TIME => time_menu(&config),
            _ => break,
        };

        if let Err(e) = outcome {
            match e.downcast_ref::<InquireError>() {
                Some(InquireError::OperationInterrupted) => break,
                Some(InquireError::OperationCanceled) => continue,
                _ => handlers::report_error(&e, Output::Text),
            }
        }
        println!();
    }

    println!("👋 Goodbye!");
    Ok(())
}

fn codec_menu() -> Result<()> {
    let labels: Vec<String> = CodecScheme::ALL
        .iter()
        .map(|scheme| format!("{} - {}", scheme.label(), scheme.description()))
        .collect();
    let picked = Select::new("Scheme:", labels.clone()).prompt()?;
    let index = labels.iter().position(|label| *label == picked).unwrap_or(0);
    let scheme = CodecScheme::ALL[index];

    let direction = if scheme.reversible() {
        match Select::new("Direction:", vec!["Encode", "Decode"]).prompt()? {
            "Decode" => Direction::Decode,
            _ => Direction::Encode,
        }
    } else {
        Direction::Encode
    };

    let key = if scheme.requires_key() {
        Some(
            Text::new("Key:")
                .with_help_message("Letters A-Z map onto the key characters in order")
                .prompt()?,
        )
    } else {
        None
    };

    let text = Text::new("Text:").prompt()?;
    handlers::handle_transform(scheme, direction, text, key, Output::Text)
}

fn password_menu(config: &Config) -> Result<()> {
    let default_length = config.default_password_length.to_string();
    let length: usize = Text::new("Password length:")
        .with_default(&default_length)
        .with_help_message("Between 4 and 50")
        .prompt()?
        .trim()
        .parse()
        .map_err(|_| InquireError::Custom("Invalid number".into()))?;

    let modes = vec!["Character classes", "Digits only", "Letters only"];
    let mode = match Select::new("Characters:", modes).prompt()? {
        "Digits only" => CharsetMode::DigitsOnly,
        "Letters only" => CharsetMode::LettersOnly,
        _ => {
            let classes = vec![
                CharClass::Lower,
                CharClass::Upper,
                CharClass::Digit,
                CharClass::Symbol,
            ];
            let names = vec!["Lowercase", "Uppercase", "Digits", "Symbols"];
            let picked = MultiSelect::new("Include:", names.clone())
                .with_default(&[0, 1, 2])
                .prompt()?;
            classes
                .into_iter()
                .zip(names)
                .fold(CharsetMode::regular(&[]), |mode, (class, name)| {
                    mode.toggle(CharsetOption::Class(class), picked.contains(&name))
                })
        }
    };

    handlers::handle_password(&PasswordSpec { length, mode }, 1, Output::Text)
}

fn strength_menu() -> Result<()> {
    let password = Password::new("Password to check:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    handlers::handle_strength(&password, Output::Text);
    Ok(())
}

fn id_menu() -> Result<()> {
    let id = Text::new("ID number:").prompt()?;
    handlers::handle_id(&id, false, Output::Text)
}

// JSON typed at the prompt, or `@path` to read a file
fn json_input() -> Result<String> {
    let input = Text::new("JSON (or @path/to/file.json):").prompt()?;
    match input.trim().strip_prefix('@') {
        Some(path) => Ok(fs::read_to_string(path.trim())?),
        None => Ok(input),
    }
}

fn json_menu(config: &Config) -> Result<()> {
    let op = match Select::new("Action:", vec!["Format", "Compress", "Validate"]).prompt()? {
        "Compress" => JsonOp::Compress,
        "Validate" => JsonOp::Validate,
        _ => JsonOp::Format,
    };
    let input = json_input()?;
    let save = op != JsonOp::Validate
        && Confirm::new("Save input to history?")
            .with_default(false)
            .prompt()?;
    handlers::handle_json_input(op, &input, save, config, Output::Text)
}

fn history_menu(config: &Config) -> Result<()> {
    handlers::handle_history(HistoryAction::List, config, Output::Text)?;

    let entries = HistoryStore::load(FileStore::new(&config.data_dir)?)
        .list()
        .to_vec();
    if entries.is_empty() {
        return Ok(());
    }

    let action = Select::new("Action:", vec!["Show", "Delete", "Clear all", "Back"]).prompt()?;
    if action == "Back" {
        return Ok(());
    }
    if action == "Clear all" {
        if Confirm::new("Delete every saved entry?").with_default(false).prompt()? {
            handlers::handle_history(HistoryAction::Clear, config, Output::Text)?;
        }
        return Ok(());
    }

    let labels: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {}", i + 1, truncate_string(&entry.content.replace('\n', " "), 50)))
        .collect();
    let picked = Select::new("Entry:", labels.clone()).prompt()?;
    let index = labels.iter().position(|label| *label == picked).unwrap_or(0);
    let id = entries[index].id;

    if action == "Show" {
        handlers::handle_history(HistoryAction::Show { id }, config, Output::Text)
    } else {
        handlers::handle_history(HistoryAction::Delete { id }, config, Output::Text)
    }
}

fn pick_zone(config: &Config) -> Result<Option<String>> {
    let zones: Vec<&str> = TIMEZONES.iter().map(|(name, _)| *name).collect();
    let start = zones
        .iter()
        .position(|zone| zone.eq_ignore_ascii_case(&config.default_timezone))
        .unwrap_or(0);
    let zone = Select::new("Time zone:", zones)
        .with_starting_cursor(start)
        .prompt()?;
    Ok(Some(zone.to_string()))
}

fn prompt_timestamp(message: &str) -> Result<i64> {
    let value = Text::new(message)
        .prompt()?
        .trim()
        .parse()
        .map_err(|_| InquireError::Custom("Invalid timestamp".into()))?;
    Ok(value)
}

fn time_menu(config: &Config) -> Result<()> {
    let choices = vec![
        "Current time",
        "Timestamp → date-time",
        "Date-time → timestamp",
        "Difference between timestamps",
    ];
    let action = match Select::new("Conversion:", choices).prompt()? {
        "Current time" => TimeAction::Now {
            zone: pick_zone(config)?,
        },
        "Timestamp → date-time" => TimeAction::Convert {
            timestamp: prompt_timestamp("Unix timestamp (seconds):")?,
            zone: pick_zone(config)?,
        },
        "Date-time → timestamp" => TimeAction::Parse {
            datetime: Text::new("Date-time (YYYY-MM-DD HH:MM:SS):").prompt()?,
            zone: pick_zone(config)?,
        },
        _ => TimeAction::Diff {
            from: prompt_timestamp("First timestamp:")?,
            to: prompt_timestamp("Second timestamp:")?,
        },
    };
    handlers::handle_time(action, config, Output::Text)
}
