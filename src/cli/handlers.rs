// src/cli/handlers.rs
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use serde_json::{json, Value};

use crate::api::{self, AppState};
use crate::cli::commands::{CliCommand, HistoryAction, JsonAction, TimeAction};
use crate::codec;
use crate::core::config::Config;
use crate::core::error::ToolError;
use crate::core::history::{HistoryStore, MAX_ENTRIES};
use crate::core::storage::{FileStore, MemoryStore};
use crate::generators::{analyze_password_strength, PasswordGenerator, StrengthReport};
use crate::models::{
    CharClass, CharsetMode, CharsetOption, CodecScheme, Direction, HistoryEntry, PasswordSpec, Strength,
};
use crate::tools::{json as json_tool, time};
use crate::utils::{format_bytes, format_time_ago, truncate_string};
use crate::validators::id_number;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

impl Output {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Output::Json
        } else {
            Output::Text
        }
    }
}

fn emit(output: Output, mut value: Value, text: impl FnOnce()) {
    match output {
        Output::Json => {
            if let Value::Object(map) = &mut value {
                map.insert("success".to_string(), Value::Bool(true));
            }
            println!("{}", value);
        }
        Output::Text => text(),
    }
}

/// Prints a failure in the selected output mode.
pub fn report_error(err: &anyhow::Error, output: Output) {
    match output {
        Output::Json => {
            let kind = err
                .downcast_ref::<ToolError>()
                .map(|e| e.kind())
                .unwrap_or("internal");
            println!(
                "{}",
                json!({ "success": false, "kind": kind, "error": format!("{:#}", err) })
            );
        }
        Output::Text => eprintln!("{} {:#}", style("❌").red(), err),
    }
}

// Text from the argument, or all of stdin minus one trailing newline
fn read_text(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(buffer)
}

fn read_source(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => read_text(None),
    }
}

fn open_history(config: &Config) -> Result<HistoryStore<FileStore>> {
    let storage = FileStore::new(&config.data_dir)
        .with_context(|| format!("Failed to open data directory {}", config.data_dir.display()))?;
    Ok(HistoryStore::load(storage))
}

/// Character sources for the command-line password flags.
pub fn password_mode(
    lowercase: bool,
    uppercase: bool,
    numbers: bool,
    symbols: bool,
    numbers_only: bool,
    letters_only: bool,
) -> CharsetMode {
    let mode = [
        (CharClass::Lower, lowercase),
        (CharClass::Upper, uppercase),
        (CharClass::Digit, numbers),
        (CharClass::Symbol, symbols),
    ]
    .into_iter()
    .fold(CharsetMode::regular(&[]), |mode, (class, on)| {
        mode.toggle(CharsetOption::Class(class), on)
    });

    if numbers_only {
        mode.toggle(CharsetOption::DigitsOnly, true)
    } else if letters_only {
        mode.toggle(CharsetOption::LettersOnly, true)
    } else {
        mode
    }
}

pub async fn run_command(command: CliCommand, config: &Config, output: Output) -> Result<()> {
    match command {
        CliCommand::Encode { scheme, text, key } => {
            handle_transform(scheme, Direction::Encode, read_text(text)?, key, output)
        }
        CliCommand::Decode { scheme, text, key } => {
            handle_transform(scheme, Direction::Decode, read_text(text)?, key, output)
        }
        CliCommand::Schemes => {
            handle_schemes(output);
            Ok(())
        }
        CliCommand::Password {
            length,
            no_lowercase,
            no_uppercase,
            no_numbers,
            symbols,
            numbers_only,
            letters_only,
            count,
        } => {
            let spec = PasswordSpec {
                length: length.unwrap_or(config.default_password_length),
                mode: password_mode(
                    !no_lowercase,
                    !no_uppercase,
                    !no_numbers,
                    symbols,
                    numbers_only,
                    letters_only,
                ),
            };
            handle_password(&spec, count, output)
        }
        CliCommand::Strength { password } => {
            handle_strength(&read_text(password)?, output);
            Ok(())
        }
        CliCommand::Id { id_number, strict } => handle_id(&id_number, strict, output),
        CliCommand::Json { action } => handle_json(action, config, output),
        CliCommand::History { action } => handle_history(action, config, output),
        CliCommand::Time { action } => handle_time(action, config, output),
        CliCommand::Serve { address, port, memory } => {
            let address = address.unwrap_or_else(|| config.web_address.clone());
            let port = port.unwrap_or(config.web_port);
            let state = if memory {
                log::info!("History is kept in memory and lost on exit");
                AppState::new(config.clone(), Box::new(MemoryStore::new()))
            } else {
                AppState::from_config(config.clone())?
            };
            println!("🚀 API server listening on http://{}:{}", address, port);
            println!("📖 API docs at http://{}:{}/swagger-ui/", address, port);
            api::start_server(state, &address, port)
                .await
                .context("API server failed")
        }
    }
}

pub fn handle_transform(
    scheme: CodecScheme,
    direction: Direction,
    text: String,
    key: Option<String>,
    output: Output,
) -> Result<()> {
    let result = codec::transform(&text, scheme, direction, key.as_deref())?;
    emit(
        output,
        json!({ "scheme": scheme, "direction": direction, "output": result }),
        || println!("{}", result),
    );
    Ok(())
}

pub fn handle_schemes(output: Output) {
    let schemes: Vec<Value> = CodecScheme::ALL
        .iter()
        .map(|scheme| {
            json!({
                "id": scheme.id(),
                "label": scheme.label(),
                "description": scheme.description(),
                "requires_key": scheme.requires_key(),
                "reversible": scheme.reversible(),
            })
        })
        .collect();

    emit(output, json!({ "schemes": schemes }), || {
        for scheme in CodecScheme::ALL {
            let mut notes = Vec::new();
            if scheme.requires_key() {
                notes.push("needs --key");
            }
            if !scheme.reversible() {
                notes.push("one-way");
            }
            let notes = if notes.is_empty() {
                String::new()
            } else {
                format!(" ({})", notes.join(", "))
            };
            println!(
                "{:<14} {}{}",
                style(scheme.id()).cyan().bold(),
                scheme.description(),
                style(notes).dim()
            );
        }
    });
}

fn strength_label(report: &StrengthReport) -> String {
    let label = report.strength.to_string();
    match report.strength {
        Strength::Weak => style(label).red().to_string(),
        Strength::Medium => style(label).yellow().to_string(),
        Strength::Strong => style(label).green().to_string(),
    }
}

/// Upper bound for `password --count`.
pub const MAX_PASSWORD_COUNT: u16 = 100;

pub fn handle_password(spec: &PasswordSpec, count: u16, output: Output) -> Result<()> {
    if !(1..=MAX_PASSWORD_COUNT).contains(&count) {
        return Err(ToolError::MalformedInput(format!(
            "count must be between 1 and {}, got {}",
            MAX_PASSWORD_COUNT, count
        ))
        .into());
    }

    let generator = PasswordGenerator::new();
    let passwords = (0..count)
        .map(|_| {
            let password = generator.generate_password(spec)?;
            let report = generator.analyze_password_strength(&password);
            Ok((password, report))
        })
        .collect::<std::result::Result<Vec<_>, ToolError>>()?;

    let items: Vec<Value> = passwords
        .iter()
        .map(|(password, report)| {
            json!({ "password": password, "strength": report.strength, "score": report.score })
        })
        .collect();

    emit(output, json!({ "passwords": items }), || {
        for (password, report) in &passwords {
            println!("{}  [{}]", password, strength_label(report));
        }
    });
    Ok(())
}

pub fn handle_strength(password: &str, output: Output) {
    let report = analyze_password_strength(password);
    emit(
        output,
        json!({ "score": report.score, "strength": report.strength, "feedback": report.feedback }),
        || {
            println!("Strength: {} (score {}/6)", strength_label(&report), report.score);
            for tip in &report.feedback {
                println!("  • {}", tip);
            }
        },
    );
}

pub fn handle_id(raw: &str, strict: bool, output: Output) -> Result<()> {
    if strict {
        id_number::validate_strict(raw)?;
    }

    let report = id_number::validate(raw);
    let info = id_number::decode(raw);

    let errors: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
    let warnings: Vec<String> = report.warnings.iter().map(|w| w.to_string()).collect();

    emit(
        output,
        json!({
            "is_valid": report.is_valid(),
            "errors": errors,
            "warnings": warnings,
            "issues": report.errors,
            "info": info,
        }),
        || {
            if report.is_valid() {
                println!("{} Valid ID number", style("✅").green());
            } else {
                println!("{} Invalid ID number", style("❌").red());
                for error in &errors {
                    println!("  • {}", error);
                }
            }
            for warning in &warnings {
                println!("{} {}", style("⚠️").yellow(), warning);
            }
            if let Some(info) = &info {
                println!("  Province:   {} ({})", info.province, info.province_code);
                println!("  City code:  {}", info.city_code);
                println!("  County:     {}", info.county_code);
                println!("  Birth date: {}", info.birth_date);
                println!("  Age:        {}", info.age);
                println!("  Gender:     {}", info.gender);
                println!("  Sequence:   {}", info.sequence_code);
                println!(
                    "  Check char: {} (expected {})",
                    info.check_char, info.computed_check_char
                );
            }
        },
    );
    Ok(())
}

fn save_to_history(config: &Config, content: &str) -> Result<HistoryEntry> {
    let mut history = open_history(config)?;
    Ok(history.save(content)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonOp {
    Format,
    Compress,
    Validate,
}

pub fn handle_json(action: JsonAction, config: &Config, output: Output) -> Result<()> {
    match action {
        JsonAction::Format { file, save } => {
            handle_json_input(JsonOp::Format, &read_source(file)?, save, config, output)
        }
        JsonAction::Compress { file, save } => {
            handle_json_input(JsonOp::Compress, &read_source(file)?, save, config, output)
        }
        JsonAction::Validate { file } => {
            handle_json_input(JsonOp::Validate, &read_source(file)?, false, config, output)
        }
    }
}

/// Runs one JSON operation; with `save` the raw input also goes to history
/// once it has parsed.
pub fn handle_json_input(
    op: JsonOp,
    input: &str,
    save: bool,
    config: &Config,
    output: Output,
) -> Result<()> {
    let rendered = match op {
        JsonOp::Format => Some(json_tool::format(input)?),
        JsonOp::Compress => Some(json_tool::compress(input)?),
        JsonOp::Validate => {
            json_tool::validate(input)?;
            None
        }
    };
    let entry = if save { Some(save_to_history(config, input)?) } else { None };

    emit(
        output,
        json!({ "valid": true, "output": rendered, "saved": entry }),
        || {
            match &rendered {
                Some(text) => println!("{}", text),
                None => println!("{} JSON is valid", style("✅").green()),
            }
            if let Some(entry) = &entry {
                println!("{} Saved to history as {}", style("💾").cyan(), entry.id);
            }
        },
    );
    Ok(())
}

pub fn handle_history(action: HistoryAction, config: &Config, output: Output) -> Result<()> {
    let mut history = open_history(config)?;

    match action {
        HistoryAction::List => {
            let total = history.total_bytes();
            emit(
                output,
                json!({
                    "entries": history.list(),
                    "count": history.len(),
                    "max_entries": MAX_ENTRIES,
                    "total_bytes": total,
                    "total_size": format_bytes(total),
                }),
                || {
                    if history.is_empty() {
                        println!("No saved JSON yet.");
                        return;
                    }
                    for (i, entry) in history.list().iter().enumerate() {
                        let preview = entry.content.split_whitespace().collect::<Vec<_>>().join(" ");
                        println!(
                            "{:>2}. {}  {:<12} {:>9}  {}",
                            i + 1,
                            style(entry.id).cyan(),
                            format_time_ago(entry.created_at),
                            format_bytes(entry.byte_size),
                            truncate_string(&preview, 40)
                        );
                    }
                    println!(
                        "{}/{} entries, {} total",
                        history.len(),
                        MAX_ENTRIES,
                        format_bytes(total)
                    );
                },
            );
        }
        HistoryAction::Show { id } => {
            let entry = history
                .get(id)
                .cloned()
                .ok_or_else(|| ToolError::EntryNotFound(id.to_string()))?;
            emit(output, json!({ "entry": entry }), || println!("{}", entry.content));
        }
        HistoryAction::Save { file } => {
            let entry = history.save(&read_source(file)?)?;
            emit(output, json!({ "entry": entry }), || {
                println!(
                    "{} Saved {} ({})",
                    style("✅").green(),
                    entry.id,
                    format_bytes(entry.byte_size)
                )
            });
        }
        HistoryAction::Delete { id } => {
            let removed = history.delete(id)?;
            emit(output, json!({ "id": id, "removed": removed }), || {
                if removed {
                    println!("{} Removed {}", style("🗑️").red(), id)
                } else {
                    println!("No entry {}, nothing removed", id)
                }
            });
        }
        HistoryAction::Clear => {
            history.clear()?;
            emit(output, json!({ "cleared": true }), || {
                println!("{} History cleared", style("✅").green())
            });
        }
    }
    Ok(())
}

pub fn handle_time(action: TimeAction, config: &Config, output: Output) -> Result<()> {
    let default_zone = config.default_timezone.as_str();

    match action {
        TimeAction::Now { zone } => {
            let zone = zone.as_deref().unwrap_or(default_zone);
            print_conversion(time::convert(time::now_timestamp(), zone)?, output);
        }
        TimeAction::Convert { timestamp, zone } => {
            let zone = zone.as_deref().unwrap_or(default_zone);
            print_conversion(time::convert(timestamp, zone)?, output);
        }
        TimeAction::Parse { datetime, zone } => {
            let zone = zone.as_deref().unwrap_or(default_zone);
            let timestamp = time::parse_datetime(&datetime, zone)?;
            print_conversion(time::convert(timestamp, zone)?, output);
        }
        TimeAction::Diff { from, to } => {
            let human = time::format_time_diff(from, to);
            emit(
                output,
                json!({ "seconds": from.abs_diff(to), "human": human }),
                || println!("{}", human),
            );
        }
        TimeAction::Zones => {
            let zones: Vec<Value> = time::TIMEZONES
                .iter()
                .map(|(name, hours)| json!({ "name": name, "offset_hours": hours }))
                .collect();
            emit(output, json!({ "timezones": zones }), || {
                for (name, hours) in time::TIMEZONES {
                    println!("{:<22} UTC{:+}", name, hours);
                }
            });
        }
    }
    Ok(())
}

fn print_conversion(conversion: time::Conversion, output: Output) {
    emit(output, json!(conversion), || {
        println!(
            "{}  {}  ({})",
            conversion.timestamp,
            conversion.datetime,
            style(&conversion.timezone).dim()
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn password_flags_map_to_modes() {
        assert_eq!(
            password_mode(true, true, true, false, false, false),
            CharsetMode::regular(&[CharClass::Lower, CharClass::Upper, CharClass::Digit])
        );
        assert_eq!(
            password_mode(true, true, true, true, true, false),
            CharsetMode::DigitsOnly
        );
        assert_eq!(
            password_mode(false, false, false, false, false, true),
            CharsetMode::LettersOnly
        );
        assert_eq!(
            password_mode(false, false, false, false, false, false).charset(),
            ""
        );
    }

    #[test]
    fn empty_charset_surfaces_as_tool_error() {
        let spec = PasswordSpec {
            length: 8,
            mode: password_mode(false, false, false, false, false, false),
        };
        let err = handle_password(&spec, 1, Output::Json).unwrap_err();
        assert_eq!(err.downcast_ref::<ToolError>(), Some(&ToolError::EmptyCharset));
    }

    #[test]
    fn password_count_is_bounded() {
        let spec = PasswordSpec::default();
        handle_password(&spec, MAX_PASSWORD_COUNT, Output::Json).unwrap();

        for count in [0, MAX_PASSWORD_COUNT + 1, u16::MAX] {
            let err = handle_password(&spec, count, Output::Json).unwrap_err();
            assert_eq!(
                err.downcast_ref::<ToolError>().map(|e| e.kind()),
                Some("malformed_input")
            );
        }
    }

    #[test]
    fn strict_id_check_fails_on_invalid_numbers() {
        handle_id("11010519491231002X", true, Output::Json).unwrap();
        handle_id("123", false, Output::Json).unwrap();

        let err = handle_id("123", true, Output::Json).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ToolError>().map(|e| e.kind()),
            Some("validation_failed")
        );
    }

    #[test]
    fn history_commands_share_the_data_dir() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(&tmp);

        let entry = save_to_history(&config, "{\"a\":1}").unwrap();
        handle_history(HistoryAction::List, &config, Output::Json).unwrap();
        handle_history(HistoryAction::Show { id: entry.id }, &config, Output::Json).unwrap();

        handle_history(HistoryAction::Delete { id: entry.id }, &config, Output::Json).unwrap();
        let err = handle_history(HistoryAction::Show { id: entry.id }, &config, Output::Json)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::EntryNotFound(_))
        ));
    }

    #[test]
    fn json_commands_read_files() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(&tmp);
        let input = tmp.path().join("in.json");
        fs::write(&input, "{ \"a\": [1, 2] }").unwrap();

        handle_json(
            JsonAction::Compress {
                file: Some(input.clone()),
                save: true,
            },
            &config,
            Output::Json,
        )
        .unwrap();
        assert_eq!(open_history(&config).unwrap().len(), 1);

        fs::write(&input, "{oops").unwrap();
        let err = handle_json(JsonAction::Validate { file: Some(input) }, &config, Output::Json)
            .unwrap_err();
        assert_eq!(err.downcast_ref::<ToolError>().map(|e| e.kind()), Some("malformed_input"));
    }

    #[test]
    fn unknown_zone_is_reported() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(&tmp);
        let err = handle_time(
            TimeAction::Convert {
                timestamp: 0,
                zone: Some("Mars/Olympus".to_string()),
            },
            &config,
            Output::Json,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::UnknownTimezone(_))
        ));
    }
}
