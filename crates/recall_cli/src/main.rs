//! CLI probe for the Recall core crate.
//!
//! # Responsibility
//! - Exercise parse/capture/list flows without any UI runtime.
//! - Keep output deterministic for quick local sanity checks.

use recall_core::db::open_db;
use recall_core::{parse_name_note, CaptureService, SqliteEntryRepository};
use std::env;
use std::process::ExitCode;

const DB_FILE_NAME: &str = "recall.sqlite3";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        println!("recall_core version={}", recall_core::core_version());
        print_usage();
        return ExitCode::SUCCESS;
    };

    match command.as_str() {
        "parse" => cmd_parse(rest),
        "add" => cmd_add(rest),
        "list" => cmd_list(),
        other => {
            eprintln!("unknown command: {other}");
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("usage: recall_cli parse <text> | add <text> | list");
}

/// Prints the name/note split without touching storage.
fn cmd_parse(args: &[String]) -> ExitCode {
    let input = args.join(" ");
    let parsed = parse_name_note(&input, None);
    println!("name={}", parsed.name);
    println!("note={}", parsed.note);
    ExitCode::SUCCESS
}

/// Captures one utterance into the local database file.
fn cmd_add(args: &[String]) -> ExitCode {
    let input = args.join(" ");
    let conn = match open_db(DB_FILE_NAME) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open database: {err}");
            return ExitCode::FAILURE;
        }
    };
    let service = CaptureService::new(SqliteEntryRepository::new(&conn));

    match service.capture(&input, None) {
        Ok(Some(entry)) => {
            println!("saved uuid={} name={} note={}", entry.uuid, entry.name, entry.note);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("nothing to save");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("capture failed: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Lists recent entries, newest first.
fn cmd_list() -> ExitCode {
    let conn = match open_db(DB_FILE_NAME) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open database: {err}");
            return ExitCode::FAILURE;
        }
    };
    let service = CaptureService::new(SqliteEntryRepository::new(&conn));

    match service.list_recent(None, 0) {
        Ok(recent) => {
            if recent.items.is_empty() {
                println!("no entries yet");
                return ExitCode::SUCCESS;
            }
            for entry in recent.items {
                let note = if entry.note.is_empty() {
                    String::new()
                } else {
                    format!(" — {}", entry.note)
                };
                println!("{} {}{}", entry.created_at, entry.name, note);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("list failed: {err}");
            ExitCode::FAILURE
        }
    }
}
