//! Terminal shell for Notepad.
//!
//! # Responsibility
//! - Parse `notepad [--file PATH] [--] <command>` and route it to the presenter.
//! - Print rendered note blocks and view changes as plain text.
//!
//! # Invariants
//! - Block numbers shown by `list` are 1-based positions in file order.
//! - The CLI never touches the notes file directly.

use log::info;
use notepad_core::{
    core_version, init_logging, open_presenter, AddNoteForm, FlatFileNoteRepository, NoteBlock,
    NoteId, NoteListView, NotePresenter, NotepadConfig, ViewChange,
};
use std::error::Error;
use std::path::PathBuf;

const USAGE: &str = "Usage: notepad [--file PATH] [--] <command>

Commands:
  list [--json]                    Show all notes (default)
  add <title> <content...>         Add a note
  edit <n> <title> <content...>    Replace title and content of note n
  delete <n>                       Delete note n
  version                          Print core version";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List { json: bool },
    Add { title: String, content: String },
    Edit { number: usize, title: String, content: String },
    Delete { number: usize },
    Version,
    Help,
}

fn main() -> Result<(), Box<dyn Error>> {
    let (file, command) = parse_args(std::env::args().skip(1).collect())?;
    if command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }
    if command == Command::Version {
        println!("notepad_core version={}", core_version());
        return Ok(());
    }

    let config = NotepadConfig::from_env(file)?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(config.log_level.as_str(), &log_dir.to_string_lossy())?;
    }
    info!(
        "event=cli_start module=cli status=ok notes_file={}",
        config.notes_file.display()
    );

    let mut presenter = open_presenter(&config);
    run(&mut presenter, command)?;
    if let Some(status) = presenter.take_status() {
        eprintln!("warning: {status}");
    }
    Ok(())
}

fn run(
    presenter: &mut NotePresenter<FlatFileNoteRepository>,
    command: Command,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::List { json: true } => {
            println!("{}", serde_json::to_string_pretty(&presenter.render())?);
        }
        Command::List { json: false } => print!("{}", format_view(&presenter.render())),
        Command::Add { title, content } => {
            let (title, content) = AddNoteForm::new(title, content).submit()?;
            let change = presenter.on_add_requested(title, content)?;
            println!("{}", describe_change(&change));
        }
        Command::Edit {
            number,
            title,
            content,
        } => {
            let id = note_id_at(presenter, number)?;
            let mut draft = presenter.on_edit_requested(id)?;
            draft.title = title;
            draft.content = content;
            let change = presenter.on_edit_confirmed(draft)?;
            println!("{}", describe_change(&change));
        }
        Command::Delete { number } => {
            let id = note_id_at(presenter, number)?;
            let change = presenter.on_delete_requested(id)?;
            println!("{} (note {number})", describe_change(&change));
        }
        Command::Version | Command::Help => {}
    }
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<(Option<PathBuf>, Command), String> {
    // Global options come before the subcommand; everything after it is
    // command input, so note text may contain `-f` or `--json`.
    let mut file = None;
    let mut iter = args.into_iter();
    let mut rest = Vec::new();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--file" | "-f" => {
                let value = iter.next().ok_or("--file requires a path")?;
                file = Some(PathBuf::from(value));
            }
            "--" => break,
            _ => {
                rest.push(arg);
                break;
            }
        }
    }
    rest.extend(iter);

    let command = match rest.first().map(String::as_str) {
        None | Some("list") => Command::List {
            json: rest.iter().skip(1).any(|arg| arg == "--json"),
        },
        Some("add") => {
            if rest.len() < 3 {
                return Err(format!("add needs a title and content\n\n{USAGE}"));
            }
            Command::Add {
                title: rest[1].clone(),
                content: rest[2..].join(" "),
            }
        }
        Some("edit") => {
            if rest.len() < 4 {
                return Err(format!("edit needs a number, title and content\n\n{USAGE}"));
            }
            Command::Edit {
                number: parse_number(&rest[1])?,
                title: rest[2].clone(),
                content: rest[3..].join(" "),
            }
        }
        Some("delete") => {
            let raw = rest
                .get(1)
                .ok_or_else(|| format!("delete needs a number\n\n{USAGE}"))?;
            Command::Delete {
                number: parse_number(raw)?,
            }
        }
        Some("version") => Command::Version,
        Some("help" | "-h" | "--help") => Command::Help,
        Some(other) => return Err(format!("unknown command `{other}`\n\n{USAGE}")),
    };
    Ok((file, command))
}

fn parse_number(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(format!("note number must be a positive integer, got `{raw}`")),
    }
}

fn note_id_at(
    presenter: &NotePresenter<FlatFileNoteRepository>,
    number: usize,
) -> Result<NoteId, String> {
    presenter
        .store()
        .notes()
        .get(number - 1)
        .map(|note| note.id)
        .ok_or_else(|| {
            format!(
                "no note {number}; there are {} note(s)",
                presenter.store().len()
            )
        })
}

fn format_view(view: &NoteListView) -> String {
    let mut out = format!("{}\n{}\n", view.heading, "-".repeat(view.heading.len()));
    if view.blocks.is_empty() {
        out.push_str("(no notes yet)\n");
        return out;
    }
    for (index, block) in view.blocks.iter().enumerate() {
        out.push_str(&format_block(index + 1, block));
    }
    out
}

fn format_block(number: usize, block: &NoteBlock) -> String {
    let mut out = format!("[{number}] {}\n", block.title);
    for line in block.content.lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn describe_change(change: &ViewChange) -> String {
    match change {
        ViewChange::Appended(block) => format!("Added: {}", block.title),
        ViewChange::Updated(block) => format!("Updated: {}", block.title),
        ViewChange::Removed(_) => "Deleted".to_string(),
    }
}
