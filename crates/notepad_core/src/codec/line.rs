//! `title: content` line codec.
//!
//! # Responsibility
//! - Serialize a note into exactly one terminated line.
//! - Parse one line back into a note.
//!
//! # Invariants
//! - Parsing splits on the first delimiter only.
//! - Empty lines never produce a note.
//! - Delimiters and line breaks inside fields are written verbatim; such
//!   lines are ambiguous on reload and `is_line_safe` reports them.

use crate::model::note::Note;

/// Separator between title and content.
pub const NOTE_DELIMITER: &str = ": ";

/// Platform line separator appended to every serialized note.
#[cfg(windows)]
pub const LINE_TERMINATOR: &str = "\r\n";
/// Platform line separator appended to every serialized note.
#[cfg(not(windows))]
pub const LINE_TERMINATOR: &str = "\n";

/// Encodes one note as `title: content` plus the line terminator.
pub fn serialize_note(note: &Note) -> String {
    let mut line = String::with_capacity(
        note.title.len() + NOTE_DELIMITER.len() + note.content.len() + LINE_TERMINATOR.len(),
    );
    line.push_str(&note.title);
    line.push_str(NOTE_DELIMITER);
    line.push_str(&note.content);
    line.push_str(LINE_TERMINATOR);
    line
}

/// Encodes a whole list in order.
pub fn serialize_notes(notes: &[Note]) -> String {
    notes.iter().map(serialize_note).collect()
}

/// Decodes one line into a note with a fresh id.
///
/// Returns `None` for an empty line. A line without the delimiter becomes a
/// note whose title is the whole line and whose content is empty.
pub fn parse_note_line(line: &str) -> Option<Note> {
    let line = line
        .strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(line);
    if line.is_empty() {
        return None;
    }

    match line.split_once(NOTE_DELIMITER) {
        Some((title, content)) => Some(Note::new(title, content)),
        None => Some(Note::new(line, "")),
    }
}

/// Decodes a whole file body, skipping empty lines, in file order.
pub fn parse_notes(body: &str) -> Vec<Note> {
    body.lines().filter_map(parse_note_line).collect()
}

/// Returns whether `title`/`content` would reload to the same values.
pub fn is_line_safe(title: &str, content: &str) -> bool {
    !title.contains(NOTE_DELIMITER) && !has_line_break(title) && !has_line_break(content)
}

fn has_line_break(value: &str) -> bool {
    value.contains(['\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::{
        is_line_safe, parse_note_line, parse_notes, serialize_note, LINE_TERMINATOR,
    };
    use crate::model::note::Note;

    #[test]
    fn serialize_joins_fields_with_delimiter_and_terminator() {
        let line = serialize_note(&Note::new("Groceries", "milk, eggs"));
        assert_eq!(line, format!("Groceries: milk, eggs{LINE_TERMINATOR}"));
    }

    #[test]
    fn parse_splits_on_first_delimiter_only() {
        let note = parse_note_line("Time: 10: 30\n").expect("line should parse");
        assert_eq!(note.fields(), ("Time", "10: 30"));
    }

    #[test]
    fn parse_handles_empty_fields() {
        assert_eq!(parse_note_line(": body").unwrap().fields(), ("", "body"));
        assert_eq!(parse_note_line("title: ").unwrap().fields(), ("title", ""));
        assert_eq!(parse_note_line(": \r\n").unwrap().fields(), ("", ""));
    }

    #[test]
    fn parse_treats_line_without_delimiter_as_title() {
        let note = parse_note_line("just a title").expect("line should parse");
        assert_eq!(note.fields(), ("just a title", ""));
    }

    #[test]
    fn parse_skips_empty_lines() {
        assert!(parse_note_line("").is_none());
        assert!(parse_note_line("\r\n").is_none());

        let notes = parse_notes("A: 1\n\nB: 2\r\n");
        let fields: Vec<_> = notes.iter().map(Note::fields).collect();
        assert_eq!(fields, vec![("A", "1"), ("B", "2")]);
    }

    #[test]
    fn line_safety_flags_ambiguous_fields() {
        assert!(is_line_safe("title", "content: with delimiter"));
        assert!(!is_line_safe("a: b", "c"));
        assert!(!is_line_safe("title", "two\nlines"));
        assert!(!is_line_safe("carriage\r", ""));
    }
}
