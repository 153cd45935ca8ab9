//! Reading one line of input, either from a terminal in raw mode or from a
//! plain stream.

use crate::Builtin;
use crate::get_all_executables;
use std::io::{self, BufRead, Write};
use termion::event::Key;
use termion::input::TermRead;
use termion::raw::IntoRawMode;

/// Reads a line from a non-terminal stream.
///
/// Returns `None` at end of input. The trailing newline is stripped.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let content_len = line
        .strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s).len());
    if let Some(len) = content_len {
        line.truncate(len);
    }
    Ok(Some(line))
}

/// Reads a line from the terminal, handling keys one at a time.
///
/// Returns `None` when Ctrl-D is pressed on an empty line or input ends.
/// Ctrl-C discards the line and yields an empty one.
pub fn read_line_raw() -> io::Result<Option<String>> {
    // Enter raw mode to handle input character by character
    let mut stdout = io::stdout().into_raw_mode()?;
    let stdin = io::stdin();
    let mut buffer = String::new();

    for key in stdin.keys() {
        match key? {
            Key::Ctrl('c') => {
                buffer.clear();
                write!(stdout, "\r\n")?;
                return Ok(Some(buffer));
            }
            Key::Ctrl('d') => {
                if buffer.is_empty() {
                    write!(stdout, "\r\n")?;
                    return Ok(None);
                }
            }
            Key::Char('\n') | Key::Char('\r') => {
                write!(stdout, "\r\n")?;
                return Ok(Some(buffer));
            }
            Key::Char('\t') => {
                match complete(&buffer).as_slice() {
                    [single] => {
                        let remainder = &single[buffer.len()..];
                        write!(stdout, "{} ", remainder)?;
                        buffer.push_str(remainder);
                        buffer.push(' ');
                    }
                    // None or ambiguous: beep
                    _ => write!(stdout, "\x07")?,
                }
                stdout.flush()?;
            }
            Key::Backspace => {
                if buffer.pop().is_some() {
                    // Move cursor back, erase char with space, move back again
                    write!(stdout, "\x08 \x08")?;
                    stdout.flush()?;
                }
            }
            Key::Char(c) => {
                buffer.push(c);
                write!(stdout, "{}", c)?;
                stdout.flush()?;
            }
            _ => {}
        }
    }

    Ok(None)
}

/// Command names starting with `prefix`: builtins plus executables on `PATH`,
/// sorted and deduplicated.
///
/// Only the first word is completed; once the line holds a space there are no
/// candidates.
pub fn complete(prefix: &str) -> Vec<String> {
    if prefix.contains(' ') {
        return Vec::new();
    }

    let mut candidates: Vec<String> = Builtin::NAMES
        .iter()
        .filter(|name| name.starts_with(prefix))
        .map(|name| name.to_string())
        .collect();
    candidates.extend(
        get_all_executables()
            .into_iter()
            .filter(|name| name.starts_with(prefix)),
    );

    candidates.sort();
    candidates.dedup();
    candidates
}
