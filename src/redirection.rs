use crate::error::ShellError;
use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;

/// Which standard stream a redirection rebinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdStream {
    Stdout,
    Stderr,
}

/// An output redirection found on a line, e.g. `2>> err.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub target: String,
    pub descriptor: u32,
    pub append: bool,
}

impl Redirection {
    /// Maps the descriptor onto a standard stream.
    pub fn stream(&self) -> Result<StdStream, ShellError> {
        match self.descriptor {
            1 => Ok(StdStream::Stdout),
            2 => Ok(StdStream::Stderr),
            n => Err(ShellError::UnsupportedDescriptor(n)),
        }
    }

    /// Opens the target file for the redirected stream.
    ///
    /// The descriptor is checked first, so an unsupported one never creates the file.
    /// `>` truncates, `>>` appends; new files get mode `0644`.
    pub fn open(&self) -> Result<(StdStream, File), ShellError> {
        let stream = self.stream()?;

        let mut options = OpenOptions::new();
        options.create(true);
        if self.append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        options.mode(0o644);

        let file = options
            .open(&self.target)
            .map_err(|source| ShellError::FileOpen {
                path: self.target.clone(),
                source,
            })?;
        Ok((stream, file))
    }
}

/// Finds the first output redirection in a raw line.
///
/// Returns the command text with the redirection cut off, and the redirection
/// itself if there was one. `>>` is searched for before `>`. Digits directly in
/// front of the operator name the descriptor (default 1). Anything after the
/// first unquoted space following the filename is dropped.
pub fn scan(line: &str) -> (&str, Option<Redirection>) {
    let (op_start, op_len, append) = match line.find(">>") {
        Some(pos) => (pos, 2, true),
        None => match line.find('>') {
            Some(pos) => (pos, 1, false),
            None => return (line, None),
        },
    };

    let before = &line[..op_start];
    let digits_start = before.len()
        - before
            .bytes()
            .rev()
            .take_while(u8::is_ascii_digit)
            .count();
    let digits = &before[digits_start..];

    let descriptor = if digits.is_empty() {
        1
    } else {
        digits.bytes().fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
    };

    let region = line[op_start + op_len..].trim();
    let redirection = Redirection {
        target: extract_filename(region),
        descriptor,
        append,
    };

    (trim_unescaped_end(&line[..digits_start]), Some(redirection))
}

/// Trims trailing whitespace, keeping one whitespace character that a
/// trailing backslash escapes.
fn trim_unescaped_end(text: &str) -> &str {
    let trimmed = text.trim_end();
    let backslashes = trimmed.bytes().rev().take_while(|&b| b == b'\\').count();
    match text[trimmed.len()..].chars().next() {
        Some(escaped) if backslashes % 2 == 1 => &text[..trimmed.len() + escaped.len_utf8()],
        _ => trimmed,
    }
}

/// Pulls the filename out of the text following a redirection operator.
///
/// Quotes group characters (spaces and the other quote kind are literal inside)
/// and are themselves dropped unless escaped by a backslash. Backslashes are
/// copied as-is. The first unquoted space ends the name.
pub fn extract_filename(region: &str) -> String {
    let mut name = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in region.chars() {
        match c {
            '\'' | '"' if !escaped => match quote {
                None => quote = Some(c),
                Some(open) if open == c => quote = None,
                Some(_) => name.push(c),
            },
            ' ' if quote.is_none() => break,
            _ => name.push(c),
        }
        escaped = c == '\\' && !escaped;
    }

    name
}
