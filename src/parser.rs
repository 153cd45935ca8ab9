use crate::error::ShellError;

/// A command name followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

/// Quoting state carried across one pass of the tokenizer.
#[derive(Debug, Default)]
struct QuoteState {
    in_single: bool,
    in_double: bool,
    escape_next: bool,
}

/// Characters a backslash may escape inside double quotes.
fn is_double_quote_special(c: char) -> bool {
    matches!(c, '\\' | '$' | '"' | '\n')
}

/// Splits a line into words.
///
/// This tokenizer handles:
/// - Single quotes (`'...'`): contents are literal, backslashes included.
/// - Double quotes (`"..."`): a backslash only escapes `\`, `$`, `"` and newline;
///   before any other character it is kept.
/// - Unquoted text: a backslash escapes the next character; runs of spaces
///   separate words.
///
/// A trailing unescaped backslash is kept as a literal backslash.
///
/// # Example
/// ```
/// use myshell::tokenize;
///
/// let args = tokenize("echo 'hello world'");
/// assert_eq!(args, vec!["echo", "hello world"]);
/// ```
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut state = QuoteState::default();

    for c in input.chars() {
        if state.escape_next {
            if state.in_double && !is_double_quote_special(c) {
                current.push('\\');
            }
            current.push(c);
            state.escape_next = false;
        } else if c == '\\' {
            if state.in_single {
                current.push(c);
            } else {
                state.escape_next = true;
            }
        } else if c == '\'' && !state.in_double {
            state.in_single = !state.in_single;
        } else if c == '"' && !state.in_single {
            state.in_double = !state.in_double;
        } else if c == ' ' && !state.in_single && !state.in_double {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }

    if state.escape_next {
        current.push('\\');
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Tokenizes `input` and splits off the command name.
///
/// Fails with [`ShellError::MalformedInput`] when the line holds no words.
pub fn parse_command(input: &str) -> Result<Command, ShellError> {
    let mut tokens = tokenize(input).into_iter();
    let name = tokens.next().ok_or(ShellError::MalformedInput)?;
    Ok(Command {
        name,
        args: tokens.collect(),
    })
}
