use std::io;
use thiserror::Error;

/// Everything that can go wrong while running a single line.
///
/// None of these end the session; the dispatcher reports them and moves on.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The line produced no tokens, so there is no command name.
    #[error("no command to run")]
    MalformedInput,

    /// A redirection named a descriptor other than 1 or 2.
    #[error("Unsupported file descriptor: {0}")]
    UnsupportedDescriptor(u32),

    /// The redirection target could not be created or opened.
    #[error("{path}: {source}")]
    FileOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            ShellError::UnsupportedDescriptor(5).to_string(),
            "Unsupported file descriptor: 5"
        );
        assert_eq!(
            ShellError::CommandNotFound("nope".to_string()).to_string(),
            "nope: command not found"
        );
    }

    #[test]
    fn test_file_open_includes_underlying_message() {
        let err = ShellError::FileOpen {
            path: "/missing/out.txt".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.to_string(), "/missing/out.txt: No such file or directory");
    }
}
