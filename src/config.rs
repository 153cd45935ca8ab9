use log::LevelFilter;
use std::env;
use std::io;

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "MYSHELL_LOG";

/// Prompt printed before every line.
pub const PROMPT: &str = "$ ";

/// Session settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: LevelFilter,
    /// Whether stdin is a terminal, in which case the raw-mode editor is used.
    pub interactive: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_level: parse_level(env::var(LOG_ENV).ok().as_deref()),
            interactive: termion::is_tty(&io::stdin()),
        }
    }
}

/// Unset or unrecognised values turn logging off.
fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Off)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(None), LevelFilter::Off);
        assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_level(Some(" WARN ")), LevelFilter::Warn);
        assert_eq!(parse_level(Some("loud")), LevelFilter::Off);
    }
}
