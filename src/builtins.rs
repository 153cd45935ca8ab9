use crate::ShellStatus;
use crate::get_executable_path;
use std::env;
use std::io::Write;
use std::str::FromStr;

/// Enumeration of all supported builtin commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Echo,
    Type,
    Pwd,
    Cd,
}

impl FromStr for Builtin {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exit" => Ok(Builtin::Exit),
            "echo" => Ok(Builtin::Echo),
            "type" => Ok(Builtin::Type),
            "pwd" => Ok(Builtin::Pwd),
            "cd" => Ok(Builtin::Cd),
            _ => Err(()),
        }
    }
}

impl Builtin {
    /// Every builtin name, in the order tab completion offers them.
    pub const NAMES: [&'static str; 5] = ["cd", "echo", "exit", "pwd", "type"];

    /// Executes the builtin command.
    ///
    /// Returns a `ShellStatus` indicating whether the shell should continue
    /// or exit with a specific code. Write failures on either stream are ignored.
    pub fn execute<W: Write, E: Write>(
        &self,
        args: &[String],
        mut stdout: W,
        mut stderr: E,
    ) -> ShellStatus {
        match self {
            Builtin::Exit => ShellStatus::Exit(exit_code(args)),
            Builtin::Echo => {
                echo_cmd(args, &mut stdout);
                ShellStatus::Continue
            }
            Builtin::Type => {
                type_cmd(args, &mut stdout, &mut stderr);
                ShellStatus::Continue
            }
            Builtin::Pwd => {
                match env::current_dir() {
                    Ok(path) => {
                        let _ = writeln!(stdout, "{}", path.display());
                    }
                    Err(e) => {
                        let _ = writeln!(stderr, "pwd: error retrieving current directory: {}", e);
                    }
                }
                ShellStatus::Continue
            }
            Builtin::Cd => {
                cd_cmd(args, &mut stderr);
                ShellStatus::Continue
            }
        }
    }
}

/// Exit status for `exit`: the first argument as an integer, or 0.
///
/// A first argument that is not a number also yields 0.
fn exit_code(args: &[String]) -> i32 {
    args.first()
        .and_then(|s| s.parse::<i32>().ok())
        .unwrap_or(0)
}

/// Implementation of the `echo` command.
///
/// Prints the arguments to stdout, separated by spaces.
pub fn echo_cmd<W: Write>(args: &[String], writer: &mut W) {
    let _ = writeln!(writer, "{}", args.join(" "));
}

/// Implementation of the `type` command.
///
/// Identifies whether a command is a builtin or an executable in the PATH.
pub fn type_cmd<W: Write, E: Write>(args: &[String], stdout: &mut W, stderr: &mut E) {
    let Some(command) = args.first() else {
        return;
    };
    // 1. Check if it's a builtin
    if Builtin::from_str(command).is_ok() {
        let _ = writeln!(stdout, "{} is a shell builtin", command);
        return;
    }

    // 2. External command check
    match get_executable_path(command) {
        Some(path) => {
            let _ = writeln!(stdout, "{} is {}", command, path.display());
        }
        None => {
            let _ = writeln!(stderr, "{}: not found", command);
        }
    }
}

/// Implementation of the `cd` command.
pub fn cd_cmd<E: Write>(args: &[String], stderr: &mut E) {
    let home = env::var("HOME").ok();
    let Some(target) = cd_target(args.first().map(String::as_str), home.as_deref()) else {
        let _ = writeln!(stderr, "cd: HOME not set");
        return;
    };

    if env::set_current_dir(&target).is_err() {
        let _ = writeln!(stderr, "cd: {}: No such file or directory", target);
    }
}

/// Resolves the directory `cd` should move to.
///
/// No argument means `home`. A leading `~` path component is replaced by
/// `home`; `~user` forms are left alone. `None` when `home` is needed but unset.
fn cd_target(arg: Option<&str>, home: Option<&str>) -> Option<String> {
    let Some(arg) = arg else {
        return home.map(str::to_string);
    };
    match arg.split_once('/') {
        None if arg == "~" => home.map(str::to_string),
        Some(("~", rest)) => home.map(|h| format!("{}/{}", h, rest)),
        _ => Some(arg.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn run(builtin: Builtin, args: &[&str]) -> (ShellStatus, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = builtin.execute(&strings(args), &mut out, &mut err);
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_parses_exactly_the_builtin_names() {
        for name in Builtin::NAMES {
            assert!(name.parse::<Builtin>().is_ok(), "{name}");
        }
        assert!("history".parse::<Builtin>().is_err());
        assert!("ECHO".parse::<Builtin>().is_err());
    }

    #[test]
    fn test_echo() {
        let (status, out, err) = run(Builtin::Echo, &["hello", "world"]);
        assert_eq!(status, ShellStatus::Continue);
        assert_eq!(out, "hello world\n");
        assert_eq!(err, "");
    }

    #[test]
    fn test_echo_without_args_prints_newline() {
        let (_, out, _) = run(Builtin::Echo, &[]);
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(run(Builtin::Exit, &[]).0, ShellStatus::Exit(0));
        assert_eq!(run(Builtin::Exit, &["3"]).0, ShellStatus::Exit(3));
        assert_eq!(run(Builtin::Exit, &["-1"]).0, ShellStatus::Exit(-1));
        assert_eq!(run(Builtin::Exit, &["abc"]).0, ShellStatus::Exit(0));
        assert_eq!(run(Builtin::Exit, &["7", "8"]).0, ShellStatus::Exit(7));
    }

    #[test]
    fn test_type_builtin() {
        let (_, out, _) = run(Builtin::Type, &["cd"]);
        assert_eq!(out, "cd is a shell builtin\n");
    }

    #[test]
    fn test_type_unknown_goes_to_stderr() {
        let (_, out, err) = run(Builtin::Type, &["definitely_not_a_command_42"]);
        assert_eq!(out, "");
        assert_eq!(err, "definitely_not_a_command_42: not found\n");
    }

    #[test]
    fn test_type_without_args_is_silent() {
        let (status, out, err) = run(Builtin::Type, &[]);
        assert_eq!(status, ShellStatus::Continue);
        assert_eq!((out.as_str(), err.as_str()), ("", ""));
    }

    #[test]
    fn test_cd_target_expands_home() {
        assert_eq!(cd_target(None, Some("/home/u")), Some("/home/u".to_string()));
        assert_eq!(cd_target(Some("~"), Some("/home/u")), Some("/home/u".to_string()));
        assert_eq!(
            cd_target(Some("~/src/x"), Some("/home/u")),
            Some("/home/u/src/x".to_string())
        );
        assert_eq!(cd_target(Some("~other"), Some("/home/u")), Some("~other".to_string()));
        assert_eq!(cd_target(Some("/tmp"), None), Some("/tmp".to_string()));
        assert_eq!(cd_target(Some("~"), None), None);
        assert_eq!(cd_target(None, None), None);
    }

    #[test]
    fn test_cd_to_missing_directory_reports_error() {
        let (_, out, err) = run(Builtin::Cd, &["/no/such/dir/anywhere"]);
        assert_eq!(out, "");
        assert_eq!(err, "cd: /no/such/dir/anywhere: No such file or directory\n");
    }
}
