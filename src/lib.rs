use log::debug;
use std::env;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub mod builtins;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod parser;
pub mod redirection;
pub mod sink;

pub use builtins::Builtin;
pub use error::ShellError;
pub use parser::{parse_command, tokenize};
pub use redirection::{Redirection, StdStream, scan};
pub use sink::{OutputSink, Streams};

/// Result of a command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStatus {
    /// The shell should continue running.
    Continue,
    /// The shell should exit with the provided code.
    Exit(i32),
}

/// Runs one input line against `streams`.
///
/// Any redirection on the line is applied for this command only: the target
/// file replaces the matching sink and is closed before returning. A line
/// without a command is a no-op and leaves any redirection target untouched.
/// Errors are reported on the (possibly redirected) stderr sink and never end
/// the session. Both sinks are flushed before returning.
pub fn run_line(line: &str, streams: &mut Streams) -> ShellStatus {
    let (text, redirection) = scan(line);
    debug!("line {:?} -> command {:?}, redirection {:?}", line, text, redirection);

    let command = match parse_command(text) {
        Ok(command) => command,
        Err(e) => {
            debug!("skipping {:?}: {}", line, e);
            return ShellStatus::Continue;
        }
    };

    let status = match redirection.as_ref().map(Redirection::open) {
        None => dispatch(&command, &mut streams.stdout, &mut streams.stderr),
        Some(Err(e)) => {
            let _ = writeln!(streams.stderr, "{}", e);
            ShellStatus::Continue
        }
        Some(Ok((stream, file))) => {
            let mut target = OutputSink::File(file);
            match stream {
                StdStream::Stdout => dispatch(&command, &mut target, &mut streams.stderr),
                StdStream::Stderr => dispatch(&command, &mut streams.stdout, &mut target),
            }
        }
    };

    if let Err(e) = streams.flush() {
        debug!("flushing output failed: {}", e);
    }
    status
}

/// Runs `command` with the given sinks, reporting a missing program on `stderr`.
fn dispatch(
    command: &parser::Command,
    stdout: &mut OutputSink,
    stderr: &mut OutputSink,
) -> ShellStatus {
    let status = match handle_command(command, stdout, stderr) {
        Ok(status) => status,
        Err(e @ ShellError::CommandNotFound(_)) => {
            let _ = writeln!(stderr, "{}", e);
            ShellStatus::Continue
        }
        Err(e) => {
            debug!("{}: {}", command.name, e);
            ShellStatus::Continue
        }
    };

    // The file sink is about to be closed; make sure it holds everything.
    let _ = stdout.flush();
    let _ = stderr.flush();
    status
}

/// Orchestrates command execution.
///
/// It first attempts to parse the command as a `Builtin`. If that fails,
/// it runs the command as an external program.
pub fn handle_command(
    command: &parser::Command,
    stdout: &mut OutputSink,
    stderr: &mut OutputSink,
) -> Result<ShellStatus, ShellError> {
    match command.name.parse::<Builtin>() {
        Ok(builtin) => Ok(builtin.execute(&command.args, stdout, stderr)),
        Err(()) => {
            run_external(&command.name, &command.args, stdout, stderr)?;
            Ok(ShellStatus::Continue)
        }
    }
}

/// Spawns an external program and waits for it.
///
/// Only a program that cannot be found or launched is an error; other spawn
/// failures and non-zero exit statuses are logged and otherwise ignored.
fn run_external(
    name: &str,
    args: &[String],
    stdout: &mut OutputSink,
    stderr: &mut OutputSink,
) -> Result<(), ShellError> {
    if !name.contains('/') && get_executable_path(name).is_none() {
        return Err(ShellError::CommandNotFound(name.to_string()));
    }

    stdout.flush()?;
    stderr.flush()?;

    let child = Command::new(name)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(stdout.stdio()?)
        .stderr(stderr.stdio()?)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e)
            if matches!(
                e.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ) =>
        {
            return Err(ShellError::CommandNotFound(name.to_string()));
        }
        Err(e) => {
            debug!("{}: error executing command: {}", name, e);
            return Ok(());
        }
    };

    // Pipes only exist for in-memory sinks; otherwise these are empty.
    let output = child.wait_with_output()?;
    stdout.write_all(&output.stdout)?;
    stderr.write_all(&output.stderr)?;
    if !output.status.success() {
        debug!("{} exited with {}", name, output.status);
    }
    Ok(())
}

/// Directories listed in `PATH`, in search order.
fn path_dirs() -> Vec<PathBuf> {
    env::var_os("PATH")
        .map(|path_var| env::split_paths(&path_var).collect())
        .unwrap_or_default()
}

/// A regular file with at least one execute bit set.
fn is_executable(path: &Path) -> bool {
    path.metadata()
        .is_ok_and(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
}

/// Searches the system `PATH` for an executable with the given name.
///
/// Returns `Some(PathBuf)` if found and executable, otherwise `None`.
pub(crate) fn get_executable_path(command: &str) -> Option<PathBuf> {
    path_dirs()
        .into_iter()
        .map(|dir| dir.join(command))
        .find(|candidate| is_executable(candidate))
}

/// Gets all executable names from directories in the system `PATH`.
///
/// Returns a vector of executable names (not full paths).
/// Directories that cannot be read are skipped.
pub fn get_all_executables() -> Vec<String> {
    path_dirs()
        .iter()
        .filter_map(|dir| std::fs::read_dir(dir).ok())
        .flat_map(|entries| entries.flatten())
        .filter(|entry| is_executable(&entry.path()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect()
}
