use anyhow::Context;
use myshell::config::{Config, PROMPT};
use myshell::{ShellStatus, Streams, editor, logging};
use std::{
    io::{self, Write},
    process,
};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    logging::init(config.log_level).context("failed to install logger")?;
    log::debug!("starting with {:?}", config);

    let mut streams = Streams::inherit();
    let stdin = io::stdin();

    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let line = if config.interactive {
            editor::read_line_raw().context("failed to read from terminal")?
        } else {
            editor::read_line(&mut stdin.lock()).context("failed to read from stdin")?
        };
        let Some(line) = line else {
            return Ok(());
        };
        if line.is_empty() {
            continue;
        }

        match myshell::run_line(&line, &mut streams) {
            ShellStatus::Exit(code) => process::exit(code),
            ShellStatus::Continue => continue,
        }
    }
}
