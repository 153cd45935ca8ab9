use bytes::BytesMut;
use std::fs::File;
use std::io::{self, Write};
use std::process::Stdio;

/// Where a command's output stream ends up.
#[derive(Debug)]
pub enum OutputSink {
    /// The shell's own standard output.
    Stdout,
    /// The shell's own standard error.
    Stderr,
    /// A redirection target.
    File(File),
    /// Captured in memory.
    Buffer(BytesMut),
}

impl OutputSink {
    pub fn buffer() -> Self {
        OutputSink::Buffer(BytesMut::new())
    }

    /// Converts the sink into a handle for a child process.
    ///
    /// In-memory sinks become pipes; the caller copies the child's output in
    /// after it exits.
    pub fn stdio(&self) -> io::Result<Stdio> {
        Ok(match self {
            OutputSink::Stdout => Stdio::from(io::stdout()),
            OutputSink::Stderr => Stdio::from(io::stderr()),
            OutputSink::File(file) => Stdio::from(file.try_clone()?),
            OutputSink::Buffer(_) => Stdio::piped(),
        })
    }

    /// Bytes captured so far. Empty for anything but a buffer.
    pub fn contents(&self) -> &[u8] {
        match self {
            OutputSink::Buffer(buf) => &buf[..],
            _ => &[],
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Stdout => io::stdout().write(data),
            OutputSink::Stderr => io::stderr().write(data),
            OutputSink::File(file) => file.write(data),
            OutputSink::Buffer(buf) => {
                buf.extend_from_slice(data);
                Ok(data.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Stdout => io::stdout().flush(),
            OutputSink::Stderr => io::stderr().flush(),
            OutputSink::File(file) => file.flush(),
            OutputSink::Buffer(_) => Ok(()),
        }
    }
}

/// The pair of sinks a line runs against.
#[derive(Debug)]
pub struct Streams {
    pub stdout: OutputSink,
    pub stderr: OutputSink,
}

impl Streams {
    /// The terminal, as inherited by the shell.
    pub fn inherit() -> Self {
        Self {
            stdout: OutputSink::Stdout,
            stderr: OutputSink::Stderr,
        }
    }

    /// Both streams captured in memory.
    pub fn captured() -> Self {
        Self {
            stdout: OutputSink::buffer(),
            stderr: OutputSink::buffer(),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_buffer_collects_writes() {
        let mut sink = OutputSink::buffer();
        write!(sink, "hello ").unwrap();
        writeln!(sink, "world").unwrap();
        assert_eq!(sink.contents(), b"hello world\n");
    }

    #[test]
    fn test_terminal_sinks_capture_nothing() {
        assert!(OutputSink::Stdout.contents().is_empty());
        assert!(OutputSink::Stderr.contents().is_empty());
    }
}
