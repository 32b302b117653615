use std::fmt::Display;
use std::io::{Result, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::destination::Destination;

type Sink = Arc<Mutex<dyn Write + Send>>;

/// Prints per-destination results.
///
/// Each report takes the stream lock once and writes its whole block, so lines
/// from different destinations never get mixed.
#[derive(Clone)]
pub struct Writer {
    stdout: Sink,
    stderr: Sink,
}

impl Writer {
    pub fn new<O, E>(stdout: O, stderr: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            stdout: Arc::new(Mutex::new(stdout)),
            stderr: Arc::new(Mutex::new(stderr)),
        }
    }

    pub fn stdio() -> Self {
        Self::new(std::io::stdout(), std::io::stderr())
    }

    /// `[Host] user@host`, `[Content] `, then the raw output.
    pub fn success(&self, destination: &Destination, content: &[u8]) -> Result<()> {
        let mut guard = self.stdout.lock().unwrap_or_else(PoisonError::into_inner);
        write!(guard, "[Host] {}\n[Content] \n", destination)?;
        guard.write_all(content)?;
        writeln!(guard)?;
        guard.flush()
    }

    pub fn failure(&self, destination: &Destination, error: &dyn Display) -> Result<()> {
        let mut guard = self.stderr.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(guard, "ERROR: [Host] {}", destination)?;
        writeln!(guard, "{}", error)?;
        guard.flush()
    }
}

/// An in-memory sink that can be read back after being handed to a `Writer`.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> (Writer, SharedBuffer, SharedBuffer) {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        (Writer::new(out.clone(), err.clone()), out, err)
    }

    #[test]
    fn test_success_block() {
        let (writer, out, err) = capture();
        writer
            .success(&Destination::new("h1", "u1"), b"* * * * * /bin/true\n")
            .unwrap();
        assert_eq!(
            out.to_string_lossy(),
            "[Host] u1@h1\n[Content] \n* * * * * /bin/true\n\n"
        );
        assert!(err.contents().is_empty());
    }

    #[test]
    fn test_success_keeps_raw_bytes() {
        let (writer, out, _) = capture();
        let content = [0x66, 0xff, 0x0a];
        writer
            .success(&Destination::new("h1", "u1"), &content)
            .unwrap();
        let written = out.contents();
        let prefix = b"[Host] u1@h1\n[Content] \n";
        assert_eq!(&written[..prefix.len()], prefix);
        assert_eq!(&written[prefix.len()..prefix.len() + 3], &content);
    }

    #[test]
    fn test_failure_block() {
        let (writer, out, err) = capture();
        writer
            .failure(&Destination::new("h2", "u2"), &"connection refused")
            .unwrap();
        assert_eq!(
            err.to_string_lossy(),
            "ERROR: [Host] u2@h2\nconnection refused\n"
        );
        assert!(out.contents().is_empty());
    }

    #[test]
    fn test_clones_share_streams() {
        let (writer, out, _) = capture();
        let other = writer.clone();
        writer.success(&Destination::new("a", "x"), b"1").unwrap();
        other.success(&Destination::new("b", "y"), b"2").unwrap();
        assert_eq!(
            out.to_string_lossy(),
            "[Host] x@a\n[Content] \n1\n[Host] y@b\n[Content] \n2\n"
        );
    }
}
