//! The sink a render writes bytes to, and the escaping policy applied to
//! `{{escaped}}` variables (never to raw text, `{{{raw}}}`/`{{&raw}}`
//! variables, or partial output).

use std::io;

/// Where rendered output goes.
///
/// Blanket-implemented for any [`std::io::Write`]; use [`StringSink`] to
/// render into an in-memory `String` without going through `io::Write`'s
/// UTF-8-unaware byte interface.
pub trait ByteSink {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl<W: io::Write> ByteSink for W {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_all(bytes)
    }
}

/// An escaping policy for `{{escaped}}` variable output.
pub trait Escape {
    fn escape(&self, bytes: &[u8], sink: &mut dyn ByteSink) -> io::Result<()>;
}

/// Writes bytes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEscape;

impl Escape for NoEscape {
    fn escape(&self, bytes: &[u8], sink: &mut dyn ByteSink) -> io::Result<()> {
        sink.write_bytes(bytes)
    }
}

/// HTML entity escaping: `& < > " \`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscape;

impl Escape for HtmlEscape {
    fn escape(&self, bytes: &[u8], sink: &mut dyn ByteSink) -> io::Result<()> {
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            let entity: &[u8] = match b {
                b'&' => b"&amp;",
                b'<' => b"&lt;",
                b'>' => b"&gt;",
                b'"' => b"&quot;",
                b'\\' => b"&#92;",
                _ => continue,
            };
            if i > start {
                sink.write_bytes(&bytes[start..i])?;
            }
            sink.write_bytes(entity)?;
            start = i + 1;
        }
        if start < bytes.len() {
            sink.write_bytes(&bytes[start..])?;
        }
        Ok(())
    }
}

/// An in-memory sink that accumulates bytes and validates UTF-8 once at the
/// end, rather than per write (a write may split a multi-byte codepoint
/// across calls even though every individual write is itself well-formed
/// UTF-8 at the point it was produced).
#[derive(Debug, Clone, Default)]
pub struct StringSink {
    buf: Vec<u8>,
}

impl StringSink {
    pub fn new() -> Self {
        StringSink::default()
    }

    pub fn finish(self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.buf)
    }
}

impl ByteSink for StringSink {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}
