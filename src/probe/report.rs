use std::fmt::Display;
use std::io::Write;

use crate::error::AppResult;
use crate::http::ApiResponse;

/// Human-readable probe output. Stdout in the binary, a buffer in tests.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes one line.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying writer fails.
    pub fn line(&mut self, text: impl Display) -> AppResult<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    /// Writes a blank line followed by a section title.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying writer fails.
    pub fn heading(&mut self, title: &str) -> AppResult<()> {
        writeln!(self.out)?;
        writeln!(self.out, "== {} ==", title)?;
        Ok(())
    }

    /// Writes the status code and raw body of a response, verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying writer fails.
    pub fn response(&mut self, label: &str, response: &ApiResponse) -> AppResult<()> {
        writeln!(self.out, "{}Status Code: {}", label, response.status_code())?;
        writeln!(self.out, "{}Response: {}", label, response.body)?;
        Ok(())
    }

    /// Flushes buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying writer fails.
    pub fn flush(&mut self) -> AppResult<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
