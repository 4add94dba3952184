//! Output formatting abstraction for text vs JSON rendering
//!
//! Command results flow through [`OutputWriter`], which handles format switching.

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Writes command results in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    /// Create a new output writer with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a payload to stdout.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.render_to(&mut handle, payload)
    }

    /// Render a payload to `w`.
    pub fn render_to<T: Render + Serialize>(
        &self,
        w: &mut dyn Write,
        payload: &T,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => payload.render_text(w)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }
}

/// Human-readable text rendering.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}
