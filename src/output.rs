use std::io::Write;

use crate::config::Config;
use crate::entity::{
    sanitize_control_characters, serialize_predefined_entities, split_cdata_terminators,
};
use crate::error::Error;

/// The sink, with the transforms applied on the way to it.
///
/// Every write of the document goes through here.
pub(crate) struct Output<W: Write> {
    sink: W,
    config: Config,
    // anything written yet; the first token never gets a line break
    written: bool,
    released: bool,
}

impl<W: Write> Output<W> {
    pub(crate) fn new(sink: W, config: Config) -> Self {
        Output {
            sink,
            config,
            written: false,
            released: false,
        }
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn raw(&mut self, text: &str) -> Result<(), Error> {
        if self.released {
            return Err(Error::DocumentClosed);
        }
        if text.is_empty() {
            return Ok(());
        }
        self.sink.write_all(text.as_bytes())?;
        self.written = true;
        Ok(())
    }

    pub(crate) fn escaped(&mut self, text: &str) -> Result<(), Error> {
        self.raw(&serialize_predefined_entities(text))
    }

    pub(crate) fn quoted(&mut self, value: &str) -> Result<(), Error> {
        let quote = self.config.quote().as_str();
        self.raw(quote)?;
        self.escaped(value)?;
        self.raw(quote)
    }

    pub(crate) fn cdata(&mut self, content: &str, brackets: &mut u8) -> Result<(), Error> {
        let sanitized = sanitize_control_characters(content);
        self.raw(&split_cdata_terminators(&sanitized, brackets))
    }

    pub(crate) fn comment(&mut self, text: &str) -> Result<(), Error> {
        self.raw("<!-- ")?;
        self.raw(text)?;
        self.raw(" -->")
    }

    pub(crate) fn instruction(&mut self, target: &str, content: &str) -> Result<(), Error> {
        self.raw("<?")?;
        self.raw(target)?;
        if !content.is_empty() {
            self.raw(" ")?;
            self.raw(content)?;
        }
        self.raw("?>")
    }

    /// Break the line and indent with `prefix`, if pretty printing.
    pub(crate) fn indent(&mut self, prefix: &str) -> Result<(), Error> {
        if self.config.is_pretty() && self.written {
            self.raw(self.config.newline())?;
            self.raw(prefix)?;
        }
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> Result<(), Error> {
        self.sink.flush()?;
        Ok(())
    }

    /// Flush and stop accepting writes. Releasing twice does nothing.
    pub(crate) fn release(&mut self) -> Result<(), Error> {
        if !self.released {
            self.sink.flush()?;
            self.released = true;
        }
        Ok(())
    }

    pub(crate) fn into_inner(self) -> W {
        self.sink
    }
}
