use std::io::Write;

use tracing::trace;

use crate::error::Error;
use crate::output::Output;

/// Where an element is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ElementState {
    /// The start tag is open; attributes can be written.
    Opening,
    /// Content has started.
    Content,
    /// Inside a CDATA section. `brackets` counts the `]` that ended the
    /// section's content so far.
    Cdata { brackets: u8 },
    /// The end tag was written.
    Closed,
}

/// An open element in the chain from the root to the innermost open element.
///
/// An element owns its most recently opened child. A child that has been
/// closed stays in place until the next child replaces it, so a stale handle
/// to it reports that it is closed.
#[derive(Debug)]
pub(crate) struct Element {
    name: String,
    // indentation of the element's own tags
    prefix: String,
    // indentation of everything inside it
    content_prefix: String,
    state: ElementState,
    child: Option<Box<Element>>,
}

impl Element {
    /// Write the start of the tag, `<name`, and create the element.
    pub(crate) fn open<W: Write>(
        out: &mut Output<W>,
        name: &str,
        prefix: String,
    ) -> Result<Self, Error> {
        out.indent(&prefix)?;
        out.raw("<")?;
        out.raw(name)?;
        let content_prefix = out.config().child_indent(&prefix);
        Ok(Element {
            name: name.to_string(),
            prefix,
            content_prefix,
            state: ElementState::Opening,
            child: None,
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.state == ElementState::Closed
    }

    pub(crate) fn child_mut(&mut self) -> Option<&mut Element> {
        self.child.as_deref_mut()
    }

    fn closed(&self) -> Error {
        Error::ElementClosed(self.name.clone())
    }

    pub(crate) fn attribute<W: Write>(
        &mut self,
        out: &mut Output<W>,
        name: &str,
        value: &str,
    ) -> Result<(), Error> {
        match self.state {
            ElementState::Opening => {
                out.raw(" ")?;
                out.raw(name)?;
                out.raw("=")?;
                out.quoted(value)
            }
            ElementState::Closed => Err(self.closed()),
            ElementState::Content | ElementState::Cdata { .. } => {
                Err(Error::AttributeAfterContent {
                    tag: self.name.clone(),
                    name: name.to_string(),
                    value: value.to_string(),
                })
            }
        }
    }

    fn close_child<W: Write>(&mut self, out: &mut Output<W>) -> Result<(), Error> {
        if let Some(child) = self.child.as_deref_mut() {
            if !child.is_closed() {
                trace!(element = %child.name, "auto-closing element");
                child.end(out)?;
            }
        }
        Ok(())
    }

    fn start_content<W: Write>(&mut self, out: &mut Output<W>) -> Result<(), Error> {
        match self.state {
            ElementState::Opening => out.raw(">")?,
            ElementState::Content => self.close_child(out)?,
            ElementState::Cdata { .. } => out.raw("]]>")?,
            ElementState::Closed => return Err(self.closed()),
        }
        self.state = ElementState::Content;
        Ok(())
    }

    /// Open a child element, closing the previous child if it is still open.
    pub(crate) fn tag<W: Write>(&mut self, out: &mut Output<W>, name: &str) -> Result<(), Error> {
        self.start_content(out)?;
        let child = Element::open(out, name, self.content_prefix.clone())?;
        self.child = Some(Box::new(child));
        Ok(())
    }

    pub(crate) fn text<W: Write>(&mut self, out: &mut Output<W>, content: &str) -> Result<(), Error> {
        self.start_content(out)?;
        if content.is_empty() {
            return Ok(());
        }
        out.indent(&self.content_prefix)?;
        out.escaped(content)
    }

    pub(crate) fn comment<W: Write>(
        &mut self,
        out: &mut Output<W>,
        content: &str,
    ) -> Result<(), Error> {
        self.start_content(out)?;
        out.indent(&self.content_prefix)?;
        out.comment(content)
    }

    pub(crate) fn instruction<W: Write>(
        &mut self,
        out: &mut Output<W>,
        target: &str,
        content: &str,
    ) -> Result<(), Error> {
        self.start_content(out)?;
        out.indent(&self.content_prefix)?;
        out.instruction(target, content)
    }

    /// Write CDATA content. Adjacent calls share one section.
    pub(crate) fn cdata<W: Write>(
        &mut self,
        out: &mut Output<W>,
        content: &str,
    ) -> Result<(), Error> {
        let mut brackets = match self.state {
            ElementState::Opening => {
                out.raw(">")?;
                self.open_cdata(out)?;
                0
            }
            ElementState::Content => {
                self.close_child(out)?;
                self.open_cdata(out)?;
                0
            }
            ElementState::Cdata { brackets } => brackets,
            ElementState::Closed => return Err(self.closed()),
        };
        self.state = ElementState::Cdata { brackets };
        out.cdata(content, &mut brackets)?;
        self.state = ElementState::Cdata { brackets };
        Ok(())
    }

    fn open_cdata<W: Write>(&self, out: &mut Output<W>) -> Result<(), Error> {
        out.indent(&self.content_prefix)?;
        out.raw("<![CDATA[")
    }

    /// Close the element, closing any open descendants first.
    pub(crate) fn end<W: Write>(&mut self, out: &mut Output<W>) -> Result<(), Error> {
        match self.state {
            ElementState::Opening => out.raw("/>")?,
            ElementState::Content => {
                self.close_child(out)?;
                self.end_tag(out)?;
            }
            ElementState::Cdata { .. } => {
                out.raw("]]>")?;
                self.end_tag(out)?;
            }
            ElementState::Closed => return Err(self.closed()),
        }
        self.state = ElementState::Closed;
        Ok(())
    }

    fn end_tag<W: Write>(&self, out: &mut Output<W>) -> Result<(), Error> {
        out.indent(&self.prefix)?;
        out.raw("</")?;
        out.raw(&self.name)?;
        out.raw(">")
    }
}
