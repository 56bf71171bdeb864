use std::fmt;
use std::io::Write;

use tracing::debug;

use crate::config::Config;
use crate::element::Element;
use crate::error::Error;
use crate::output::Output;

/// The document phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocumentState {
    /// Nothing written yet.
    Empty,
    /// Inside the XML declaration, `?>` not yet written.
    Spec { encoding: bool },
    /// Inside the DOCTYPE, `>` not yet written.
    Doctype { external_id: bool },
    /// Prolog content (comments, processing instructions, whitespace).
    Prefix,
    /// The root element is open.
    Open,
    /// The root element was closed.
    Finished,
}

/// The focus of a handle: the document itself or one of its open elements.
pub(crate) enum Focus<'a, W: Write> {
    Document(&'a mut Document<W>),
    Element(&'a mut Output<W>, &'a mut Element),
}

fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// The document-level state machine.
///
/// It owns the sink and the root element; the root owns the chain of open
/// descendants.
pub(crate) struct Document<W: Write> {
    out: Output<W>,
    state: DocumentState,
    has_doctype: bool,
    root: Option<Element>,
}

impl<W: Write> Document<W> {
    pub(crate) fn new(sink: W, config: Config) -> Self {
        Document {
            out: Output::new(sink, config),
            state: DocumentState::Empty,
            has_doctype: false,
            root: None,
        }
    }

    pub(crate) fn config(&self) -> &Config {
        self.out.config()
    }

    /// Resolve the element at `depth`, the root being at depth 1.
    pub(crate) fn element(&mut self, depth: usize) -> Result<(&mut Output<W>, &mut Element), Error> {
        let mut element = self.root.as_mut().ok_or(Error::NoOpenElement)?;
        for _ in 1..depth {
            element = element.child_mut().ok_or(Error::NoOpenElement)?;
        }
        Ok((&mut self.out, element))
    }

    /// Resolve what a handle at `depth` writes to; depth 0 is the document.
    pub(crate) fn focus(&mut self, depth: usize) -> Result<Focus<'_, W>, Error> {
        if depth == 0 {
            return Ok(Focus::Document(self));
        }
        let (out, element) = self.element(depth)?;
        Ok(Focus::Element(out, element))
    }

    /// Start the XML declaration with its version.
    pub(crate) fn version(&mut self, version: &str) -> Result<(), Error> {
        if self.state != DocumentState::Empty {
            return Err(Error::DeclarationOrder);
        }
        self.out.raw("<?xml")?;
        self.declaration_attribute("version", version)?;
        self.state = DocumentState::Spec { encoding: false };
        Ok(())
    }

    /// Add the encoding to the XML declaration; it directly follows the
    /// version and is written once.
    pub(crate) fn encoding(&mut self, encoding: &str) -> Result<(), Error> {
        if self.state != (DocumentState::Spec { encoding: false }) {
            return Err(Error::DeclarationOrder);
        }
        self.declaration_attribute("encoding", encoding)?;
        self.state = DocumentState::Spec { encoding: true };
        Ok(())
    }

    fn declaration_attribute(&mut self, name: &str, value: &str) -> Result<(), Error> {
        self.out.raw(" ")?;
        self.out.raw(name)?;
        self.out.raw("=")?;
        self.out.quoted(value)
    }

    pub(crate) fn doctype(&mut self, name: &str) -> Result<(), Error> {
        if self.has_doctype {
            return Err(Error::DoctypeOrder);
        }
        match self.state {
            DocumentState::Empty | DocumentState::Spec { .. } | DocumentState::Prefix => {
                self.close_prolog()?
            }
            _ => return Err(Error::DoctypeOrder),
        }
        self.out.indent("")?;
        self.out.raw("<!DOCTYPE ")?;
        self.out.raw(name)?;
        self.has_doctype = true;
        self.state = DocumentState::Doctype { external_id: false };
        Ok(())
    }

    /// Write the external identifier of the DOCTYPE; a public identifier
    /// always comes with a system identifier.
    pub(crate) fn external_id(
        &mut self,
        public_id: Option<&str>,
        system_id: &str,
    ) -> Result<(), Error> {
        if self.state != (DocumentState::Doctype { external_id: false }) {
            return Err(Error::ExternalIdOrder);
        }
        match public_id {
            Some(public_id) => {
                self.out.raw(" PUBLIC ")?;
                self.out.quoted(public_id)?;
                self.out.raw(" ")?;
            }
            None => self.out.raw(" SYSTEM ")?,
        }
        self.out.quoted(system_id)?;
        self.state = DocumentState::Doctype { external_id: true };
        Ok(())
    }

    // finish any open declaration or DOCTYPE markup
    fn close_prolog(&mut self) -> Result<(), Error> {
        match self.state {
            DocumentState::Spec { .. } => self.out.raw("?>"),
            DocumentState::Doctype { .. } => self.out.raw(">"),
            _ => Ok(()),
        }
    }

    // prepare for content outside of the root element
    fn start_misc(&mut self) -> Result<(), Error> {
        match self.state {
            DocumentState::Open => self.finish_root(),
            DocumentState::Finished => Ok(()),
            _ => {
                self.close_prolog()?;
                self.state = DocumentState::Prefix;
                Ok(())
            }
        }
    }

    fn finish_root(&mut self) -> Result<(), Error> {
        if let Some(root) = self.root.as_mut() {
            if !root.is_closed() {
                debug!(element = root.name(), "auto-closing root element");
                root.end(&mut self.out)?;
            }
        }
        self.state = DocumentState::Finished;
        Ok(())
    }

    /// Write whitespace before or after the root element.
    pub(crate) fn text(&mut self, content: &str) -> Result<(), Error> {
        if !content.chars().all(is_xml_whitespace) {
            return Err(Error::TextOutsideRoot);
        }
        self.start_misc()?;
        self.out.raw(content)
    }

    pub(crate) fn comment(&mut self, content: &str) -> Result<(), Error> {
        self.start_misc()?;
        self.out.indent("")?;
        self.out.comment(content)
    }

    pub(crate) fn instruction(&mut self, target: &str, content: &str) -> Result<(), Error> {
        self.start_misc()?;
        self.out.indent("")?;
        self.out.instruction(target, content)
    }

    pub(crate) fn cdata(&mut self, _content: &str) -> Result<(), Error> {
        Err(Error::CdataOutsideRoot)
    }

    /// Open the root element.
    pub(crate) fn tag(&mut self, name: &str) -> Result<(), Error> {
        match self.state {
            DocumentState::Open | DocumentState::Finished => return Err(Error::SecondRoot),
            _ => self.close_prolog()?,
        }
        self.root = Some(Element::open(&mut self.out, name, String::new())?);
        self.state = DocumentState::Open;
        Ok(())
    }

    /// End the element at `depth`. Ending the root finishes the document.
    pub(crate) fn end(&mut self, depth: usize) -> Result<(), Error> {
        match self.focus(depth)? {
            Focus::Document(_) => return Err(Error::NoOpenElement),
            Focus::Element(out, element) => element.end(out)?,
        }
        if depth == 1 {
            self.state = DocumentState::Finished;
        }
        Ok(())
    }

    /// Close any open elements and release the sink.
    ///
    /// Without a root element this fails and leaves the sink alone.
    pub(crate) fn close(&mut self) -> Result<(), Error> {
        match self.state {
            DocumentState::Open => self.finish_root()?,
            DocumentState::Finished => {}
            _ => return Err(Error::MissingRoot),
        }
        debug!("releasing document sink");
        self.out.release()
    }

    pub(crate) fn flush(&mut self) -> Result<(), Error> {
        self.out.flush()
    }

    pub(crate) fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> fmt::Debug for Document<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("config", self.config())
            .field("state", &self.state)
            .field("root", &self.root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn document() -> Document<Vec<u8>> {
        Document::new(Vec::new(), Config::new().single_quote())
    }

    fn written(document: Document<Vec<u8>>) -> String {
        String::from_utf8(document.into_inner()).unwrap()
    }

    #[test]
    fn test_phases() {
        let mut document = document();
        assert_eq!(document.state, DocumentState::Empty);
        document.version("1.0").unwrap();
        assert_eq!(document.state, DocumentState::Spec { encoding: false });
        document.encoding("UTF-8").unwrap();
        assert_eq!(document.state, DocumentState::Spec { encoding: true });
        document.comment("c").unwrap();
        assert_eq!(document.state, DocumentState::Prefix);
        document.doctype("r").unwrap();
        assert_eq!(
            document.state,
            DocumentState::Doctype { external_id: false }
        );
        document.tag("r").unwrap();
        assert_eq!(document.state, DocumentState::Open);
        document.end(1).unwrap();
        assert_eq!(document.state, DocumentState::Finished);
        document.close().unwrap();
        assert_snapshot!(
            written(document),
            @"<?xml version='1.0' encoding='UTF-8'?><!-- c --><!DOCTYPE r><r/>"
        );
    }

    #[test]
    fn test_focus() {
        let mut document = document();
        assert!(matches!(document.focus(0), Ok(Focus::Document(_))));
        assert!(matches!(document.focus(1), Err(Error::NoOpenElement)));
        document.tag("a").unwrap();
        let (out, root) = document.element(1).unwrap();
        root.tag(out, "b").unwrap();
        match document.focus(2).unwrap() {
            Focus::Element(_, element) => assert_eq!(element.name(), "b"),
            Focus::Document(_) => unreachable!(),
        }
        assert!(matches!(document.focus(3), Err(Error::NoOpenElement)));
    }

    #[test]
    fn test_end_on_document() {
        let mut document = document();
        document.tag("a").unwrap();
        assert!(matches!(document.end(0), Err(Error::NoOpenElement)));
    }

    #[test]
    fn test_misc_content_closes_root() {
        let mut document = document();
        document.tag("a").unwrap();
        let (out, root) = document.element(1).unwrap();
        root.tag(out, "b").unwrap();
        document.comment("after").unwrap();
        assert_eq!(document.state, DocumentState::Finished);
        assert_snapshot!(written(document), @"<a><b/></a><!-- after -->");
    }

    #[test]
    fn test_whitespace_only() {
        let mut document = document();
        assert!(matches!(
            document.text(" \u{a0}"),
            Err(Error::TextOutsideRoot)
        ));
        document.text(" \t\r\n").unwrap();
        assert_eq!(document.state, DocumentState::Prefix);
    }

    #[test]
    fn test_failed_close_keeps_sink() {
        let mut document = document();
        document.version("1.0").unwrap();
        assert!(matches!(document.close(), Err(Error::MissingRoot)));
        document.tag("a").unwrap();
        document.close().unwrap();
        assert_snapshot!(written(document), @"<?xml version='1.0'?><a/>");
    }

    #[test]
    fn test_external_id_order() {
        let mut document = document();
        assert!(matches!(
            document.external_id(None, "a.dtd"),
            Err(Error::ExternalIdOrder)
        ));
        document.doctype("a").unwrap();
        document.external_id(None, "a.dtd").unwrap();
        assert!(matches!(
            document.external_id(None, "b.dtd"),
            Err(Error::ExternalIdOrder)
        ));
    }
}
