use std::fmt;
use std::io::Write;

use crate::config::Config;
use crate::document::{Document, Focus};
use crate::error::Error;

fn qualified(prefix: &str, name: &str) -> String {
    format!("{}:{}", prefix, name)
}

/// Streaming XML document writer.
///
/// The writer emits XML to the sink as you call it; nothing is kept in
/// memory apart from the names of the currently open elements. The calls
/// available on the document are the prolog (XML declaration, DOCTYPE,
/// comments, processing instructions and whitespace) and [`tag`], which opens
/// the root element and hands out an [`ElementWriter`] to write it.
///
/// Call sequences that would not produce well-formed XML fail with an
/// [`Error`].
///
/// ```rust
/// use xmlemit::{Config, DocumentWriter};
///
/// let mut writer = DocumentWriter::with_config(Vec::new(), Config::new().single_quote());
/// writer.version("1.0")?;
/// writer.tag("greeting")?.attribute("lang", "en")?.text("Hello & welcome")?.end()?;
/// writer.close()?;
///
/// let xml = String::from_utf8(writer.into_inner()).unwrap();
/// assert_eq!(
///     xml,
///     "<?xml version='1.0'?><greeting lang='en'>Hello &amp; welcome</greeting>"
/// );
/// # Ok::<(), xmlemit::Error>(())
/// ```
///
/// [`tag`]: DocumentWriter::tag
pub struct DocumentWriter<W: Write> {
    document: Document<W>,
}

impl<W: Write> DocumentWriter<W> {
    /// Create a writer with the default, compact configuration.
    pub fn new(sink: W) -> Self {
        Self::with_config(sink, Config::default())
    }

    /// Create a writer with the given configuration.
    pub fn with_config(sink: W, config: Config) -> Self {
        DocumentWriter {
            document: Document::new(sink, config),
        }
    }

    /// The configuration of this writer.
    pub fn config(&self) -> &Config {
        self.document.config()
    }

    /// Write the `version` of the XML declaration.
    ///
    /// The declaration has to come first; `version` fails once anything else
    /// was written.
    pub fn version(&mut self, version: &str) -> Result<&mut Self, Error> {
        self.document.version(version)?;
        Ok(self)
    }

    /// Write the `encoding` of the XML declaration.
    ///
    /// It can only be written once, directly after the `version`.
    ///
    /// This only declares the encoding; the output is always UTF-8.
    pub fn encoding(&mut self, encoding: &str) -> Result<&mut Self, Error> {
        self.document.encoding(encoding)?;
        Ok(self)
    }

    /// Start the DOCTYPE declaration of the root element `name`.
    ///
    /// ```rust
    /// use xmlemit::DocumentWriter;
    ///
    /// let mut writer = DocumentWriter::new(Vec::new());
    /// writer.doctype("note")?.system_id("note.dtd")?;
    /// writer.tag("note")?.close()?;
    ///
    /// let xml = String::from_utf8(writer.into_inner()).unwrap();
    /// assert_eq!(xml, r#"<!DOCTYPE note SYSTEM "note.dtd"><note/>"#);
    /// # Ok::<(), xmlemit::Error>(())
    /// ```
    pub fn doctype(&mut self, name: &str) -> Result<&mut Self, Error> {
        self.document.doctype(name)?;
        Ok(self)
    }

    /// Give the DOCTYPE a public identifier with its system identifier.
    pub fn public_id(&mut self, public_id: &str, system_id: &str) -> Result<&mut Self, Error> {
        self.document.external_id(Some(public_id), system_id)?;
        Ok(self)
    }

    /// Give the DOCTYPE a system identifier.
    pub fn system_id(&mut self, system_id: &str) -> Result<&mut Self, Error> {
        self.document.external_id(None, system_id)?;
        Ok(self)
    }

    /// Write a processing instruction outside of the root element.
    pub fn instruction(&mut self, target: &str, content: &str) -> Result<&mut Self, Error> {
        self.document.instruction(target, content)?;
        Ok(self)
    }

    /// Write a comment outside of the root element.
    pub fn comment(&mut self, content: &str) -> Result<&mut Self, Error> {
        self.document.comment(content)?;
        Ok(self)
    }

    /// Write whitespace outside of the root element.
    ///
    /// Anything but spaces, tabs and line breaks fails with
    /// [`Error::TextOutsideRoot`].
    pub fn text(&mut self, content: &str) -> Result<&mut Self, Error> {
        self.document.text(content)?;
        Ok(self)
    }

    /// Always fails with [`Error::CdataOutsideRoot`].
    pub fn cdata(&mut self, content: &str) -> Result<&mut Self, Error> {
        self.document.cdata(content)?;
        Ok(self)
    }

    /// Open the root element.
    ///
    /// A document has exactly one root element; opening another fails with
    /// [`Error::SecondRoot`].
    pub fn tag(&mut self, name: &str) -> Result<ElementWriter<'_, W>, Error> {
        self.document.tag(name)?;
        Ok(ElementWriter::new(&mut self.document, 1))
    }

    /// Open the root element with a namespace prefix, `prefix:name`.
    pub fn tag_ns(&mut self, prefix: &str, name: &str) -> Result<ElementWriter<'_, W>, Error> {
        self.tag(&qualified(prefix, name))
    }

    /// Flush the sink.
    pub fn flush(&mut self) -> Result<&mut Self, Error> {
        self.document.flush()?;
        Ok(self)
    }

    /// Close all open elements, then flush and release the sink.
    ///
    /// This fails with [`Error::MissingRoot`] if no root element was written;
    /// the writer is left as it was so the root can still be added. Closing
    /// again does nothing.
    pub fn close(&mut self) -> Result<(), Error> {
        self.document.close()
    }

    /// Unwrap the sink.
    pub fn into_inner(self) -> W {
        self.document.into_inner()
    }
}

impl<W: Write> fmt::Debug for DocumentWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentWriter")
            .field("document", &self.document)
            .finish()
    }
}

/// Writer of element content.
///
/// This is the focus after content was written: the content of an element,
/// or the document itself once the root element was ended. Attributes can no
/// longer be written here.
pub struct ContentWriter<'a, W: Write> {
    document: &'a mut Document<W>,
    // 0 is the document, 1 the root element
    depth: usize,
}

impl<'a, W: Write> ContentWriter<'a, W> {
    fn new(document: &'a mut Document<W>, depth: usize) -> Self {
        ContentWriter { document, depth }
    }

    /// How deep the focus is nested: 0 for the document, 1 for the root
    /// element.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Open a child element.
    ///
    /// If a previously opened child is still open it is closed first.
    pub fn tag(&mut self, name: &str) -> Result<ElementWriter<'_, W>, Error> {
        match self.document.focus(self.depth)? {
            Focus::Document(document) => document.tag(name)?,
            Focus::Element(out, element) => element.tag(out, name)?,
        }
        Ok(ElementWriter::new(&mut *self.document, self.depth + 1))
    }

    /// Open a child element with a namespace prefix, `prefix:name`.
    pub fn tag_ns(&mut self, prefix: &str, name: &str) -> Result<ElementWriter<'_, W>, Error> {
        self.tag(&qualified(prefix, name))
    }

    /// Write escaped text.
    pub fn text(self, content: &str) -> Result<Self, Error> {
        match self.document.focus(self.depth)? {
            Focus::Document(document) => document.text(content)?,
            Focus::Element(out, element) => element.text(out, content)?,
        }
        Ok(self)
    }

    /// Write CDATA content.
    ///
    /// Consecutive calls are written into the same CDATA section. Control
    /// characters that XML does not allow are replaced by a space, and a
    /// `]]>` in the content is split over two sections.
    pub fn cdata(self, content: &str) -> Result<Self, Error> {
        match self.document.focus(self.depth)? {
            Focus::Document(document) => document.cdata(content)?,
            Focus::Element(out, element) => element.cdata(out, content)?,
        }
        Ok(self)
    }

    /// Write a comment.
    pub fn comment(self, content: &str) -> Result<Self, Error> {
        match self.document.focus(self.depth)? {
            Focus::Document(document) => document.comment(content)?,
            Focus::Element(out, element) => element.comment(out, content)?,
        }
        Ok(self)
    }

    /// Write a processing instruction.
    pub fn instruction(self, target: &str, content: &str) -> Result<Self, Error> {
        match self.document.focus(self.depth)? {
            Focus::Document(document) => document.instruction(target, content)?,
            Focus::Element(out, element) => element.instruction(out, target, content)?,
        }
        Ok(self)
    }

    /// End the element and return the focus to its parent.
    ///
    /// On the document level this fails with [`Error::NoOpenElement`].
    pub fn end(self) -> Result<ContentWriter<'a, W>, Error> {
        self.document.end(self.depth)?;
        Ok(ContentWriter::new(self.document, self.depth - 1))
    }

    /// End the element and all of its ancestors, then close the document.
    pub fn close(self) -> Result<(), Error> {
        if self.depth > 0 {
            self.document.end(self.depth)?;
        }
        self.document.close()
    }

    /// Flush the sink.
    pub fn flush(self) -> Result<Self, Error> {
        self.document.flush()?;
        Ok(self)
    }
}

impl<W: Write> fmt::Debug for ContentWriter<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentWriter")
            .field("depth", &self.depth)
            .finish()
    }
}

/// Writer of a newly opened element.
///
/// Attributes can be written until the element's content starts. Writing
/// content turns it into a [`ContentWriter`].
///
/// ```rust
/// use xmlemit::{Config, DocumentWriter};
///
/// let mut writer = DocumentWriter::with_config(Vec::new(), Config::new().single_quote());
/// let mut list = writer.tag("list")?;
/// list.tag("item")?.text("one")?;
/// // opening the second item closes the first
/// list.tag("item")?.text("two")?;
/// list.close()?;
///
/// let xml = String::from_utf8(writer.into_inner()).unwrap();
/// assert_eq!(xml, "<list><item>one</item><item>two</item></list>");
/// # Ok::<(), xmlemit::Error>(())
/// ```
pub struct ElementWriter<'a, W: Write> {
    content: ContentWriter<'a, W>,
}

impl<'a, W: Write> ElementWriter<'a, W> {
    fn new(document: &'a mut Document<W>, depth: usize) -> Self {
        ElementWriter {
            content: ContentWriter::new(document, depth),
        }
    }

    /// How deep the element is nested; the root element is at 1.
    pub fn depth(&self) -> usize {
        self.content.depth
    }

    /// Write an attribute.
    ///
    /// This fails with [`Error::AttributeAfterContent`] once a child was
    /// opened through this writer.
    pub fn attribute(self, name: &str, value: &str) -> Result<Self, Error> {
        let (out, element) = self.content.document.element(self.content.depth)?;
        element.attribute(out, name, value)?;
        Ok(self)
    }

    /// Write an attribute with a namespace prefix, `prefix:name`.
    pub fn attribute_ns(self, prefix: &str, name: &str, value: &str) -> Result<Self, Error> {
        self.attribute(&qualified(prefix, name), value)
    }

    /// Declare the default namespace.
    pub fn xmlns(self, uri: &str) -> Result<Self, Error> {
        self.attribute("xmlns", uri)
    }

    /// Declare the namespace `uri` for `prefix`.
    pub fn xmlns_prefix(self, prefix: &str, uri: &str) -> Result<Self, Error> {
        self.attribute(&qualified("xmlns", prefix), uri)
    }

    /// Open a child element.
    pub fn tag(&mut self, name: &str) -> Result<ElementWriter<'_, W>, Error> {
        self.content.tag(name)
    }

    /// Open a child element with a namespace prefix, `prefix:name`.
    pub fn tag_ns(&mut self, prefix: &str, name: &str) -> Result<ElementWriter<'_, W>, Error> {
        self.content.tag_ns(prefix, name)
    }

    /// Write escaped text.
    pub fn text(self, content: &str) -> Result<ContentWriter<'a, W>, Error> {
        self.content.text(content)
    }

    /// Write CDATA content. See [`ContentWriter::cdata`].
    pub fn cdata(self, content: &str) -> Result<ContentWriter<'a, W>, Error> {
        self.content.cdata(content)
    }

    /// Write a comment.
    pub fn comment(self, content: &str) -> Result<ContentWriter<'a, W>, Error> {
        self.content.comment(content)
    }

    /// Write a processing instruction.
    pub fn instruction(self, target: &str, content: &str) -> Result<ContentWriter<'a, W>, Error> {
        self.content.instruction(target, content)
    }

    /// End the element and return the focus to its parent.
    ///
    /// An element without content is written as a self-closing tag.
    pub fn end(self) -> Result<ContentWriter<'a, W>, Error> {
        self.content.end()
    }

    /// End the element and all of its ancestors, then close the document.
    pub fn close(self) -> Result<(), Error> {
        self.content.close()
    }

    /// Flush the sink.
    pub fn flush(self) -> Result<Self, Error> {
        self.content.document.flush()?;
        Ok(self)
    }
}

impl<'a, W: Write> From<ElementWriter<'a, W>> for ContentWriter<'a, W> {
    fn from(element: ElementWriter<'a, W>) -> Self {
        element.content
    }
}

impl<W: Write> fmt::Debug for ElementWriter<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementWriter")
            .field("depth", &self.content.depth)
            .finish()
    }
}
