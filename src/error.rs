/// Xmlemit errors
///
/// Apart from [`Error::Io`] every variant is a structural violation: the call
/// sequence would have produced XML that is not well-formed. The writer's
/// state is not rolled back, so a document that produced one of these should
/// be discarded.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `version` or `encoding` was called after the declaration was closed.
    #[error("XML spec must be first in the document.")]
    DeclarationOrder,
    /// `doctype` was called twice, or after the root element was opened.
    #[error("DOCTYPE must be declared once, before the root element.")]
    DoctypeOrder,
    /// `public_id` or `system_id` was not called directly after `doctype`.
    #[error("External identifier must directly follow the DOCTYPE name.")]
    ExternalIdOrder,
    /// The document was closed before a root element was written.
    #[error("No root element created.")]
    MissingRoot,
    /// A top-level tag was opened while another root exists.
    #[error("Trying to output second root.")]
    SecondRoot,
    /// Non-whitespace text was written outside of the root element.
    #[error("Cannot write text out of the root element.")]
    TextOutsideRoot,
    /// A CDATA section was written outside of the root element.
    #[error("Cannot write CDATA out of the root element.")]
    CdataOutsideRoot,
    /// `end` was called on the document level.
    #[error("No open element to close.")]
    NoOpenElement,
    /// The element was already closed.
    #[error("Element {0} already closed.")]
    ElementClosed(String),
    /// An attribute was written after the element's content started.
    #[error("Cannot write attribute {name}='{value}', when tag <{tag}> content started.")]
    AttributeAfterContent {
        /// The element name.
        tag: String,
        /// The attribute name.
        name: String,
        /// The attribute value.
        value: String,
    },
    /// The sink was released by `close`; nothing can be written anymore.
    #[error("Document already closed.")]
    DocumentClosed,
    /// The sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
