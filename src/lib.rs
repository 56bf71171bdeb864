//! Streaming, forward-only XML writer.
//!
//! Xmlemit writes XML text straight to an [`std::io::Write`] sink as you open
//! tags, write attributes, text, CDATA, comments and processing instructions,
//! and close tags again. No document tree is built, so memory use does not
//! grow with the size of the document.
//!
//! Two state machines make sure the output is well-formed: one for the
//! document (declaration, DOCTYPE, prolog, a single root element) and one for
//! each open element (attributes, content, CDATA, closed). Content that
//! starts in an element closes any child that is still open, so you don't
//! need to end every element explicitly. Call sequences that cannot produce
//! well-formed XML fail with an [`Error`].
//!
//! ```rust
//! use xmlemit::{Config, DocumentWriter};
//!
//! let config = Config::new().single_quote().indent_spaces(2);
//! let mut writer = DocumentWriter::with_config(Vec::new(), config);
//! writer.version("1.0")?.encoding("UTF-8")?;
//! let mut catalog = writer.tag("catalog")?.xmlns("urn:books")?;
//! catalog.tag("book")?.attribute("id", "1")?.text("Tom & Jerry")?;
//! catalog.tag("book")?.attribute("id", "2")?.cdata("<raw>")?;
//! catalog.close()?;
//!
//! let xml = String::from_utf8(writer.into_inner()).unwrap();
//! assert_eq!(
//!     xml,
//!     "<?xml version='1.0' encoding='UTF-8'?>
//! <catalog xmlns='urn:books'>
//!   <book id='1'>
//!     Tom &amp; Jerry
//!   </book>
//!   <book id='2'>
//!     <![CDATA[<raw>]]>
//!   </book>
//! </catalog>"
//! );
//! # Ok::<(), xmlemit::Error>(())
//! ```
#![forbid(unsafe_code)]

mod config;
mod document;
mod element;
mod entity;
mod error;
mod output;
mod writer;

pub use config::{Config, Quote};
pub use error::Error;
pub use writer::{ContentWriter, DocumentWriter, ElementWriter};
