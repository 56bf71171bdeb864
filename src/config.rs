#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The character used to quote attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Quote {
    /// `"`, the default.
    #[default]
    Double,
    /// `'`
    Single,
}

impl Quote {
    /// The quote as a string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Quote::Double => "\"",
            Quote::Single => "'",
        }
    }
}

/// Writer configuration.
///
/// A configuration is immutable: each builder method leaves the original alone
/// and returns a derived configuration.
///
/// ```rust
/// use xmlemit::{Config, Quote};
///
/// let compact = Config::new();
/// let pretty = compact.single_quote().indent_spaces(4);
///
/// assert_eq!(compact.quote(), Quote::Double);
/// assert!(!compact.is_pretty());
/// assert_eq!(pretty.quote(), Quote::Single);
/// assert_eq!(pretty.indent(), "    ");
/// assert_eq!(pretty.newline(), "\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    quote: Quote,
    indent: String,
}

impl Config {
    /// Compact output with double-quoted attribute values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Quote attribute values with `quote`.
    pub fn with_quote(&self, quote: Quote) -> Self {
        Config {
            quote,
            ..self.clone()
        }
    }

    /// Quote attribute values with `'`.
    pub fn single_quote(&self) -> Self {
        self.with_quote(Quote::Single)
    }

    /// Quote attribute values with `"`.
    pub fn double_quote(&self) -> Self {
        self.with_quote(Quote::Double)
    }

    /// Use `indent` as the indentation unit.
    ///
    /// A non-empty unit turns on pretty printing: every tag, comment,
    /// processing instruction, text run and CDATA section starts on a new line,
    /// indented by the unit once per nesting level. An empty unit gives
    /// compact output.
    pub fn with_indent(&self, indent: impl Into<String>) -> Self {
        Config {
            indent: indent.into(),
            ..self.clone()
        }
    }

    /// Pretty print, indenting with `count` spaces per level.
    pub fn indent_spaces(&self, count: usize) -> Self {
        self.with_indent(" ".repeat(count))
    }

    /// Pretty print, indenting with `count` tabs per level.
    pub fn indent_tabs(&self, count: usize) -> Self {
        self.with_indent("\t".repeat(count))
    }

    /// Compact output on a single line.
    pub fn compact(&self) -> Self {
        self.with_indent("")
    }

    /// The attribute value quote.
    pub fn quote(&self) -> Quote {
        self.quote
    }

    /// The indentation unit; empty in compact mode.
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Whether pretty printing is enabled.
    pub fn is_pretty(&self) -> bool {
        !self.indent.is_empty()
    }

    /// The line break emitted before indented tokens; empty in compact mode.
    pub fn newline(&self) -> &'static str {
        if self.is_pretty() {
            "\n"
        } else {
            ""
        }
    }

    pub(crate) fn child_indent(&self, prefix: &str) -> String {
        let mut indent = String::with_capacity(prefix.len() + self.indent.len());
        indent.push_str(prefix);
        indent.push_str(&self.indent);
        indent
    }
}
