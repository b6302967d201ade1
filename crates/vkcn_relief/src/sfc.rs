//! Single file component block layout.

use crate::span::Span;
use vkcn_carton::{CompactString, FxHashMap};

/// Language of a `<style>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleLang {
    Css,
    Scss,
    Less,
    PostCss,
    /// Any other `lang` value (stylus, sass indented syntax, ...)
    Unsupported(CompactString),
}

impl StyleLang {
    /// Resolve the `lang` attribute value of a style block.
    pub fn from_attr(lang: Option<&str>) -> Self {
        match lang.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("css") => Self::Css,
            Some("scss") => Self::Scss,
            Some("less") => Self::Less,
            Some("postcss") | Some("pcss") => Self::PostCss,
            Some(other) => Self::Unsupported(CompactString::new(other)),
        }
    }

    /// Whether `//` starts a line comment in this language.
    #[inline]
    pub fn has_line_comments(&self) -> bool {
        matches!(self, Self::Scss | Self::Less)
    }

    #[inline]
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

/// A top-level block of the component.
#[derive(Debug, Clone)]
pub struct SfcBlock {
    /// Content span (between the opening and closing tag)
    pub content: Span,
    /// Attributes of the opening tag (boolean attributes map to `""`)
    pub attrs: FxHashMap<CompactString, CompactString>,
}

impl SfcBlock {
    #[inline]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|v| v.as_str())
    }

    #[inline]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }
}

/// A `<style>` block.
#[derive(Debug, Clone)]
pub struct SfcStyleBlock {
    pub block: SfcBlock,
    pub lang: StyleLang,
    pub scoped: bool,
}

impl SfcStyleBlock {
    /// Only inline blocks in a supported language can be analysed.
    #[inline]
    pub fn is_valid_context(&self) -> bool {
        self.lang.is_supported() && !self.block.has_attr("src")
    }
}

/// Parsed component layout.
#[derive(Debug, Clone, Default)]
pub struct SfcDescriptor {
    pub filename: String,
    pub template: Option<SfcBlock>,
    pub script: Option<SfcBlock>,
    pub script_setup: Option<SfcBlock>,
    pub styles: Vec<SfcStyleBlock>,
}
