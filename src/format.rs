//! A compiled template: an [`Arena`](crate::arena::Arena) plus the source
//! text its spans point into.

use std::rc::Rc;

use crate::arena::Document;
use crate::compile;
use crate::error::FormatError;

/// Options controlling compilation.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Historical knob from the pointer-span design this arena replaced,
    /// where a `Format` could borrow its source instead of owning it.
    /// `Document`'s content refs are arena indices, not pointers, so a
    /// `Format` always ends up owning an `Rc<str>` of its source either way;
    /// this flag is kept for API compatibility and no longer changes
    /// behavior. See DESIGN.md.
    pub copy_text: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { copy_text: true }
    }
}

/// A compiled template, ready to render.
///
/// Cloning a `Format` is cheap: the arena is `Rc`-shared and the source is an
/// `Rc<str>`.
#[derive(Debug, Clone, Default)]
pub struct Format {
    pub(crate) document: Document,
    pub(crate) source: Rc<str>,
}

impl Format {
    /// Compile `source` with default options.
    pub fn compile(source: &str) -> Result<Format, FormatError> {
        Format::compile_with(source, Options::default())
    }

    /// Compile `source`, overriding [`Options`].
    pub fn compile_with(source: &str, options: Options) -> Result<Format, FormatError> {
        let document = compile::compile(source)?;
        let _ = options.copy_text;
        Ok(Format { document, source: Rc::from(source) })
    }

    /// The source text this format was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True if the template has no content at all (empty or all-comment).
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    pub(crate) fn arena_rc(&self) -> Rc<crate::arena::Arena> {
        self.document.arena.clone()
    }

    pub(crate) fn source_rc(&self) -> Rc<str> {
        self.source.clone()
    }
}
