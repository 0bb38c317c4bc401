//! The AST arena: four parallel, append-only tables addressed by compact
//! `(kind, index)` handles.
//!
//! PARSE (see `compile`) is the only phase that writes to an `Arena`; every
//! other phase (render, and a lazy callable inspecting a body) only reads it.
//! Keeping content nodes as small index pairs rather than a pointer-linked
//! tree means a `Document` can be moved freely and dropped without recursive
//! deallocation.

use std::rc::Rc;

use indexmap::IndexMap;

/// A byte range into the source text owned or borrowed by a `Format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan {
    pub start: u32,
    pub end: u32,
}

impl TextSpan {
    pub fn new(start: usize, end: usize) -> Self {
        TextSpan { start: start as u32, end: end as u32 }
    }

    pub fn as_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }

    pub fn resolve<'s>(&self, source: &'s str) -> &'s str {
        &source[self.as_range()]
    }
}

/// The kind of a content ref, and the table it indexes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Text,
    VarEscaped,
    VarRaw,
    Section,
    Inversion,
    Filter,
    Loop,
    Inheritance,
    Partial,
}

impl Kind {
    fn is_block(self) -> bool {
        matches!(
            self,
            Kind::Section | Kind::Inversion | Kind::Filter | Kind::Loop | Kind::Inheritance
        )
    }
}

/// A `(kind, index)` handle identifying one AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentRef {
    pub kind: Kind,
    pub index: u32,
}

impl ContentRef {
    pub const NULL: ContentRef = ContentRef { kind: Kind::Null, index: 0 };

    pub fn is_null(&self) -> bool {
        self.kind == Kind::Null
    }
}

/// An ordered sequence of content refs.
pub type ContentList = Vec<ContentRef>;

/// `{{key}}` / `{{{key}}}` / `{{&key}}`, with an optional `:spec` suffix.
///
/// `split` is 0 when there is no format spec, else the byte offset of the
/// `:` within `key`.
#[derive(Debug, Clone)]
pub struct Variable {
    pub key: String,
    pub split: u32,
}

impl Variable {
    /// The part of `key` before the format-spec separator, if any.
    pub fn name(&self) -> &str {
        if self.split == 0 {
            &self.key
        } else {
            &self.key[..self.split as usize]
        }
    }

    /// The format spec after the `:`, if the key carried one.
    pub fn spec(&self) -> Option<&str> {
        if self.split == 0 {
            None
        } else {
            Some(&self.key[self.split as usize + 1..])
        }
    }
}

/// A section / inversion / filter / loop / inheritance block.
///
/// `key` is the *lookup key* (the alias, for an aliased section; the block
/// name, for an inheritance block, which has no data binding). `span` is the
/// byte range of the block's raw body, exposed to lazy callables via
/// [`crate::ContentView`].
#[derive(Debug, Clone)]
pub struct Block {
    pub key: String,
    pub contents: ContentList,
    pub span: TextSpan,
}

/// A partial (`{{>name}}`) or inheritance parent (`{{<parent}}...{{/parent}}`).
///
/// `key` may begin with `*`, denoting a dynamic name resolved against data at
/// render time. `overriders` is empty for a plain partial. `standalone`
/// records whether the tag sat alone on its source line, so the renderer
/// knows whether to backfill the line break its standalone handling consumed.
#[derive(Debug, Clone)]
pub struct Partial {
    pub key: String,
    pub indent: String,
    pub standalone: bool,
    pub overriders: IndexMap<String, ContentList>,
}

/// The four parallel tables, plus the push/visit operations the compiler
/// uses to populate them.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    texts: Vec<TextSpan>,
    variables: Vec<Variable>,
    blocks: Vec<Block>,
    partials: Vec<Partial>,
}

impl Arena {
    pub fn new() -> Self {
        Arena::default()
    }

    pub fn push_text(&mut self, span: TextSpan) -> ContentRef {
        let index = self.texts.len() as u32;
        self.texts.push(span);
        ContentRef { kind: Kind::Text, index }
    }

    pub fn push_variable(&mut self, var: Variable, raw: bool) -> ContentRef {
        let index = self.variables.len() as u32;
        self.variables.push(var);
        ContentRef { kind: if raw { Kind::VarRaw } else { Kind::VarEscaped }, index }
    }

    pub fn push_block(&mut self, kind: Kind, block: Block) -> ContentRef {
        debug_assert!(kind.is_block());
        let index = self.blocks.len() as u32;
        self.blocks.push(block);
        ContentRef { kind, index }
    }

    pub fn push_partial(&mut self, partial: Partial) -> ContentRef {
        let index = self.partials.len() as u32;
        self.partials.push(partial);
        ContentRef { kind: Kind::Partial, index }
    }

    pub fn text(&self, index: u32) -> &TextSpan {
        &self.texts[index as usize]
    }

    pub fn variable(&self, index: u32) -> &Variable {
        &self.variables[index as usize]
    }

    pub fn block(&self, index: u32) -> &Block {
        &self.blocks[index as usize]
    }

    pub fn partial(&self, index: u32) -> &Partial {
        &self.partials[index as usize]
    }
}

/// A `Document` owns an arena plus the root content list produced by PARSE.
///
/// The arena is `Rc`-shared rather than borrowed: an inheritance chain frame,
/// or a `Format` freshly produced by a lazy callable, needs to outlive the
/// call that created it by an amount the type system can't name up front, so
/// every long-lived handle to arena data is a cheap refcounted clone instead
/// of a borrow tied to some enclosing lifetime.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub arena: Rc<Arena>,
    pub root: ContentList,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}
