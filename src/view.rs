//! The view a lazy callable gets onto the section body it was invoked over.

use crate::arena::{Arena, ContentList, TextSpan};

/// A borrowed `(ctx, body)` pair: the arena and source text a content list
/// belongs to, plus the raw byte span the list was parsed from.
///
/// Passed to a lazy-value or lazy-format callable when it is invoked as a
/// section body (`None` when invoked as a plain variable, which has no
/// body).
#[derive(Clone, Copy)]
pub struct ContentView<'a> {
    pub(crate) arena: &'a Arena,
    pub(crate) source: &'a str,
    pub(crate) contents: &'a ContentList,
    pub(crate) span: TextSpan,
}

impl<'a> ContentView<'a> {
    /// The literal template source the body was parsed from.
    pub fn raw_text(&self) -> &'a str {
        self.span.resolve(self.source)
    }

    pub fn contents(&self) -> &'a ContentList {
        self.contents
    }

    pub fn arena(&self) -> &'a Arena {
        self.arena
    }
}
