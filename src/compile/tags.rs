//! Tag classification and the small byte-level helpers the parser scans with.

use crate::arena::Kind as ArenaKind;

/// What a `{{...}}` tag turned out to be, once its sigil byte (if any) has
/// been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TagKind {
    Comment,
    SetDelim,
    End,
    Partial,
    InheritanceParent,
    Block(ArenaKind),
    /// `true` for a raw variable (`{{{x}}}` / `{{&x}}`), `false` for an
    /// escaped one.
    Variable(bool),
}

impl TagKind {
    /// Standalone-line trimming (§4.1.3) applies to every tag except a
    /// variable.
    pub(super) fn eligible_for_standalone(self) -> bool {
        !matches!(self, TagKind::Variable(_))
    }
}

/// One scanned `{{...}}` occurrence, with the raw key text still unsplit
/// and unvalidated.
pub(super) struct ScannedTag<'s> {
    pub(super) kind: TagKind,
    pub(super) key_text: &'s str,
    pub(super) tag_start: usize,
    pub(super) tag_end: usize,
    pub(super) content_start: usize,
    /// Where the preceding text run should stop: `tag_start` normally, or
    /// the current line's start when this tag is standalone.
    pub(super) text_region_end: usize,
    /// Where scanning resumes after this tag: `tag_end` normally, or just
    /// past the trailing newline when this tag is standalone.
    pub(super) resume_pos: usize,
    /// Whether this tag sat alone on its line (whitespace-only before and
    /// after). A standalone partial's own trailing newline was consumed here
    /// and is backfilled at render time if the partial's output doesn't
    /// already end with one (§4.2.5).
    pub(super) is_standalone: bool,
}

/// First index at or after `from` where `needle` occurs in `haystack`.
pub(super) fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..].windows(needle.len()).position(|w| w == needle).map(|i| i + from)
}

/// Whitespace that doesn't itself mark a line boundary, for the
/// before/after scan in `standalone_bounds` (`\n` is handled separately,
/// as the line boundary).
fn is_inline_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | 0x0B | 0x0C)
}

/// If the tag spanning `[tag_start, tag_end)` sits alone on its line
/// (whitespace-only before and after), returns `(line_start, after_line)`:
/// the offset the line began at, and the offset scanning should resume from
/// (just past the trailing newline, or end of source).
pub(super) fn standalone_bounds(source: &str, tag_start: usize, tag_end: usize) -> Option<(usize, usize)> {
    let line_start = match source[..tag_start].rfind('\n') {
        Some(i) => i + 1,
        None => 0,
    };
    if !source.as_bytes()[line_start..tag_start].iter().copied().all(is_inline_whitespace) {
        return None;
    }

    let rest = &source.as_bytes()[tag_end..];
    match rest.iter().position(|&b| b == b'\n') {
        Some(i) => {
            if rest[..i].iter().copied().all(is_inline_whitespace) {
                Some((line_start, tag_end + i + 1))
            } else {
                None
            }
        }
        None => {
            if rest.iter().copied().all(is_inline_whitespace) {
                Some((line_start, source.len()))
            } else {
                None
            }
        }
    }
}
