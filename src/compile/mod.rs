//! The template compiler (§4.1): a hand-written, single-pass recursive
//! descent parser that turns source bytes into a [`Document`].
//!
//! One `Parser` walks the source once, left to right; section/inversion/
//! filter/loop/inheritance bodies recurse, and an inheritance parent's body
//! is parsed by a separate pass (`parse_overrides`) that keeps only its
//! `$name` children. Delimiters are mutable parser state, changed in place
//! by `{{=...=}}`.

mod tags;

use std::rc::Rc;

use indexmap::IndexMap;

use crate::arena::{Arena, Block, ContentList, Document, Kind as ArenaKind, Partial, TextSpan, Variable};
use crate::error::{ErrorCode, FormatError};

use tags::{find_bytes, standalone_bounds, ScannedTag, TagKind};

pub(crate) fn compile(source: &str) -> Result<Document, FormatError> {
    let mut parser = Parser::new(source);
    let root = parser.parse_content(None)?;
    Ok(Document { arena: Rc::new(parser.arena), root })
}

struct Parser<'s> {
    source: &'s str,
    bytes: &'s [u8],
    pos: usize,
    open: Vec<u8>,
    close: Vec<u8>,
    arena: Arena,
    /// Byte offset of the most recently matched `{{/name}}` tag's opening
    /// brace, recorded so the caller that opened the section can compute
    /// its body's `TextSpan` without threading an extra return value
    /// through every recursive call.
    last_close_tag_start: usize,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> Self {
        Parser {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            open: b"{{".to_vec(),
            close: b"}}".to_vec(),
            arena: Arena::new(),
            last_close_tag_start: 0,
        }
    }

    /// Scans forward from `self.pos` for the next tag, without consuming it.
    /// Returns `Ok(None)` at end of input.
    fn next_tag(&mut self) -> Result<Option<ScannedTag<'s>>, FormatError> {
        let open_at = match find_bytes(self.bytes, &self.open, self.pos) {
            Some(i) => i,
            None => return Ok(None),
        };
        let after_open = open_at + self.open.len();
        let first = self.source[after_open..].chars().next();

        let (kind, content_start, terminator): (TagKind, usize, Vec<u8>) = match first {
            None => return Err(FormatError::new(ErrorCode::Delim, open_at, "tag never closed")),
            Some(c) => match c {
                '#' => (TagKind::Block(ArenaKind::Section), after_open + 1, self.close.clone()),
                '^' => (TagKind::Block(ArenaKind::Inversion), after_open + 1, self.close.clone()),
                '?' => (TagKind::Block(ArenaKind::Filter), after_open + 1, self.close.clone()),
                '*' => (TagKind::Block(ArenaKind::Loop), after_open + 1, self.close.clone()),
                '$' => (TagKind::Block(ArenaKind::Inheritance), after_open + 1, self.close.clone()),
                '/' => (TagKind::End, after_open + 1, self.close.clone()),
                '!' => (TagKind::Comment, after_open + 1, self.close.clone()),
                '=' => {
                    let mut terminator = vec![b'='];
                    terminator.extend_from_slice(&self.close);
                    (TagKind::SetDelim, after_open + 1, terminator)
                }
                '>' => (TagKind::Partial, after_open + 1, self.close.clone()),
                '<' => (TagKind::InheritanceParent, after_open + 1, self.close.clone()),
                '&' => (TagKind::Variable(true), after_open + 1, self.close.clone()),
                '{' => {
                    let mut terminator = vec![b'}'];
                    terminator.extend_from_slice(&self.close);
                    (TagKind::Variable(true), after_open + 1, terminator)
                }
                _ => (TagKind::Variable(false), after_open, self.close.clone()),
            },
        };

        let term_pos = match find_bytes(self.bytes, &terminator, content_start) {
            Some(i) => i,
            None => {
                let code = if kind == TagKind::SetDelim { ErrorCode::SetDelim } else { ErrorCode::Delim };
                return Err(FormatError::new(code, open_at, "tag never closed"));
            }
        };
        let tag_end = term_pos + terminator.len();
        let key_text = &self.source[content_start..term_pos];

        let standalone =
            if kind.eligible_for_standalone() { standalone_bounds(self.source, open_at, tag_end) } else { None };
        let (text_region_end, resume_pos) = match standalone {
            Some((line_start, after_line)) => (line_start, after_line),
            None => (open_at, tag_end),
        };

        Ok(Some(ScannedTag {
            kind,
            key_text,
            tag_start: open_at,
            tag_end,
            content_start,
            text_region_end,
            resume_pos,
            is_standalone: standalone.is_some(),
        }))
    }

    fn indent_of(&self, tag: &ScannedTag<'s>) -> String {
        if tag.text_region_end < tag.tag_start {
            self.source[tag.text_region_end..tag.tag_start].to_string()
        } else {
            String::new()
        }
    }

    fn apply_set_delim(&mut self, key_text: &str, tag_start: usize) -> Result<(), FormatError> {
        let mut parts = key_text.split_ascii_whitespace();
        let (open, close) = match (parts.next(), parts.next()) {
            (Some(o), Some(c)) => (o, c),
            _ => return Err(FormatError::new(ErrorCode::BadDelim, tag_start, "expected two delimiter tokens")),
        };
        if parts.next().is_some() {
            return Err(FormatError::new(ErrorCode::BadDelim, tag_start, "expected exactly two delimiter tokens"));
        }
        self.open = open.as_bytes().to_vec();
        self.close = close.as_bytes().to_vec();
        Ok(())
    }

    fn push_variable(&mut self, list: &mut ContentList, tag: &ScannedTag<'s>, raw: bool) -> Result<(), FormatError> {
        let key = tag.key_text.trim();
        if key.is_empty() {
            return Err(FormatError::new(ErrorCode::BadKey, tag.content_start, "empty variable key"));
        }
        let split = key.find(':').map(|i| i as u32).unwrap_or(0);
        list.push(self.arena.push_variable(Variable { key: key.to_string(), split }, raw));
        Ok(())
    }

    fn push_partial(&mut self, list: &mut ContentList, tag: &ScannedTag<'s>) -> Result<(), FormatError> {
        let name = tag.key_text.trim();
        if name.is_empty() {
            return Err(FormatError::new(ErrorCode::BadKey, tag.content_start, "empty partial name"));
        }
        let indent = self.indent_of(tag);
        list.push(self.arena.push_partial(Partial {
            key: name.to_string(),
            indent,
            standalone: tag.is_standalone,
            overriders: IndexMap::new(),
        }));
        Ok(())
    }

    /// Parses content until end of input (`section: None`, top level) or a
    /// `{{/name}}` matching `section`'s name; raises `error_section` if the
    /// opener (recorded at `section`'s position) is never closed.
    fn parse_content(&mut self, section: Option<(&'s str, usize)>) -> Result<ContentList, FormatError> {
        let mut list = ContentList::new();
        loop {
            let start = self.pos;
            let tag = match self.next_tag()? {
                Some(t) => t,
                None => {
                    if let Some((_, opener_pos)) = section {
                        return Err(FormatError::new(ErrorCode::Section, opener_pos, "section never closed"));
                    }
                    if start < self.source.len() {
                        list.push(self.arena.push_text(TextSpan::new(start, self.source.len())));
                    }
                    self.pos = self.source.len();
                    return Ok(list);
                }
            };

            if tag.text_region_end > start {
                list.push(self.arena.push_text(TextSpan::new(start, tag.text_region_end)));
            }

            match tag.kind {
                TagKind::Comment => {
                    self.pos = tag.resume_pos;
                }
                TagKind::SetDelim => {
                    self.apply_set_delim(tag.key_text, tag.tag_start)?;
                    self.pos = tag.resume_pos;
                }
                TagKind::Variable(raw) => {
                    self.push_variable(&mut list, &tag, raw)?;
                    self.pos = tag.resume_pos;
                }
                TagKind::Partial => {
                    self.push_partial(&mut list, &tag)?;
                    self.pos = tag.resume_pos;
                }
                TagKind::InheritanceParent => {
                    let name = tag.key_text.trim();
                    if name.is_empty() {
                        return Err(FormatError::new(ErrorCode::BadKey, tag.content_start, "empty partial name"));
                    }
                    let indent = self.indent_of(&tag);
                    let standalone = tag.is_standalone;
                    self.pos = tag.resume_pos;
                    let overriders = self.parse_overrides(name, tag.tag_start)?;
                    list.push(self.arena.push_partial(Partial { key: name.to_string(), indent, standalone, overriders }));
                }
                TagKind::Block(kind) => {
                    let raw_key = tag.key_text.trim();
                    if raw_key.is_empty() {
                        return Err(FormatError::new(ErrorCode::BadKey, tag.content_start, "empty section key"));
                    }
                    let (section_name, lookup_key) = match raw_key.find(':') {
                        Some(i) => (&raw_key[..i], &raw_key[i + 1..]),
                        None => (raw_key, raw_key),
                    };
                    let body_start = tag.resume_pos;
                    self.pos = body_start;
                    let contents = self.parse_content(Some((section_name, tag.tag_start)))?;
                    let body_end = self.last_close_tag_start;
                    let lookup = if kind == ArenaKind::Inheritance { section_name } else { lookup_key };
                    let block = Block { key: lookup.to_string(), contents, span: TextSpan::new(body_start, body_end) };
                    list.push(self.arena.push_block(kind, block));
                }
                TagKind::End => {
                    let closed_name = tag.key_text.trim();
                    match section {
                        Some((expected, _)) if expected == closed_name => {
                            self.last_close_tag_start = tag.tag_start;
                            self.pos = tag.resume_pos;
                            return Ok(list);
                        }
                        _ => {
                            return Err(FormatError::new(
                                ErrorCode::Section,
                                tag.tag_start,
                                format!("unexpected closing tag for {closed_name:?}"),
                            ));
                        }
                    }
                }
            }
        }
    }

    /// Parses an inheritance parent's body (§4.1.4): every `$name` block
    /// becomes an override entry; everything else is parsed (to keep
    /// delimiter/position tracking correct) and discarded.
    fn parse_overrides(&mut self, parent_name: &str, opener_pos: usize) -> Result<IndexMap<String, ContentList>, FormatError> {
        let mut overriders = IndexMap::new();
        loop {
            let tag = match self.next_tag()? {
                Some(t) => t,
                None => return Err(FormatError::new(ErrorCode::Section, opener_pos, "inheritance parent never closed")),
            };

            match tag.kind {
                TagKind::Block(ArenaKind::Inheritance) => {
                    let raw_key = tag.key_text.trim();
                    if raw_key.is_empty() {
                        return Err(FormatError::new(ErrorCode::BadKey, tag.content_start, "empty override name"));
                    }
                    let name = raw_key.split(':').next().unwrap_or(raw_key);
                    self.pos = tag.resume_pos;
                    let contents = self.parse_content(Some((name, tag.tag_start)))?;
                    overriders.insert(name.to_string(), contents);
                }
                TagKind::Block(_) => {
                    let raw_key = tag.key_text.trim();
                    if raw_key.is_empty() {
                        return Err(FormatError::new(ErrorCode::BadKey, tag.content_start, "empty section key"));
                    }
                    let name = raw_key.split(':').next().unwrap_or(raw_key);
                    self.pos = tag.resume_pos;
                    let _ = self.parse_content(Some((name, tag.tag_start)))?;
                }
                TagKind::InheritanceParent => {
                    let name = tag.key_text.trim();
                    if name.is_empty() {
                        return Err(FormatError::new(ErrorCode::BadKey, tag.content_start, "empty partial name"));
                    }
                    self.pos = tag.resume_pos;
                    let _ = self.parse_overrides(name, tag.tag_start)?;
                }
                TagKind::End => {
                    if tag.key_text.trim() == parent_name {
                        self.last_close_tag_start = tag.tag_start;
                        self.pos = tag.resume_pos;
                        return Ok(overriders);
                    }
                    return Err(FormatError::new(
                        ErrorCode::Section,
                        tag.tag_start,
                        "mismatched inheritance parent close",
                    ));
                }
                _ => {
                    self.pos = tag.resume_pos;
                }
            }
        }
    }
}
