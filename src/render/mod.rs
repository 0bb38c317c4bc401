//! The tree-walking renderer: resolves dotted keys against a scope stack,
//! dispatches on a value's [`Kind`](crate::value::Kind), and writes bytes to
//! a sink.

mod partial;
mod section;

use std::rc::Rc;

use crate::arena::{Arena, ContentList, Kind};
use crate::context::{NoContext, NoUnresolved, PartialProvider, UnresolvedHandler};
use crate::error::RenderError;
use crate::escape::{ByteSink, Escape, NoEscape, StringSink};
use crate::format::Format;
use crate::value::{Model, Value};

/// An entry on the inheritance override chain: which partial's `overriders`
/// map is in play, and the arena/source that map's content lists index into.
///
/// Owned via `Rc` rather than borrowed: a chain frame must outlive the call
/// that pushed it by an amount no single lifetime parameter can name once a
/// lazy-format can produce a document whose lifetime is strictly shorter
/// than anything that existed before the call, so every long-lived handle
/// here is a cheap refcounted clone instead of a borrow.
struct ChainFrame {
    arena: Rc<Arena>,
    source: Rc<str>,
    partial_index: u32,
}

/// Per-call renderer state. Constructed once per [`render_ex`] call and
/// dropped at the end of it; never shared across threads.
struct Renderer<'r> {
    sink: &'r mut dyn ByteSink,
    context: &'r dyn PartialProvider,
    escape: &'r dyn Escape,
    unresolved: &'r dyn UnresolvedHandler,
    scope: Vec<Value>,
    cursor: Value,
    chain: Vec<ChainFrame>,
    indent: String,
    needs_indent: bool,
    /// Whether the last byte actually written to `sink` was `\n`. Used only
    /// to decide whether a standalone partial needs its consumed line break
    /// backfilled (§4.2.5); escaping never turns a trailing `\n` into
    /// something else or vice versa, so checking pre-escape bytes is exact.
    ends_with_newline: bool,
}

/// Render `format` against `data` using default context/escape/unresolved
/// policies (no partials, no escaping, missing keys render as empty).
pub fn render<M: Model>(sink: &mut dyn ByteSink, format: &Format, data: &M) -> Result<(), RenderError> {
    render_ex(sink, format, data, &NoContext, &NoEscape, &NoUnresolved)
}

/// Render `format` against `data`, with explicit partial/escape/unresolved policies.
pub fn render_ex<M: Model>(
    sink: &mut dyn ByteSink,
    format: &Format,
    data: &M,
    context: &dyn PartialProvider,
    escape: &dyn Escape,
    unresolved: &dyn UnresolvedHandler,
) -> Result<(), RenderError> {
    let root = data.to_value();
    let mut renderer = Renderer {
        sink,
        context,
        escape,
        unresolved,
        scope: vec![if root.as_object().is_some() { root.clone() } else { Value::empty_object() }],
        cursor: root,
        chain: Vec::new(),
        indent: String::new(),
        needs_indent: false,
        ends_with_newline: true,
    };
    renderer.render_list(&format.arena_rc(), &format.source_rc(), &format.document().root)
}

/// Render `format` against `data` into a freshly allocated `String`.
pub fn to_string<M: Model>(format: &Format, data: &M) -> Result<String, RenderError> {
    let mut sink = StringSink::new();
    render(&mut sink, format, data)?;
    sink.finish().map_err(|e| RenderError::Sink(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

impl<'r> Renderer<'r> {
    fn render_list(&mut self, arena: &Rc<Arena>, source: &Rc<str>, list: &ContentList) -> Result<(), RenderError> {
        for content_ref in list {
            match content_ref.kind {
                Kind::Null => {}
                Kind::Text => {
                    let span = arena.text(content_ref.index);
                    self.write_text_span(span.resolve(source))?;
                }
                Kind::VarEscaped | Kind::VarRaw => {
                    self.render_variable(arena, source, content_ref.index, content_ref.kind == Kind::VarRaw)?;
                }
                Kind::Section | Kind::Inversion | Kind::Filter | Kind::Loop => {
                    let block = arena.block(content_ref.index);
                    section::render_section(self, content_ref.kind, block, arena, source)?;
                }
                Kind::Inheritance => {
                    let block = arena.block(content_ref.index);
                    partial::render_inheritance_block(self, block, arena, source)?;
                }
                Kind::Partial => {
                    let part = arena.partial(content_ref.index);
                    partial::render_partial(self, part, content_ref.index, arena, source)?;
                }
            }
        }
        Ok(())
    }

    /// Dotted-key resolution (§4.2.2): `.` is the cursor, a leading segment
    /// is resolved through the scope stack (innermost first) falling back to
    /// the unresolved handler, and each further segment is an object `get`.
    fn resolve_key(&self, key: &str) -> Value {
        if key == "." {
            return self.cursor.clone();
        }

        let mut segments = key.split('.');
        let head = segments.next().unwrap_or("");

        let mut current = match self.lookup_scope(head) {
            Some(v) => v,
            None => match self.unresolved.resolve(head) {
                Some(v) => v,
                None => Value::Null,
            },
        };

        for segment in segments {
            current = match current.get(segment) {
                Some(v) => v,
                None => return Value::Null,
            };
        }
        current
    }

    fn lookup_scope(&self, key: &str) -> Option<Value> {
        for frame in self.scope.iter().rev() {
            if let Some(v) = frame.get(key) {
                return Some(v);
            }
        }
        None
    }

    fn flush_indent(&mut self) -> Result<(), RenderError> {
        if self.needs_indent {
            self.needs_indent = false;
            if !self.indent.is_empty() {
                self.sink.write_bytes(self.indent.as_bytes())?;
            }
        }
        Ok(())
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), RenderError> {
        self.flush_indent()?;
        self.sink.write_bytes(bytes)?;
        if let Some(&b) = bytes.last() {
            self.ends_with_newline = b == b'\n';
        }
        Ok(())
    }

    fn write_escaped(&mut self, bytes: &[u8]) -> Result<(), RenderError> {
        self.flush_indent()?;
        self.escape.escape(bytes, self.sink)?;
        if let Some(&b) = bytes.last() {
            self.ends_with_newline = b == b'\n';
        }
        Ok(())
    }

    /// Writes a text run, re-arming `needs_indent` after each embedded
    /// newline rather than emitting the indent immediately, so a text span
    /// ending in `\n` doesn't leave a trailing indented blank line.
    fn write_text_span(&mut self, text: &str) -> Result<(), RenderError> {
        if self.indent.is_empty() {
            return self.write_raw(text.as_bytes());
        }
        let mut rest = text;
        while let Some(i) = rest.find('\n') {
            self.write_raw(rest[..=i].as_bytes())?;
            self.needs_indent = true;
            rest = &rest[i + 1..];
        }
        if !rest.is_empty() {
            self.write_raw(rest.as_bytes())?;
        }
        Ok(())
    }

    fn render_variable(
        &mut self,
        arena: &Rc<Arena>,
        source: &Rc<str>,
        index: u32,
        raw: bool,
    ) -> Result<(), RenderError> {
        let variable = arena.variable(index);
        let name = variable.name().to_string();
        let spec = variable.spec().map(|s| s.to_string());
        let value = self.resolve_key(&name);
        self.emit_value(&value, spec.as_deref(), raw)
    }

    /// Emits a resolved value as variable output: laziness is unwrapped
    /// first (recursing on whatever it produces), then atoms print and
    /// everything else renders as nothing.
    fn emit_value(&mut self, value: &Value, spec: Option<&str>, raw: bool) -> Result<(), RenderError> {
        match value {
            Value::Lazy(f) => {
                let produced = f(None);
                self.emit_value(&produced, spec, raw)
            }
            Value::LazyFormat(f) => {
                let produced = f(None);
                self.render_list(&produced.arena_rc(), &produced.source_rc(), &produced.document().root)
            }
            _ => {
                let mut sink = StringSink::new();
                value.print(&mut sink, spec)?;
                let text = sink.finish().unwrap_or_default();
                if raw {
                    self.write_raw(text.as_bytes())
                } else {
                    self.write_escaped(text.as_bytes())
                }
            }
        }
    }
}
