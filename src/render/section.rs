//! Kind-directed section dispatch (§4.2.4): section / inversion / filter /
//! loop all share one entry point, branching on the resolved value's shape.

use std::rc::Rc;

use crate::arena::{Arena, Block, Kind};
use crate::error::RenderError;
use crate::value::Value;
use crate::view::ContentView;

use super::Renderer;

fn view_of<'a>(arena: &'a Arena, source: &'a str, block: &'a Block) -> ContentView<'a> {
    ContentView { arena, source, contents: &block.contents, span: block.span }
}

pub(super) fn render_section(
    renderer: &mut Renderer,
    kind: Kind,
    block: &Block,
    arena: &Rc<Arena>,
    source: &Rc<str>,
) -> Result<(), RenderError> {
    let value = renderer.resolve_key(&block.key);
    render_resolved(renderer, kind, block, arena, source, &value)
}

fn render_resolved(
    renderer: &mut Renderer,
    kind: Kind,
    block: &Block,
    arena: &Rc<Arena>,
    source: &Rc<str>,
    value: &Value,
) -> Result<(), RenderError> {
    match value {
        Value::Lazy(f) => {
            if kind == Kind::Inversion {
                // A lazy value is never falsy; an inverted section over one
                // renders as empty rather than ever invoking it.
                return Ok(());
            }
            let produced = f(Some(view_of(arena, source, block)));
            render_resolved(renderer, kind, block, arena, source, &produced)
        }
        Value::LazyFormat(f) => {
            if kind == Kind::Inversion {
                // A lazy-format is never falsy; an inverted section over one
                // renders as empty rather than ever expanding its body.
                return Ok(());
            }
            if kind == Kind::Filter {
                return renderer.render_list(arena, source, &block.contents);
            }
            let produced = f(Some(view_of(arena, source, block)));
            renderer.render_list(&produced.arena_rc(), &produced.source_rc(), &produced.document().root)
        }
        _ => render_by_kind(renderer, kind, block, arena, source, value),
    }
}

fn render_by_kind(
    renderer: &mut Renderer,
    kind: Kind,
    block: &Block,
    arena: &Rc<Arena>,
    source: &Rc<str>,
    value: &Value,
) -> Result<(), RenderError> {
    match kind {
        Kind::Inversion => {
            if value.is_truthy() {
                Ok(())
            } else {
                renderer.render_list(arena, source, &block.contents)
            }
        }
        Kind::Filter => {
            if value.is_truthy() {
                renderer.render_list(arena, source, &block.contents)
            } else {
                Ok(())
            }
        }
        Kind::Loop => render_loop(renderer, block, arena, source, value),
        Kind::Section => render_plain_section(renderer, block, arena, source, value),
        _ => unreachable!("render_section is only called for section-shaped content refs"),
    }
}

fn render_plain_section(
    renderer: &mut Renderer,
    block: &Block,
    arena: &Rc<Arena>,
    source: &Rc<str>,
    value: &Value,
) -> Result<(), RenderError> {
    match value {
        Value::Null => Ok(()),
        Value::List(items) => {
            if items.is_empty() {
                Ok(())
            } else {
                render_each(renderer, block, arena, source, items.iter().cloned())
            }
        }
        Value::Object(_) => render_each(renderer, block, arena, source, std::iter::once(value.clone())),
        atom => {
            if atom.is_truthy() {
                renderer.render_list(arena, source, &block.contents)
            } else {
                Ok(())
            }
        }
    }
}

/// `*loop` always iterates: a list runs once per element, anything else
/// (including a lone object) runs once over itself, `Null` runs zero times.
fn render_loop(
    renderer: &mut Renderer,
    block: &Block,
    arena: &Rc<Arena>,
    source: &Rc<str>,
    value: &Value,
) -> Result<(), RenderError> {
    match value {
        Value::Null => Ok(()),
        Value::List(items) => render_each(renderer, block, arena, source, items.iter().cloned()),
        other => render_each(renderer, block, arena, source, std::iter::once(other.clone())),
    }
}

fn render_each(
    renderer: &mut Renderer,
    block: &Block,
    arena: &Rc<Arena>,
    source: &Rc<str>,
    items: impl Iterator<Item = Value>,
) -> Result<(), RenderError> {
    let prior_cursor = renderer.cursor.clone();
    for item in items {
        renderer.cursor = item.clone();
        let pushed = item.as_object().is_some();
        if pushed {
            renderer.scope.push(item);
        }
        let result = renderer.render_list(arena, source, &block.contents);
        if pushed {
            renderer.scope.pop();
        }
        result?;
    }
    renderer.cursor = prior_cursor;
    Ok(())
}
