//! Partial emission (§4.2.5) and inheritance-block resolution (§4.2.6).

use std::rc::Rc;

use crate::arena::{Arena, Block, Partial};
use crate::error::RenderError;
use crate::escape::StringSink;

use super::{ChainFrame, Renderer};

pub(super) fn render_partial(
    renderer: &mut Renderer,
    partial: &Partial,
    index: u32,
    arena: &Rc<Arena>,
    source: &Rc<str>,
) -> Result<(), RenderError> {
    let name = resolve_partial_name(renderer, &partial.key);
    let format = match renderer.context.lookup(&name) {
        Some(f) => f,
        None => return Ok(()),
    };
    if format.is_empty() {
        return Ok(());
    }

    let prior_indent_len = renderer.indent.len();
    renderer.indent.push_str(&partial.indent);
    renderer.needs_indent = !renderer.indent.is_empty();

    let prior_chain_len = renderer.chain.len();
    if !partial.overriders.is_empty() {
        renderer.chain.push(ChainFrame { arena: arena.clone(), source: source.clone(), partial_index: index });
    }

    let result = renderer.render_list(&format.arena_rc(), &format.source_rc(), &format.document().root);

    renderer.chain.truncate(prior_chain_len);
    renderer.indent.truncate(prior_indent_len);

    result.and_then(|()| backfill_standalone_newline(renderer, partial))
}

/// A standalone partial tag's own trailing newline was swallowed by
/// standalone-line trimming at parse time. If the partial's rendered output
/// doesn't already end with one, write it back now, unindented, so the line
/// the partial replaced still ends the way it did in the source template.
fn backfill_standalone_newline(renderer: &mut Renderer, partial: &Partial) -> Result<(), RenderError> {
    if partial.standalone && !renderer.ends_with_newline {
        renderer.sink.write_bytes(b"\n")?;
        renderer.ends_with_newline = true;
    }
    Ok(())
}

fn resolve_partial_name(renderer: &mut Renderer, key: &str) -> String {
    let Some(remainder) = key.strip_prefix('*') else {
        return key.to_string();
    };
    let value = renderer.resolve_key(remainder);
    let mut sink = StringSink::new();
    if value.print(&mut sink, None).is_err() {
        return String::new();
    }
    sink.finish().unwrap_or_default()
}

pub(super) fn render_inheritance_block(
    renderer: &mut Renderer,
    block: &Block,
    arena: &Rc<Arena>,
    source: &Rc<str>,
) -> Result<(), RenderError> {
    // Walk the chain from index 0: the first-pushed frame is the leaf
    // template's own overrides, and the leaf always wins over anything an
    // intermediate parent in the chain also overrides.
    let mut matched = None;
    for frame in renderer.chain.iter() {
        let overriders = &frame.arena.partial(frame.partial_index).overriders;
        if let Some(contents) = overriders.get(&block.key) {
            matched = Some((frame.arena.clone(), frame.source.clone(), contents.clone()));
            break;
        }
    }

    match matched {
        Some((frame_arena, frame_source, contents)) => renderer.render_list(&frame_arena, &frame_source, &contents),
        None => renderer.render_list(arena, source, &block.contents),
    }
}
