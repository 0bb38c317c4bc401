//! The two hook points a caller plugs into a render call: partial lookup and
//! unresolved-key fallback.

use std::collections::HashMap;

use crate::format::Format;
use crate::value::Value;

/// Resolves a partial name to a compiled [`Format`].
///
/// Queried once per `{{>name}}` / `{{<name}}` tag encountered during render.
/// A missing partial renders as empty, not as an error.
pub trait PartialProvider {
    fn lookup(&self, name: &str) -> Option<&Format>;
}

/// A `PartialProvider` with no partials; every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContext;

impl PartialProvider for NoContext {
    fn lookup(&self, _name: &str) -> Option<&Format> {
        None
    }
}

/// A `PartialProvider` backed by a name→`Format` map, for callers who'd
/// otherwise have to hand-write one.
#[derive(Debug, Clone, Default)]
pub struct MapContext {
    partials: HashMap<String, Format>,
}

impl MapContext {
    pub fn new() -> Self {
        MapContext::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, format: Format) -> &mut Self {
        self.partials.insert(name.into(), format);
        self
    }

    pub fn with(mut self, name: impl Into<String>, format: Format) -> Self {
        self.insert(name, format);
        self
    }
}

impl PartialProvider for MapContext {
    fn lookup(&self, name: &str) -> Option<&Format> {
        self.partials.get(name)
    }
}

/// Called when a single-segment key lookup misses every scope frame.
///
/// The default, [`NoUnresolved`], treats a miss as `Value::Null`.
pub trait UnresolvedHandler {
    fn resolve(&self, key: &str) -> Option<Value>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoUnresolved;

impl UnresolvedHandler for NoUnresolved {
    fn resolve(&self, _key: &str) -> Option<Value> {
        None
    }
}
