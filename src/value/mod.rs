//! The data model a template renders against.
//!
//! Unlike the pointer-based `ValuePtr` this arena design grew out of, [`Value`]
//! is a fully owned tree in the shape of [`serde_json::Value`]: lists and
//! objects are `Rc`-shared so cloning a `Value` is always O(1), which matters
//! because the renderer clones values onto its scope stack as it walks into
//! sections. See DESIGN.md for why the borrowed design was dropped.

mod format_spec;
mod impls;

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::RenderError;
use crate::escape::ByteSink;
use crate::format::Format;
use crate::view::ContentView;

/// A numeric leaf value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    fn is_truthy(&self) -> bool {
        match self {
            Number::I64(v) => *v != 0,
            Number::U64(v) => *v != 0,
            Number::F64(v) => *v != 0.0,
        }
    }

    fn plain_string(&self) -> String {
        match self {
            Number::I64(v) => v.to_string(),
            Number::U64(v) => v.to_string(),
            Number::F64(v) => v.to_string(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain_string())
    }
}

/// A closure invoked with the raw body of the section it stood in for,
/// producing a fresh value to continue rendering with.
pub type LazyValueFn = Rc<dyn Fn(Option<ContentView<'_>>) -> Value>;

/// A closure invoked with the raw body of the section it stood in for,
/// producing a fresh template fragment to compile and render in its place.
pub type LazyFormatFn = Rc<dyn Fn(Option<ContentView<'_>>) -> Format>;

/// The coarse shape of a [`Value`], used to decide how a tag treats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Atom,
    Object,
    List,
    LazyValue,
    LazyFormat,
}

/// The dynamically-typed value a key resolves to.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    Str(Rc<str>),
    List(Rc<Vec<Value>>),
    Object(Rc<IndexMap<String, Value>>),
    Lazy(LazyValueFn),
    LazyFormat(LazyFormatFn),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::List(l) => f.debug_tuple("List").field(l).finish(),
            Value::Object(o) => f.debug_tuple("Object").field(o).finish(),
            Value::Lazy(_) => f.write_str("Lazy(..)"),
            Value::LazyFormat(_) => f.write_str("LazyFormat(..)"),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Value {
    pub fn empty_object() -> Value {
        Value::Object(Rc::new(IndexMap::new()))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) | Value::Number(_) | Value::Str(_) => Kind::Atom,
            Value::Object(_) => Kind::Object,
            Value::List(_) => Kind::List,
            Value::Lazy(_) => Kind::LazyValue,
            Value::LazyFormat(_) => Kind::LazyFormat,
        }
    }

    /// Truthiness, used to decide whether a section/inversion/filter fires.
    ///
    /// `Null` is falsy, an empty list is falsy, everything else (including an
    /// empty object, a lazy value and a lazy format) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.is_truthy(),
            Value::Str(s) => !s.is_empty(),
            Value::List(l) => !l.is_empty(),
            Value::Object(_) => true,
            Value::Lazy(_) | Value::LazyFormat(_) => true,
        }
    }

    /// Member lookup for object values; `None` for every other kind.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map.get(key).cloned(),
            _ => None,
        }
    }

    /// The elements of a list value; `None` for every other kind.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Write the plain-text rendering of an atom, applying `spec` (the part
    /// of `{{key:spec}}` after the colon) if given. Non-atom values render
    /// as the empty string; the renderer never calls this for a section,
    /// since those are handled by `is_truthy`/`as_list`/`get` instead.
    pub fn print(&self, sink: &mut dyn ByteSink, spec: Option<&str>) -> Result<(), RenderError> {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => sink.write_bytes(if *b { b"true" } else { b"false" }).map_err(Into::into),
            Value::Number(n) => {
                let text = match spec {
                    Some(spec) => format_spec::format_number(*n, spec),
                    None => n.plain_string(),
                };
                sink.write_bytes(text.as_bytes()).map_err(Into::into)
            }
            Value::Str(s) => sink.write_bytes(s.as_bytes()).map_err(Into::into),
            Value::List(_) | Value::Object(_) | Value::Lazy(_) | Value::LazyFormat(_) => Ok(()),
        }
    }
}

/// Converts a Rust type into the [`Value`] tree a template renders against.
///
/// Implemented for the usual scalar and collection types; implement it for
/// your own types to expose them as section/variable data.
pub trait Model {
    fn to_value(&self) -> Value;
}

impl Model for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: Model + ?Sized> Model for &T {
    fn to_value(&self) -> Value {
        (*self).to_value()
    }
}

impl<T: Model + ?Sized> Model for Box<T> {
    fn to_value(&self) -> Value {
        self.as_ref().to_value()
    }
}
