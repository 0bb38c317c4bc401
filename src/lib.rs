//! A Mustache-family template compiler and renderer.
//!
//! ```
//! use loom_template::{to_string, Format};
//! use std::collections::HashMap;
//!
//! let format = Format::compile("Hello, {{name}}!").unwrap();
//! let mut data = HashMap::new();
//! data.insert("name", "world");
//! assert_eq!(to_string(&format, &data).unwrap(), "Hello, world!");
//! ```
//!
//! Beyond standard Mustache (sections, inverted sections, variables,
//! partials, delimiter changes, standalone-line handling) this engine adds
//! template inheritance, dynamic partial names, a filter section, an
//! explicit loop section, per-variable format specs and section aliases.

pub mod arena;
mod compile;
mod context;
pub mod error;
pub mod escape;
mod format;
mod render;
pub mod value;
pub mod view;

pub use context::{MapContext, NoContext, NoUnresolved, PartialProvider, UnresolvedHandler};
pub use error::{ErrorCode, FormatError, RenderError};
pub use escape::{ByteSink, Escape, HtmlEscape, NoEscape, StringSink};
pub use format::{Format, Options};
pub use render::{render, render_ex, to_string};
pub use value::{Kind, Model, Number, Value};
pub use view::ContentView;
