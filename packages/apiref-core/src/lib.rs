//! apiref-core — API reference extraction for the tsdecomp docs site.
//!
//! Parses a fixed pair of Python modules with tree-sitter, reconstructs the
//! call signature of each allow-listed top-level function and dataclass-like
//! class, and assembles the JSON payload the documentation site consumes.
//!
//! Pipeline: repository root → module paths → [`parser`] → [`extract`]
//! (using [`signature`]) → [`reference::build_reference`] → JSON payload.
//! The payload is one owned value threaded through the stages; nothing is
//! accumulated through shared state.

pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod reference;
pub mod signature;

pub use error::{ApirefError, ErrorKind, Result};
pub use extract::{extract_items, Item};
pub use model::{ClassDecl, ClassField, Declaration, FunctionDecl, KwOnlyParam};
pub use reference::{build_reference, Payload, Section};
pub use signature::{render, render_class, render_function};
