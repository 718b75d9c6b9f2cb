//! Signature rendering.
//!
//! Reconstructs the call signature a developer would read in the source,
//! from the parsed declaration alone. Default values are the literal
//! expression text, never an evaluated value; type annotations are not
//! rendered.

use crate::model::{ClassDecl, Declaration, FunctionDecl};

/// Render any declaration to its canonical `name(...)` form.
pub fn render(decl: &Declaration) -> String {
    match decl {
        Declaration::Function(f) => render_function(f),
        Declaration::Class(c) => render_class(c),
    }
}

/// Render a function signature.
///
/// Positional defaults apply to a trailing suffix of the combined
/// positional-only + regular list; a `/` marker follows the positional-only
/// group; keyword-only parameters come after `*name` (or an implied `*`)
/// with per-parameter defaults; `**name` closes the list.
pub fn render_function(decl: &FunctionDecl) -> String {
    let mut parts: Vec<String> = Vec::new();

    let total = decl.posonly.len() + decl.args.len();
    let default_offset = total.saturating_sub(decl.defaults.len());
    for (idx, name) in decl.posonly.iter().chain(decl.args.iter()).enumerate() {
        if idx >= default_offset {
            parts.push(format!("{}={}", name, decl.defaults[idx - default_offset]));
        } else {
            parts.push(name.clone());
        }
    }

    if !decl.posonly.is_empty() {
        parts.insert(decl.posonly.len(), "/".to_string());
    }

    if let Some(vararg) = &decl.vararg {
        parts.push(format!("*{}", vararg));
    } else if !decl.kwonly.is_empty() {
        // Keyword-only parameters without *args still need the bare marker.
        parts.push("*".to_string());
    }

    for kw in &decl.kwonly {
        match &kw.default {
            Some(value) => parts.push(format!("{}={}", kw.name, value)),
            None => parts.push(kw.name.clone()),
        }
    }

    if let Some(kwarg) = &decl.kwarg {
        parts.push(format!("**{}", kwarg));
    }

    format!("{}({})", decl.name, parts.join(", "))
}

/// Render a dataclass-like signature from the annotated fields.
pub fn render_class(decl: &ClassDecl) -> String {
    let fields: Vec<String> = decl
        .fields
        .iter()
        .map(|field| match &field.default {
            Some(value) => format!("{}={}", field.name, value),
            None => field.name.clone(),
        })
        .collect();
    format!("{}({})", decl.name, fields.join(", "))
}
