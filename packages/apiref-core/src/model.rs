//! Declaration model for top-level Python declarations.
//!
//! A `Declaration` is the read-only result of parsing one top-level
//! `def`/`class` statement. It carries exactly what signature rendering
//! needs: parameter groups and default-value expression text for functions,
//! annotated fields for classes, and the leading docstring if one exists.
//! Default values are stored as the literal source text of the expression,
//! never evaluated.

/// A top-level function or class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Function(FunctionDecl),
    Class(ClassDecl),
}

impl Declaration {
    /// Declared identifier.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Function(f) => &f.name,
            Declaration::Class(c) => &c.name,
        }
    }

    /// Leading docstring, if the first body statement is a string literal.
    pub fn docstring(&self) -> Option<&str> {
        match self {
            Declaration::Function(f) => f.docstring.as_deref(),
            Declaration::Class(c) => c.docstring.as_deref(),
        }
    }
}

/// Parsed `def` statement.
///
/// `defaults` aligns with the tail of `posonly` + `args`: only the trailing
/// `defaults.len()` parameters of that combined list carry a default.
/// Keyword-only defaults align one-to-one instead (`None` at an index means
/// that specific parameter has no default).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionDecl {
    pub name: String,
    /// Parameters before a `/` separator.
    pub posonly: Vec<String>,
    /// Regular positional parameters.
    pub args: Vec<String>,
    /// Default expression text, suffix-aligned over `posonly` + `args`.
    pub defaults: Vec<String>,
    /// `*args`-style parameter name.
    pub vararg: Option<String>,
    /// Parameters after `*` or `*args`.
    pub kwonly: Vec<KwOnlyParam>,
    /// `**kwargs`-style parameter name.
    pub kwarg: Option<String>,
    pub docstring: Option<String>,
}

/// Keyword-only parameter with its own optional default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KwOnlyParam {
    pub name: String,
    pub default: Option<String>,
}

/// Parsed `class` statement, reduced to its annotated fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassDecl {
    pub name: String,
    /// Annotated assignments to simple names, in declaration order.
    pub fields: Vec<ClassField>,
    pub docstring: Option<String>,
}

/// One `name: Type [= default]` class-body field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassField {
    pub name: String,
    pub default: Option<String>,
}
