//! Python module parsing via tree-sitter.
//!
//! Walks only the direct children of the module node, so nested functions,
//! methods, and class-local classes are never surfaced as declarations.
//! Decorated definitions are unwrapped to the underlying `def`/`class`, and
//! async functions are treated as regular function declarations.

use tree_sitter::{Node as TSNode, Parser};

use crate::error::{ApirefError, Result};
use crate::model::{ClassDecl, ClassField, Declaration, FunctionDecl, KwOnlyParam};

/// Python node kinds for quick lookup
pub mod node_kinds {
    pub const FUNCTION_DEF: &str = "function_definition";
    pub const CLASS_DEF: &str = "class_definition";
    pub const DECORATED_DEF: &str = "decorated_definition";
    pub const EXPRESSION_STATEMENT: &str = "expression_statement";
    pub const ASSIGNMENT: &str = "assignment";
    pub const IDENTIFIER: &str = "identifier";
    pub const STRING: &str = "string";
    pub const COMMENT: &str = "comment";
    pub const TYPED_PARAMETER: &str = "typed_parameter";
    pub const DEFAULT_PARAMETER: &str = "default_parameter";
    pub const TYPED_DEFAULT_PARAMETER: &str = "typed_default_parameter";
    pub const LIST_SPLAT_PATTERN: &str = "list_splat_pattern";
    pub const DICT_SPLAT_PATTERN: &str = "dictionary_splat_pattern";
    pub const POSITIONAL_SEPARATOR: &str = "positional_separator";
    pub const KEYWORD_SEPARATOR: &str = "keyword_separator";
}

/// Parse Python source into its top-level declarations, in source order.
///
/// Malformed source is a fatal parse error; no partial results are returned.
pub fn parse_module(source: &str) -> Result<Vec<Declaration>> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::language())
        .map_err(|e| ApirefError::parse(format!("failed to load Python grammar: {e}")))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ApirefError::parse("parser produced no syntax tree"))?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(ApirefError::parse("module source is not valid Python"));
    }

    let mut declarations = Vec::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        // Decorators wrap the definition node in the tree-sitter grammar;
        // a decorated top-level def/class is still a top-level declaration.
        let node = if child.kind() == node_kinds::DECORATED_DEF {
            match child.child_by_field_name("definition") {
                Some(inner) => inner,
                None => continue,
            }
        } else {
            child
        };

        match node.kind() {
            node_kinds::FUNCTION_DEF => {
                if let Some(decl) = parse_function(source, &node)? {
                    declarations.push(Declaration::Function(decl));
                }
            }
            node_kinds::CLASS_DEF => {
                if let Some(decl) = parse_class(source, &node)? {
                    declarations.push(Declaration::Class(decl));
                }
            }
            _ => {}
        }
    }

    Ok(declarations)
}

fn node_text<'a>(source: &'a str, node: &TSNode) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Source text of a default-value expression. An unrecoverable slice is a
/// fatal render error for the run rather than a silently guessed form.
fn expr_text(source: &str, node: &TSNode) -> Result<String> {
    match source.get(node.byte_range()) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ApirefError::render(format!(
            "cannot render default-value expression at byte range {:?}",
            node.byte_range()
        ))),
    }
}

fn splat_name(source: &str, node: &TSNode) -> Option<String> {
    node.named_child(0)
        .map(|n| node_text(source, &n).to_string())
        .filter(|n| !n.is_empty())
}

fn parse_function(source: &str, node: &TSNode) -> Result<Option<FunctionDecl>> {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(source, &n).to_string())
        .unwrap_or_default();
    if name.is_empty() {
        return Ok(None);
    }

    let mut decl = FunctionDecl {
        name,
        ..FunctionDecl::default()
    };
    // Set once a `*` or `*args` is seen; every plain parameter after that
    // point is keyword-only.
    let mut after_star = false;

    if let Some(params) = node.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        for child in params.named_children(&mut cursor) {
            match child.kind() {
                node_kinds::IDENTIFIER => {
                    let name = node_text(source, &child).to_string();
                    if after_star {
                        decl.kwonly.push(KwOnlyParam {
                            name,
                            default: None,
                        });
                    } else {
                        decl.args.push(name);
                    }
                }
                node_kinds::TYPED_PARAMETER => {
                    // `x: T`, but also `*args: T` / `**kwargs: T` nest the
                    // splat pattern inside the typed parameter.
                    let Some(inner) = child.named_child(0) else {
                        continue;
                    };
                    match inner.kind() {
                        node_kinds::IDENTIFIER => {
                            let name = node_text(source, &inner).to_string();
                            if after_star {
                                decl.kwonly.push(KwOnlyParam {
                                    name,
                                    default: None,
                                });
                            } else {
                                decl.args.push(name);
                            }
                        }
                        node_kinds::LIST_SPLAT_PATTERN => {
                            decl.vararg = splat_name(source, &inner);
                            after_star = true;
                        }
                        node_kinds::DICT_SPLAT_PATTERN => {
                            decl.kwarg = splat_name(source, &inner);
                        }
                        _ => {}
                    }
                }
                node_kinds::DEFAULT_PARAMETER | node_kinds::TYPED_DEFAULT_PARAMETER => {
                    let name = child
                        .child_by_field_name("name")
                        .map(|n| node_text(source, &n).to_string())
                        .unwrap_or_default();
                    if name.is_empty() {
                        continue;
                    }
                    let value = match child.child_by_field_name("value") {
                        Some(v) => Some(expr_text(source, &v)?),
                        None => None,
                    };
                    if after_star {
                        decl.kwonly.push(KwOnlyParam {
                            name,
                            default: value,
                        });
                    } else if let Some(value) = value {
                        decl.args.push(name);
                        decl.defaults.push(value);
                    } else {
                        decl.args.push(name);
                    }
                }
                node_kinds::LIST_SPLAT_PATTERN => {
                    decl.vararg = splat_name(source, &child);
                    after_star = true;
                }
                node_kinds::DICT_SPLAT_PATTERN => {
                    decl.kwarg = splat_name(source, &child);
                }
                node_kinds::POSITIONAL_SEPARATOR => {
                    // Everything seen so far was positional-only.
                    decl.posonly.append(&mut decl.args);
                }
                node_kinds::KEYWORD_SEPARATOR => {
                    after_star = true;
                }
                _ => {}
            }
        }
    }

    decl.docstring = extract_docstring(source, node);
    Ok(Some(decl))
}

fn parse_class(source: &str, node: &TSNode) -> Result<Option<ClassDecl>> {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(source, &n).to_string())
        .unwrap_or_default();
    if name.is_empty() {
        return Ok(None);
    }

    let mut fields = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for stmt in body.named_children(&mut cursor) {
            if stmt.kind() != node_kinds::EXPRESSION_STATEMENT {
                continue;
            }
            let Some(expr) = stmt.named_child(0) else {
                continue;
            };
            // Only annotated assignments to a simple name count as fields.
            if expr.kind() != node_kinds::ASSIGNMENT
                || expr.child_by_field_name("type").is_none()
            {
                continue;
            }
            let Some(left) = expr.child_by_field_name("left") else {
                continue;
            };
            if left.kind() != node_kinds::IDENTIFIER {
                continue;
            }
            let default = match expr.child_by_field_name("right") {
                Some(right) => Some(expr_text(source, &right)?),
                None => None,
            };
            fields.push(ClassField {
                name: node_text(source, &left).to_string(),
                default,
            });
        }
    }

    Ok(Some(ClassDecl {
        name,
        fields,
        docstring: extract_docstring(source, node),
    }))
}

/// Python docstring: the first statement of the body is an
/// expression_statement containing a bare string literal.
fn extract_docstring(source: &str, node: &TSNode) -> Option<String> {
    let body = node.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|c| c.kind() != node_kinds::COMMENT)?;
    if first.kind() != node_kinds::EXPRESSION_STATEMENT {
        return None;
    }
    let string_node = first.named_child(0)?;
    if string_node.kind() != node_kinds::STRING {
        return None;
    }
    let cleaned = clean_docstring(node_text(source, &string_node));
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Strip the string prefix and delimiters, then dedent continuation lines
/// the way `inspect.cleandoc` does.
fn clean_docstring(raw: &str) -> String {
    let text = strip_quotes(raw.trim_start_matches(|c| "rRbBuUfF".contains(c)));

    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return String::new();
    }
    // Common indentation of the non-blank continuation lines, counted in
    // characters so multi-byte whitespace never splits a char.
    let indent = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    out.push(lines[0].trim_start());
    for line in lines.iter().skip(1) {
        if line.trim().is_empty() {
            out.push("");
        } else {
            let cut = line
                .char_indices()
                .nth(indent)
                .map(|(offset, _)| offset)
                .unwrap_or(line.len());
            out.push(&line[cut..]);
        }
    }
    out.join("\n").trim().to_string()
}

/// Strip exactly the string delimiters: a matching triple quote from each
/// end if present, else a matching single quote. Quote characters inside
/// the content are left alone.
fn strip_quotes(text: &str) -> &str {
    for quote in ["\"\"\"", "'''"] {
        if text.len() >= 6 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[3..text.len() - 3];
        }
    }
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}
