//! Top-level function and method declarations extracted from source files.
//!
//! The structural checks only see [`Declaration`]; the grammar behind it is
//! a [`DeclarationParser`]. [`GoParser`] uses tree-sitter with the Go
//! grammar.

use crate::error::SourceError;
use crate::source::SourceFile;
use std::ops::Range;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Method receiver of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    /// Receiver type as written, e.g. `*sanDirName`.
    pub type_name: String,
    pub is_pointer: bool,
}

/// Read-only view over one function or method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    name: String,
    receiver: Option<Receiver>,
    param_count: usize,
    results: Vec<String>,
    span: Range<usize>,
}

impl Declaration {
    pub fn new(
        name: impl Into<String>,
        receiver: Option<Receiver>,
        param_count: usize,
        results: Vec<String>,
        span: Range<usize>,
    ) -> Self {
        Declaration {
            name: name.into(),
            receiver,
            param_count,
            results,
            span,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn receiver(&self) -> Option<&Receiver> {
        self.receiver.as_ref()
    }

    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }

    pub fn param_count(&self) -> usize {
        self.param_count
    }

    /// Result types as written, one per returned value.
    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// Byte span of the whole declaration.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// Parses a source file into its top-level declarations, in source order.
pub trait DeclarationParser: Send + Sync {
    fn parse(&self, file: &SourceFile) -> Result<Vec<Declaration>, SourceError>;
}

/// Go declarations via tree-sitter.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoParser;

impl DeclarationParser for GoParser {
    fn parse(&self, file: &SourceFile) -> Result<Vec<Declaration>, SourceError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| SourceError::Parser(e.to_string()))?;
        let tree = parser.parse(file.src(), None).ok_or_else(|| SourceError::Syntax {
            path: file.path().to_path_buf(),
            line: None,
            message: "parser produced no tree".into(),
        })?;
        let root = tree.root_node();
        if root.has_error() {
            let offset = first_error(root).map_or(0, |n| n.start_byte());
            return Err(SourceError::Syntax {
                path: file.path().to_path_buf(),
                line: file.line_of(offset),
                message: "source is not valid Go".into(),
            });
        }

        let src = file.src().as_bytes();
        let mut cursor = root.walk();
        let decls = root
            .named_children(&mut cursor)
            .filter_map(|node| match node.kind() {
                "function_declaration" => Some(go_declaration(node, None, src)),
                "method_declaration" => {
                    let recv = node
                        .child_by_field_name("receiver")
                        .and_then(|r| go_receiver(r, src));
                    Some(go_declaration(node, recv, src))
                }
                _ => None,
            })
            .collect();
        Ok(decls)
    }
}

/// Parse the file at `path` with `parser`, returning the loaded file too.
pub fn parse_path(
    path: &Path,
    parser: &dyn DeclarationParser,
) -> Result<(SourceFile, Vec<Declaration>), SourceError> {
    let file = SourceFile::load(path)?;
    let decls = parser.parse(&file)?;
    Ok((file, decls))
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

fn text(node: Node<'_>, src: &[u8]) -> String {
    node.utf8_text(src).unwrap_or_default().to_string()
}

fn go_declaration(node: Node<'_>, receiver: Option<Receiver>, src: &[u8]) -> Declaration {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, src))
        .unwrap_or_default();
    let param_count = node
        .child_by_field_name("parameters")
        .map_or(0, |p| param_list(p, src).len());
    let results = match node.child_by_field_name("result") {
        None => Vec::new(),
        Some(r) if r.kind() == "parameter_list" => param_list(r, src),
        Some(r) => vec![text(r, src)],
    };
    Declaration::new(name, receiver, param_count, results, node.start_byte()..node.end_byte())
}

/// One entry per declared value, holding its type text. `a, b int` yields
/// two entries; unnamed parameters yield one each.
fn param_list(list: Node<'_>, src: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = list.walk();
    for param in list.named_children(&mut cursor) {
        if !matches!(
            param.kind(),
            "parameter_declaration" | "variadic_parameter_declaration"
        ) {
            continue;
        }
        let ty = param
            .child_by_field_name("type")
            .map(|t| text(t, src))
            .unwrap_or_default();
        let mut names = param.walk();
        let n = param.children_by_field_name("name", &mut names).count().max(1);
        out.extend(std::iter::repeat(ty).take(n));
    }
    out
}

fn go_receiver(list: Node<'_>, src: &[u8]) -> Option<Receiver> {
    let mut cursor = list.walk();
    let param = list
        .named_children(&mut cursor)
        .find(|p| p.kind() == "parameter_declaration")?;
    let ty = param.child_by_field_name("type")?;
    Some(Receiver {
        type_name: text(ty, src),
        is_pointer: ty.kind() == "pointer_type",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Vec<Declaration> {
        GoParser.parse(&SourceFile::new("lint_t.go", src)).unwrap()
    }

    #[test]
    fn test_top_level_functions_and_methods_in_order() {
        let src = r#"package lints

type sanDirName struct{}

func helper(a, b int, c string) (bool, error) {
	f := func() {}
	f()
	return false, nil
}

func (l *sanDirName) Initialize() error {
	return nil
}

func init() {}
"#;
        let decls = parse(src);
        let names: Vec<_> = decls.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["helper", "Initialize", "init"]);

        let helper = &decls[0];
        assert!(!helper.is_method());
        assert_eq!(helper.param_count(), 3);
        assert_eq!(helper.results(), ["bool".to_string(), "error".to_string()]);
        assert!(src[helper.span()].starts_with("func helper("));

        let init = &decls[1];
        let recv = init.receiver().unwrap();
        assert!(recv.is_pointer);
        assert_eq!(recv.type_name, "*sanDirName");
        assert_eq!(init.param_count(), 0);
        assert_eq!(init.results(), ["error".to_string()]);

        assert!(decls[2].results().is_empty());
    }

    #[test]
    fn test_value_receiver_and_variadic() {
        let decls = parse("package p\n\nfunc (l sanDirName) Check(xs ...string) {}\n");
        assert_eq!(decls.len(), 1);
        assert!(!decls[0].receiver().unwrap().is_pointer);
        assert_eq!(decls[0].param_count(), 1);
    }

    #[test]
    fn test_no_declarations() {
        assert!(parse("package lints\n\nvar x = 1\n").is_empty());
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = GoParser
            .parse(&SourceFile::new("lint_bad.go", "package lints\n\nfunc init( {\n"))
            .unwrap_err();
        match err {
            SourceError::Syntax { line, .. } => assert!(line.is_some()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
