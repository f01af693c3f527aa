//! Lookup of bare names in enclosing scopes.

use sextant_syntax::common::{children_by_field, contains, named_children};
use sextant_syntax::{Node, SyntaxKind, SyntaxTree};

/// The two namespaces a name can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Functions, constants, statics, bindings, unit and tuple structs
    Values,
    /// Structs, enums, unions, traits, type aliases, modules
    Types,
}

/// Resolves a bare name at a position to the declarations it may denote.
///
/// Implementations return the candidates of the nearest scope that declares
/// the name at all; more than one candidate means the name is ambiguous there.
pub trait NameLookup {
    fn lookup<'t>(
        &self,
        tree: &'t SyntaxTree,
        position: Node<'t>,
        name: &str,
        namespace: Namespace,
    ) -> Vec<Node<'t>>;
}

/// File-local lexical scoping.
///
/// Walks outwards from the position through closures, functions, loop and
/// match bodies, blocks and modules. Never crosses a `mod` boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalScopes;

impl NameLookup for LexicalScopes {
    fn lookup<'t>(
        &self,
        tree: &'t SyntaxTree,
        position: Node<'t>,
        name: &str,
        namespace: Namespace,
    ) -> Vec<Node<'t>> {
        let mut current = position.parent();
        while let Some(scope) = current {
            let found = match namespace {
                Namespace::Values => value_candidates(tree, scope, position, name),
                Namespace::Types => Vec::new(),
            };
            let found = if found.is_empty() {
                item_candidates(tree, scope, name, namespace)
            } else {
                found
            };
            if !found.is_empty() {
                return found;
            }
            if scope.kind() == "mod_item" {
                break;
            }
            current = scope.parent();
        }
        Vec::new()
    }
}

/// Bindings introduced by `scope` that are visible at `position`.
fn value_candidates<'t>(tree: &'t SyntaxTree, scope: Node<'t>, position: Node<'t>, name: &str) -> Vec<Node<'t>> {
    let named = |bindings: Vec<Node<'t>>| -> Vec<Node<'t>> {
        bindings
            .into_iter()
            .filter(|b| tree.text(*b) == name)
            .collect()
    };
    match scope.kind() {
        "block" | "source_file" => {
            // Latest preceding `let` wins; later ones are not yet in scope.
            let lets = named_children(&scope)
                .into_iter()
                .filter(|s| s.kind() == "let_declaration" && s.end_byte() <= position.start_byte());
            let mut latest = None;
            for decl in lets {
                if let Some(pattern) = decl.child_by_field_name("pattern") {
                    if let Some(last) = named(bindings_in(pattern)).pop() {
                        latest = Some(last);
                    }
                }
            }
            latest.into_iter().collect()
        }
        "function_item" => {
            let Some(params) = scope.child_by_field_name("parameters") else {
                return Vec::new();
            };
            if name == "self" {
                return named_children(&params)
                    .into_iter()
                    .filter(|p| p.kind() == "self_parameter")
                    .collect();
            }
            named(parameter_bindings(params))
        }
        "closure_expression" => match scope.child_by_field_name("parameters") {
            Some(params) => named(parameter_bindings(params)),
            None => Vec::new(),
        },
        "for_expression" => {
            let in_body = scope
                .child_by_field_name("body")
                .is_some_and(|body| contains(&body, &position));
            match scope.child_by_field_name("pattern") {
                Some(pattern) if in_body => named(bindings_in(pattern)),
                _ => Vec::new(),
            }
        }
        "match_arm" => {
            let in_pattern = scope
                .child_by_field_name("pattern")
                .and_then(|p| p.named_child(0))
                .is_some_and(|p| contains(&p, &position));
            match scope.child_by_field_name("pattern") {
                Some(pattern) if !in_pattern => named(bindings_in(pattern)),
                _ => Vec::new(),
            }
        }
        "if_expression" | "while_expression" => {
            let body_field = if scope.kind() == "if_expression" { "consequence" } else { "body" };
            let in_body = scope
                .child_by_field_name(body_field)
                .is_some_and(|body| contains(&body, &position));
            if !in_body {
                return Vec::new();
            }
            let Some(condition) = scope.child_by_field_name("condition") else {
                return Vec::new();
            };
            let conditions = if condition.kind() == "let_condition" {
                vec![condition]
            } else {
                named_children(&condition)
                    .into_iter()
                    .filter(|c| c.kind() == "let_condition")
                    .collect()
            };
            conditions
                .into_iter()
                .filter_map(|c| c.child_by_field_name("pattern"))
                .flat_map(|p| named(bindings_in(p)))
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Items declared directly in `scope` under `name`.
fn item_candidates<'t>(tree: &'t SyntaxTree, scope: Node<'t>, name: &str, namespace: Namespace) -> Vec<Node<'t>> {
    let body = match scope.kind() {
        "block" | "source_file" => scope,
        "mod_item" => match scope.child_by_field_name("body") {
            Some(body) => body,
            None => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    items_named(tree, body, name, namespace)
}

/// Items among the children of a block, file or `declaration_list`.
pub(crate) fn items_named<'t>(tree: &'t SyntaxTree, body: Node<'t>, name: &str, namespace: Namespace) -> Vec<Node<'t>> {
    named_children(&body)
        .into_iter()
        .filter(|item| declares(*item, namespace))
        .filter(|item| {
            item.child_by_field_name("name")
                .is_some_and(|n| tree.text(n) == name)
        })
        .collect()
}

/// Whether `item` introduces a name in `namespace`.
pub(crate) fn declares(item: Node, namespace: Namespace) -> bool {
    match (item.kind(), namespace) {
        ("function_item" | "function_signature_item" | "const_item" | "static_item", Namespace::Values) => true,
        ("struct_item", Namespace::Values) => item
            .child_by_field_name("body")
            .map_or(true, |body| body.kind() == "ordered_field_declaration_list"),
        (
            "struct_item" | "enum_item" | "union_item" | "trait_item" | "type_item" | "mod_item"
            | "associated_type",
            Namespace::Types,
        ) => true,
        _ => false,
    }
}

/// Bindings of the parameters of a function or closure.
fn parameter_bindings(params: Node) -> Vec<Node> {
    named_children(&params)
        .into_iter()
        .flat_map(|param| match param.kind() {
            "parameter" => children_by_field(&param, "pattern")
                .into_iter()
                .flat_map(bindings_in)
                .collect::<Vec<_>>(),
            "self_parameter" => Vec::new(),
            _ => bindings_in(param),
        })
        .collect()
}

/// Every binding introduced by `pattern`, in document order.
pub(crate) fn bindings_in(pattern: Node) -> Vec<Node> {
    let mut bindings = Vec::new();
    collect_bindings(pattern, &mut bindings);
    bindings
}

fn collect_bindings<'t>(node: Node<'t>, bindings: &mut Vec<Node<'t>>) {
    let kind = SyntaxKind::of(node);
    if kind == SyntaxKind::PatBinding {
        bindings.push(node);
        return;
    }
    if kind.is_pattern() || node.kind() == "match_pattern" {
        for child in named_children(&node) {
            collect_bindings(child, bindings);
        }
    }
}
