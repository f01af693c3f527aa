//! Paths in expression and type position, and struct literal paths.

use sextant_syntax::common::ancestor_where;
use sextant_syntax::Node;

use crate::db::Analysis;
use crate::resolve::member::members;
use crate::resolve::scope::Namespace;
use crate::resolve::{ResolveReference, ResolveResult};
use crate::typify;

/// `x`, `self`, `a::b::c` in expression position; resolves in the value namespace.
#[derive(Debug, Clone)]
pub struct PathReference<'t> {
    element: Node<'t>,
    anchor: Node<'t>,
}

impl<'t> PathReference<'t> {
    pub fn new(element: Node<'t>) -> Self {
        Self::anchored(element, last_segment(element))
    }

    /// A path reference with an explicitly chosen anchor.
    pub fn anchored(element: Node<'t>, anchor: Node<'t>) -> Self {
        Self { element, anchor }
    }
}

impl<'t> ResolveReference<'t> for PathReference<'t> {
    fn element(&self) -> Node<'t> {
        self.element
    }

    fn anchor(&self) -> Node<'t> {
        self.anchor
    }

    fn resolve_verbose(&self, db: &Analysis<'t>) -> ResolveResult<'t> {
        resolve_path(db, self.element, Namespace::Values)
    }
}

/// `S`, `m::S`, `Self`, `Vec<T>` in type position; resolves in the type namespace.
#[derive(Debug, Clone)]
pub struct TypePathReference<'t> {
    element: Node<'t>,
    anchor: Node<'t>,
}

impl<'t> TypePathReference<'t> {
    pub fn new(element: Node<'t>) -> Self {
        Self {
            element,
            anchor: last_segment(element),
        }
    }
}

impl<'t> ResolveReference<'t> for TypePathReference<'t> {
    fn element(&self) -> Node<'t> {
        self.element
    }

    fn anchor(&self) -> Node<'t> {
        self.anchor
    }

    fn resolve_verbose(&self, db: &Analysis<'t>) -> ResolveResult<'t> {
        resolve_path(db, self.element, Namespace::Types)
    }
}

/// The path of `S { .. }`, anchored at that path.
#[derive(Debug, Clone)]
pub struct StructLiteralReference<'t> {
    element: Node<'t>,
    anchor: Node<'t>,
}

impl<'t> StructLiteralReference<'t> {
    pub fn new(element: Node<'t>) -> Option<Self> {
        let anchor = element.child_by_field_name("name")?;
        Some(Self { element, anchor })
    }
}

impl<'t> ResolveReference<'t> for StructLiteralReference<'t> {
    fn element(&self) -> Node<'t> {
        self.element
    }

    fn anchor(&self) -> Node<'t> {
        self.anchor
    }

    fn resolve_verbose(&self, db: &Analysis<'t>) -> ResolveResult<'t> {
        resolve_path(db, self.anchor, Namespace::Types)
    }
}

/// The direct child naming the target: `c` of `a::b::c`, `Vec` of `Vec<T>`,
/// or the node itself for a single identifier.
fn last_segment(element: Node) -> Node {
    match element.kind() {
        "scoped_identifier" | "scoped_type_identifier" => element.child_by_field_name("name"),
        "generic_type" | "generic_type_with_turbofish" => element.child_by_field_name("type"),
        _ => None,
    }
    .unwrap_or(element)
}

/// Resolve any path node in `namespace`.
pub(crate) fn resolve_path<'t>(db: &Analysis<'t>, path: Node<'t>, namespace: Namespace) -> ResolveResult<'t> {
    match path.kind() {
        "generic_type" | "generic_type_with_turbofish" => match path.child_by_field_name("type") {
            Some(inner) => resolve_path(db, inner, namespace),
            None => ResolveResult::Unresolved,
        },
        "scoped_identifier" | "scoped_type_identifier" => {
            let Some(name) = path.child_by_field_name("name") else {
                return ResolveResult::Unresolved;
            };
            let prefix = match path.child_by_field_name("path") {
                Some(prefix) => resolve_prefix(db, prefix),
                // `::name` starts at the crate root
                None => Some(db.tree().root()),
            };
            let Some(container) = prefix else {
                return ResolveResult::Unresolved;
            };
            match ResolveResult::from_candidates(members(db, container, db.text(name), namespace)) {
                ResolveResult::Unresolved => ResolveResult::Partial(container),
                result => result,
            }
        }
        "self" if namespace == Namespace::Values => {
            ResolveResult::from_candidates(db.lookup(path, "self", namespace))
        }
        "identifier" | "type_identifier" if db.text(path) == "Self" => match self_decl(db, path) {
            Some(decl) => ResolveResult::Resolved(decl),
            None => ResolveResult::Unresolved,
        },
        "identifier" | "type_identifier" => {
            ResolveResult::from_candidates(db.lookup(path, db.text(path), namespace))
        }
        _ => ResolveResult::Unresolved,
    }
}

/// Resolve the prefix of a qualified path to the declaration whose members
/// the next segment names: a module, the file root, a type or a trait.
pub(crate) fn resolve_prefix<'t>(db: &Analysis<'t>, prefix: Node<'t>) -> Option<Node<'t>> {
    match prefix.kind() {
        "crate" => Some(db.tree().root()),
        "self" => Some(enclosing_module(prefix)),
        "super" => {
            let module = enclosing_module(prefix);
            if module.kind() == "source_file" {
                return None;
            }
            Some(enclosing_module(module))
        }
        _ => match resolve_path(db, prefix, Namespace::Types) {
            ResolveResult::Resolved(decl) if decl.kind() == "type_item" => {
                typify::typify_item(db, decl).nominal_decl()
            }
            ResolveResult::Resolved(decl) => Some(decl),
            _ => None,
        },
    }
}

/// Innermost `mod` item (or the file root) containing `node`.
pub(crate) fn enclosing_module(node: Node) -> Node {
    let mut current = node;
    while let Some(parent) = current.parent() {
        if parent.kind() == "mod_item" || parent.kind() == "source_file" {
            return parent;
        }
        current = parent;
    }
    current
}

/// Declaration that `Self` denotes at `node`: the nominal target of the
/// enclosing impl, or the enclosing trait.
pub(crate) fn self_decl<'t>(db: &Analysis<'t>, node: Node<'t>) -> Option<Node<'t>> {
    let owner = ancestor_where(&node, |n| n.kind() == "impl_item" || n.kind() == "trait_item")?;
    if owner.kind() == "trait_item" {
        return Some(owner);
    }
    typify::self_type(db, node).nominal_decl()
}
