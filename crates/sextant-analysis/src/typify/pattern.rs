//! Types of pattern bindings.
//!
//! The type of the outermost pattern comes from its declaration: the
//! annotation or initializer of a `let`, or the annotation of a parameter.
//! It is then narrowed structurally down to the binding. Bindings of `for`,
//! `match` and `if let` are not typed.

use sextant_syntax::common::{
    ancestor_of_kind, children, children_by_field, contains, find_first_child, has_token, is_trivia,
    significant_children,
};
use sextant_syntax::{Node, SyntaxKind};
use sextant_types::Type;

use crate::db::Analysis;
use crate::resolve::member::field_of;
use crate::resolve::path::resolve_path;
use crate::resolve::scope::Namespace;
use crate::resolve::ResolveResult;
use crate::typify::{annotation, resolved_type, typify_operand, typify_type};

pub(super) fn typify_binding<'t>(db: &Analysis<'t>, binding: Node<'t>) -> Type<'t> {
    let mut root = binding;
    while let Some(parent) = root.parent().filter(|p| SyntaxKind::of(*p).is_pattern()) {
        root = parent;
    }
    let Some(owner) = root.parent() else {
        return Type::Unknown;
    };
    let declared = match owner.kind() {
        "let_declaration" => match owner.child_by_field_name("type") {
            Some(ty) => resolved_type(db, typify_type(db, ty)),
            None => owner
                .child_by_field_name("value")
                .map(|value| typify_operand(db, value))
                .unwrap_or(Type::Unknown),
        },
        "parameter" => annotation(db, owner),
        _ => return Type::Unknown,
    };
    narrow(db, root, declared, binding)
}

/// Type of `binding` inside `pattern`, given that `pattern` matches a value of type `ty`.
fn narrow<'t>(db: &Analysis<'t>, pattern: Node<'t>, ty: Type<'t>, binding: Node<'t>) -> Type<'t> {
    if pattern == binding {
        return ty;
    }
    match pattern.kind() {
        "tuple_pattern" => {
            let Type::Tuple(elements) = ty else {
                return Type::Unknown;
            };
            let parts = positional_parts(pattern);
            match positional(&parts, &elements, binding) {
                Some((part, element)) => narrow(db, part, element, binding),
                None => Type::Unknown,
            }
        }
        "tuple_struct_pattern" => {
            let Some(decl) = pattern
                .child_by_field_name("type")
                .and_then(|path| matched_decl(db, path, &ty))
            else {
                return Type::Unknown;
            };
            let fields: Vec<_> = decl
                .child_by_field_name("body")
                .filter(|body| body.kind() == "ordered_field_declaration_list")
                .map(|body| children_by_field(&body, "type"))
                .unwrap_or_default()
                .into_iter()
                .map(|field| resolved_type(db, typify_type(db, field)))
                .collect();
            let path = pattern.child_by_field_name("type");
            let parts: Vec<_> = positional_parts(pattern)
                .into_iter()
                .filter(|part| Some(*part) != path)
                .collect();
            match positional(&parts, &fields, binding) {
                Some((part, field)) => narrow(db, part, field, binding),
                None => Type::Unknown,
            }
        }
        "struct_pattern" => {
            let Some(decl) = pattern
                .child_by_field_name("type")
                .and_then(|path| matched_decl(db, path, &ty))
            else {
                return Type::Unknown;
            };
            let Some(field_pattern) = significant_children(&pattern)
                .into_iter()
                .find(|part| part.kind() == "field_pattern" && contains(part, &binding))
            else {
                return Type::Unknown;
            };
            let field_ty = field_pattern
                .child_by_field_name("name")
                .and_then(|name| field_of(db, decl, db.text(name)))
                .map(|field| annotation(db, field))
                .unwrap_or(Type::Unknown);
            match field_pattern.child_by_field_name("pattern") {
                Some(inner) => narrow(db, inner, field_ty, binding),
                // `S { ref mut x }`
                None if has_token(&field_pattern, "ref") => {
                    let mutable = find_first_child(&field_pattern, "mutable_specifier").is_some();
                    Type::reference(mutable, field_ty)
                }
                None => field_ty,
            }
        }
        "ref_pattern" => {
            let Some(inner) = inner_pattern(pattern) else {
                return Type::Unknown;
            };
            let mutable = inner.kind() == "mut_pattern"
                || find_first_child(&pattern, "mutable_specifier").is_some();
            Type::reference(mutable, narrow(db, inner, ty, binding))
        }
        "reference_pattern" => {
            let Type::Reference { referenced, .. } = ty else {
                return Type::Unknown;
            };
            match inner_pattern(pattern) {
                Some(inner) => narrow(db, inner, *referenced, binding),
                None => Type::Unknown,
            }
        }
        "mut_pattern" => match inner_pattern(pattern) {
            Some(inner) => narrow(db, inner, ty, binding),
            None => Type::Unknown,
        },
        // `x @ pat` binds `x` to the whole value
        "captured_pattern" => match significant_children(&pattern).last() {
            Some(inner) if *inner != binding && contains(inner, &binding) => {
                narrow(db, *inner, ty, binding)
            }
            _ => ty,
        },
        "or_pattern" => match significant_children(&pattern)
            .into_iter()
            .find(|alternative| contains(alternative, &binding))
        {
            Some(alternative) => narrow(db, alternative, ty, binding),
            None => Type::Unknown,
        },
        _ => Type::Unknown,
    }
}

/// The sub-pattern of `parts` containing `binding`, paired with the type it
/// matches. A `..` in `parts` absorbs the elements it skips. Without one the
/// pattern must have exactly as many parts as there are types.
fn positional<'t>(parts: &[Node<'t>], types: &[Type<'t>], binding: Node<'t>) -> Option<(Node<'t>, Type<'t>)> {
    let index = parts.iter().position(|part| contains(part, &binding))?;
    let rest = parts
        .iter()
        .position(|part| part.kind() == "remaining_field_pattern");
    let fits = match rest {
        Some(_) => parts.len() - 1 <= types.len(),
        None => parts.len() == types.len(),
    };
    if !fits {
        return None;
    }
    let element = match rest {
        Some(rest) if index > rest => types.len().checked_sub(parts.len() - index)?,
        _ => index,
    };
    let ty = types.get(element).cloned()?;
    Some((parts[index], ty))
}

/// The struct or enum variant a pattern path names, provided values of `ty`
/// can match it.
fn matched_decl<'t>(db: &Analysis<'t>, path: Node<'t>, ty: &Type<'t>) -> Option<Node<'t>> {
    let ResolveResult::Resolved(decl) = resolve_path(db, path, Namespace::Types) else {
        return None;
    };
    match ty {
        Type::Struct(expected) if *expected == decl => Some(decl),
        Type::Enum(expected) if decl.kind() == "enum_variant" => {
            (ancestor_of_kind(&decl, "enum_item") == Some(*expected)).then_some(decl)
        }
        _ => None,
    }
}

/// Sub-patterns in order, including the unnamed `_`.
fn positional_parts(pattern: Node) -> Vec<Node> {
    children(&pattern)
        .into_iter()
        .filter(|child| (child.is_named() && !is_trivia(child)) || child.kind() == "_")
        .collect()
}

fn inner_pattern(pattern: Node) -> Option<Node> {
    significant_children(&pattern)
        .into_iter()
        .find(|child| child.kind() != "mutable_specifier")
}
