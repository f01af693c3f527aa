//! Typification: the type of an expression, item, binding or raw type.
//!
//! Dispatch is by [`SyntaxKind`]. Expressions go through a
//! [`ComputingVisitor`] so that a kind nobody handles is reported instead of
//! silently typed; items and raw types fall back to `Unknown`.
//!
//! [`ComputingVisitor`]: sextant_syntax::ComputingVisitor

mod expr;
mod item;
mod pattern;
mod ty;

use sextant_syntax::common::{ancestor_of_kind, ancestor_where, contains};
use sextant_syntax::{ComputingVisitor, Node, SyntaxKind};
use sextant_types::{Type, UnresolvedType};

use crate::db::Analysis;
use crate::error::AnalysisError;

pub use ty::resolved_type;

/// Type of an expression node.
///
/// # Panics
///
/// If `expr` is not an expression. Use [`try_typify_expr`] to get the defect
/// as an error instead.
pub fn typify_expr<'t>(db: &Analysis<'t>, expr: Node<'t>) -> Type<'t> {
    log::trace!("typify_expr {} at {}", expr.kind(), db.tree().range(expr));
    expr::ExprTypifier::new(db).compute(db.tree(), expr)
}

pub fn try_typify_expr<'t>(db: &Analysis<'t>, expr: Node<'t>) -> Result<Type<'t>, AnalysisError> {
    log::trace!("try_typify_expr {} at {}", expr.kind(), db.tree().range(expr));
    Ok(expr::ExprTypifier::new(db).try_compute(db.tree(), expr)?)
}

/// Type of an item declaration. Items with no type of their own are `Unknown`.
pub fn typify_item<'t>(db: &Analysis<'t>, item: Node<'t>) -> Type<'t> {
    log::trace!("typify_item {} at {}", item.kind(), db.tree().range(item));
    db.guarded(item, || item::typify_item(db, item))
}

/// Read raw type syntax without resolving any name in it.
pub fn typify_type<'t>(db: &Analysis<'t>, ty: Node<'t>) -> UnresolvedType<'t> {
    log::trace!("typify_type {} at {}", ty.kind(), db.tree().range(ty));
    ty::typify_type(ty, db.tree().source())
}

/// Type of anything a reference can resolve to: items, `self`, bindings,
/// fields and enum variants. Everything else is `Unknown`.
pub fn typify<'t>(db: &Analysis<'t>, named: Node<'t>) -> Type<'t> {
    log::trace!("typify {} at {}", named.kind(), db.tree().range(named));
    let kind = SyntaxKind::of(named);
    match kind {
        _ if kind.is_item() => typify_item(db, named),
        SyntaxKind::SelfParameter => self_type(db, named),
        SyntaxKind::PatBinding => pattern::typify_binding(db, named),
        SyntaxKind::FieldDecl => annotation(db, named),
        SyntaxKind::EnumVariant => match ancestor_of_kind(&named, "enum_item") {
            Some(decl) => Type::Enum(decl),
            None => Type::Unknown,
        },
        _ if kind.is_type() && is_positional_field(named) => resolved_type(db, typify_type(db, named)),
        _ => Type::Unknown,
    }
}

/// The resolved `type` annotation of a declaration, or `Unknown`.
pub(crate) fn annotation<'t>(db: &Analysis<'t>, decl: Node<'t>) -> Type<'t> {
    match decl.child_by_field_name("type") {
        Some(ty) => resolved_type(db, typify_type(db, ty)),
        None => Type::Unknown,
    }
}

/// Target type of the impl enclosing `node`. `Self` written inside that
/// target (`impl Self {}`) has no type.
pub(crate) fn self_type<'t>(db: &Analysis<'t>, node: Node<'t>) -> Type<'t> {
    ancestor_where(&node, |n| n.kind() == "impl_item" || n.kind() == "trait_item")
        .filter(|owner| owner.kind() == "impl_item")
        .and_then(|imp| imp.child_by_field_name("type"))
        .filter(|target| !contains(target, &node))
        .map(|target| resolved_type(db, typify_type(db, target)))
        .unwrap_or(Type::Unknown)
}

/// Type of a sub-expression of the code being analysed. Error recovery can
/// leave `ERROR` or `MISSING` nodes where an expression belongs; those are
/// `Unknown` rather than a defect.
pub(crate) fn typify_operand<'t>(db: &Analysis<'t>, operand: Node<'t>) -> Type<'t> {
    if operand.is_error() || operand.is_missing() || !SyntaxKind::of(operand).is_expr() {
        return Type::Unknown;
    }
    typify_expr(db, operand)
}

fn is_positional_field(node: Node) -> bool {
    node.parent()
        .is_some_and(|p| p.kind() == "ordered_field_declaration_list")
}
