//! Members of declarations: module items, enum variants, associated items,
//! struct fields and methods.

use sextant_syntax::common::{children_by_field, named_children};
use sextant_syntax::Node;
use sextant_types::Type;

use crate::db::Analysis;
use crate::resolve::path::resolve_path;
use crate::resolve::scope::{items_named, Namespace};
use crate::resolve::{ResolveReference, ResolveResult};
use crate::typify;

/// `recv.field` and `recv.0`; anchored at the field name.
#[derive(Debug, Clone)]
pub struct FieldReference<'t> {
    element: Node<'t>,
    anchor: Node<'t>,
}

impl<'t> FieldReference<'t> {
    pub fn new(element: Node<'t>) -> Option<Self> {
        let anchor = element.child_by_field_name("field")?;
        Some(Self { element, anchor })
    }
}

impl<'t> ResolveReference<'t> for FieldReference<'t> {
    fn element(&self) -> Node<'t> {
        self.element
    }

    fn anchor(&self) -> Node<'t> {
        self.anchor
    }

    fn resolve_verbose(&self, db: &Analysis<'t>) -> ResolveResult<'t> {
        let Some(receiver) = self.element.child_by_field_name("value") else {
            return ResolveResult::Unresolved;
        };
        let receiver_ty = typify::typify_operand(db, receiver);
        match field_on(db, &receiver_ty, db.text(self.anchor)) {
            Some(field) => ResolveResult::Resolved(field),
            None => ResolveResult::Unresolved,
        }
    }
}

/// Field `name` of a receiver of type `receiver_ty`, looking through `&`.
pub(crate) fn field_on<'t>(db: &Analysis<'t>, receiver_ty: &Type<'t>, name: &str) -> Option<Node<'t>> {
    match receiver_ty.auto_deref() {
        Type::Struct(decl) => field_of(db, *decl, name),
        _ => None,
    }
}

/// `recv.method(..)`. The element is the callee `recv.method` and the
/// anchor its method name.
#[derive(Debug, Clone)]
pub struct MethodCallReference<'t> {
    element: Node<'t>,
    anchor: Node<'t>,
}

impl<'t> MethodCallReference<'t> {
    /// The reference of the method call expression `call`.
    pub fn new(call: Node<'t>) -> Option<Self> {
        let element = call
            .child_by_field_name("function")
            .filter(|callee| callee.kind() == "field_expression")?;
        let anchor = element.child_by_field_name("field")?;
        Some(Self { element, anchor })
    }
}

impl<'t> ResolveReference<'t> for MethodCallReference<'t> {
    fn element(&self) -> Node<'t> {
        self.element
    }

    fn anchor(&self) -> Node<'t> {
        self.anchor
    }

    fn resolve_verbose(&self, db: &Analysis<'t>) -> ResolveResult<'t> {
        let Some(receiver) = self.element.child_by_field_name("value") else {
            return ResolveResult::Unresolved;
        };
        let receiver_ty = typify::typify_operand(db, receiver);
        let Some(decl) = receiver_ty.auto_deref().nominal_decl() else {
            return ResolveResult::Unresolved;
        };
        ResolveResult::from_candidates(methods_named(db, decl, db.text(self.anchor)))
    }
}

/// Members of `container` named `name`, for the last segment of a qualified path.
pub(crate) fn members<'t>(db: &Analysis<'t>, container: Node<'t>, name: &str, namespace: Namespace) -> Vec<Node<'t>> {
    let tree = db.tree();
    match container.kind() {
        "source_file" => items_named(tree, container, name, namespace),
        "mod_item" => match container.child_by_field_name("body") {
            Some(body) => items_named(tree, body, name, namespace),
            None => Vec::new(),
        },
        "trait_item" => match container.child_by_field_name("body") {
            Some(body) => items_named(tree, body, name, namespace),
            None => Vec::new(),
        },
        "enum_item" | "struct_item" | "union_item" => {
            let variants: Vec<_> = if container.kind() == "enum_item" {
                container
                    .child_by_field_name("body")
                    .map(|body| named_children(&body))
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|v| v.kind() == "enum_variant")
                    .filter(|v| v.child_by_field_name("name").is_some_and(|n| db.text(n) == name))
                    .collect()
            } else {
                Vec::new()
            };
            if !variants.is_empty() {
                return variants;
            }
            associated_items(db, container, name, namespace)
        }
        _ => Vec::new(),
    }
}

/// Associated items named `name` in the impls of `decl`: inherent impls first,
/// then trait impls together with the defaults their traits declare.
fn associated_items<'t>(db: &Analysis<'t>, decl: Node<'t>, name: &str, namespace: Namespace) -> Vec<Node<'t>> {
    let impls = impls_for(db, decl);
    let (inherent, traits): (Vec<_>, Vec<_>) = impls
        .into_iter()
        .partition(|imp| imp.child_by_field_name("trait").is_none());

    let in_impl = |imp: Node<'t>| -> Vec<Node<'t>> {
        match imp.child_by_field_name("body") {
            Some(body) => items_named(db.tree(), body, name, namespace),
            None => Vec::new(),
        }
    };

    let found: Vec<_> = inherent.into_iter().flat_map(&in_impl).collect();
    if !found.is_empty() || !db.config().trait_methods {
        return found;
    }

    traits
        .into_iter()
        .flat_map(|imp| {
            let own = in_impl(imp);
            if !own.is_empty() {
                return own;
            }
            trait_of(db, imp)
                .map(|tr| members(db, tr, name, namespace))
                .unwrap_or_default()
        })
        .collect()
}

/// Methods callable as `recv.name(..)` on a value of nominal type `decl`.
pub(crate) fn methods_named<'t>(db: &Analysis<'t>, decl: Node<'t>, name: &str) -> Vec<Node<'t>> {
    associated_items(db, decl, name, Namespace::Values)
        .into_iter()
        .filter(|item| matches!(item.kind(), "function_item" | "function_signature_item"))
        .collect()
}

/// Every impl block in the file whose target type is `decl`.
pub(crate) fn impls_for<'t>(db: &Analysis<'t>, decl: Node<'t>) -> Vec<Node<'t>> {
    db.collecting_impls(decl, || {
        let mut impls = Vec::new();
        let mut stack = vec![db.tree().root()];
        while let Some(node) = stack.pop() {
            if node.kind() == "impl_item" {
                if impl_target(db, node).nominal_decl() == Some(decl) {
                    impls.push(node);
                }
                continue;
            }
            stack.extend(named_children(&node).into_iter().rev());
        }
        impls
    })
}

/// Resolved target type of an impl block, keyed on the impl in the cycle guard.
fn impl_target<'t>(db: &Analysis<'t>, imp: Node<'t>) -> Type<'t> {
    db.guarded(imp, || match imp.child_by_field_name("type") {
        Some(ty) => typify::resolved_type(db, typify::typify_type(db, ty)),
        None => Type::Unknown,
    })
}

/// The trait declaration a trait impl implements.
fn trait_of<'t>(db: &Analysis<'t>, imp: Node<'t>) -> Option<Node<'t>> {
    let path = imp.child_by_field_name("trait")?;
    match resolve_path(db, path, Namespace::Types) {
        ResolveResult::Resolved(tr) if tr.kind() == "trait_item" => Some(tr),
        _ => None,
    }
}

/// Field declaration of struct `decl` named `name`. For a tuple struct the
/// name is a position and the result is that field's type node.
pub(crate) fn field_of<'t>(db: &Analysis<'t>, decl: Node<'t>, name: &str) -> Option<Node<'t>> {
    let body = decl.child_by_field_name("body")?;
    match body.kind() {
        "field_declaration_list" => named_children(&body)
            .into_iter()
            .filter(|f| f.kind() == "field_declaration")
            .find(|f| f.child_by_field_name("name").is_some_and(|n| db.text(n) == name)),
        "ordered_field_declaration_list" => {
            let index: usize = name.parse().ok()?;
            children_by_field(&body, "type").into_iter().nth(index)
        }
        _ => None,
    }
}
