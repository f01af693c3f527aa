use sextant_syntax::common::{find_first_child, significant_children};
use sextant_syntax::{accept, Node, Visitor};
use sextant_types::{PrimitiveType, Type, UnresolvedType};

use crate::db::Analysis;
use crate::resolve::{ResolveResult, ResolveReference, TypePathReference};
use crate::typify::{self_type, typify_item, typify_type as typify_raw};

/// Reads raw type syntax. Anything it does not model stays `Unknown`.
struct TypeTypifier<'s, 't> {
    source: &'s str,
    inferred: UnresolvedType<'t>,
}

impl<'t> Visitor<'t> for TypeTypifier<'_, 't> {
    fn visit_element(&mut self, _node: Node<'t>) {
        self.inferred = UnresolvedType::Unknown;
    }

    fn visit_type(&mut self, _node: Node<'t>) {
        self.inferred = UnresolvedType::Unknown;
    }

    fn visit_path_type(&mut self, node: Node<'t>) {
        self.inferred = UnresolvedType::Path(node);
    }

    fn visit_tuple_type(&mut self, node: Node<'t>) {
        self.inferred = UnresolvedType::Tuple(significant_children(&node));
    }

    fn visit_unit_type(&mut self, _node: Node<'t>) {
        self.inferred = UnresolvedType::Unit;
    }

    fn visit_primitive_type(&mut self, node: Node<'t>) {
        let name = node.utf8_text(self.source.as_bytes()).unwrap_or("");
        self.inferred = PrimitiveType::from_name(name)
            .map(UnresolvedType::Primitive)
            .unwrap_or(UnresolvedType::Unknown);
    }

    fn visit_ref_type(&mut self, node: Node<'t>) {
        self.inferred = match node.child_by_field_name("type") {
            Some(referenced) => UnresolvedType::Reference {
                mutable: find_first_child(&node, "mutable_specifier").is_some(),
                referenced,
            },
            None => UnresolvedType::Unknown,
        };
    }
}

pub(super) fn typify_type<'t>(ty: Node<'t>, source: &str) -> UnresolvedType<'t> {
    let mut visitor = TypeTypifier {
        source,
        inferred: UnresolvedType::Unknown,
    };
    accept(ty, &mut visitor);
    visitor.inferred
}

/// Resolve the names in an unresolved type.
pub fn resolved_type<'t>(db: &Analysis<'t>, unresolved: UnresolvedType<'t>) -> Type<'t> {
    match unresolved {
        UnresolvedType::Unknown => Type::Unknown,
        UnresolvedType::Unit => Type::Unit,
        UnresolvedType::Primitive(primitive) => Type::Primitive(primitive),
        UnresolvedType::Tuple(elements) => Type::Tuple(
            elements
                .into_iter()
                .map(|element| resolved_type(db, typify_raw(db, element)))
                .collect(),
        ),
        UnresolvedType::Reference { mutable, referenced } => {
            Type::reference(mutable, resolved_type(db, typify_raw(db, referenced)))
        }
        UnresolvedType::Path(path) => resolved_path_type(db, path),
    }
}

fn resolved_path_type<'t>(db: &Analysis<'t>, path: Node<'t>) -> Type<'t> {
    if db.text(path) == "Self" {
        return self_type(db, path);
    }
    match TypePathReference::new(path).resolve_verbose(db) {
        ResolveResult::Resolved(decl) => match decl.kind() {
            "struct_item" => Type::Struct(decl),
            "enum_item" => Type::Enum(decl),
            "type_item" => typify_item(db, decl),
            _ => Type::Unknown,
        },
        _ => Type::Unknown,
    }
}
