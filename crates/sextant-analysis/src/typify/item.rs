use sextant_syntax::common::named_children;
use sextant_syntax::{accept, Node, Visitor};
use sextant_types::Type;

use crate::db::Analysis;
use crate::typify::{annotation, resolved_type, typify_type};

struct ItemTypifier<'a, 't> {
    db: &'a Analysis<'t>,
    inferred: Type<'t>,
}

impl<'t> Visitor<'t> for ItemTypifier<'_, 't> {
    fn visit_element(&mut self, _node: Node<'t>) {
        self.inferred = Type::Unknown;
    }

    fn visit_struct_item(&mut self, node: Node<'t>) {
        self.inferred = Type::Struct(node);
    }

    fn visit_enum_item(&mut self, node: Node<'t>) {
        self.inferred = Type::Enum(node);
    }

    fn visit_fn_item(&mut self, node: Node<'t>) {
        let db = self.db;
        let params = node
            .child_by_field_name("parameters")
            .map(|params| {
                named_children(&params)
                    .into_iter()
                    .filter(|p| p.kind() == "parameter")
                    .map(|p| annotation(db, p))
                    .collect()
            })
            .unwrap_or_default();
        let ret = match node.child_by_field_name("return_type") {
            Some(ret) => resolved_type(db, typify_type(db, ret)),
            None => Type::Unit,
        };
        self.inferred = Type::function(params, ret);
    }

    fn visit_type_alias(&mut self, node: Node<'t>) {
        self.inferred = annotation(self.db, node);
    }

    fn visit_const_item(&mut self, node: Node<'t>) {
        self.inferred = annotation(self.db, node);
    }
}

pub(super) fn typify_item<'t>(db: &Analysis<'t>, item: Node<'t>) -> Type<'t> {
    let mut visitor = ItemTypifier {
        db,
        inferred: Type::Unknown,
    };
    accept(item, &mut visitor);
    visitor.inferred
}
