use sextant_syntax::common::{ancestor_of_kind, find_first_child, significant_children};
use sextant_syntax::{ComputingVisitor, Node, SyntaxKind, Visitor};
use sextant_types::{PrimitiveType, Type};

use crate::db::Analysis;
use crate::resolve::member::field_on;
use crate::resolve::{
    MethodCallReference, PathReference, Reference, ReferenceKind, StructLiteralReference,
};
use crate::typify::{resolved_type, typify, typify_operand, typify_type};

pub(super) struct ExprTypifier<'a, 't> {
    db: &'a Analysis<'t>,
    result: Option<Type<'t>>,
}

impl<'a, 't> ExprTypifier<'a, 't> {
    pub(super) fn new(db: &'a Analysis<'t>) -> Self {
        Self { db, result: None }
    }

    fn reference(&self, kind: ReferenceKind<'t>) -> Reference<'a, 't> {
        Reference::new(self.db, kind)
    }
}

impl<'t> ComputingVisitor<'t> for ExprTypifier<'_, 't> {
    type Output = Type<'t>;

    fn result_slot(&mut self) -> &mut Option<Type<'t>> {
        &mut self.result
    }
}

impl<'t> Visitor<'t> for ExprTypifier<'_, 't> {
    // Only expressions produce a result; anything else is reported by `compute`.
    fn visit_element(&mut self, _node: Node<'t>) {}

    fn visit_expr(&mut self, _node: Node<'t>) {
        self.go(Type::Unknown);
    }

    fn visit_path_expr(&mut self, node: Node<'t>) {
        let decl = self.reference(ReferenceKind::Path(PathReference::new(node))).resolve();
        let ty = match decl {
            Some(decl) => typify(self.db, decl),
            None => Type::Unknown,
        };
        self.go(ty);
    }

    fn visit_struct_expr(&mut self, node: Node<'t>) {
        let decl = StructLiteralReference::new(node)
            .and_then(|r| self.reference(ReferenceKind::StructLiteral(r)).resolve());
        let ty = match decl {
            Some(decl) if decl.kind() == "struct_item" => Type::Struct(decl),
            Some(decl) if decl.kind() == "enum_variant" => ancestor_of_kind(&decl, "enum_item")
                .map(Type::Enum)
                .unwrap_or(Type::Unknown),
            _ => Type::Unknown,
        };
        self.go(ty);
    }

    fn visit_tuple_expr(&mut self, node: Node<'t>) {
        let db = self.db;
        let elements = significant_children(&node)
            .into_iter()
            .map(|element| typify_operand(db, element))
            .collect();
        self.go(Type::Tuple(elements));
    }

    fn visit_unit_expr(&mut self, _node: Node<'t>) {
        self.go(Type::Unit);
    }

    fn visit_call_expr(&mut self, node: Node<'t>) {
        let callee = node
            .child_by_field_name("function")
            .map(|callee| typify_operand(self.db, callee));
        let ty = match callee {
            Some(Type::Function(_, ret)) => *ret,
            _ => Type::Unknown,
        };
        self.go(ty);
    }

    fn visit_method_call_expr(&mut self, node: Node<'t>) {
        let method = MethodCallReference::new(node)
            .and_then(|r| self.reference(ReferenceKind::MethodCall(r)).resolve());
        let ret = method.and_then(|m| m.child_by_field_name("return_type"));
        let ty = match ret {
            Some(ret) => resolved_type(self.db, typify_type(self.db, ret)),
            None => Type::Unknown,
        };
        self.go(ty);
    }

    fn visit_field_expr(&mut self, node: Node<'t>) {
        let db = self.db;
        let (Some(receiver), Some(field)) = (
            node.child_by_field_name("value"),
            node.child_by_field_name("field"),
        ) else {
            self.go(Type::Unknown);
            return;
        };

        // The receiver is typed once; the field is looked up on that type.
        let receiver_ty = typify_operand(db, receiver);
        let name = db.text(field);
        let ty = match receiver_ty.auto_deref() {
            Type::Tuple(elements) if field.kind() == "integer_literal" => name
                .parse::<usize>()
                .ok()
                .and_then(|i| elements.get(i).cloned())
                .unwrap_or(Type::Unknown),
            _ => match field_on(db, &receiver_ty, name) {
                Some(decl) => typify(db, decl),
                None => {
                    log::debug!("field `{name}` at {} does not resolve", db.tree().describe(node));
                    Type::Unknown
                }
            },
        };
        self.go(ty);
    }

    fn visit_paren_expr(&mut self, node: Node<'t>) {
        let ty = match significant_children(&node).first() {
            Some(inner) => typify_operand(self.db, *inner),
            None => Type::Unknown,
        };
        self.go(ty);
    }

    fn visit_literal_expr(&mut self, node: Node<'t>) {
        let ty = literal_type(self.db, node);
        self.go(ty);
    }

    fn visit_ref_expr(&mut self, node: Node<'t>) {
        let mutable = find_first_child(&node, "mutable_specifier").is_some();
        let inner = match node.child_by_field_name("value") {
            Some(value) => typify_operand(self.db, value),
            None => Type::Unknown,
        };
        self.go(Type::reference(mutable, inner));
    }

    fn visit_block_expr(&mut self, node: Node<'t>) {
        let ty = match significant_children(&node).last() {
            Some(tail) if SyntaxKind::of(*tail).is_expr() => typify_operand(self.db, *tail),
            // `if`/`match`/`loop` in tail position are statements without `;`
            Some(tail) if tail.kind() == "expression_statement" && !ends_with_semicolon(*tail) => {
                match tail.named_child(0) {
                    Some(inner) => typify_operand(self.db, inner),
                    None => Type::Unit,
                }
            }
            _ => Type::Unit,
        };
        self.go(ty);
    }
}

fn ends_with_semicolon(statement: Node) -> bool {
    let count = statement.child_count();
    count > 0
        && statement
            .child(count - 1)
            .is_some_and(|last| last.kind() == ";")
}

fn literal_type<'t>(db: &Analysis<'t>, literal: Node<'t>) -> Type<'t> {
    let text = db.text(literal);
    let config = db.config();
    match literal.kind() {
        "integer_literal" => {
            let is_hex = text.starts_with("0x") || text.starts_with("0X");
            match numeric_suffix(text) {
                // Hex digits swallow an `f32`/`f64` tail, so hex never has a float suffix.
                Some(suffix) if !(is_hex && suffix.is_float()) => Type::Primitive(suffix),
                _ => Type::Primitive(config.integer_fallback),
            }
        }
        "float_literal" => match numeric_suffix(text) {
            Some(suffix) if suffix.is_float() => Type::Primitive(suffix),
            _ => Type::Primitive(config.float_fallback),
        },
        "boolean_literal" => Type::Primitive(PrimitiveType::Bool),
        "char_literal" if text.starts_with('b') => Type::Primitive(PrimitiveType::U8),
        "char_literal" => Type::Primitive(PrimitiveType::Char),
        "string_literal" | "raw_string_literal" if text.starts_with('b') || text.starts_with('c') => {
            Type::Unknown
        }
        "string_literal" | "raw_string_literal" => {
            Type::reference(false, Type::Primitive(PrimitiveType::Str))
        }
        _ => Type::Unknown,
    }
}

fn numeric_suffix(text: &str) -> Option<PrimitiveType> {
    PrimitiveType::ALL
        .into_iter()
        .filter(|p| p.is_numeric())
        .find(|p| text.ends_with(p.name()) && text.len() > p.name().len())
}
