//! Recursive visitor over the syntax tree.
//!
//! [`accept`] classifies a node with [`SyntaxKind::of`] and calls the most
//! specific `visit_*` method. Every specific method falls back to its
//! category method (`visit_path_expr` → `visit_expr` → `visit_element`), and
//! the default `visit_element` recurses into all named children. A visitor
//! therefore overrides only the kinds it cares about and still finds them
//! anywhere below an unhandled node.
//!
//! [`ComputingVisitor`] adds a single result slot. Its `compute` consumes the
//! visitor, so one instance serves exactly one computation.

use tree_sitter::Node;

use crate::common::{create_span, named_children};
use crate::error::SyntaxError;
use crate::kind::SyntaxKind;
use crate::SyntaxTree;

/// Dispatch `node` to the most specific method of `visitor`.
pub fn accept<'t, V: Visitor<'t> + ?Sized>(node: Node<'t>, visitor: &mut V) {
    match SyntaxKind::of(node) {
        SyntaxKind::StructItem => visitor.visit_struct_item(node),
        SyntaxKind::EnumItem => visitor.visit_enum_item(node),
        SyntaxKind::FnItem => visitor.visit_fn_item(node),
        SyntaxKind::TypeAlias => visitor.visit_type_alias(node),
        SyntaxKind::ConstItem => visitor.visit_const_item(node),
        SyntaxKind::ImplItem => visitor.visit_impl_item(node),
        SyntaxKind::TraitItem => visitor.visit_trait_item(node),
        SyntaxKind::ModItem => visitor.visit_mod_item(node),
        SyntaxKind::OtherItem => visitor.visit_item(node),

        SyntaxKind::PathExpr => visitor.visit_path_expr(node),
        SyntaxKind::StructExpr => visitor.visit_struct_expr(node),
        SyntaxKind::TupleExpr => visitor.visit_tuple_expr(node),
        SyntaxKind::UnitExpr => visitor.visit_unit_expr(node),
        SyntaxKind::CallExpr => visitor.visit_call_expr(node),
        SyntaxKind::MethodCallExpr => visitor.visit_method_call_expr(node),
        SyntaxKind::FieldExpr => visitor.visit_field_expr(node),
        SyntaxKind::ParenExpr => visitor.visit_paren_expr(node),
        SyntaxKind::LiteralExpr => visitor.visit_literal_expr(node),
        SyntaxKind::RefExpr => visitor.visit_ref_expr(node),
        SyntaxKind::BlockExpr => visitor.visit_block_expr(node),
        SyntaxKind::OtherExpr => visitor.visit_expr(node),

        SyntaxKind::PathType => visitor.visit_path_type(node),
        SyntaxKind::TupleType => visitor.visit_tuple_type(node),
        SyntaxKind::UnitType => visitor.visit_unit_type(node),
        SyntaxKind::PrimitiveType => visitor.visit_primitive_type(node),
        SyntaxKind::RefType => visitor.visit_ref_type(node),
        SyntaxKind::OtherType => visitor.visit_type(node),

        SyntaxKind::PatBinding => visitor.visit_pat_binding(node),
        SyntaxKind::TuplePat => visitor.visit_tuple_pat(node),
        SyntaxKind::StructPat => visitor.visit_struct_pat(node),
        SyntaxKind::TupleStructPat => visitor.visit_tuple_struct_pat(node),
        SyntaxKind::FieldPat => visitor.visit_field_pat(node),
        SyntaxKind::RefPat => visitor.visit_ref_pat(node),
        SyntaxKind::MutPat => visitor.visit_mut_pat(node),
        SyntaxKind::ReferencePat => visitor.visit_reference_pat(node),
        SyntaxKind::CapturedPat => visitor.visit_captured_pat(node),
        SyntaxKind::OrPat => visitor.visit_or_pat(node),
        SyntaxKind::RestPat => visitor.visit_rest_pat(node),
        SyntaxKind::OtherPat => visitor.visit_pat(node),

        SyntaxKind::LetDecl => visitor.visit_let_decl(node),
        SyntaxKind::Parameter => visitor.visit_parameter(node),
        SyntaxKind::SelfParameter => visitor.visit_self_parameter(node),
        SyntaxKind::FieldDecl => visitor.visit_field_decl(node),
        SyntaxKind::EnumVariant => visitor.visit_enum_variant(node),

        SyntaxKind::Name => visitor.visit_name(node),
        SyntaxKind::PathSegment => visitor.visit_path_segment(node),
        SyntaxKind::SourceFile => visitor.visit_source_file(node),
        SyntaxKind::Other => visitor.visit_element(node),
    }
}

/// Dispatch every named child of `node`, in document order.
pub fn walk_children<'t, V: Visitor<'t> + ?Sized>(node: Node<'t>, visitor: &mut V) {
    for child in named_children(&node) {
        accept(child, visitor);
    }
}

pub trait Visitor<'t> {
    /// Fallback for every node; recurses into the children.
    fn visit_element(&mut self, node: Node<'t>) {
        walk_children(node, self);
    }

    fn visit_source_file(&mut self, node: Node<'t>) {
        self.visit_element(node)
    }

    // Items

    fn visit_item(&mut self, node: Node<'t>) {
        self.visit_element(node)
    }
    fn visit_struct_item(&mut self, node: Node<'t>) {
        self.visit_item(node)
    }
    fn visit_enum_item(&mut self, node: Node<'t>) {
        self.visit_item(node)
    }
    fn visit_fn_item(&mut self, node: Node<'t>) {
        self.visit_item(node)
    }
    fn visit_type_alias(&mut self, node: Node<'t>) {
        self.visit_item(node)
    }
    fn visit_const_item(&mut self, node: Node<'t>) {
        self.visit_item(node)
    }
    fn visit_impl_item(&mut self, node: Node<'t>) {
        self.visit_item(node)
    }
    fn visit_trait_item(&mut self, node: Node<'t>) {
        self.visit_item(node)
    }
    fn visit_mod_item(&mut self, node: Node<'t>) {
        self.visit_item(node)
    }

    // Expressions

    fn visit_expr(&mut self, node: Node<'t>) {
        self.visit_element(node)
    }
    fn visit_path_expr(&mut self, node: Node<'t>) {
        self.visit_expr(node)
    }
    fn visit_struct_expr(&mut self, node: Node<'t>) {
        self.visit_expr(node)
    }
    fn visit_tuple_expr(&mut self, node: Node<'t>) {
        self.visit_expr(node)
    }
    fn visit_unit_expr(&mut self, node: Node<'t>) {
        self.visit_expr(node)
    }
    fn visit_call_expr(&mut self, node: Node<'t>) {
        self.visit_expr(node)
    }
    fn visit_method_call_expr(&mut self, node: Node<'t>) {
        self.visit_expr(node)
    }
    fn visit_field_expr(&mut self, node: Node<'t>) {
        self.visit_expr(node)
    }
    fn visit_paren_expr(&mut self, node: Node<'t>) {
        self.visit_expr(node)
    }
    fn visit_literal_expr(&mut self, node: Node<'t>) {
        self.visit_expr(node)
    }
    fn visit_ref_expr(&mut self, node: Node<'t>) {
        self.visit_expr(node)
    }
    fn visit_block_expr(&mut self, node: Node<'t>) {
        self.visit_expr(node)
    }

    // Types

    fn visit_type(&mut self, node: Node<'t>) {
        self.visit_element(node)
    }
    fn visit_path_type(&mut self, node: Node<'t>) {
        self.visit_type(node)
    }
    fn visit_tuple_type(&mut self, node: Node<'t>) {
        self.visit_type(node)
    }
    fn visit_unit_type(&mut self, node: Node<'t>) {
        self.visit_type(node)
    }
    fn visit_primitive_type(&mut self, node: Node<'t>) {
        self.visit_type(node)
    }
    fn visit_ref_type(&mut self, node: Node<'t>) {
        self.visit_type(node)
    }

    // Patterns

    fn visit_pat(&mut self, node: Node<'t>) {
        self.visit_element(node)
    }
    fn visit_pat_binding(&mut self, node: Node<'t>) {
        self.visit_pat(node)
    }
    fn visit_tuple_pat(&mut self, node: Node<'t>) {
        self.visit_pat(node)
    }
    fn visit_struct_pat(&mut self, node: Node<'t>) {
        self.visit_pat(node)
    }
    fn visit_tuple_struct_pat(&mut self, node: Node<'t>) {
        self.visit_pat(node)
    }
    fn visit_field_pat(&mut self, node: Node<'t>) {
        self.visit_pat(node)
    }
    fn visit_ref_pat(&mut self, node: Node<'t>) {
        self.visit_pat(node)
    }
    fn visit_mut_pat(&mut self, node: Node<'t>) {
        self.visit_pat(node)
    }
    fn visit_reference_pat(&mut self, node: Node<'t>) {
        self.visit_pat(node)
    }
    fn visit_captured_pat(&mut self, node: Node<'t>) {
        self.visit_pat(node)
    }
    fn visit_or_pat(&mut self, node: Node<'t>) {
        self.visit_pat(node)
    }
    fn visit_rest_pat(&mut self, node: Node<'t>) {
        self.visit_pat(node)
    }

    // Other declarations

    fn visit_let_decl(&mut self, node: Node<'t>) {
        self.visit_element(node)
    }
    fn visit_parameter(&mut self, node: Node<'t>) {
        self.visit_element(node)
    }
    fn visit_self_parameter(&mut self, node: Node<'t>) {
        self.visit_element(node)
    }
    fn visit_field_decl(&mut self, node: Node<'t>) {
        self.visit_element(node)
    }
    fn visit_enum_variant(&mut self, node: Node<'t>) {
        self.visit_element(node)
    }

    fn visit_name(&mut self, node: Node<'t>) {
        self.visit_element(node)
    }
    fn visit_path_segment(&mut self, node: Node<'t>) {
        self.visit_element(node)
    }
}

/// A visitor that produces exactly one value per top-level node.
///
/// Implementors store the value with [`go`](ComputingVisitor::go) from
/// whichever `visit_*` method handles the node. Finishing without a value is
/// a defect in the visitor and is reported with the node's kind, text and
/// location.
pub trait ComputingVisitor<'t>: Visitor<'t> + Sized {
    type Output;

    fn result_slot(&mut self) -> &mut Option<Self::Output>;

    fn go(&mut self, value: Self::Output) {
        *self.result_slot() = Some(value);
    }

    fn try_compute(mut self, tree: &'t SyntaxTree, node: Node<'t>) -> Result<Self::Output, SyntaxError> {
        accept(node, &mut self);
        self.result_slot()
            .take()
            .ok_or_else(|| unhandled(tree, node))
    }

    /// Like [`try_compute`](ComputingVisitor::try_compute), but a missing
    /// result panics.
    fn compute(self, tree: &'t SyntaxTree, node: Node<'t>) -> Self::Output {
        match self.try_compute(tree, node) {
            Ok(value) => value,
            Err(defect) => panic!("{defect}"),
        }
    }
}

fn unhandled(tree: &SyntaxTree, node: Node) -> SyntaxError {
    SyntaxError::UnhandledNode {
        kind: node.kind().to_string(),
        text: tree.text(node).to_string(),
        location: tree.describe(node),
        span: create_span(&node),
    }
}
