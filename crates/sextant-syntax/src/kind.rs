//! Classification of tree-sitter nodes into the categories the analysis
//! dispatches on.
//!
//! The Rust grammar reuses a handful of node kinds in very different roles:
//! an `identifier` may be a path expression, a binding in a pattern, the name
//! of a declaration or one segment of a longer path. [`SyntaxKind::of`] looks
//! at the parent kind and the field the node occupies to tell them apart.

use tree_sitter::Node;

use crate::common::field_name_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // Items
    StructItem,
    EnumItem,
    FnItem,
    TypeAlias,
    ConstItem,
    ImplItem,
    TraitItem,
    ModItem,
    OtherItem,

    // Expressions
    PathExpr,
    StructExpr,
    TupleExpr,
    UnitExpr,
    CallExpr,
    MethodCallExpr,
    FieldExpr,
    ParenExpr,
    LiteralExpr,
    RefExpr,
    BlockExpr,
    OtherExpr,

    // Types
    PathType,
    TupleType,
    UnitType,
    PrimitiveType,
    RefType,
    OtherType,

    // Patterns
    PatBinding,
    TuplePat,
    StructPat,
    TupleStructPat,
    FieldPat,
    RefPat,
    MutPat,
    ReferencePat,
    CapturedPat,
    OrPat,
    RestPat,
    OtherPat,

    // Declarations that are neither items nor patterns
    LetDecl,
    Parameter,
    SelfParameter,
    FieldDecl,
    EnumVariant,

    /// The name a declaration introduces
    Name,
    /// A non-final segment of a path, or a path nested inside another construct
    PathSegment,
    SourceFile,
    Other,
}

impl SyntaxKind {
    /// Classify a node by its kind and position in the tree.
    pub fn of(node: Node) -> SyntaxKind {
        if !node.is_named() || node.is_error() || node.is_missing() {
            return SyntaxKind::Other;
        }
        match node.kind() {
            "source_file" => SyntaxKind::SourceFile,

            "struct_item" => SyntaxKind::StructItem,
            "enum_item" => SyntaxKind::EnumItem,
            "function_item" | "function_signature_item" => SyntaxKind::FnItem,
            "type_item" => SyntaxKind::TypeAlias,
            "const_item" | "static_item" => SyntaxKind::ConstItem,
            "impl_item" => SyntaxKind::ImplItem,
            "trait_item" => SyntaxKind::TraitItem,
            "mod_item" => SyntaxKind::ModItem,
            "union_item" | "use_declaration" | "extern_crate_declaration" | "macro_definition"
            | "foreign_mod_item" | "associated_type" => SyntaxKind::OtherItem,

            "let_declaration" => SyntaxKind::LetDecl,
            "parameter" => SyntaxKind::Parameter,
            "self_parameter" => SyntaxKind::SelfParameter,
            "field_declaration" => SyntaxKind::FieldDecl,
            "enum_variant" => SyntaxKind::EnumVariant,

            "identifier" => classify_identifier(node),
            "self" => match node.parent().map(|p| p.kind()) {
                Some("self_parameter") => SyntaxKind::Name,
                _ if is_path_prefix(node) => SyntaxKind::PathSegment,
                Some("use_declaration" | "use_list" | "scoped_use_list" | "use_as_clause") => {
                    SyntaxKind::Other
                }
                _ => SyntaxKind::PathExpr,
            },
            "super" | "crate" => SyntaxKind::PathSegment,
            "scoped_identifier" => classify_scoped_identifier(node),
            "shorthand_field_identifier" => SyntaxKind::PatBinding,
            "field_identifier" => match parent_and_field(node) {
                (Some("field_declaration"), Some("name")) => SyntaxKind::Name,
                _ => SyntaxKind::Other,
            },

            "type_identifier" => classify_type_identifier(node),
            "scoped_type_identifier" | "generic_type" => {
                if is_path_prefix(node) || is_nested_path(node) {
                    SyntaxKind::PathSegment
                } else {
                    SyntaxKind::PathType
                }
            }
            "primitive_type" => {
                if is_path_prefix(node) {
                    SyntaxKind::PathSegment
                } else {
                    SyntaxKind::PrimitiveType
                }
            }
            "tuple_type" => SyntaxKind::TupleType,
            "unit_type" => SyntaxKind::UnitType,
            "reference_type" => SyntaxKind::RefType,
            "array_type" | "pointer_type" | "function_type" | "never_type" | "dynamic_type"
            | "abstract_type" | "bounded_type" | "qualified_type" | "removed_trait_bound" => {
                SyntaxKind::OtherType
            }

            "struct_expression" => SyntaxKind::StructExpr,
            "tuple_expression" => SyntaxKind::TupleExpr,
            "unit_expression" => SyntaxKind::UnitExpr,
            "call_expression" => match node.child_by_field_name("function") {
                Some(callee) if callee.kind() == "field_expression" => SyntaxKind::MethodCallExpr,
                _ => SyntaxKind::CallExpr,
            },
            "field_expression" => SyntaxKind::FieldExpr,
            "parenthesized_expression" => SyntaxKind::ParenExpr,
            "integer_literal" | "float_literal" | "string_literal" | "raw_string_literal"
            | "char_literal" | "boolean_literal" => {
                if in_pattern_position(node) {
                    SyntaxKind::OtherPat
                } else {
                    SyntaxKind::LiteralExpr
                }
            }
            "reference_expression" => SyntaxKind::RefExpr,
            "block" => SyntaxKind::BlockExpr,
            "binary_expression" | "unary_expression" | "assignment_expression"
            | "compound_assignment_expr" | "if_expression" | "match_expression"
            | "while_expression" | "loop_expression" | "for_expression" | "closure_expression"
            | "return_expression" | "break_expression" | "continue_expression"
            | "index_expression" | "range_expression" | "try_expression" | "await_expression"
            | "type_cast_expression" | "array_expression" | "macro_invocation"
            | "generic_function" | "yield_expression" | "unsafe_block" | "async_block"
            | "const_block" | "gen_block" | "try_block" => SyntaxKind::OtherExpr,

            "tuple_pattern" => SyntaxKind::TuplePat,
            "struct_pattern" => SyntaxKind::StructPat,
            "tuple_struct_pattern" => SyntaxKind::TupleStructPat,
            "field_pattern" => SyntaxKind::FieldPat,
            "ref_pattern" => SyntaxKind::RefPat,
            "mut_pattern" => SyntaxKind::MutPat,
            "reference_pattern" => SyntaxKind::ReferencePat,
            "captured_pattern" => SyntaxKind::CapturedPat,
            "or_pattern" => SyntaxKind::OrPat,
            "remaining_field_pattern" => SyntaxKind::RestPat,
            "slice_pattern" | "range_pattern" | "negative_literal" | "generic_pattern" => {
                SyntaxKind::OtherPat
            }

            _ => SyntaxKind::Other,
        }
    }

    pub fn is_item(self) -> bool {
        matches!(
            self,
            SyntaxKind::StructItem
                | SyntaxKind::EnumItem
                | SyntaxKind::FnItem
                | SyntaxKind::TypeAlias
                | SyntaxKind::ConstItem
                | SyntaxKind::ImplItem
                | SyntaxKind::TraitItem
                | SyntaxKind::ModItem
                | SyntaxKind::OtherItem
        )
    }

    pub fn is_expr(self) -> bool {
        matches!(
            self,
            SyntaxKind::PathExpr
                | SyntaxKind::StructExpr
                | SyntaxKind::TupleExpr
                | SyntaxKind::UnitExpr
                | SyntaxKind::CallExpr
                | SyntaxKind::MethodCallExpr
                | SyntaxKind::FieldExpr
                | SyntaxKind::ParenExpr
                | SyntaxKind::LiteralExpr
                | SyntaxKind::RefExpr
                | SyntaxKind::BlockExpr
                | SyntaxKind::OtherExpr
        )
    }

    pub fn is_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::PathType
                | SyntaxKind::TupleType
                | SyntaxKind::UnitType
                | SyntaxKind::PrimitiveType
                | SyntaxKind::RefType
                | SyntaxKind::OtherType
        )
    }

    pub fn is_pattern(self) -> bool {
        matches!(
            self,
            SyntaxKind::PatBinding
                | SyntaxKind::TuplePat
                | SyntaxKind::StructPat
                | SyntaxKind::TupleStructPat
                | SyntaxKind::FieldPat
                | SyntaxKind::RefPat
                | SyntaxKind::MutPat
                | SyntaxKind::ReferencePat
                | SyntaxKind::CapturedPat
                | SyntaxKind::OrPat
                | SyntaxKind::RestPat
                | SyntaxKind::OtherPat
        )
    }
}

fn parent_and_field(node: Node) -> (Option<&'static str>, Option<&'static str>) {
    (node.parent().map(|p| p.kind()), field_name_of(&node))
}

/// `a` in `a::b`, or any prefix of a longer path
fn is_path_prefix(node: Node) -> bool {
    matches!(
        parent_and_field(node),
        (
            Some("scoped_identifier" | "scoped_type_identifier" | "scoped_use_list"),
            Some("path")
        )
    )
}

/// A path that is only part of a larger construct (the base of a generic type,
/// the name of a struct literal, the path of a struct or tuple-struct pattern)
fn is_nested_path(node: Node) -> bool {
    matches!(
        parent_and_field(node),
        (Some("generic_type" | "generic_type_with_turbofish" | "generic_function"), _)
            | (Some("struct_expression"), Some("name"))
            | (Some("struct_pattern" | "tuple_struct_pattern"), Some("type"))
    )
}

/// Whether the node stands where a pattern is expected
pub fn in_pattern_position(node: Node) -> bool {
    match parent_and_field(node) {
        (Some("let_declaration" | "parameter" | "for_expression" | "let_condition"), field) => {
            field == Some("pattern")
        }
        (Some("field_pattern"), field) => field == Some("pattern"),
        (Some("match_pattern"), field) => field != Some("condition"),
        (Some("tuple_struct_pattern"), field) => field != Some("type"),
        (
            Some(
                "closure_parameters" | "tuple_pattern" | "slice_pattern" | "or_pattern"
                | "ref_pattern" | "mut_pattern" | "reference_pattern" | "captured_pattern"
                | "range_pattern",
            ),
            _,
        ) => true,
        _ => false,
    }
}

fn classify_identifier(node: Node) -> SyntaxKind {
    let (parent, field) = parent_and_field(node);
    match (parent, field) {
        (None, _) => SyntaxKind::Other,
        (Some("scoped_identifier" | "scoped_type_identifier" | "scoped_use_list"), _) => {
            SyntaxKind::PathSegment
        }
        (
            Some(
                "function_item" | "function_signature_item" | "enum_variant" | "mod_item"
                | "const_item" | "static_item" | "macro_definition" | "extern_crate_declaration",
            ),
            Some("name"),
        ) => SyntaxKind::Name,
        (Some("captured_pattern"), _) if node.prev_named_sibling().is_none() => {
            SyntaxKind::PatBinding
        }
        (Some("struct_pattern" | "tuple_struct_pattern"), Some("type")) => SyntaxKind::PathSegment,
        (
            Some(
                "use_declaration" | "use_list" | "use_as_clause" | "use_wildcard"
                | "macro_invocation" | "attribute" | "token_tree" | "label" | "lifetime"
                | "visibility_modifier" | "extern_crate_declaration",
            ),
            _,
        ) => SyntaxKind::Other,
        _ if in_pattern_position(node) => SyntaxKind::PatBinding,
        _ => SyntaxKind::PathExpr,
    }
}

fn classify_scoped_identifier(node: Node) -> SyntaxKind {
    if is_path_prefix(node) || is_nested_path(node) {
        return SyntaxKind::PathSegment;
    }
    match node.parent().map(|p| p.kind()) {
        Some("use_declaration" | "use_list" | "use_as_clause" | "macro_invocation" | "attribute") => {
            SyntaxKind::Other
        }
        _ if in_pattern_position(node) => SyntaxKind::OtherPat,
        _ => SyntaxKind::PathExpr,
    }
}

fn classify_type_identifier(node: Node) -> SyntaxKind {
    match parent_and_field(node) {
        (
            Some(
                "struct_item" | "enum_item" | "type_item" | "trait_item" | "union_item"
                | "associated_type",
            ),
            Some("name"),
        ) => SyntaxKind::Name,
        (Some("type_parameter" | "type_parameters" | "constrained_type_parameter"), _) => {
            SyntaxKind::Name
        }
        _ if is_path_prefix(node) || is_nested_path(node) => SyntaxKind::PathSegment,
        (Some("scoped_type_identifier"), Some("name")) => SyntaxKind::PathSegment,
        _ => SyntaxKind::PathType,
    }
}
