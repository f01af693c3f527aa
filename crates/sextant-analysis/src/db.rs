use std::cell::RefCell;

use fxhash::FxHashSet;
use sextant_syntax::{Node, SyntaxKind, SyntaxTree};
use sextant_types::{Type, UnresolvedType};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::resolve::scope::{LexicalScopes, NameLookup, Namespace};
use crate::resolve::Reference;
use crate::typify;

/// Analysis context for one syntax tree snapshot.
///
/// Holds the tree, the name lookup used for bare names, the configuration and
/// the declarations whose type or impls are currently being computed. The
/// last two make the context `!Sync`; analyse different snapshots from
/// different threads with one context each.
pub struct Analysis<'t> {
    tree: &'t SyntaxTree,
    lookup: &'t dyn NameLookup,
    config: AnalysisConfig,
    in_progress: RefCell<FxHashSet<usize>>,
    impls_in_progress: RefCell<FxHashSet<usize>>,
}

impl<'t> Analysis<'t> {
    pub fn new(tree: &'t SyntaxTree) -> Self {
        Self::with_config(tree, AnalysisConfig::default())
    }

    pub fn with_config(tree: &'t SyntaxTree, config: AnalysisConfig) -> Self {
        Self::with_lookup(tree, config, &LexicalScopes)
    }

    /// Use a custom scope lookup instead of the file-local [`LexicalScopes`].
    pub fn with_lookup(tree: &'t SyntaxTree, config: AnalysisConfig, lookup: &'t dyn NameLookup) -> Self {
        Self {
            tree,
            lookup,
            config,
            in_progress: RefCell::new(FxHashSet::default()),
            impls_in_progress: RefCell::new(FxHashSet::default()),
        }
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn text(&self, node: Node<'t>) -> &'t str {
        self.tree.text(node)
    }

    /// Candidates for `name` visible at `position`.
    pub fn lookup(&self, position: Node<'t>, name: &str, namespace: Namespace) -> Vec<Node<'t>> {
        self.lookup.lookup(self.tree, position, name, namespace)
    }

    /// The reference carried by `node`, if it is a path, struct literal,
    /// field access or method call.
    pub fn reference(&self, node: Node<'t>) -> Option<Reference<'_, 't>> {
        Reference::of(self, node)
    }

    pub fn typify_expr(&self, expr: Node<'t>) -> Type<'t> {
        typify::typify_expr(self, expr)
    }

    pub fn try_typify_expr(&self, expr: Node<'t>) -> Result<Type<'t>, AnalysisError> {
        typify::try_typify_expr(self, expr)
    }

    pub fn typify_item(&self, item: Node<'t>) -> Type<'t> {
        typify::typify_item(self, item)
    }

    pub fn typify_type(&self, ty: Node<'t>) -> UnresolvedType<'t> {
        typify::typify_type(self, ty)
    }

    pub fn resolved_type(&self, unresolved: UnresolvedType<'t>) -> Type<'t> {
        typify::resolved_type(self, unresolved)
    }

    pub fn typify(&self, named: Node<'t>) -> Type<'t> {
        typify::typify(self, named)
    }

    /// Type of whatever `node` is: an expression, a declaration or binding,
    /// or raw type syntax.
    pub fn type_of(&self, node: Node<'t>) -> Type<'t> {
        let kind = SyntaxKind::of(node);
        if kind.is_expr() {
            self.typify_expr(node)
        } else if kind.is_type() {
            self.resolved_type(self.typify_type(node))
        } else {
            self.typify(node)
        }
    }

    /// Run `compute` for `decl` unless `decl` is already being computed
    /// further up the stack, in which case the result is `Type::Unknown`.
    pub(crate) fn guarded(&self, decl: Node<'t>, compute: impl FnOnce() -> Type<'t>) -> Type<'t> {
        if !self.config.detect_declaration_cycles {
            return compute();
        }
        if !self.in_progress.borrow_mut().insert(decl.id()) {
            log::debug!(
                "declaration cycle through `{}` at {}, typed as unknown",
                first_line(self.text(decl)),
                self.tree.describe(decl)
            );
            return Type::Unknown;
        }
        let ty = compute();
        self.in_progress.borrow_mut().remove(&decl.id());
        ty
    }

    /// Run `collect` for the impls of `decl` unless they are already being
    /// collected further up the stack. Resolving an impl target such as
    /// `S::Assoc` looks at the impls of `S` again; the inner lookup sees none.
    pub(crate) fn collecting_impls(
        &self,
        decl: Node<'t>,
        collect: impl FnOnce() -> Vec<Node<'t>>,
    ) -> Vec<Node<'t>> {
        if !self.impls_in_progress.borrow_mut().insert(decl.id()) {
            log::debug!(
                "impls of `{}` requested while collecting them, none returned",
                first_line(self.text(decl))
            );
            return Vec::new();
        }
        let impls = collect();
        self.impls_in_progress.borrow_mut().remove(&decl.id());
        impls
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
