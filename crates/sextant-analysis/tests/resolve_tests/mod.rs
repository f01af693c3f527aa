use expect_test::expect;
use sextant_analysis::resolve::PathReference;
use sextant_analysis::{
    Analysis, AnalysisConfig, AnalysisError, NameLookup, Namespace, Reference, ReferenceKind,
    ResolveResult,
};
use sextant_source::TextRange;
use sextant_syntax::common::named_children;
use sextant_syntax::{Node, SyntaxTree};
use sextant_types::{PrimitiveType, Type};

use crate::support::Fixture;

#[test]
fn test_latest_let_shadows_earlier_ones() {
    let fixture = Fixture::new(
        r#"
fn main() {
    let x = 1;
    let x = "s";
      //^ second
    x;
  //^ use
}
"#,
    );
    let db = fixture.analysis();
    let reference = fixture.reference(&db, "use");
    assert_eq!(reference.resolve(), Some(fixture.binding("second")));
}

#[test]
fn test_let_is_not_visible_in_its_own_initializer() {
    let fixture = Fixture::new(
        r#"
fn main() {
    let y = y;
          //^ init
}
"#,
    );
    let db = fixture.analysis();
    let reference = fixture.reference(&db, "init");
    assert_eq!(reference.resolve_verbose(), ResolveResult::Unresolved);
    assert_eq!(reference.resolve(), None);
}

#[test]
fn test_self_parameters_and_self_type() {
    let fixture = Fixture::new(
        r#"
struct S { f: u8 }
impl S {
    fn get(&self, k: u8) -> Self {
        self.f;
      //^ self
        k;
      //^ param
        Self { f: k }
      //^ self_type
    }
}
"#,
    );
    assert_eq!(fixture.resolved("self").as_deref(), Some("&self"));
    assert_eq!(fixture.resolved("param").as_deref(), Some("k"));
    assert_eq!(fixture.resolved("self_type").as_deref(), Some("struct S { f: u8 }"));
}

#[test]
fn test_qualified_paths() {
    let fixture = Fixture::new(
        r#"
mod outer {
    pub fn value() -> u8 { 0 }
    pub mod inner {
        pub fn call() -> u8 {
            super::value()
          //^ super
        }
    }
}
fn main() {
    outer::inner::call();
  //^ qualified
    crate::outer::value();
  //^ crate
    outer::nothing();
  //^ partial
}
"#,
    );
    assert_eq!(fixture.resolved("super").as_deref(), Some("pub fn value() -> u8 { 0 }"));
    assert_eq!(fixture.resolved("qualified").as_deref(), Some("pub fn call() -> u8 {"));
    assert_eq!(fixture.resolved("crate").as_deref(), Some("pub fn value() -> u8 { 0 }"));

    let db = fixture.analysis();
    let partial = fixture.reference(&db, "partial");
    match partial.resolve_verbose() {
        ResolveResult::Partial(container) => assert_eq!(container.kind(), "mod_item"),
        other => panic!("expected a partial resolution, got {other:?}"),
    }
    assert_eq!(partial.resolve(), None);
}

#[test]
fn test_ambiguous_names_do_not_resolve() {
    let fixture = Fixture::new(
        r#"
fn dup() {}
fn dup() {}
fn main() {
    dup();
  //^ dup
}
"#,
    );
    let db = fixture.analysis();
    let reference = fixture.reference(&db, "dup");
    match reference.resolve_verbose() {
        ResolveResult::Ambiguous(candidates) => assert_eq!(candidates.len(), 2),
        other => panic!("expected ambiguity, got {other:?}"),
    }
    assert_eq!(reference.resolve(), None);
}

#[test]
fn test_items_are_visible_throughout_their_block() {
    let fixture = Fixture::new(
        r#"
fn main() {
    helper();
  //^ helper
    fn helper() {}
}
"#,
    );
    assert_eq!(fixture.resolved("helper").as_deref(), Some("fn helper() {}"));
}

#[test]
fn test_namespaces_are_separate() {
    let fixture = Fixture::new(
        r#"
struct Named { a: u8 }
struct Unit;
fn main() {
    Named;
  //^ named
    Unit;
  //^ unit
}
"#,
    );
    assert_eq!(fixture.resolved("named"), None);
    assert_eq!(fixture.resolved("unit").as_deref(), Some("struct Unit;"));
}

#[test]
fn test_method_resolution_through_impls() {
    let fixture = Fixture::new(
        r#"
struct S;
trait T {
    fn shared(&self) -> u8 { 0 }
    fn sig(&self) -> u16;
}
impl S {
    fn own(&self) -> bool { true }
}
impl T for S {
    fn sig(&self) -> u16 { 1 }
}
fn main() {
    let s = S;
    s.own();
      //^ own
    s.shared();
      //^ shared
    s.sig();
      //^ sig
}
"#,
    );
    let method = |label: &str, config: AnalysisConfig| {
        let db = fixture.analysis_with(config);
        let call = fixture.of_kind(label, "call_expression");
        let decl = db.reference(call).expect("method call reference").resolve();
        decl.map(|decl| fixture.tree().text(decl).lines().next().unwrap_or("").to_string())
    };
    let defaults = AnalysisConfig::default;
    assert_eq!(method("own", defaults()).as_deref(), Some("fn own(&self) -> bool { true }"));
    assert_eq!(method("shared", defaults()).as_deref(), Some("fn shared(&self) -> u8 { 0 }"));
    assert_eq!(method("sig", defaults()).as_deref(), Some("fn sig(&self) -> u16 { 1 }"));

    let inherent_only = || AnalysisConfig {
        trait_methods: false,
        ..AnalysisConfig::default()
    };
    assert_eq!(method("own", inherent_only()).as_deref(), Some("fn own(&self) -> bool { true }"));
    assert_eq!(method("shared", inherent_only()), None);
}

#[test]
fn test_associated_functions_and_variants() {
    let fixture = Fixture::new(
        r#"
enum E { A, B }
struct S;
impl S {
    fn make() -> S { S }
}
type Alias = S;
fn main() {
    E::B;
     //^ variant
    S::make();
     //^ assoc
    Alias::make();
         //^ alias
}
"#,
    );
    assert_eq!(fixture.resolved("variant").as_deref(), Some("B"));
    assert_eq!(fixture.resolved("assoc").as_deref(), Some("fn make() -> S { S }"));
    assert_eq!(fixture.resolved("alias").as_deref(), Some("fn make() -> S { S }"));
}

#[test]
fn test_fields_resolve_to_declarations() {
    let fixture = Fixture::new(
        r#"
struct Inner { value: u8 }
struct Outer { inner: Inner }
fn main() {
    let o = Outer { inner: Inner { value: 1 } };
    o.inner.value;
            //^ value
}
"#,
    );
    assert_eq!(fixture.resolved("value").as_deref(), Some("value: u8"));
}

#[test]
fn test_scopes_stop_at_module_boundaries() {
    let fixture = Fixture::new(
        r#"
fn top() {}
mod m {
    fn f() {
        top();
      //^ top
    }
}
"#,
    );
    assert_eq!(fixture.resolved("top"), None);
}

#[test]
fn test_anchor_ranges_lie_inside_the_element() {
    let fixture = Fixture::new(
        r#"
mod outer { pub mod inner { pub fn call() {} } }
struct S;
impl S { fn own(&self) {} }
struct H { s: S }
fn main() {
    let x = S;
    outer::inner::call();
  //^ path
    x;
  //^ leaf
    let h = H { s: S };
    h.s.own();
      //^ method
}
"#,
    );
    let db = fixture.analysis();

    let path = fixture.reference(&db, "path");
    assert_eq!(fixture.tree().text(path.element()), "outer::inner::call");
    assert_eq!(path.range_in_element(), TextRange::new(14, 18));

    let leaf = fixture.reference(&db, "leaf");
    assert_eq!(leaf.range_in_element(), TextRange::new(0, 1));

    let call = fixture.of_kind("method", "call_expression");
    let method = db.reference(call).expect("method call reference");
    assert_eq!(fixture.tree().text(method.element()), "h.s.own");
    assert_eq!(fixture.tree().text(method.anchor()), "own");
    assert_eq!(method.range_in_element(), TextRange::new(4, 7));
}

#[test]
fn test_detached_anchor_is_a_defect() {
    let fixture = Fixture::new(
        r#"
fn main() {
    a::b::c;
  //^ path
}
"#,
    );
    let db = fixture.analysis();
    let element = fixture.of_kind("path", "expression_statement").named_child(0).unwrap();
    let grandchild = fixture.of_kind("path", "identifier");
    assert_eq!(fixture.tree().text(grandchild), "a");

    let reference = Reference::new(
        &db,
        ReferenceKind::Path(PathReference::anchored(element, grandchild)),
    );
    match reference.try_range_in_element() {
        Err(AnalysisError::DetachedAnchor { anchor_text, element_kind, .. }) => {
            assert_eq!(anchor_text, "a");
            assert_eq!(element_kind, "scoped_identifier");
        }
        other => panic!("expected a detached anchor, got {other:?}"),
    }
}

#[test]
#[should_panic(expected = "is not a direct child")]
fn test_detached_anchor_panics_in_range_in_element() {
    let fixture = Fixture::new("fn main() { a::b::c; }");
    let db = fixture.analysis();
    let source = fixture.tree().source();
    let element = fixture.tree().node_at(source.find("a::").unwrap()).unwrap();
    let element = element.parent().unwrap().parent().unwrap();
    let grandchild = fixture.tree().node_at(source.find("a::").unwrap()).unwrap();
    let reference = Reference::new(
        &db,
        ReferenceKind::Path(PathReference::anchored(element, grandchild)),
    );
    reference.range_in_element();
}

#[test]
fn test_resolution_is_idempotent() {
    let fixture = Fixture::new(
        r#"
fn target() {}
fn main() {
    target();
  //^ call
}
"#,
    );
    let db = fixture.analysis();
    let reference = fixture.reference(&db, "call");
    let first = reference.resolve_verbose();
    assert_eq!(reference.resolve_verbose(), first);

    let again = fixture.reference(&db, "call");
    assert_eq!(again.resolve_verbose(), first);
    assert!(first.is_resolved());
    assert_eq!(again.resolve(), reference.resolve());
}

#[test]
fn test_collapsed_view_agrees_with_verbose_result() {
    let fixture = Fixture::new(
        r#"
fn f() {}
fn f() {}
fn g() {}
fn main() {
    f();
  //^ ambiguous
    g();
  //^ resolved
    h();
  //^ unresolved
    m::h();
  //^ partial
}
mod m {}
"#,
    );
    let db = fixture.analysis();
    for label in ["ambiguous", "resolved", "unresolved", "partial"] {
        let reference = fixture.reference(&db, label);
        let verbose = reference.resolve_verbose();
        match verbose {
            ResolveResult::Resolved(decl) => assert_eq!(reference.resolve(), Some(decl)),
            _ => assert_eq!(reference.resolve(), None, "{label}"),
        }
    }
}

#[test]
fn test_impl_of_self_has_no_target() {
    let fixture = Fixture::new(
        r#"
struct S;
impl Self {}
impl S { fn m(&self) -> u8 { 0 } }
fn main() {
    let s = S;
    let v = s.m();
}
"#,
    );
    expect![[r#"
        s: S
        v: u8"#]]
    .assert_eq(&fixture.binding_types());

    let db = fixture.analysis();
    let target = fixture.tree().root().named_child(1).unwrap().child_by_field_name("type").unwrap();
    assert_eq!(fixture.tree().text(target), "Self");
    assert_eq!(db.type_of(target), Type::Unknown);
}

#[test]
fn test_impl_target_under_its_own_type_terminates() {
    let fixture = Fixture::new(
        r#"
struct S;
impl S::Assoc {}
impl S { fn m(&self) -> u8 { 0 } }
fn main() {
    let s = S;
    let v = s.m();
}
"#,
    );
    expect![[r#"
        s: S
        v: u8"#]]
    .assert_eq(&fixture.binding_types());
}

/// Resolves bare names to the top-level items of the file, ignoring modules.
struct FileRootLookup;

impl NameLookup for FileRootLookup {
    fn lookup<'t>(
        &self,
        tree: &'t SyntaxTree,
        _position: Node<'t>,
        name: &str,
        _namespace: Namespace,
    ) -> Vec<Node<'t>> {
        named_children(&tree.root())
            .into_iter()
            .filter(|item| item.child_by_field_name("name").is_some_and(|n| tree.text(n) == name))
            .collect()
    }
}

#[test]
fn test_custom_name_lookup() {
    let fixture = Fixture::new(
        r#"
fn top() -> u8 { 0 }
mod m {
    fn f() {
        top();
      //^ top
    }
}
"#,
    );
    let db = Analysis::with_lookup(fixture.tree(), AnalysisConfig::default(), &FileRootLookup);
    let reference = fixture.reference(&db, "top");
    assert_eq!(reference.resolve(), fixture.tree().root().named_child(0));

    let call = fixture.of_kind("top", "call_expression");
    assert_eq!(db.typify_expr(call), Type::Primitive(PrimitiveType::U8));

    // The default lookup stops at the module boundary.
    assert_eq!(fixture.resolved("top"), None);
}
