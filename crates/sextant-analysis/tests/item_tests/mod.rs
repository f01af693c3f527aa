use expect_test::expect;
use sextant_syntax::common::named_children;
use sextant_types::{PrimitiveType, Type, UnresolvedType};

use crate::support::Fixture;

/// `kind: type` for every top-level item
fn item_types(fixture: &Fixture) -> String {
    let db = fixture.analysis();
    let source = fixture.tree().source();
    named_children(&fixture.tree().root())
        .into_iter()
        .map(|item| format!("{}: {}", item.kind(), db.typify_item(item).display(source)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_item_types() {
    let fixture = Fixture::new(
        r#"
struct S { a: u8 }
enum E { A }
fn f(a: i32, b: &str) {}
fn g() -> (S, E) { todo!() }
type Alias = &'static S;
const LIMIT: u64 = 10;
static NAME: &str = "n";
trait T {}
impl S {}
mod m {}
"#,
    );
    expect![[r#"
        struct_item: S
        enum_item: E
        function_item: fn(i32, &str) -> ()
        function_item: fn() -> (S, E)
        type_item: &S
        const_item: u64
        static_item: &str
        trait_item: <unknown>
        impl_item: <unknown>
        mod_item: <unknown>"#]]
    .assert_eq(&item_types(&fixture));
}

#[test]
fn test_methods_exclude_self_from_parameters() {
    let fixture = Fixture::new(
        r#"
struct S;
impl S {
    fn m(&self, x: u8) -> u8 { x }
       //^ method
    fn unannotated(self) {}
       //^ unannotated
}
"#,
    );
    let db = fixture.analysis();
    let source = fixture.tree().source();
    let method = fixture.of_kind("method", "function_item");
    assert_eq!(db.typify_item(method).display(source).to_string(), "fn(u8) -> u8");
    let unannotated = fixture.of_kind("unannotated", "function_item");
    assert_eq!(db.typify_item(unannotated).display(source).to_string(), "fn() -> ()");
}

#[test]
fn test_typify_type_leaves_names_unresolved() {
    let fixture = Fixture::new(
        r#"
struct S;
type Target = (u8, S, &mut bool, (), [u8; 4]);
"#,
    );
    let db = fixture.analysis();
    let alias = fixture.tree().root().named_child(1).unwrap();
    let ty = alias.child_by_field_name("type").unwrap();

    let UnresolvedType::Tuple(elements) = db.typify_type(ty) else {
        panic!("expected a tuple");
    };
    assert_eq!(elements.len(), 5);
    assert_eq!(db.typify_type(elements[0]), UnresolvedType::Primitive(PrimitiveType::U8));
    assert!(matches!(db.typify_type(elements[1]), UnresolvedType::Path(path) if fixture.tree().text(path) == "S"));
    assert!(matches!(
        db.typify_type(elements[2]),
        UnresolvedType::Reference { mutable: true, .. }
    ));
    assert_eq!(db.typify_type(elements[3]), UnresolvedType::Unit);
    assert!(db.typify_type(elements[4]).is_unknown());

    let resolved = db.resolved_type(db.typify_type(ty));
    assert_eq!(
        resolved.display(fixture.tree().source()).to_string(),
        "(u8, S, &mut bool, (), <unknown>)"
    );
}

#[test]
fn test_type_of_routes_by_node_kind() {
    let fixture = Fixture::new(
        r#"
struct S { field: u8 }
fn f(param: S) -> S {
    param
  //^ expr
}
"#,
    );
    let db = fixture.analysis();
    let source = fixture.tree().source();
    let struct_item = fixture.tree().root().named_child(0).unwrap();
    let field = named_children(&struct_item.child_by_field_name("body").unwrap())[0];
    let function = fixture.tree().root().named_child(1).unwrap();
    let ret = function.child_by_field_name("return_type").unwrap();

    assert_eq!(db.type_of(fixture.expr("expr")).display(source).to_string(), "S");
    assert_eq!(db.type_of(field).display(source).to_string(), "u8");
    assert_eq!(db.type_of(ret), Type::Struct(struct_item));
    assert_eq!(db.type_of(function).display(source).to_string(), "fn(S) -> S");
}

#[test]
fn test_alias_cycles_are_unknown() {
    let fixture = Fixture::new(
        r#"
type A = B;
type B = A;
type Id = u8;
type Twice = Id;
fn main() {
    let a: A = 1;
    let id: Twice = 1;
}
"#,
    );
    expect![[r#"
        a: <unknown>
        id: u8"#]]
    .assert_eq(&fixture.binding_types());

    let db = fixture.analysis();
    let alias = fixture.tree().root().named_child(0).unwrap();
    assert_eq!(db.typify_item(alias), Type::Unknown);
    // The guard is released after the cycle is cut.
    assert_eq!(db.typify_item(alias), Type::Unknown);
    let id = fixture.tree().root().named_child(2).unwrap();
    assert_eq!(db.typify_item(id), Type::Primitive(PrimitiveType::U8));
}

#[test]
fn test_struct_types_are_nominal() {
    let fixture = Fixture::new(
        r#"
mod a { pub struct S; }
mod b { pub struct S; }
fn main() {
    let x = a::S;
    let y = b::S;
    let z = a::S;
}
"#,
    );
    let db = fixture.analysis();
    let source = fixture.tree().source();
    let binding = |name: &str| {
        let offset = source.find(&format!("let {name}")).unwrap() + 4;
        db.typify(fixture.tree().node_at(offset).unwrap())
    };
    let (x, y, z) = (binding("x"), binding("y"), binding("z"));
    assert_eq!(x.display(source).to_string(), "S");
    assert_eq!(y.display(source).to_string(), "S");
    assert_ne!(x, y);
    assert!(!x.matches(&y));
    assert!(x.matches(&z));
}
