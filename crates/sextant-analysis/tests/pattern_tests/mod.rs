use expect_test::expect;

use crate::support::Fixture;

#[test]
fn test_tuple_patterns() {
    let fixture = Fixture::new(
        r#"
fn main() {
    let (a, b) = (1, "x");
    let (first, .., last) = (1u8, 2u16, 3u32, 4u64);
    let (_, second) = (true, 'c');
    let (mut m, _) = (1i8, 2);
    let ((inner, _), outer) = ((1u16, 2), false);
    let (short, missing) = (1u8,);
    let (fewer, parts) = (1u8, "x", 2.0);
    let (c, d, e) = (1u8, 2u16);
    let (head, ..) = (1u8, 2u16);
    let (x, y, z, ..) = (1u8, 2u16);
}
"#,
    );
    expect![[r#"
        a: i32
        b: &str
        first: u8
        last: u64
        second: char
        m: i8
        inner: u16
        outer: bool
        short: <unknown>
        missing: <unknown>
        fewer: <unknown>
        parts: <unknown>
        c: <unknown>
        d: <unknown>
        e: <unknown>
        head: u8
        x: <unknown>
        y: <unknown>
        z: <unknown>"#]]
    .assert_eq(&fixture.binding_types());
}

#[test]
fn test_struct_patterns() {
    let fixture = Fixture::new(
        r#"
struct Point { x: i32, y: u8 }
fn main() {
    let Point { x, y: renamed } = Point { x: 1, y: 2 };
    let p = Point { x: 1, y: 2 };
    let Point { ref mut y, .. } = p;
    let Point { ref x, .. } = p;
    let Point { nothing, .. } = p;
}
"#,
    );
    expect![[r#"
        x: i32
        renamed: u8
        p: Point
        y: &mut u8
        x: &i32
        nothing: <unknown>"#]]
    .assert_eq(&fixture.binding_types());
}

#[test]
fn test_tuple_struct_and_variant_patterns() {
    let fixture = Fixture::new(
        r#"
struct Point { x: i32, y: u8 }
struct Wrapper(Point, bool);
enum Shape { Circle { radius: f64 }, Square(u32) }
fn main(w: Wrapper) {
    let Wrapper(inner, flag) = w;
    let Wrapper(.., last) = w;
    let shape: Shape = Shape::Square(3);
    let Shape::Circle { radius } = shape else { return };
    let Shape::Square(side) = shape else { return };
    let Wrapper(mismatched) = shape else { return };
    let Wrapper(alone) = w;
}
"#,
    );
    expect![[r#"
        w: Wrapper
        inner: Point
        flag: bool
        last: bool
        shape: Shape
        radius: f64
        side: u32
        mismatched: <unknown>
        alone: <unknown>"#]]
    .assert_eq(&fixture.binding_types());
}

#[test]
fn test_reference_and_binding_modes() {
    let fixture = Fixture::new(
        r#"
struct Point { x: i32, y: u8 }
fn main() {
    let p = Point { x: 1, y: 2 };
    let &(deref, _) = &(1u8, true);
    let ref borrowed = p;
    let ref mut exclusive = p;
    let whole @ Point { .. } = p;
    let mut counter = 0u64;
    let &not_a_reference = p;
}
"#,
    );
    expect![[r#"
        p: Point
        deref: u8
        borrowed: &Point
        exclusive: &mut Point
        whole: Point
        counter: u64
        not_a_reference: <unknown>"#]]
    .assert_eq(&fixture.binding_types());
}

#[test]
fn test_parameter_patterns() {
    let fixture = Fixture::new(
        r#"
struct S;
impl S {
    fn method(&self, (left, right): (u8, S), plain: &str) {}
}
fn free(count: i64) {}
"#,
    );
    expect![[r#"
        left: u8
        right: S
        plain: &str
        count: i64"#]]
    .assert_eq(&fixture.binding_types());
}

#[test]
fn test_annotation_wins_over_initializer() {
    let fixture = Fixture::new("fn main() { let a: u64 = 1; let (b, c): (u8, bool) = (1, true); }");
    expect![[r#"
        a: u64
        b: u8
        c: bool"#]]
    .assert_eq(&fixture.binding_types());
}

#[test]
fn test_bindings_outside_let_and_parameters_are_unknown() {
    let fixture = Fixture::new(
        r#"
fn main() {
    for item in (1, 2) {}
    match 1u8 {
        n => {}
    }
    if let (k, _) = (1, 2) {}
}
"#,
    );
    expect![[r#"
        item: <unknown>
        n: <unknown>
        k: <unknown>"#]]
    .assert_eq(&fixture.binding_types());
}
