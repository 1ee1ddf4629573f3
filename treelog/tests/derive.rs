use std::fmt;

use treelog::{Introspect, NodeKind, TreeGenerator, generate_tree, render};

#[derive(Introspect)]
#[introspect(property = "area", try_property = "aspect")]
pub struct Rect {
    pub width: u32,
    pub height: u32,
    pub(crate) tag: &'static str,
    #[allow(dead_code)]
    cache: u64,
}

impl Rect {
    fn new(width: u32, height: u32) -> Self {
        Rect {
            width,
            height,
            tag: "rect",
            cache: 0,
        }
    }

    fn area(&self) -> u32 {
        self.width * self.height
    }

    fn aspect(&self) -> Result<f64, String> {
        if self.height == 0 {
            return Err("zero height".to_string());
        }
        Ok(f64::from(self.width) / f64::from(self.height))
    }
}

#[derive(Introspect)]
#[introspect(private)]
struct Secret {
    id: u8,
    #[introspect(skip)]
    #[allow(dead_code)]
    password: String,
    #[introspect(rename = "display_name")]
    name: String,
}

#[derive(Introspect)]
#[introspect(property = "explode")]
pub struct Volatile {
    pub ok: bool,
}

impl Volatile {
    fn explode(&self) -> u8 {
        panic!("getter blew up")
    }
}

#[derive(Introspect)]
#[introspect(simple)]
pub struct Celsius(pub f32);

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

#[derive(Introspect)]
#[introspect(display)]
pub struct Pair(pub i32, pub i32);

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.0, self.1)
    }
}

#[derive(Introspect)]
pub enum Shape {
    Empty,
    Circle { radius: f32 },
    Line(i32, #[introspect(skip)] i32, i32),
}

#[derive(Introspect)]
pub struct Wrapper<T> {
    pub inner: T,
}

#[derive(Introspect)]
pub struct Node {
    pub name: String,
    pub children: Vec<Node>,
}

fn child_prefixes(node: &treelog::Node) -> Vec<&str> {
    node.children().iter().filter_map(|c| c.prefix()).collect()
}

#[test]
fn fields_then_properties_in_declaration_order() {
    let node = generate_tree(&Rect::new(4, 2));
    assert_eq!(node.kind(), NodeKind::Object);
    assert_eq!(node.label(), "Rect");
    assert_eq!(child_prefixes(&node), ["width", "height", "tag", "area", "aspect"]);
    assert_eq!(node.children()[3].label(), "8");
    assert_eq!(node.children()[4].label(), "2.00");
}

#[test]
fn failing_property_becomes_error_leaf() {
    let node = generate_tree(&Rect::new(4, 0));
    let aspect = &node.children()[4];
    assert!(aspect.is_error());
    assert!(aspect.is_leaf());
    assert_eq!(aspect.label(), "<error: `aspect` failed: zero height>");
    // Siblings are unaffected.
    assert_eq!(node.children()[3].label(), "0");
}

#[test]
fn panicking_property_is_contained() {
    let node = generate_tree(&Volatile { ok: true });
    assert_eq!(child_prefixes(&node), ["ok", "explode"]);
    assert_eq!(node.children()[0].label(), "true");
    assert_eq!(node.children()[1].label(), "<error: panicked: getter blew up>");
    assert!(render(&node).contains("explode: <error: panicked: getter blew up>"));
}

#[test]
fn panics_are_contained_even_without_generator_containment() {
    let node = TreeGenerator::new()
        .with_contain_panics(false)
        .generate(&Volatile { ok: false });
    assert!(node.children()[1].is_error());
}

#[test]
fn private_skip_and_rename() {
    let node = generate_tree(&Secret {
        id: 3,
        password: "hunter2".to_string(),
        name: "Ada".to_string(),
    });
    assert_eq!(child_prefixes(&node), ["id", "display_name"]);
    assert!(!node.matches_query("hunter2"));
}

#[test]
fn simple_types_are_atomic() {
    let node = generate_tree(&Celsius(21.5));
    assert_eq!(node.kind(), NodeKind::Simple);
    assert_eq!(node.label(), "21.5°C");
}

#[test]
fn display_sets_shallow_text() {
    let node = TreeGenerator::new().with_max_depth(0).generate(&Pair(1, 2));
    assert_eq!(node.kind(), NodeKind::Shallow);
    assert_eq!(node.label(), "<1, 2>");

    let node = generate_tree(&Pair(1, 2));
    assert_eq!(child_prefixes(&node), ["0", "1"]);
}

#[test]
fn enum_variants() {
    let node = generate_tree(&Shape::Empty);
    assert_eq!(node.kind(), NodeKind::Enum);
    assert_eq!(node.label(), "Empty");

    let node = generate_tree(&Shape::Circle { radius: 1.5 });
    assert_eq!(node.kind(), NodeKind::Object);
    assert_eq!(node.label(), "Shape::Circle");
    assert_eq!(render(&node), "Shape::Circle: {\n  radius: 1.50\n}");

    let node = generate_tree(&Shape::Line(1, 2, 3));
    assert_eq!(child_prefixes(&node), ["0", "2"]);

    let shallow = TreeGenerator::new().with_max_depth(0).generate(&Shape::Line(1, 2, 3));
    assert_eq!(shallow.label(), "Line");
}

#[test]
fn generic_structs() {
    let node = generate_tree(&Wrapper { inner: vec![1u8] });
    assert_eq!(node.label(), "Wrapper");
    assert_eq!(node.children()[0].label(), "Vec");
}

#[test]
fn recursive_structures_are_cut_by_depth() {
    fn chain(depth: usize) -> Node {
        Node {
            name: format!("level{depth}"),
            children: if depth == 0 { vec![] } else { vec![chain(depth - 1)] },
        }
    }

    let tree = TreeGenerator::new().with_max_depth(4).generate(&chain(20));
    assert!(tree.height() <= 5);
    assert!(tree.matches_query("level20"));
    assert!(!tree.matches_query("level10"));
}
