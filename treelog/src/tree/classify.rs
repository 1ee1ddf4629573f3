//! Precedence-ordered classification of values.
//!
//! The order of the checks in [`classify`] is a contract: floats are caught before the
//! generic simple check, simple values before enums, and every structured shape only
//! once depth remains. Strings and vector-like values are structurally decomposable but
//! answer [`Shape::Simple`], which keeps them atomic.
use crate::introspect::{Elements, Entries, Introspect, Members, Shape};

/// The class a value falls into at a given remaining depth.
pub enum Class<'a> {
    Null,
    Shallow,
    Float(f64),
    Simple,
    Enum(&'static str),
    Dictionary(Entries<'a>),
    Collection(Elements<'a>),
    Object(Members<'a>),
}

/// Is `value` rendered atomically through its own text?
///
/// True for numeric and boolean primitives, strings, vector-like and color-like value
/// types; false for absent values and anything with structure.
pub fn is_simple(value: &dyn Introspect) -> bool {
    !value.is_null() && value.shape().is_simple()
}

/// Classifies `value` with `depth` levels of generation remaining.
pub fn classify(value: &dyn Introspect, depth: i32) -> Class<'_> {
    if value.is_null() {
        return Class::Null;
    }

    if depth <= 0 {
        return Class::Shallow;
    }

    match value.shape() {
        Shape::Null => Class::Null,
        Shape::Float(f) => Class::Float(f),
        Shape::Simple => Class::Simple,
        Shape::Enum(name) => Class::Enum(name),
        Shape::Dictionary(entries) => Class::Dictionary(entries),
        Shape::Collection(elements) => Class::Collection(elements),
        Shape::Object(members) => Class::Object(members),
    }
}
