//! The structural introspection capability.
//!
//! Every value that can be logged as a tree implements [`Introspect`]. The trait does not
//! build nodes itself; it only answers three questions the tree generator asks, in order:
//! is the value absent, what is its default text form, and what [`Shape`] does it have.
//!
//! Implementations exist for the standard scalars, strings, smart pointers, collections
//! and maps, tuples, and a handful of small value types from the crates we depend on.
//! User types get one through `#[derive(Introspect)]`.
use std::{
    any::type_name,
    fmt::Display,
    panic::{AssertUnwindSafe, catch_unwind},
};

#[cfg(feature = "serialize")]
use serde::Serialize;

use crate::error::IntrospectError;

mod ext;
mod impls;

/// The declared type of a value, as reported by [`std::any::type_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct TypeRef {
    name: &'static str,
}

impl TypeRef {
    /// Type reference of `T`.
    pub fn of<T: ?Sized>() -> Self {
        TypeRef {
            name: type_name::<T>(),
        }
    }

    /// Type reference with an explicit name, for types whose compiler name is unhelpful.
    pub const fn from_static(name: &'static str) -> Self {
        TypeRef { name }
    }

    /// Fully qualified type name, e.g. `alloc::vec::Vec<i32>`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Short name used as the label of composite nodes.
    ///
    /// Paths are reduced to their last segment and the generic arguments of the outer type
    /// are dropped (`alloc::vec::Vec<i32>` becomes `Vec`). Arrays, slices, tuples and
    /// references keep their punctuation, with every inner path shortened
    /// (`[alloc::string::String; 2]` becomes `[String; 2]`).
    pub fn simple_name(&self) -> String {
        let starts_with_path = self
            .name
            .starts_with(|c: char| c.is_alphabetic() || c == '_');

        if starts_with_path {
            let base = self.name.split('<').next().unwrap_or(self.name);
            base.rsplit("::").next().unwrap_or(base).to_string()
        } else {
            shorten_paths(self.name)
        }
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

fn shorten_paths(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("::") {
            // Drop the segment just written, only the last one survives.
            let keep = out
                .trim_end_matches(|c: char| c.is_alphanumeric() || c == '_')
                .len();
            out.truncate(keep);
            rest = after;
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    out
}

/// A value that can describe its own structure to the tree generator.
///
/// Only [`shape`](Introspect::shape) is required. The defaults treat the value as present,
/// report `type_name::<Self>()` as its type, and use the full type name as its text, which is
/// what a depth-exhausted composite shows.
pub trait Introspect {
    /// Whether this value is the absence sentinel (`None`).
    fn is_null(&self) -> bool {
        false
    }

    /// The runtime type of the value.
    fn type_ref(&self) -> TypeRef {
        TypeRef::of::<Self>()
    }

    /// Default textual form of the value.
    fn text(&self) -> String {
        self.type_ref().name().to_string()
    }

    /// Structural description of the value.
    fn shape(&self) -> Shape<'_>;
}

/// Iterator over the elements of a collection.
pub type Elements<'a> = Box<dyn Iterator<Item = Item<'a>> + 'a>;

/// Iterator over the `(key, value)` entries of a dictionary.
pub type Entries<'a> = Box<dyn Iterator<Item = (Item<'a>, Item<'a>)> + 'a>;

/// What kind of value an [`Introspect`] implementor is.
pub enum Shape<'a> {
    /// The absence sentinel.
    Null,
    /// Floating point scalar, always rendered with two decimals.
    Float(f64),
    /// Atomic value rendered through [`Introspect::text`].
    Simple,
    /// Fieldless enum variant, carrying the variant name.
    Enum(&'static str),
    /// Key/value container.
    Dictionary(Entries<'a>),
    /// Ordered or unordered sequence.
    Collection(Elements<'a>),
    /// Anything with named members.
    Object(Members<'a>),
}

impl<'a> Shape<'a> {
    /// Collection shape over borrowed elements.
    pub fn collection<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: 'a,
        T: Introspect + 'a,
    {
        Shape::Collection(Box::new(elements.into_iter().map(Item::borrowed)))
    }

    /// Dictionary shape over borrowed entries.
    pub fn dictionary<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
        I::IntoIter: 'a,
        K: Introspect + 'a,
        V: Introspect + 'a,
    {
        Shape::Dictionary(Box::new(
            entries
                .into_iter()
                .map(|(k, v)| (Item::borrowed(k), Item::borrowed(v))),
        ))
    }

    /// Whether the shape describes an atomic leaf.
    pub fn is_simple(&self) -> bool {
        matches!(self, Shape::Float(_) | Shape::Simple)
    }
}

/// A child value yielded by a [`Shape`].
pub enum Item<'a> {
    /// Value borrowed from the parent.
    Ref(&'a dyn Introspect),
    /// Value computed while describing the parent.
    Owned(Box<dyn Introspect + 'a>),
    /// The value could not be obtained.
    Failed(IntrospectError),
}

impl<'a> Item<'a> {
    pub fn borrowed<T: Introspect + 'a>(value: &'a T) -> Self {
        Item::Ref(value)
    }

    pub fn owned<T: Introspect + 'a>(value: T) -> Self {
        Item::Owned(Box::new(value))
    }

    /// Runs `compute`, turning a panic into [`Item::Failed`].
    pub fn computed<T, F>(compute: F) -> Self
    where
        T: Introspect + 'a,
        F: FnOnce() -> T,
    {
        match catch_unwind(AssertUnwindSafe(compute)) {
            Ok(value) => Item::owned(value),
            Err(payload) => Item::Failed(IntrospectError::from_panic(payload)),
        }
    }

    /// Runs a fallible getter for `member`, turning an error or a panic into [`Item::Failed`].
    pub fn fallible<T, E, F>(member: &str, compute: F) -> Self
    where
        T: Introspect + 'a,
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        match catch_unwind(AssertUnwindSafe(compute)) {
            Ok(Ok(value)) => Item::owned(value),
            Ok(Err(err)) => Item::Failed(IntrospectError::Getter {
                member: member.to_string(),
                message: err.to_string(),
            }),
            Err(payload) => Item::Failed(IntrospectError::from_panic(payload)),
        }
    }

    /// The value, or the reason it is missing.
    pub fn value(&self) -> Result<&dyn Introspect, &IntrospectError> {
        match self {
            Item::Ref(value) => Ok(*value),
            Item::Owned(value) => Ok(&**value),
            Item::Failed(err) => Err(err),
        }
    }
}

/// One named member of an object.
pub struct Member<'a> {
    name: &'static str,
    item: Item<'a>,
}

impl<'a> Member<'a> {
    pub fn new(name: &'static str, item: Item<'a>) -> Self {
        Member { name, item }
    }

    /// A stored field.
    pub fn field<T: Introspect + 'a>(name: &'static str, value: &'a T) -> Self {
        Member::new(name, Item::borrowed(value))
    }

    /// A computed property. A panicking getter yields a failed member.
    pub fn property<T, F>(name: &'static str, getter: F) -> Self
    where
        T: Introspect + 'a,
        F: FnOnce() -> T,
    {
        Member::new(name, Item::computed(getter))
    }

    /// A computed property whose getter can fail.
    pub fn try_property<T, E, F>(name: &'static str, getter: F) -> Self
    where
        T: Introspect + 'a,
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        Member::new(name, Item::fallible(name, getter))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn item(&self) -> &Item<'a> {
        &self.item
    }
}

/// Members of an object, fields first and then properties, in declaration order.
pub struct Members<'a> {
    variant: Option<&'static str>,
    members: Vec<Member<'a>>,
}

impl<'a> Members<'a> {
    pub fn new(members: Vec<Member<'a>>) -> Self {
        Members {
            variant: None,
            members,
        }
    }

    /// Members of a data-carrying enum variant.
    pub fn variant(name: &'static str, members: Vec<Member<'a>>) -> Self {
        Members {
            variant: Some(name),
            members,
        }
    }

    pub fn variant_name(&self) -> Option<&'static str> {
        self.variant
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Member<'a>> {
        self.members.iter()
    }
}

impl<'a> IntoIterator for Members<'a> {
    type Item = Member<'a>;
    type IntoIter = std::vec::IntoIter<Member<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_strips_paths_and_generics() {
        assert_eq!(TypeRef::of::<Vec<i32>>().simple_name(), "Vec");
        assert_eq!(
            TypeRef::of::<std::collections::HashMap<String, Vec<u8>>>().simple_name(),
            "HashMap"
        );
        assert_eq!(TypeRef::of::<String>().simple_name(), "String");
        assert_eq!(TypeRef::of::<i32>().simple_name(), "i32");
    }

    #[test]
    fn simple_name_keeps_punctuation() {
        assert_eq!(TypeRef::of::<[String; 2]>().simple_name(), "[String; 2]");
        assert_eq!(TypeRef::of::<(i32, String)>().simple_name(), "(i32, String)");
        assert_eq!(TypeRef::of::<[u8]>().simple_name(), "[u8]");
    }

    #[test]
    fn failing_getter_is_captured() {
        let item = Item::fallible("answer", || -> Result<i32, &str> { Err("no answer") });
        let err = item.value().err().cloned();
        assert_eq!(
            err,
            Some(IntrospectError::Getter {
                member: "answer".to_string(),
                message: "no answer".to_string(),
            })
        );
    }

    #[test]
    fn panicking_getter_is_captured() {
        let item = Item::computed(|| -> i32 { panic!("boom") });
        assert!(matches!(
            item.value(),
            Err(IntrospectError::Panicked { message }) if message == "boom"
        ));
    }
}
