//! [`Introspect`] for standard library types.
use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque},
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
    time::Duration,
};

use super::{Introspect, Member, Members, Shape, TypeRef};

macro_rules! impl_simple {
    ( $( $t:ty ),* $(,)? ) => {
        $(
            impl Introspect for $t {
                fn text(&self) -> String {
                    self.to_string()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Simple
                }
            }
        )*
    };
}

impl_simple!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, str, String,
);

macro_rules! impl_float {
    ( $( $t:ty ),* ) => {
        $(
            impl Introspect for $t {
                fn text(&self) -> String {
                    self.to_string()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Float(f64::from(*self))
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl Introspect for Cow<'_, str> {
    fn text(&self) -> String {
        self.to_string()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Simple
    }
}

impl Introspect for () {
    fn text(&self) -> String {
        "()".to_string()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Simple
    }
}

impl Introspect for Path {
    fn text(&self) -> String {
        self.display().to_string()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Simple
    }
}

impl Introspect for PathBuf {
    fn text(&self) -> String {
        self.display().to_string()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Simple
    }
}

impl Introspect for Duration {
    fn text(&self) -> String {
        format!("{self:?}")
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Simple
    }
}

impl<T: Introspect> Introspect for Option<T> {
    fn is_null(&self) -> bool {
        match self {
            Some(value) => value.is_null(),
            None => true,
        }
    }

    fn type_ref(&self) -> TypeRef {
        match self {
            Some(value) => value.type_ref(),
            None => TypeRef::of::<Self>(),
        }
    }

    fn text(&self) -> String {
        match self {
            Some(value) => value.text(),
            None => "null".to_string(),
        }
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => value.shape(),
            None => Shape::Null,
        }
    }
}

// Pointers are transparent: the tree describes the pointee.
macro_rules! impl_deref {
    ( $( $ptr:ty ),* ) => {
        $(
            impl<T: Introspect + ?Sized> Introspect for $ptr {
                fn is_null(&self) -> bool {
                    (**self).is_null()
                }

                fn type_ref(&self) -> TypeRef {
                    (**self).type_ref()
                }

                fn text(&self) -> String {
                    (**self).text()
                }

                fn shape(&self) -> Shape<'_> {
                    (**self).shape()
                }
            }
        )*
    };
}

impl_deref!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<T: Introspect> Introspect for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::collection(self)
    }
}

impl<T: Introspect, const N: usize> Introspect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::collection(self)
    }
}

macro_rules! impl_collection {
    ( $( $coll:ident < T $(, $extra:ident )? > ),* ) => {
        $(
            impl<T: Introspect $(, $extra )?> Introspect for $coll<T $(, $extra )?> {
                fn shape(&self) -> Shape<'_> {
                    Shape::collection(self.iter())
                }
            }
        )*
    };
}

impl_collection!(
    Vec<T>,
    VecDeque<T>,
    LinkedList<T>,
    BinaryHeap<T>,
    BTreeSet<T>,
    HashSet<T, S>
);

impl<K: Introspect, V: Introspect, S> Introspect for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::dictionary(self.iter())
    }
}

impl<K: Introspect, V: Introspect> Introspect for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::dictionary(self.iter())
    }
}

macro_rules! impl_tuple {
    ( $( ( $( $idx:tt $name:ident ),+ ) )+ ) => {
        $(
            impl<$( $name: Introspect ),+> Introspect for ( $( $name, )+ ) {
                fn shape(&self) -> Shape<'_> {
                    Shape::Object(Members::new(vec![
                        $( Member::field(stringify!($idx), &self.$idx) ),+
                    ]))
                }
            }
        )+
    };
}

impl_tuple! {
    (0 A)
    (0 A, 1 B)
    (0 A, 1 B, 2 C)
    (0 A, 1 B, 2 C, 3 D)
    (0 A, 1 B, 2 C, 3 D, 4 E)
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F)
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G)
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H)
}
