//! [`Introspect`] for small value types of third-party crates.
//!
//! All of these render as simple leaves: they are structurally decomposable, but a date,
//! an identifier, a color or a 3-component vector reads better as one piece of text.
use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use super::{Introspect, Shape};

impl<Tz: TimeZone> Introspect for DateTime<Tz>
where
    Tz::Offset: Display,
{
    fn text(&self) -> String {
        self.to_string()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Simple
    }
}

macro_rules! impl_display_simple {
    ( $( $t:ty ),* ) => {
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

impl_display_simple!(NaiveDate, NaiveTime, NaiveDateTime, uuid::Uuid);

impl Introspect for termcolor::Color {
    fn text(&self) -> String {
        format!("{self:?}")
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Simple
    }
}

#[cfg(feature = "nalgebra")]
mod vectors {
    use super::{Introspect, Shape};
    use crate::{introspect::TypeRef, tree::format_float};

    /// A vector component, as shown inside `(x, y, z)`.
    trait Component {
        fn component_text(&self) -> String;
    }

    impl Component for f32 {
        fn component_text(&self) -> String {
            format_float(f64::from(*self))
        }
    }

    impl Component for f64 {
        fn component_text(&self) -> String {
            format_float(*self)
        }
    }

    impl Component for i32 {
        fn component_text(&self) -> String {
            self.to_string()
        }
    }

    fn vector_text<'a, C: Component + 'a>(components: impl Iterator<Item = &'a C>) -> String {
        let parts: Vec<String> = components.map(Component::component_text).collect();
        format!("({})", parts.join(", "))
    }

    macro_rules! impl_vector {
        ( $( $vec:ident < $t:ty > ),* ) => {
            $(
                impl Introspect for nalgebra::$vec<$t> {
                    fn type_ref(&self) -> TypeRef {
                        TypeRef::from_static(concat!(
                            "nalgebra::",
                            stringify!($vec),
                            "<",
                            stringify!($t),
                            ">"
                        ))
                    }

                    fn text(&self) -> String {
                        vector_text(self.iter())
                    }

                    fn shape(&self) -> Shape<'_> {
                        Shape::Simple
                    }
                }
            )*
        };
    }

    impl_vector!(
        Vector2<f32>,
        Vector3<f32>,
        Vector4<f32>,
        Vector2<f64>,
        Vector3<f64>,
        Vector4<f64>,
        Vector2<i32>,
        Vector3<i32>,
        Vector4<i32>
    );
}
