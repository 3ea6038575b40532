//! Console text for container contents.
//!
//! Top-level strings print bare; strings inside a container print quoted,
//! so `Set { 'Alice', 'Bob' }` reads differently from a single `Alice`.

use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
};

use crate::{
    collections::{OrderedMap, UniqueCollection},
    record::{Record, Value},
};

pub trait Render {
    fn render(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.render_nested(f)
    }

    /// Renders the value as an element of an enclosing container.
    fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result;
}

/// Adapts any [`Render`] value to [`Display`].
pub struct Rendered<'a, T: ?Sized>(&'a T);

pub fn rendered<T: Render + ?Sized>(value: &T) -> Rendered<'_, T> {
    Rendered(value)
}

impl<T: Render + ?Sized> Display for Rendered<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.render(f)
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self, f: &mut Formatter<'_>) -> fmt::Result {
        (**self).render(f)
    }

    fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result {
        (**self).render_nested(f)
    }
}

impl Render for str {
    fn render(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }

    /// Prefers single quotes, then double quotes, then backticks, picking
    /// the first one the text does not contain.
    fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let quote = ['\'', '"', '`']
            .into_iter()
            .find(|quote| !self.contains(*quote))
            .unwrap_or('\'');

        write!(f, "{quote}")?;
        for char in self.chars() {
            match char {
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\t' => f.write_str("\\t")?,
                other if other == quote => write!(f, "\\{other}")?,
                other => write!(f, "{other}")?,
            }
        }
        write!(f, "{quote}")
    }
}

impl Render for String {
    fn render(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.as_str().render(f)
    }

    fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.as_str().render_nested(f)
    }
}

impl Render for Arc<str> {
    fn render(&self, f: &mut Formatter<'_>) -> fmt::Result {
        (**self).render(f)
    }

    fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result {
        (**self).render_nested(f)
    }
}

macro_rules! render_with_display {
    ($($ty:ty),*) => {
        $(
            impl Render for $ty {
                fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

render_with_display!(bool, i32, i64, u32, u64, usize);

/// Non-finite values print by name; very large and very small magnitudes
/// switch to exponent form with an explicit sign (`1e+21`, `1e-7`).
impl Render for f64 {
    fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let x = *self;
        if x.is_nan() {
            return f.write_str("NaN");
        }
        if x.is_infinite() {
            return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
        }

        let magnitude = x.abs();
        if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
            let text = format!("{x:e}");
            return match text.split_once('e') {
                Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{mantissa}e+{exp}"),
                _ => f.write_str(&text),
            };
        }

        write!(f, "{x}")
    }
}

/// `None` is the absent marker and prints as `undefined`.
impl<T: Render> Render for Option<T> {
    fn render(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => value.render(f),
            None => f.write_str("undefined"),
        }
    }

    fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => value.render_nested(f),
            None => f.write_str("undefined"),
        }
    }
}

impl Render for Value {
    fn render(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => s.render(f),
            other => other.render_nested(f),
        }
    }

    fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => b.render_nested(f),
            Value::Integer(i) => i.render_nested(f),
            Value::Float(x) => x.render_nested(f),
            Value::String(s) => s.render_nested(f),
        }
    }
}

impl<T: Render> Render for [T] {
    fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            item.render_nested(f)?;
        }
        f.write_str("]")
    }
}

impl<T: Render> Render for Vec<T> {
    fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.as_slice().render_nested(f)
    }
}

impl<K: Render, V: Render> Render for OrderedMap<K, V> {
    fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result {
        render_braced(f, "Map ", self.entries(), |f, (k, v)| {
            k.render_nested(f)?;
            f.write_str(" => ")?;
            v.render_nested(f)
        })
    }
}

impl<T: Render> Render for UniqueCollection<T> {
    fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result {
        render_braced(f, "Set ", self.iter(), |f, item| item.render_nested(f))
    }
}

impl Render for Record {
    fn render_nested(&self, f: &mut Formatter<'_>) -> fmt::Result {
        render_braced(f, "", self.fields(), |f, (name, value)| {
            if is_identifier(name) {
                f.write_str(name)?;
            } else {
                name.render_nested(f)?;
            }
            f.write_str(": ")?;
            value.render_nested(f)
        })
    }
}

/// Writes `{prefix}{ a, b }`, or `{prefix}{}` when there are no items.
fn render_braced<I: Iterator>(
    f: &mut Formatter<'_>,
    prefix: &str,
    items: I,
    mut render_item: impl FnMut(&mut Formatter<'_>, I::Item) -> fmt::Result,
) -> fmt::Result {
    write!(f, "{prefix}{{")?;

    let mut empty = true;
    for item in items {
        f.write_str(if empty { " " } else { ", " })?;
        empty = false;
        render_item(f, item)?;
    }

    f.write_str(if empty { "}" } else { " }" })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
