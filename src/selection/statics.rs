//! Static descriptors for generated code.
//!
//! Generated modules declare one `static` per descriptor. References are
//! plain `&'static` pointers to other statics, and statics may point at each
//! other in a cycle, so cyclic schemas need no special handling.
//!
//! ```
//! use schemamap::selection::StaticSelection;
//!
//! static UserMap: [StaticSelection; 2] = [
//!     StaticSelection::Field("name"),
//!     StaticSelection::Reference("posts", &PostMap),
//! ];
//! static PostMap: [StaticSelection; 2] = [
//!     StaticSelection::Field("title"),
//!     StaticSelection::Reference("author", &UserMap),
//! ];
//!
//! let tree = StaticSelection::resolve(&UserMap, 2);
//! assert_eq!(tree.len(), 2);
//! ```

use std::fmt;

use super::{Selection, SelectionElement};

#[derive(Clone, Copy)]
pub enum StaticSelection {
    Field(&'static str),
    Nested(&'static str, &'static [StaticSelection]),
    /// Another descriptor, possibly one that leads back here.
    Reference(&'static str, &'static [StaticSelection]),
}

// References compare by identity and print without their target, so cyclic
// statics never recurse.
impl PartialEq for StaticSelection {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StaticSelection::Field(a), StaticSelection::Field(b)) => a == b,
            (StaticSelection::Nested(a, xs), StaticSelection::Nested(b, ys)) => a == b && xs == ys,
            (StaticSelection::Reference(a, x), StaticSelection::Reference(b, y)) => {
                a == b && std::ptr::eq(*x, *y)
            }
            _ => false,
        }
    }
}

impl Eq for StaticSelection {}

impl fmt::Debug for StaticSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaticSelection::Field(name) => f.debug_tuple("Field").field(name).finish(),
            StaticSelection::Nested(name, children) => {
                f.debug_tuple("Nested").field(name).field(children).finish()
            }
            StaticSelection::Reference(name, _) => {
                write!(f, "Reference({:?}, ..)", name)
            }
        }
    }
}

impl StaticSelection {
    pub fn field_name(&self) -> &'static str {
        match self {
            StaticSelection::Field(name)
            | StaticSelection::Nested(name, _)
            | StaticSelection::Reference(name, _) => name,
        }
    }

    /// Convert static items into an owned, fully resolved selection.
    /// Same depth rules as [`DescriptorArena::resolve`](super::DescriptorArena::resolve).
    pub fn resolve(items: &[StaticSelection], depth: usize) -> Selection {
        items
            .iter()
            .map(|item| match *item {
                StaticSelection::Field(name) => SelectionElement::field(name),
                StaticSelection::Nested(name, children) => SelectionElement::nested(
                    name,
                    Self::resolve(children, depth.saturating_sub(1)),
                ),
                StaticSelection::Reference(name, target) if depth > 1 => {
                    SelectionElement::nested(name, Self::resolve(target, depth - 1))
                }
                StaticSelection::Reference(name, _) => SelectionElement::field(name),
            })
            .collect()
    }
}
