//! Record registration.
//!
//! A bindable record implements [`Spec`] by listing its fields in
//! declaration order, each with its [`Tags`] and a [`Slot`] pointing at the
//! field's storage. `#[derive(Spec)]` writes this impl; it can also be
//! written by hand:
//!
//! ```
//! use envspec::{Field, Slot, Spec, Tags};
//!
//! #[derive(Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl Spec for Server {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new(Tags::new("host").key("HOST").default("localhost"), Slot::Native(&mut self.host)),
//!             Field::new(Tags::new("port").key("PORT").required(), Slot::Native(&mut self.port)),
//!         ]
//!     }
//! }
//! ```

use crate::coerce::{Coerce, Kind};
use crate::tags::Tags;
use crate::value::Value;

/// A record whose fields can be bound from the environment or flags.
pub trait Spec {
    /// Every field of the record, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// Mutable access to one field's storage.
pub enum Slot<'a> {
    /// A primitive filled by the coercion switchboard.
    Native(&'a mut dyn Coerce),
    /// A type that parses its own text through [`Value`].
    Custom(&'a mut dyn Value),
}

impl Slot<'_> {
    /// Kind of the field behind this slot.
    pub fn kind(&self) -> Kind {
        match self {
            Slot::Native(target) => target.kind(),
            Slot::Custom(_) => Kind::Custom,
        }
    }
}

/// One field of a [`Spec`]: its declared tags and its storage.
pub struct Field<'a> {
    pub tags: Tags,
    pub slot: Slot<'a>,
}

impl<'a> Field<'a> {
    pub fn new(tags: Tags, slot: Slot<'a>) -> Self {
        Self { tags, slot }
    }
}
