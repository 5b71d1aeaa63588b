//! Typed collection accessors.
//!
//! Each accessor borrows a [`DocumentStore`](crate::DocumentStore) and
//! exposes the operations its collection supports, with that collection's
//! identity and uniqueness rules:
//!
//! | Accessor       | list | get | add | remove                        |
//! |----------------|------|-----|-----|-------------------------------|
//! | [`Categories`] | yes  | id  | unique name | by name, `NotFound` if absent |
//! | [`Favorites`]  | yes  | -   | always appends | every matching pair, no-op if absent |
//! | [`Products`]   | yes  | -   | -   | -                             |

mod categories;
mod favorites;
mod products;

pub use categories::Categories;
pub use favorites::Favorites;
pub use products::Products;
