mod ordered_map;
mod unique_collection;

pub use ordered_map::{Entries, Keys, OrderedMap};
pub use unique_collection::{IntoIter, Iter, UniqueCollection};
