//! Insertion-ordered containers and a console walkthrough of them.
//!
//! [`OrderedMap`] keeps key-value pairs in the order keys were first set, and
//! [`UniqueCollection`] keeps distinct values in the order they were first
//! added. [`Record`] models a plain object whose fields can move into a map
//! and back.

pub mod collections;
pub mod demo;
pub mod error;
pub mod record;
pub mod render;

pub use collections::{OrderedMap, UniqueCollection};
pub use error::{RecordError, Result};
pub use record::{Fields, Record, Value};
