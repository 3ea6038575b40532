//! Plain records: ordered lists of named, dynamically typed fields.
//!
//! A record converts to an [`OrderedMap`] keyed by field name and back again,
//! keeping the fields in their enumeration order. Typed structs take part
//! through the [`Fields`] trait.

use std::sync::Arc;

use crate::{
    collections::OrderedMap,
    error::{RecordError, Result},
};

mod literal;
mod location;
mod value;

pub use literal::parse_record;
pub use location::Location;
pub use value::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(Arc<str>, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn parse(source: &str) -> Result<Self> {
        parse_record(source)
    }

    /// Builds a record from the entries of a map, in the map's order.
    pub fn from_map(map: &OrderedMap<Arc<str>, Value>) -> Self {
        let fields = map
            .entries()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Self { fields }
    }

    pub fn to_map(&self) -> OrderedMap<Arc<str>, Value> {
        self.fields.iter().cloned().collect()
    }

    pub fn size(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sets a field. An existing field keeps its position.
    pub fn set(&mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();

        let index = self.fields.iter().position(|(n, _)| *n == name);
        if let Some(index) = index {
            self.fields[index].1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn with(mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(n, v)| if &**n == name { Some(v) } else { None })
    }

    pub fn fields(&self) -> impl '_ + Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (&**n, v))
    }

    pub fn require(&self, name: &str) -> Result<&Value> {
        self.get(name)
            .ok_or_else(|| RecordError::MissingField(name.into()))
    }

    pub fn require_str(&self, name: &str) -> Result<&str> {
        let value = self.require(name)?;
        value.as_str().ok_or_else(|| type_error(name, "string", value))
    }

    pub fn require_integer(&self, name: &str) -> Result<i64> {
        let value = self.require(name)?;
        value
            .as_integer()
            .ok_or_else(|| type_error(name, "integer", value))
    }

    pub fn require_float(&self, name: &str) -> Result<f64> {
        let value = self.require(name)?;
        value.as_float().ok_or_else(|| type_error(name, "float", value))
    }

    pub fn require_bool(&self, name: &str) -> Result<bool> {
        let value = self.require(name)?;
        value.as_bool().ok_or_else(|| type_error(name, "bool", value))
    }
}

fn type_error(name: &str, expected: &'static str, found: &Value) -> RecordError {
    RecordError::FieldType {
        field: name.into(),
        expected,
        found: found.kind(),
    }
}

impl<K: Into<Arc<str>>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.set(name, value);
        }
        record
    }
}

impl From<Record> for OrderedMap<Arc<str>, Value> {
    fn from(record: Record) -> Self {
        record.fields.into_iter().collect()
    }
}

impl From<OrderedMap<Arc<str>, Value>> for Record {
    fn from(map: OrderedMap<Arc<str>, Value>) -> Self {
        Self {
            fields: map.into_pairs(),
        }
    }
}

/// Typed structs that can be flattened into a [`Record`] and rebuilt from one.
pub trait Fields: Sized {
    fn to_record(&self) -> Record;

    fn from_record(record: &Record) -> Result<Self>;

    fn to_map(&self) -> OrderedMap<Arc<str>, Value> {
        self.to_record().into()
    }

    fn from_map(map: &OrderedMap<Arc<str>, Value>) -> Result<Self> {
        Self::from_record(&Record::from_map(map))
    }
}
