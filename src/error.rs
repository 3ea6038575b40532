//! Errors raised while building or reading records.
//!
//! Container lookups never fail; a missing key is reported as `None`.

use std::{borrow::Cow, sync::Arc};

use thiserror::Error;

use crate::record::Location;

pub type Result<T> = std::result::Result<T, RecordError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Syntax error at {location}: {message}")]
    Syntax {
        location: Location,
        message: Cow<'static, str>,
    },

    #[error("Missing field `{0}`")]
    MissingField(Arc<str>),

    #[error("Field `{field}` expected {expected}, found {found}")]
    FieldType {
        field: Arc<str>,
        expected: &'static str,
        found: &'static str,
    },
}

impl RecordError {
    pub fn syntax(location: Location, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Syntax {
            location,
            message: message.into(),
        }
    }
}
