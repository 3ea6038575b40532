use crate::{
    error::Result,
    record::{Fields, Record},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub title: String,
    pub author: String,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }
}

impl Fields for Book {
    fn to_record(&self) -> Record {
        Record::new()
            .with("title", self.title.as_str())
            .with("author", self.author.as_str())
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            title: record.require_str("title")?.to_string(),
            author: record.require_str("author")?.to_string(),
        })
    }
}
