//! The scripted walkthrough printed by the `ordkit` binary.
//!
//! Every step writes exactly one line (or one line per visited entry) to the
//! console. With annotations on, a `// caption` line precedes each step.

use std::io::{self, Write};

use auto_enums::auto_enum;
use clap::ValueEnum;
use const_format::concatcp;
use tracing::{debug, warn};

use crate::{
    collections::{OrderedMap, UniqueCollection},
    record::{Fields, Record},
    render::{rendered, Render},
};

mod book;

pub use book::Book;

const COMMENT: &str = "// ";

const MAP_ACCESS: &str = concatcp!(COMMENT, "Accessing values in a map");
const MAP_MODIFY: &str = concatcp!(COMMENT, "Modifying a value in a map");
const MAP_HAS: &str = concatcp!(COMMENT, "Checking if a key exists in a map");
const MAP_SIZE: &str = concatcp!(COMMENT, "Getting the number of entries in a map");
const MAP_FOR_EACH: &str = concatcp!(COMMENT, "Visiting each entry with a callback");
const MAP_ENTRIES: &str = concatcp!(COMMENT, "Iterating over the entries of a map");
const MAP_DELETE: &str = concatcp!(COMMENT, "Deleting an entry from a map");
const MAP_CLEAR: &str = concatcp!(COMMENT, "Clearing all entries from a map");

const SET_CREATE: &str = concatcp!(COMMENT, "Creating a set from a list with duplicates");
const SET_ADD: &str = concatcp!(COMMENT, "Adding a value to a set");
const SET_DELETE: &str = concatcp!(COMMENT, "Removing a value from a set");
const SET_SIZE: &str = concatcp!(COMMENT, "Getting the number of items in a set");
const SET_FOR_EACH: &str = concatcp!(COMMENT, "Visiting each item with a callback");
const SET_ITER: &str = concatcp!(COMMENT, "Iterating over a set");
const SET_CLEAR: &str = concatcp!(COMMENT, "Clearing all values from a set");

const CONVERT_DEDUP: &str = concatcp!(COMMENT, "Removing duplicates from a list through a set");
const CONVERT_TO_LIST: &str = concatcp!(COMMENT, "Converting a set to a list");
const CONVERT_TO_MAP: &str = concatcp!(COMMENT, "Converting a record to a map");
const CONVERT_TO_RECORD: &str = concatcp!(COMMENT, "Converting a map back to a record");

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Maps,
    Sets,
    Conversions,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Maps, Section::Sets, Section::Conversions];
}

#[derive(Debug, Clone, Default)]
pub struct DemoOptions {
    /// Run only this section instead of all of them.
    pub only: Option<Section>,
    pub annotate: bool,
}

#[auto_enum(Iterator)]
pub fn selected_sections(only: Option<Section>) -> impl Iterator<Item = Section> {
    match only {
        Some(section) => std::iter::once(section),
        None => Section::ALL.into_iter(),
    }
}

pub struct Console<W> {
    out: W,
    annotate: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, annotate: bool) -> Self {
        Self { out, annotate }
    }

    pub fn log<T: Render + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        writeln!(self.out, "{}", rendered(value))
    }

    fn note(&mut self, caption: &str) -> io::Result<()> {
        if self.annotate {
            writeln!(self.out, "{caption}")?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Runs the selected sections and hands back the writer.
pub fn run<W: Write>(out: W, options: &DemoOptions) -> io::Result<W> {
    let mut console = Console::new(out, options.annotate);

    for section in selected_sections(options.only) {
        debug!(?section, "running section");
        match section {
            Section::Maps => maps(&mut console)?,
            Section::Sets => sets(&mut console)?,
            Section::Conversions => conversions(&mut console)?,
        }
    }

    Ok(console.into_inner())
}

/// Prints `record` as a map and then rebuilds it from that map.
pub fn convert_record<W: Write>(console: &mut Console<W>, record: &Record) -> io::Result<()> {
    let map = record.to_map();
    console.note(CONVERT_TO_MAP)?;
    console.log(&map)?;

    let rebuilt = Record::from_map(&map);
    console.note(CONVERT_TO_RECORD)?;
    console.log(&rebuilt)?;

    if &rebuilt != record {
        warn!("record changed while passing through a map");
    }
    Ok(())
}

fn maps<W: Write>(console: &mut Console<W>) -> io::Result<()> {
    let mut grades = OrderedMap::new();
    grades.set("John", 85);
    grades.set("Jane", 92);
    grades.set("Sam", 78);

    console.note(MAP_ACCESS)?;
    console.log(&grades.get("Jane"))?;

    grades.set("John", 88);
    console.note(MAP_MODIFY)?;
    console.log(&grades.get("John"))?;

    console.note(MAP_HAS)?;
    console.log(&grades.has("Sam"))?;

    console.note(MAP_SIZE)?;
    console.log(&grades.size())?;

    console.note(MAP_FOR_EACH)?;
    let mut lines = Vec::new();
    grades.for_each(|grade, student| lines.push(format!("{student}: {grade}")));
    for line in &lines {
        console.log(line)?;
    }

    console.note(MAP_ENTRIES)?;
    for (student, grade) in grades.entries() {
        console.log(&format!("{student}: {grade}"))?;
    }

    grades.delete("Sam");
    console.note(MAP_DELETE)?;
    console.log(&grades.size())?;

    grades.clear();
    console.note(MAP_CLEAR)?;
    console.log(&grades.size())?;

    Ok(())
}

fn sets<W: Write>(console: &mut Console<W>) -> io::Result<()> {
    let mut names: UniqueCollection<&str> =
        ["Alice", "Bob", "Charlie", "Bob"].into_iter().collect();
    console.note(SET_CREATE)?;
    console.log(&names)?;

    names.add("David");
    console.note(SET_ADD)?;
    console.log(&names.has("David"))?;

    names.delete("Bob");
    console.note(SET_DELETE)?;
    console.log(&names)?;

    console.note(SET_SIZE)?;
    console.log(&names.size())?;

    console.note(SET_FOR_EACH)?;
    let mut visited = Vec::new();
    names.for_each(|name| visited.push(*name));
    for name in &visited {
        console.log(name)?;
    }

    console.note(SET_ITER)?;
    for name in &names {
        console.log(name)?;
    }

    names.clear();
    console.note(SET_CLEAR)?;
    console.log(&names.size())?;

    Ok(())
}

fn conversions<W: Write>(console: &mut Console<W>) -> io::Result<()> {
    let animals = ["dog", "cat", "dog", "bird", "cat"];
    let unique_animals = animals
        .into_iter()
        .collect::<UniqueCollection<_>>()
        .into_vec();
    console.note(CONVERT_DEDUP)?;
    console.log(&unique_animals)?;

    let set: UniqueCollection<_> = unique_animals.iter().copied().collect();
    console.note(CONVERT_TO_LIST)?;
    console.log(&set.to_vec())?;

    let book = Book::new("The Great Gatsby", "F. Scott Fitzgerald");
    let record = book.to_record();
    convert_record(console, &record)?;

    match Book::from_map(&record.to_map()) {
        Ok(rebuilt) => {
            let unchanged = rebuilt == book;
            debug!(unchanged, "rebuilt book from its map");
        }
        Err(err) => warn!(%err, "could not rebuild book from its map"),
    }

    Ok(())
}
