use std::{borrow::Cow, sync::Arc};

use logos::{Lexer, Logos};
use tracing::trace;

use super::{Location, Record, Value};
use crate::error::{RecordError, Result};

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(subpattern decimal = r"[0-9][_0-9]*")]
#[logos(subpattern exp = r"[eE][+-]?[0-9][_0-9]*")]
enum LiteralToken {
    #[regex(r"[\p{XID_Start}_$][\p{XID_Continue}$]*")]
    Ident,

    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,

    #[regex(r#"'([^'\\]|\\.)*'"#)]
    SingleQuoted,

    #[regex("-?(?&decimal)")]
    Integer,

    #[regex(r"-?(?&decimal)\.(?&decimal)(?&exp)?")]
    #[regex(r"-?(?&decimal)(?&exp)")]
    Float,

    #[regex(r"//[^\r\n]*", logos::skip)]
    LineComment,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,
}

struct Cursor<'a> {
    lexer: Lexer<'a, LiteralToken>,

    // Tracking the current location
    line: u32,
    column: u32,
    index: u32,

    token_start: Location,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            lexer: LiteralToken::lexer(source),
            line: 1,
            column: 1,
            index: 0,
            token_start: Location::start(),
        }
    }

    /// Advances the line/column counters up to `index`, which must not be
    /// behind the current position.
    fn update_location(&mut self, index: u32) -> Location {
        assert!(index >= self.index);
        let source = self.lexer.source();

        for char in source[self.index as usize..index as usize].chars() {
            if char == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.index = index;

        Location::new(self.line, self.column, self.index)
    }

    fn next_token(&mut self) -> Result<Option<LiteralToken>> {
        let Some(token) = self.lexer.next() else {
            let end = self.lexer.source().len() as u32;
            self.token_start = self.update_location(end);
            return Ok(None);
        };

        let span = self.lexer.span();
        self.token_start = self.update_location(span.start as u32);
        self.update_location(span.end as u32);

        match token {
            Ok(token) => Ok(Some(token)),
            Err(()) => Err(self.error(format!("Unexpected input {:?}", self.slice()))),
        }
    }

    /// Like `next_token`, but running out of input is an error.
    fn require(&mut self, what: &str) -> Result<LiteralToken> {
        match self.next_token()? {
            Some(token) => Ok(token),
            None => Err(self.error(format!("Expected {what}, found end of input"))),
        }
    }

    fn slice(&self) -> &str {
        self.lexer.slice()
    }

    fn error(&self, message: impl Into<Cow<'static, str>>) -> RecordError {
        RecordError::syntax(self.token_start, message)
    }
}

/// Parses a record literal such as `{ title: "Gatsby", 'page count': 180 }`.
pub fn parse_record(source: &str) -> Result<Record> {
    let mut cursor = Cursor::new(source);

    if cursor.require("`{`")? != LiteralToken::LBrace {
        return Err(cursor.error("Expected `{`"));
    }

    let mut record = Record::new();
    loop {
        let name: Arc<str> = match cursor.require("a field name or `}`")? {
            LiteralToken::RBrace => break,
            LiteralToken::Ident => cursor.slice().into(),
            LiteralToken::DoubleQuoted | LiteralToken::SingleQuoted => {
                unquote(cursor.slice()).into()
            }
            _ => return Err(cursor.error("Expected a field name")),
        };

        if cursor.require("`:`")? != LiteralToken::Colon {
            return Err(cursor.error("Expected `:` after field name"));
        }

        let value = parse_value(&mut cursor)?;
        trace!(field = %name, kind = value.kind(), "parsed field");
        record.set(name, value);

        match cursor.require("`,` or `}`")? {
            LiteralToken::Comma => continue,
            LiteralToken::RBrace => break,
            _ => return Err(cursor.error("Expected `,` or `}`")),
        }
    }

    if cursor.next_token()?.is_some() {
        return Err(cursor.error("Unexpected input after the closing `}`"));
    }

    Ok(record)
}

fn parse_value(cursor: &mut Cursor) -> Result<Value> {
    let token = cursor.require("a value")?;
    let slice = cursor.slice();

    let value = match token {
        LiteralToken::DoubleQuoted | LiteralToken::SingleQuoted => {
            Value::String(unquote(slice).into())
        }
        LiteralToken::Integer => match slice.replace('_', "").parse() {
            Ok(integer) => Value::Integer(integer),
            Err(_) => return Err(cursor.error("Integer literal out of range")),
        },
        LiteralToken::Float => match slice.replace('_', "").parse() {
            Ok(float) => Value::Float(float),
            Err(_) => return Err(cursor.error("Malformed float literal")),
        },
        LiteralToken::Ident => match slice {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            "null" => Value::Null,
            other => return Err(cursor.error(format!("Unknown value `{other}`"))),
        },
        _ => return Err(cursor.error("Expected a value")),
    };

    Ok(value)
}

/// Strips the surrounding quotes and resolves backslash escapes.
fn unquote(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());

    let mut chars = inner.chars();
    while let Some(char) = chars.next() {
        if char != '\\' {
            out.push(char);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}
