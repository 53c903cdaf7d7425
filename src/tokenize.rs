//! Character-level HTML lexer.
//!
//! Produces a flat stream of tag and text tokens. Doctype declarations and
//! other `<!...>` markup are consumed and discarded. Tag and attribute
//! names are lowercased so the rest of the pipeline can match on them
//! directly.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use crate::ast::{is_void_element, AttributeMap};

/// Result alias for lexer operations.
pub type Result<T> = std::result::Result<T, TokenizeError>;

/// Errors produced while lexing HTML source.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A tag was both closing and self-closing (`</x/>`).
    #[error("malformed tag")]
    Malformed,
    /// A `<` was not followed by a tag name.
    #[error("missing tag name")]
    MissingTagName,
    /// A different character was required at this position.
    #[error("expected `{expected}` but got `{actual}`")]
    UnexpectedChar {
        /// The character the lexer required.
        expected: char,
        /// The character actually found.
        actual: char,
    },
    /// The source ended in the middle of a token.
    #[error("unexpected end of input")]
    UnexpectedEof,
}

/// A single lexed token.
#[derive(Debug, PartialEq, Eq)]
pub enum Token {
    /// An open, close, or void tag.
    Tag(Tag),
    /// Character data between tags, kept verbatim.
    Text(String),
}

/// Whether a tag opens, closes, or stands alone.
#[derive(Debug, PartialEq, Eq)]
pub enum TagKind {
    /// `<name>`
    Open,
    /// `</name>`
    Close,
    /// `<name/>` or an HTML void element.
    Void,
}

/// A lexed tag with its attributes.
#[derive(Debug, PartialEq, Eq)]
pub struct Tag {
    /// Lowercased tag name.
    pub name: String,
    /// Open, close, or void.
    pub kind: TagKind,
    /// Lowercased attribute names and values.
    pub attributes: AttributeMap,
}

/// Lexes an HTML source string into tokens.
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { chars: source.chars().peekable() }
    }

    /// Consumes the source and returns all tokens.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenizeError`] when the source is not lexable HTML.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            if self.chars.peek().is_none() {
                break;
            }
            if let Some(token) = self.read_token()? {
                tokens.push(token);
            }
        }

        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_ascii_whitespace()).is_some() {}
    }

    /// Reads one token; `None` for discarded `<!...>` markup.
    fn read_token(&mut self) -> Result<Option<Token>> {
        if self.consume_char('<') {
            if self.consume_char('!') {
                self.skip_markup_declaration()?;
                Ok(None)
            } else {
                self.read_tag().map(Some)
            }
        } else {
            self.read_text().map(Some)
        }
    }

    fn skip_markup_declaration(&mut self) -> Result<()> {
        loop {
            match self.chars.next() {
                Some('>') => return Ok(()),
                Some(_) => continue,
                None => return Err(TokenizeError::UnexpectedEof),
            }
        }
    }

    fn read_tag(&mut self) -> Result<Token> {
        let leading_slash = self.consume_char('/');
        let name = self.read_tag_name()?;
        let (attributes, trailing_slash) = self.read_attributes()?;

        let kind = if leading_slash && trailing_slash {
            return Err(TokenizeError::Malformed);
        } else if leading_slash {
            TagKind::Close
        } else if trailing_slash || is_void_element(&name) {
            TagKind::Void
        } else {
            TagKind::Open
        };

        Ok(Token::Tag(Tag { name, kind, attributes }))
    }

    fn read_tag_name(&mut self) -> Result<String> {
        let mut name = String::new();
        loop {
            match self.chars.peek() {
                Some(c) if c.is_alphanumeric() => {
                    name.push(*c);
                    self.chars.next();
                }
                Some(_) => break,
                None => return Err(TokenizeError::UnexpectedEof),
            }
        }

        if name.is_empty() {
            Err(TokenizeError::MissingTagName)
        } else {
            Ok(name.to_ascii_lowercase())
        }
    }

    /// Reads attributes up to and including the closing `>`.
    ///
    /// Returns the attributes and whether the tag ended with `/>`.
    fn read_attributes(&mut self) -> Result<(AttributeMap, bool)> {
        let mut attributes = AttributeMap::new();

        loop {
            self.skip_whitespace();

            if self.consume_char('/') {
                self.skip_whitespace();
                self.expect_char('>')?;
                return Ok((attributes, true));
            }
            if self.consume_char('>') {
                return Ok((attributes, false));
            }

            let name = self.read_attribute_name()?;
            if name.is_empty() {
                return Err(TokenizeError::Malformed);
            }
            let value =
                if self.consume_char('=') { Some(self.read_attribute_value()?) } else { None };
            attributes.insert(name, value);
        }
    }

    fn read_attribute_name(&mut self) -> Result<String> {
        let mut name = String::new();
        loop {
            match self.chars.peek() {
                Some(&c) if c.is_ascii_alphanumeric() || c == '-' || c == '_' => {
                    name.push(c);
                    self.chars.next();
                }
                Some(_) => break,
                None => return Err(TokenizeError::UnexpectedEof),
            }
        }
        Ok(name.to_lowercase())
    }

    fn read_attribute_value(&mut self) -> Result<String> {
        let mut value = String::new();
        self.expect_char('"')?;
        loop {
            match self.chars.next() {
                Some('"') => break,
                Some(c) => value.push(c),
                None => return Err(TokenizeError::UnexpectedEof),
            }
        }
        Ok(value.to_lowercase())
    }

    fn read_text(&mut self) -> Result<Token> {
        let mut content = String::new();
        while let Some(c) = self.chars.next_if(|c| *c != '<') {
            content.push(c);
        }
        Ok(Token::Text(content))
    }

    fn consume_char(&mut self, expected: char) -> bool {
        self.chars.next_if(|c| *c == expected).is_some()
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.chars.next() {
            Some(actual) if actual == expected => Ok(()),
            Some(actual) => Err(TokenizeError::UnexpectedChar { expected, actual }),
            None => Err(TokenizeError::UnexpectedEof),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Result<Vec<Token>> {
        Tokenizer::new(source).tokenize()
    }

    fn tag(name: &str, kind: TagKind) -> Token {
        Token::Tag(Tag { name: name.to_string(), kind, attributes: AttributeMap::new() })
    }

    #[test]
    fn empty_source_yields_no_tokens() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn doctype_is_discarded() {
        assert_eq!(tokenize("<!DOCTYPE html>").unwrap(), vec![]);
        assert_eq!(tokenize("<!DOCTYPE html>\n<html>").unwrap(), vec![tag("html", TagKind::Open)]);
    }

    #[test]
    fn open_and_close_tags() {
        assert_eq!(
            tokenize("<html></html>").unwrap(),
            vec![tag("html", TagKind::Open), tag("html", TagKind::Close)]
        );
    }

    #[test]
    fn self_closing_tag_is_void() {
        assert_eq!(tokenize("<hr/>").unwrap(), vec![tag("hr", TagKind::Void)]);
    }

    #[test]
    fn tag_names_are_lowercased() {
        assert_eq!(tokenize("<HTML>").unwrap(), vec![tag("html", TagKind::Open)]);
    }

    #[test]
    fn void_elements_need_no_slash() {
        for name in
            ["area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr"]
        {
            let source = format!("<{name}>");
            assert_eq!(tokenize(&source).unwrap(), vec![tag(name, TagKind::Void)]);
        }
    }

    #[test]
    fn closing_and_self_closing_is_malformed() {
        assert_eq!(tokenize("</foobar/>").unwrap_err(), TokenizeError::Malformed);
    }

    #[test]
    fn lone_open_bracket_is_unexpected_eof() {
        assert_eq!(tokenize("<").unwrap_err(), TokenizeError::UnexpectedEof);
    }

    #[test]
    fn empty_tag_is_missing_name() {
        assert_eq!(tokenize("<>").unwrap_err(), TokenizeError::MissingTagName);
    }

    #[test]
    fn unterminated_tag_is_unexpected_eof() {
        assert_eq!(tokenize("<a").unwrap_err(), TokenizeError::UnexpectedEof);
    }

    #[test]
    fn bare_text_is_a_text_token() {
        assert_eq!(tokenize("abcde").unwrap(), vec![Token::Text("abcde".to_string())]);
    }

    #[test]
    fn attributes_are_collected() {
        let tokens = tokenize("<img src=\"hello.png\" width=\"300\">").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Tag(Tag {
                name: "img".to_string(),
                kind: TagKind::Void,
                attributes: AttributeMap::from([
                    ("src".to_string(), Some("hello.png".to_string())),
                    ("width".to_string(), Some("300".to_string())),
                ]),
            })]
        );
    }

    #[test]
    fn boolean_attribute_has_no_value() {
        let tokens = tokenize("<input disabled>").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Tag(Tag {
                name: "input".to_string(),
                kind: TagKind::Void,
                attributes: AttributeMap::from([("disabled".to_string(), None)]),
            })]
        );
    }

    #[test]
    fn unquoted_attribute_value_is_rejected() {
        assert_eq!(
            tokenize("<a href=x>").unwrap_err(),
            TokenizeError::UnexpectedChar { expected: '"', actual: 'x' }
        );
    }
}
