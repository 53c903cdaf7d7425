//! Recursive-descent parser from the token stream to a document tree.
//!
//! The parser accepts a full document (`<html>…</html>`) or any single
//! element as the root, so fragments like `<body>hello</body>` convert
//! without ceremony. Open tags must be closed by a same-named close tag.

use std::iter::Peekable;
use std::slice::Iter;

use thiserror::Error;

use crate::ast::{Element, Node};
use crate::tokenize::{TagKind, Token};

/// Result alias for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors produced while building the document tree.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token appeared where the grammar did not allow it.
    #[error("unexpected token")]
    UnexpectedToken,
    /// The token stream ended inside an open element.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// The source contained no elements at all.
    #[error("document contains no elements")]
    EmptyDocument,
}

/// Builds a document tree from lexed tokens.
pub struct Parser<'a> {
    tokens: Peekable<Iter<'a, Token>>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `tokens`.
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens: tokens.iter().peekable() }
    }

    /// Parses the tokens into a single root element.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the stream is empty, does not start
    /// with an element, or leaves trailing tokens after the root.
    pub fn parse(&mut self) -> Result<Node> {
        let root = match self.tokens.peek() {
            Some(Token::Tag(_)) => self.parse_element()?,
            Some(Token::Text(_)) => return Err(ParseError::UnexpectedToken),
            None => return Err(ParseError::EmptyDocument),
        };

        match self.tokens.next() {
            Some(_) => Err(ParseError::UnexpectedToken),
            None => Ok(root),
        }
    }

    fn parse_element(&mut self) -> Result<Node> {
        match self.tokens.next() {
            Some(Token::Tag(tag)) => match tag.kind {
                TagKind::Open => {
                    let children = self.parse_children()?;
                    self.expect_close(&tag.name)?;
                    Ok(Node::Element(Element::with_children(&tag.name, &tag.attributes, children)))
                }
                TagKind::Void => Ok(Node::Element(Element::new(&tag.name, &tag.attributes))),
                TagKind::Close => Err(ParseError::UnexpectedToken),
            },
            Some(Token::Text(_)) => Err(ParseError::UnexpectedToken),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    /// Parses child nodes until a close tag is seen (left unconsumed).
    fn parse_children(&mut self) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();

        loop {
            match self.tokens.peek() {
                Some(Token::Tag(tag)) if tag.kind == TagKind::Close => break,
                Some(Token::Tag(_)) => nodes.push(self.parse_element()?),
                Some(Token::Text(_)) => {
                    if let Some(Token::Text(content)) = self.tokens.next() {
                        nodes.push(Node::Text(content.clone()));
                    }
                }
                None => return Err(ParseError::UnexpectedEof),
            }
        }

        Ok(nodes)
    }

    fn expect_close(&mut self, name: &str) -> Result<()> {
        match self.tokens.next() {
            Some(Token::Tag(tag)) if tag.kind == TagKind::Close && tag.name == name => Ok(()),
            Some(_) => Err(ParseError::UnexpectedToken),
            None => Err(ParseError::UnexpectedEof),
        }
    }
}
