//! Selector parsing - tokenization of selector strings

use alloc::string::String;
use core::fmt;

use crate::selector::{
    AttributeOperator, CaseSensitivity, Combinator, Selector, SelectorComponent, SelectorList,
};

/// Selector parse error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Unexpected end of input
    UnexpectedEof,
    /// Unexpected token
    UnexpectedToken(String),
    /// Empty selector
    EmptySelector,
    /// Selector feature the engine does not understand (pseudo-classes etc.)
    UnsupportedSelector(String),
    /// Unclosed string
    UnclosedString,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedEof => write!(f, "Unexpected end of input"),
            ParseError::UnexpectedToken(t) => write!(f, "Unexpected token: {}", t),
            ParseError::EmptySelector => write!(f, "Empty selector"),
            ParseError::UnsupportedSelector(s) => write!(f, "Unsupported selector: {}", s),
            ParseError::UnclosedString => write!(f, "Unclosed string"),
        }
    }
}

/// Selector parser.
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a str) -> Self {
        SelectorParser { input, pos: 0 }
    }

    /// Parse a comma-separated selector list.
    pub fn parse_selector_list(&mut self) -> Result<SelectorList, ParseError> {
        let mut list = SelectorList::new();

        loop {
            self.skip_whitespace();
            let selector = self.parse_selector()?;
            list.push(selector);

            self.skip_whitespace();
            if self.peek_char() == Some(',') {
                self.consume_char();
            } else {
                break;
            }
        }

        if !self.is_eof() {
            return Err(ParseError::UnexpectedToken(
                self.input[self.pos..].into(),
            ));
        }

        Ok(list)
    }

    /// Parse a single selector.
    pub fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut selector = Selector::new();

        loop {
            // Whitespace between compound selectors is the descendant
            // combinator, unless an explicit combinator follows.
            let had_whitespace = self.skip_whitespace();

            match self.peek_char() {
                Some(',') | None => break,
                Some('>') => {
                    self.consume_char();
                    selector
                        .components
                        .push(SelectorComponent::Combinator(Combinator::Child));
                }
                Some(':') => {
                    return Err(ParseError::UnsupportedSelector(
                        self.input[self.pos..].into(),
                    ));
                }
                Some(_) => {
                    if had_whitespace
                        && !selector.components.is_empty()
                        && !selector
                            .components
                            .last()
                            .map(SelectorComponent::is_combinator)
                            .unwrap_or(false)
                    {
                        selector
                            .components
                            .push(SelectorComponent::Combinator(Combinator::Descendant));
                    }
                    selector.components.push(self.parse_simple_selector()?);
                }
            }
        }

        if selector.is_empty() {
            return Err(ParseError::EmptySelector);
        }
        if selector
            .components
            .last()
            .map(SelectorComponent::is_combinator)
            .unwrap_or(false)
        {
            return Err(ParseError::UnexpectedEof);
        }

        Ok(selector)
    }

    /// Parse one simple selector component.
    fn parse_simple_selector(&mut self) -> Result<SelectorComponent, ParseError> {
        match self.peek_char() {
            Some('*') => {
                self.consume_char();
                Ok(SelectorComponent::Universal)
            }
            Some('.') => {
                self.consume_char();
                let name = self.parse_ident()?;
                Ok(SelectorComponent::Class(name))
            }
            Some('#') => {
                self.consume_char();
                let name = self.parse_ident()?;
                Ok(SelectorComponent::Id(name))
            }
            Some('[') => self.parse_attribute_selector(),
            Some(c) if is_ident_start(c) => {
                let name = self.parse_ident()?;
                Ok(SelectorComponent::Type(name))
            }
            Some(c) => Err(ParseError::UnexpectedToken(alloc::format!("{}", c))),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    /// Parse an attribute selector.
    fn parse_attribute_selector(&mut self) -> Result<SelectorComponent, ParseError> {
        self.expect_char('[')?;
        self.skip_whitespace();

        let name = self.parse_ident()?;
        self.skip_whitespace();

        let (operator, value) = if self.peek_char() == Some(']') {
            (AttributeOperator::Exists, None)
        } else {
            let op = self.parse_attribute_operator()?;
            self.skip_whitespace();
            let value = self.parse_string_or_ident()?;
            (op, Some(value))
        };

        self.skip_whitespace();

        // Check for case sensitivity flag
        let case_sensitivity = if self.peek_char() == Some('i') || self.peek_char() == Some('I') {
            self.consume_char();
            self.skip_whitespace();
            CaseSensitivity::AsciiCaseInsensitive
        } else {
            CaseSensitivity::CaseSensitive
        };

        self.expect_char(']')?;

        Ok(SelectorComponent::Attribute {
            name,
            operator,
            value,
            case_sensitivity,
        })
    }

    /// Parse an attribute operator.
    fn parse_attribute_operator(&mut self) -> Result<AttributeOperator, ParseError> {
        match self.peek_char() {
            Some('=') => {
                self.consume_char();
                Ok(AttributeOperator::Equals)
            }
            Some('~') => {
                self.consume_char();
                self.expect_char('=')?;
                Ok(AttributeOperator::Includes)
            }
            Some('|') => {
                self.consume_char();
                self.expect_char('=')?;
                Ok(AttributeOperator::DashMatch)
            }
            Some('^') => {
                self.consume_char();
                self.expect_char('=')?;
                Ok(AttributeOperator::Prefix)
            }
            Some('$') => {
                self.consume_char();
                self.expect_char('=')?;
                Ok(AttributeOperator::Suffix)
            }
            Some('*') => {
                self.consume_char();
                self.expect_char('=')?;
                Ok(AttributeOperator::Substring)
            }
            Some(c) => Err(ParseError::UnexpectedToken(alloc::format!("{}", c))),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn consume_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        if self.consume_char() == Some(expected) {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken(alloc::format!(
                "expected '{}'",
                expected
            )))
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.consume_char();
                skipped = true;
            } else {
                break;
            }
        }
        skipped
    }

    fn parse_ident(&mut self) -> Result<String, ParseError> {
        let mut result = String::new();

        while let Some(c) = self.peek_char() {
            if is_ident_char(c) {
                result.push(c);
                self.consume_char();
            } else {
                break;
            }
        }

        if result.is_empty() {
            Err(ParseError::UnexpectedToken("expected identifier".into()))
        } else {
            Ok(result)
        }
    }

    fn parse_string_or_ident(&mut self) -> Result<String, ParseError> {
        match self.peek_char() {
            Some('"') | Some('\'') => self.parse_string(),
            _ => self.parse_ident(),
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let quote = self.consume_char().ok_or(ParseError::UnexpectedEof)?;
        let mut result = String::new();

        while let Some(c) = self.consume_char() {
            if c == quote {
                return Ok(result);
            } else if c == '\\' {
                if let Some(escaped) = self.consume_char() {
                    result.push(escaped);
                }
            } else {
                result.push(c);
            }
        }

        Err(ParseError::UnclosedString)
    }
}

/// Check if a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '-'
}

/// Check if a character can be part of an identifier.
fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}
