//! Limelight CSS - selector model and parsing
//!
//! This crate provides the CSS selector subset used by the limelight
//! inspection engine: selector lists, compound selectors, attribute
//! selectors, and the descendant/child combinators. It's designed to work
//! in no_std environments.

#![no_std]

extern crate alloc;

pub mod parser;
pub mod selector;

pub use parser::{ParseError, SelectorParser};
pub use selector::{
    AttributeOperator, CaseSensitivity, Combinator, Selector, SelectorComponent, SelectorList,
};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AttributeOperator, CaseSensitivity, Combinator, ParseError, Selector, SelectorComponent,
        SelectorList, SelectorParser,
    };
}
