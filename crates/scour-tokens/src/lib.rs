//! Scour token pipeline
//!
//! HTML5 tokenization built on html5ever, plus the serializer that turns a
//! token stream back into well-formed markup. Policy decisions live one
//! crate up; this crate only knows about tokens.

mod serializer;
mod token;
mod tokenizer;

pub use serializer::{Serializer, serialize};
pub use token::{Attr, Token, is_rawtext, is_void};
pub use tokenizer::tokenize;
