//! Template to render function compiler.
//!
//! The pipeline has three stages which run strictly in order:
//! [`parser`] turns template text into an [`ElementNode`] tree,
//! [`transformer`] normalizes attributes and text in place,
//! and [`codegen`] prints the tree as a nested `h(...)` call
//! wrapped in a tiny ES module. [`compiler::BaseCompiler`] ties them together.

use std::ops::Range;

#[cfg(feature = "serde")]
use serde::Serialize;

pub mod codegen;
pub mod compiler;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod transformer;
pub mod util;

pub use compiler::{compile, BaseCompiler, CompileOption};
pub use error::{CompilationError, CompilationErrorKind, ErrorHandler, VecErrorHandler};
pub use parser::{Attribute, ElementNode, Node, NodeKind, TextKind, TextNode};

// use plain &str here for now
pub type Name<'a> = &'a str;

#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Position {
    /// the 0-indexed byte offset in the source str
    pub offset: usize,
    /// the line number in the source code
    pub line: usize,
    /// the column number in the source code
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

impl From<SourceLocation> for Range<usize> {
    fn from(location: SourceLocation) -> Self {
        location.start.offset..location.end.offset
    }
}

#[cfg(test)]
#[macro_export]
macro_rules! cast {
    ($target: expr, $pat: path) => {{
        if let $pat(a) = $target {
            a
        } else {
            panic!("mismatch variant when cast to {}", stringify!($pat));
        }
    }};
}
