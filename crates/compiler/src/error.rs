use super::SourceLocation;
use std::cell::RefCell;
use std::error::Error;
use std::fmt;
use std::mem;
use std::rc::Rc;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum CompilationErrorKind {
    // parse errors
    MalformedStartTag,
    MalformedEndTag,
    MalformedAttribute,
    EofInTag,
    MissingInterpolationEnd,
    MissingEndTag,
    StackUnderflow,

    // transform errors
    AttributeSyntaxError,

    // codegen errors
    UnrecognizedNodeKind,
}

#[derive(Debug, Clone)]
pub struct CompilationError {
    pub kind: CompilationErrorKind,
    pub additional_message: Option<String>,
    pub location: SourceLocation,
}

impl CompilationError {
    pub fn new(kind: CompilationErrorKind) -> Self {
        Self {
            kind,
            additional_message: None,
            location: Default::default(),
        }
    }
    pub fn with_location(mut self, loc: SourceLocation) -> Self {
        self.location = loc;
        self
    }
    pub fn with_additional_message(mut self, msg: String) -> Self {
        self.additional_message = Some(msg);
        self
    }

    fn msg(&self) -> &'static str {
        msg(&self.kind)
    }
}

#[cold]
#[inline(never)]
fn msg(kind: &CompilationErrorKind) -> &'static str {
    use CompilationErrorKind::*;
    match *kind {
        MalformedStartTag => "Illegal tag name. Use '&lt;' to print '<'.",
        MalformedEndTag => "End tag name was expected.",
        MalformedAttribute => "Attribute name or value cannot be recognized.",
        EofInTag => "Unexpected EOF in tag.",
        MissingInterpolationEnd => "Interpolation end sign was not found.",
        MissingEndTag => "Element is missing end tag.",
        StackUnderflow => "End tag has no matching start tag.",
        AttributeSyntaxError => "Attribute is missing '=' and value: ",
        UnrecognizedNodeKind => "Node kind cannot be rendered: ",
    }
}

impl fmt::Display for CompilationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(additional) = &self.additional_message {
            write!(f, "{}{}", self.msg(), additional)
        } else {
            write!(f, "{}", self.msg())
        }
    }
}

impl Error for CompilationError {}

/// This trait handles recoverable errors found during parsing.
/// Fatal errors are returned as `Err` by each stage instead.
/// Rc/RefCell is a good way to implement ErrorHandler if
/// collecting errors in compilation pass is desired.
pub trait ErrorHandler {
    // cannot use mut ref due to borrow semantics
    // use RefCell as implementation
    fn on_error(&self, _: CompilationError) {}
}

#[derive(Clone, Default)]
pub struct VecErrorHandler {
    errors: Rc<RefCell<Vec<CompilationError>>>,
}

impl VecErrorHandler {
    pub fn has_error(&self) -> bool {
        !self.errors.borrow().is_empty()
    }
    /// drains collected errors in report order
    pub fn take_errors(&self) -> Vec<CompilationError> {
        mem::take(&mut *self.errors.borrow_mut())
    }
}

impl ErrorHandler for VecErrorHandler {
    fn on_error(&self, e: CompilationError) {
        self.errors.borrow_mut().push(e);
    }
}
