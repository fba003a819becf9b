//! Template parsing.
//! Matching and tree building are fused: a single left to right pass
//! keeps a stack of open elements and appends finished nodes to the stack top.
//! The first start tag becomes the [`NodeKind::Root`] and the pass stops once it closes.

use super::{
    error::{CompilationError, CompilationErrorKind as ErrorKind, ErrorHandler},
    scanner::Scanner,
    Name, Position, SourceLocation,
};
use log::{debug, trace, warn};
use rustc_hash::FxHashSet;
use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum NodeKind {
    Root,
    Element,
    // reserved for directive lowering, never produced by the parser
    If,
    For,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TextKind {
    PlainText,
    Interpolation,
}

/// One attribute occurrence on a start tag.
/// `field` and `value` are empty until the transformer fills them from `raw`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Attribute<'a> {
    pub is_dynamic: bool,
    /// full `name=value` text as matched
    pub raw: &'a str,
    pub field: Name<'a>,
    pub value: Cow<'a, str>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TextNode<'a> {
    pub kind: TextKind,
    /// raw text before transform, generated expression after it
    pub content: Cow<'a, str>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ElementNode<'a> {
    pub kind: NodeKind,
    pub tag_name: Name<'a>,
    pub attributes: Vec<Attribute<'a>>,
    pub children: Vec<Node<'a>>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Node<'a> {
    Element(ElementNode<'a>),
    Text(TextNode<'a>),
}

impl<'a> ElementNode<'a> {
    /// root of a template without any element
    pub fn empty_root() -> Self {
        Self {
            kind: NodeKind::Root,
            tag_name: "",
            attributes: vec![],
            children: vec![],
            location: Default::default(),
        }
    }
    pub fn is_empty_root(&self) -> bool {
        self.kind == NodeKind::Root && self.tag_name.is_empty()
    }
}

impl<'a> Node<'a> {
    pub fn get_element(&self) -> Option<&ElementNode<'a>> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }
    pub fn get_text(&self) -> Option<&TextNode<'a>> {
        match self {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }
    pub fn location(&self) -> &SourceLocation {
        match self {
            Node::Element(e) => &e.location,
            Node::Text(t) => &t.location,
        }
    }
}

#[derive(Clone)]
pub struct ParseOption {
    /// interpolation open and close signs
    pub delimiters: (String, String),
    /// any attribute name starting with one of these marks a binding
    pub binding_prefixes: FxHashSet<char>,
}

impl Default for ParseOption {
    fn default() -> Self {
        Self {
            delimiters: ("{{".into(), "}}".into()),
            binding_prefixes: [':'].iter().copied().collect(),
        }
    }
}

impl ParseOption {
    pub fn is_binding_name(&self, name: &str) -> bool {
        name.chars()
            .next()
            .map_or(false, |c| self.binding_prefixes.contains(&c))
    }
}

pub struct Parser {
    option: ParseOption,
}

impl Parser {
    pub fn new(option: ParseOption) -> Self {
        Self { option }
    }

    /// Builds the tree of `source`.
    /// Malformed markup is returned as `Err`. A stray end tag or unclosed
    /// elements are reported to `err_handle` and the tree built so far is returned.
    pub fn parse<'a, E>(&self, source: &'a str, err_handle: E) -> Result<ElementNode<'a>, CompilationError>
    where
        E: ErrorHandler,
    {
        let root = AstBuilder {
            scanner: Scanner::new(source),
            err_handle,
            option: &self.option,
            open_elems: vec![],
        }
        .build_ast()?;
        debug!(
            "parsed root <{}> with {} children",
            root.tag_name,
            root.children.len()
        );
        Ok(root)
    }
}

enum Progress<'a> {
    Continue,
    /// root element closed, trailing input is checked
    RootClosed(ElementNode<'a>),
    /// scanning stopped on an unrecoverable but reported error
    Aborted(ElementNode<'a>),
}

struct AstBuilder<'a, 'o, Eh: ErrorHandler> {
    scanner: Scanner<'a>,
    err_handle: Eh,
    option: &'o ParseOption,
    open_elems: Vec<ElementNode<'a>>,
}

impl<'a, 'o, Eh: ErrorHandler> AstBuilder<'a, 'o, Eh> {
    fn build_ast(mut self) -> Result<ElementNode<'a>, CompilationError> {
        loop {
            self.scanner.skip_whitespace();
            if self.scanner.is_empty() {
                return Ok(self.close_unfinished());
            }
            match self.parse_next()? {
                Progress::Continue => continue,
                Progress::RootClosed(root) => {
                    self.check_trailing();
                    return Ok(root);
                }
                Progress::Aborted(partial) => return Ok(partial),
            }
        }
    }

    fn parse_next(&mut self) -> Result<Progress<'a>, CompilationError> {
        let open = self.option.delimiters.0.as_str();
        if self.scanner.starts_with("</") {
            self.parse_end_tag()
        } else if self.scanner.starts_with("<") {
            self.parse_start_tag()
        } else if !open.is_empty() && self.scanner.starts_with(open) {
            self.parse_interpolation()?;
            Ok(Progress::Continue)
        } else {
            self.parse_text();
            Ok(Progress::Continue)
        }
    }

    fn parse_start_tag(&mut self) -> Result<Progress<'a>, CompilationError> {
        let start = self.scanner.current_position();
        let len = match self.scanner.match_tag_name() {
            Some(l) => l,
            None => return Err(self.error(ErrorKind::MalformedStartTag, 1)),
        };
        let tag_name = &self.scanner.move_by(len)[1..];
        let kind = if self.open_elems.is_empty() {
            NodeKind::Root
        } else {
            NodeKind::Element
        };
        trace!("start tag <{}> as {:?}", tag_name, kind);
        let mut elem = ElementNode {
            kind,
            tag_name,
            attributes: vec![],
            children: vec![],
            location: Default::default(),
        };
        let self_closing = loop {
            self.scanner.skip_whitespace();
            if self.scanner.is_empty() {
                let location = self.scanner.get_location_from(start);
                return Err(CompilationError::new(ErrorKind::EofInTag).with_location(location));
            }
            if let Some(l) = self.scanner.match_start_tag_close() {
                self.scanner.move_by(l);
                break l == 2;
            }
            let attr = self.parse_attribute()?;
            elem.attributes.push(attr);
        };
        elem.location = self.scanner.get_location_from(start);
        if !self_closing {
            self.open_elems.push(elem);
            return Ok(Progress::Continue);
        }
        if self.open_elems.is_empty() {
            return Ok(Progress::RootClosed(elem));
        }
        self.push_child(Node::Element(elem));
        Ok(Progress::Continue)
    }

    fn parse_attribute(&mut self) -> Result<Attribute<'a>, CompilationError> {
        let start = self.scanner.current_position();
        let len = match self.scanner.match_attribute() {
            Some(l) => l,
            None => return Err(self.error(ErrorKind::MalformedAttribute, 1)),
        };
        let raw = self.scanner.move_by(len);
        // the marker decides, not which pattern happened to match
        let is_dynamic = self.option.is_binding_name(raw);
        trace!("attribute `{}` dynamic: {}", raw, is_dynamic);
        Ok(Attribute {
            is_dynamic,
            raw,
            field: "",
            value: Cow::Borrowed(""),
            location: self.scanner.get_location_from(start),
        })
    }

    fn parse_end_tag(&mut self) -> Result<Progress<'a>, CompilationError> {
        let start = self.scanner.current_position();
        let (name, len) = match self.scanner.match_end_tag() {
            Some(m) => m,
            None => return Err(self.error(ErrorKind::MalformedEndTag, 2)),
        };
        self.scanner.move_by(len);
        let location = self.scanner.get_location_from(start);
        let mut elem = match self.open_elems.pop() {
            Some(e) => e,
            None => {
                self.report_underflow(name, location);
                return Ok(Progress::Aborted(ElementNode::empty_root()));
            }
        };
        if elem.tag_name != name {
            debug!("</{}> closes <{}>", name, elem.tag_name);
        }
        elem.location.end = location.end;
        if self.open_elems.is_empty() {
            return Ok(Progress::RootClosed(elem));
        }
        self.push_child(Node::Element(elem));
        Ok(Progress::Continue)
    }

    fn parse_interpolation(&mut self) -> Result<(), CompilationError> {
        let start = self.scanner.current_position();
        let (content, len) = match self.scanner.match_interpolation(&self.option.delimiters) {
            Some(m) => m,
            None => {
                let rest = self.scanner.source().len();
                return Err(self.error(ErrorKind::MissingInterpolationEnd, rest));
            }
        };
        self.scanner.move_by(len);
        self.push_child(Node::Text(TextNode {
            kind: TextKind::Interpolation,
            content: Cow::Borrowed(content),
            location: self.scanner.get_location_from(start),
        }));
        Ok(())
    }

    fn parse_text(&mut self) {
        let start = self.scanner.current_position();
        let len = self.scanner.find_text_end(&self.option.delimiters.0);
        let text = self.scanner.move_by(len);
        self.push_child(Node::Text(TextNode {
            kind: TextKind::PlainText,
            content: Cow::Borrowed(text),
            location: self.scanner.get_location_from(start),
        }));
    }

    fn push_child(&mut self, node: Node<'a>) {
        match self.open_elems.last_mut() {
            Some(parent) => parent.children.push(node),
            None => {
                let Position { line, column, .. } = node.location().start;
                warn!("dropping content outside of the root element at {}:{}", line, column);
            }
        }
    }

    // input ended with open elements: fold them into their parents
    fn close_unfinished(&mut self) -> ElementNode<'a> {
        let mut last = match self.open_elems.pop() {
            Some(e) => e,
            None => return ElementNode::empty_root(),
        };
        loop {
            let err = CompilationError::new(ErrorKind::MissingEndTag)
                .with_location(last.location.clone())
                .with_additional_message(format!(" <{}>", last.tag_name));
            self.err_handle.on_error(err);
            match self.open_elems.pop() {
                Some(mut parent) => {
                    parent.children.push(Node::Element(last));
                    last = parent;
                }
                None => return last,
            }
        }
    }

    fn check_trailing(&mut self) {
        self.scanner.skip_whitespace();
        if let Some((name, len)) = self.scanner.match_end_tag() {
            let location = self.scanner.peek_location(len);
            self.report_underflow(name, location);
        } else if !self.scanner.is_empty() {
            let Position { line, column, .. } = self.scanner.current_position();
            warn!("ignoring content after the root element at {}:{}", line, column);
        }
    }

    fn report_underflow(&self, name: Name<'a>, location: SourceLocation) {
        let err = CompilationError::new(ErrorKind::StackUnderflow)
            .with_location(location)
            .with_additional_message(format!(" </{}>", name));
        self.err_handle.on_error(err);
    }

    fn error(&self, kind: ErrorKind, len: usize) -> CompilationError {
        CompilationError::new(kind).with_location(self.scanner.peek_location(len))
    }
}
