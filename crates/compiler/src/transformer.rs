/*!
Normalize the parsed tree in place.

* attributes: `raw` is split into `field` and `value`.
  Bound attributes lose their marker and read their value off the view model.
* interpolation: the expression is read off the view model.
* plain text: becomes a quoted JS string literal.

`If` and `For` nodes are walked like elements, no directive lowering happens here.
 */

use super::{
    error::{CompilationError, CompilationErrorKind as ErrorKind},
    parser::{Attribute, ElementNode, Node, TextKind, TextNode},
    util::js_string_literal,
};
use log::debug;
use std::borrow::Cow;

pub trait Transformer {
    type IR;
    /// transform will change ir node inplace
    fn transform(&mut self, root: &mut Self::IR) -> Result<(), CompilationError>;
}

#[derive(Clone)]
pub struct TransformOption {
    /// name of the render time context that expressions read from
    pub view_model: String,
}

impl Default for TransformOption {
    fn default() -> Self {
        Self {
            view_model: "vm".into(),
        }
    }
}

pub struct BaseTransformer<'a> {
    option: TransformOption,
    // attributes seen, for logging only
    attr_count: usize,
    p: std::marker::PhantomData<&'a ()>,
}

impl<'a> BaseTransformer<'a> {
    pub fn new(option: TransformOption) -> Self {
        Self {
            option,
            attr_count: 0,
            p: std::marker::PhantomData,
        }
    }
}

impl<'a> Transformer for BaseTransformer<'a> {
    type IR = ElementNode<'a>;
    fn transform(&mut self, root: &mut Self::IR) -> Result<(), CompilationError> {
        self.attr_count = 0;
        self.transform_element(root)?;
        debug!("transformed {} attributes", self.attr_count);
        Ok(())
    }
}

impl<'a> BaseTransformer<'a> {
    fn transform_node(&mut self, node: &mut Node<'a>) -> Result<(), CompilationError> {
        match node {
            Node::Element(e) => self.transform_element(e),
            Node::Text(t) => {
                self.transform_text(t);
                Ok(())
            }
        }
    }

    fn transform_element(&mut self, e: &mut ElementNode<'a>) -> Result<(), CompilationError> {
        for attr in e.attributes.iter_mut() {
            self.transform_attribute(attr)?;
        }
        self.attr_count += e.attributes.len();
        for child in e.children.iter_mut() {
            self.transform_node(child)?;
        }
        Ok(())
    }

    fn transform_attribute(&self, attr: &mut Attribute<'a>) -> Result<(), CompilationError> {
        let raw = attr.raw;
        let (name, value) = match raw.split_once('=') {
            Some((n, v)) => (n.trim(), strip_quotes(v.trim())),
            None => {
                return Err(CompilationError::new(ErrorKind::AttributeSyntaxError)
                    .with_location(attr.location.clone())
                    .with_additional_message(raw.into()));
            }
        };
        if attr.is_dynamic {
            // the marker is a single char by construction
            let marker = name.chars().next().map_or(0, char::len_utf8);
            attr.field = &name[marker..];
            attr.value = Cow::Owned(self.prefix_view_model(value.trim()));
        } else {
            attr.field = name;
            attr.value = Cow::Borrowed(value);
        }
        Ok(())
    }

    fn transform_text(&self, t: &mut TextNode<'a>) {
        let content = match t.kind {
            TextKind::Interpolation => self.prefix_view_model(&t.content),
            TextKind::PlainText => js_string_literal(&t.content),
        };
        t.content = Cow::Owned(content);
    }

    fn prefix_view_model(&self, expr: &str) -> String {
        format!("{}.{}", self.option.view_model, expr)
    }
}

fn strip_quotes(v: &str) -> &str {
    for q in ['"', '\''].iter() {
        if v.len() >= 2 && v.starts_with(*q) && v.ends_with(*q) {
            return &v[1..v.len() - 1];
        }
    }
    v
}
