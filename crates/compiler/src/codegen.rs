use super::{
    error::{CompilationError, CompilationErrorKind as ErrorKind},
    parser::{Attribute, ElementNode, Node, NodeKind},
    util::{is_simple_identifier, js_string_literal},
};
use log::debug;
use std::marker::PhantomData;
use std::mem;

pub trait CodeGenerator {
    type IR;
    type Output;
    /// generate will take the transformed tree and output
    /// desired code format
    fn generate(&mut self, node: Self::IR) -> Self::Output;
}

#[derive(Clone)]
pub struct CodeGenerateOption {
    /// module the vnode helper is imported from
    pub runtime_module: String,
    /// vnode construction function, `h(tag, props?, children?)`
    pub vnode_helper: String,
    /// local bound to `this` inside render
    pub view_model: String,
}

impl Default for CodeGenerateOption {
    fn default() -> Self {
        Self {
            runtime_module: "vue".into(),
            vnode_helper: "h".into(),
            view_model: "vm".into(),
        }
    }
}

pub struct CodeWriter<'a> {
    writer: String,
    option: CodeGenerateOption,
    indent_level: usize,
    p: PhantomData<&'a ()>,
}

impl<'a> CodeGenerator for CodeWriter<'a> {
    type IR = ElementNode<'a>;
    type Output = Result<String, CompilationError>;
    fn generate(&mut self, root: Self::IR) -> Self::Output {
        self.writer.clear();
        self.indent_level = 0;
        self.generate_root(&root)?;
        debug!("generated {} bytes of render code", self.writer.len());
        Ok(mem::take(&mut self.writer))
    }
}

impl<'a> CodeWriter<'a> {
    pub fn new(option: CodeGenerateOption) -> Self {
        Self {
            writer: String::new(),
            option,
            indent_level: 0,
            p: PhantomData,
        }
    }

    /// the bare nested call expression for `node`, without module wrapper
    pub fn generate_vnode(&mut self, node: &ElementNode<'a>) -> Result<String, CompilationError> {
        self.writer.clear();
        self.generate_element(node)?;
        Ok(mem::take(&mut self.writer))
    }

    fn generate_root(&mut self, root: &ElementNode<'a>) -> Result<(), CompilationError> {
        self.generate_preamble();
        self.generate_function_signature();
        self.write_str("return ");
        if root.is_empty_root() {
            self.write_str("null");
        } else {
            self.generate_element(root)?;
        }
        self.generate_epilogue();
        Ok(())
    }
    /// imports at module head
    fn generate_preamble(&mut self) {
        let line = format!(
            "import {{ {} }} from {}",
            self.option.vnode_helper,
            js_string_literal(&self.option.runtime_module)
        );
        self.write_str(&line);
        self.newline();
    }
    fn generate_function_signature(&mut self) {
        self.write_str("export function render() {");
        self.indent();
        let binding = format!("const {} = this", self.option.view_model);
        self.write_str(&binding);
        self.newline();
    }
    fn generate_epilogue(&mut self) {
        self.deindent(true);
        self.write_str("}");
        self.newline();
        debug_assert_eq!(self.indent_level, 0);
    }

    fn generate_node(&mut self, node: &Node<'a>) -> Result<(), CompilationError> {
        match node {
            Node::Element(e) => self.generate_element(e),
            Node::Text(t) => {
                self.write_str(&t.content);
                Ok(())
            }
        }
    }

    fn generate_element(&mut self, e: &ElementNode<'a>) -> Result<(), CompilationError> {
        match e.kind {
            NodeKind::Root | NodeKind::Element => (),
            NodeKind::If | NodeKind::For => {
                return Err(CompilationError::new(ErrorKind::UnrecognizedNodeKind)
                    .with_location(e.location.clone())
                    .with_additional_message(format!("{:?}", e.kind)));
            }
        }
        let helper = self.option.vnode_helper.clone();
        self.write_str(&helper);
        self.write_str("(");
        self.write_str(&js_string_literal(e.tag_name));
        if !e.attributes.is_empty() {
            self.write_str(", ");
            self.gen_obj_props(&e.attributes);
        }
        if !e.children.is_empty() {
            self.write_str(", [");
            self.gen_list(&e.children)?;
            self.write_str("]");
        }
        self.write_str(")");
        Ok(())
    }

    /// generate a comma separated list
    fn gen_list(&mut self, nodes: &[Node<'a>]) -> Result<(), CompilationError> {
        let mut nodes = nodes.iter();
        if let Some(n) = nodes.next() {
            self.generate_node(n)?;
        }
        for n in nodes {
            self.write_str(", ");
            self.generate_node(n)?;
        }
        Ok(())
    }

    fn gen_obj_props(&mut self, attrs: &[Attribute<'a>]) {
        self.write_str("{ ");
        for (i, attr) in attrs.iter().enumerate() {
            if i > 0 {
                self.write_str(", ");
            }
            self.gen_obj_key(attr.field);
            self.write_str(": ");
            if attr.is_dynamic {
                self.write_str(&attr.value);
            } else {
                self.write_str(&js_string_literal(&attr.value));
            }
        }
        self.write_str(" }");
    }
    fn gen_obj_key(&mut self, key: &str) {
        if is_simple_identifier(key) {
            self.write_str(key);
        } else {
            self.write_str(&js_string_literal(key));
        }
    }

    fn write_str(&mut self, s: &str) {
        self.writer.push_str(s);
    }
    fn newline(&mut self) {
        self.write_str("\n");
        for _ in 0..self.indent_level {
            self.write_str("  ");
        }
    }
    fn indent(&mut self) {
        self.indent_level += 1;
        self.newline();
    }
    fn deindent(&mut self, with_new_line: bool) {
        self.indent_level -= 1;
        if with_new_line {
            self.newline();
        }
    }
}
