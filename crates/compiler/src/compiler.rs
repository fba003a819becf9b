use super::{
    codegen::{CodeGenerateOption, CodeGenerator, CodeWriter},
    error::{CompilationError, ErrorHandler, VecErrorHandler},
    parser::{ElementNode, ParseOption, Parser},
    transformer::{BaseTransformer, TransformOption, Transformer},
};
use log::debug;
use rustc_hash::FxHashSet;

#[derive(Clone)]
pub struct CompileOption {
    /// interpolation open and close signs, `{{ }}` by default
    pub delimiters: (String, String),
    /// markers of bound attribute names, `:` by default
    pub binding_prefixes: FxHashSet<char>,
    /// render context that expressions read from, shared by transform and codegen
    pub view_model: String,
    pub runtime_module: String,
    pub vnode_helper: String,
}

impl Default for CompileOption {
    fn default() -> Self {
        let ParseOption {
            delimiters,
            binding_prefixes,
        } = ParseOption::default();
        let CodeGenerateOption {
            runtime_module,
            vnode_helper,
            view_model,
        } = CodeGenerateOption::default();
        Self {
            delimiters,
            binding_prefixes,
            view_model,
            runtime_module,
            vnode_helper,
        }
    }
}

/// Runs parse, transform and generate in order.
/// Each stage can also be called on its own, e.g. to dump intermediate trees.
pub struct BaseCompiler {
    option: CompileOption,
}

impl BaseCompiler {
    pub fn new(option: CompileOption) -> Self {
        Self { option }
    }

    pub fn parse<'a, E: ErrorHandler>(
        &self,
        source: &'a str,
        eh: E,
    ) -> Result<ElementNode<'a>, CompilationError> {
        let option = ParseOption {
            delimiters: self.option.delimiters.clone(),
            binding_prefixes: self.option.binding_prefixes.clone(),
        };
        Parser::new(option).parse(source, eh)
    }

    pub fn transform(&self, root: &mut ElementNode<'_>) -> Result<(), CompilationError> {
        let option = TransformOption {
            view_model: self.option.view_model.clone(),
        };
        BaseTransformer::new(option).transform(root)
    }

    pub fn generate(&self, root: ElementNode<'_>) -> Result<String, CompilationError> {
        let option = CodeGenerateOption {
            runtime_module: self.option.runtime_module.clone(),
            vnode_helper: self.option.vnode_helper.clone(),
            view_model: self.option.view_model.clone(),
        };
        CodeWriter::new(option).generate(root)
    }

    /// Compiles `source` to a render module.
    /// Any error reported while parsing fails the whole run.
    pub fn compile(&self, source: &str) -> Result<String, CompilationError> {
        let eh = VecErrorHandler::default();
        let mut root = self.parse(source, eh.clone())?;
        if let Some(e) = eh.take_errors().into_iter().next() {
            debug!("parse reported: {}", e);
            return Err(e);
        }
        self.transform(&mut root)?;
        self.generate(root)
    }
}

/// compile with default options
pub fn compile(source: &str) -> Result<String, CompilationError> {
    BaseCompiler::new(CompileOption::default()).compile(source)
}
