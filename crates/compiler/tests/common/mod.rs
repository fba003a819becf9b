use compiler::error::{CompilationError, ErrorHandler, VecErrorHandler};
use compiler::{BaseCompiler, CompileOption, ElementNode};
use vdom_template_compiler_core as compiler;

#[derive(Clone)]
pub struct TestErrorHandler;
impl ErrorHandler for TestErrorHandler {}

pub fn get_compiler() -> BaseCompiler {
    BaseCompiler::new(CompileOption::default())
}

pub fn base_parse(s: &str) -> ElementNode<'_> {
    get_compiler()
        .parse(s, TestErrorHandler)
        .expect("template should parse")
}

pub fn base_transform(s: &str) -> ElementNode<'_> {
    let mut root = base_parse(s);
    get_compiler()
        .transform(&mut root)
        .expect("template should transform");
    root
}

pub fn base_compile(s: &str) -> String {
    get_compiler().compile(s).expect("template should compile")
}

/// errors reported by the parser, in order
pub fn get_errors(s: &str) -> Vec<CompilationError> {
    let eh = VecErrorHandler::default();
    let _ = get_compiler().parse(s, eh.clone());
    eh.take_errors()
}

pub const DEMO_TEMPLATE: &str = r#"
    <template>
        <div id="app" className="flex">
            <span :className="position">{{ add }}</span>
            <span>
                number:{{ count }}
            </span>
            <img src="asdsad.png" />
        </div>
    </template>
"#;
