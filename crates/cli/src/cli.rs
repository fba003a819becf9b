use anyhow::{bail, Result};
use compiler::{error::ErrorHandler, BaseCompiler, CompilationError, CompileOption};
use serde_yaml::to_writer;
use std::io::{self, Write};
use vdom_template_compiler_cli::{ast_print::AstString, PrettyErrorHandler};

pub struct ShowOption {
    pub dump_parse: bool,
    pub dump_transform: bool,
    pub print_ast: bool,
}

/// file name, template source, compile option and dump switches
pub type CliInput = (String, String, CompileOption, ShowOption);

pub fn compile_to_stdout(debug: CliInput) -> Result<()> {
    let (name, source, option, show) = debug;
    let eh = PrettyErrorHandler::new(name.clone(), source.clone());
    let compiler = BaseCompiler::new(option);

    let mut ast = compiler
        .parse(&source, eh.clone())
        .or_else(|e| fail(&eh, &name, e))?;
    if eh.error_count() > 0 {
        bail!("{} error(s) found in {}", eh.error_count(), name);
    }
    if show.print_ast {
        println!("{}", ast.ast_string(0));
    }
    if show.dump_parse {
        println!(r#"=============== AST =============="#);
        let stdout = io::stdout();
        to_writer(stdout.lock(), &ast)?;
        println!(r#"=========== End of AST ==========="#);
    }

    compiler
        .transform(&mut ast)
        .or_else(|e| fail(&eh, &name, e))?;
    if show.dump_transform {
        println!(r#"======= Transformed ========="#);
        let stdout = io::stdout();
        to_writer(stdout.lock(), &ast)?;
        println!(r#"======== End of Transform ========"#);
    }

    let code = compiler.generate(ast).or_else(|e| fail(&eh, &name, e))?;
    let stdout = io::stdout();
    stdout.lock().write_all(code.as_bytes())?;
    Ok(())
}

fn fail<T>(eh: &PrettyErrorHandler, name: &str, err: CompilationError) -> Result<T> {
    let kind = err.kind;
    eh.on_error(err);
    bail!("failed to compile {}: {:?}", name, kind)
}
