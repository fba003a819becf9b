mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use compiler::CompileOption;
use log::debug;

use std::fs;
use std::io::{self, Read};

use cli::{compile_to_stdout, CliInput, ShowOption};
use vdom_template_compiler_cli::{absolute_path, get_binding_prefixes, get_delimiters};

const DEMO_TEMPLATE: &str = r#"<template>
  <div id="app" className="flex">
    <span :className="position">{{ add }}</span>
    <span>
      number:{{ count }}
    </span>
    <img src="asdsad.png" />
  </div>
</template>
"#;

/// Compile a markup template into a render function module.
#[derive(Parser)]
#[command(version)]
struct Opts {
    /// The file to compile. Stdin will be read if no file is provided.
    input_file_name: Option<String>,

    /// Compile the built-in sample template instead of any input
    #[arg(long, conflicts_with = "input_file_name")]
    demo: bool,

    /// Interpolation open and close signs, split by one whitespace
    #[arg(short, long, default_value = "{{ }}")]
    delimiters: String,

    /// Characters marking a bound attribute name
    #[arg(short, long, default_value = ":")]
    binding_prefixes: String,

    #[arg(long, default_value = "vm")]
    view_model: String,

    #[arg(long, default_value = "vue")]
    runtime_module: String,

    #[arg(long)]
    dump_parse: bool,

    #[arg(long)]
    dump_transform: bool,

    /// Print the parsed tree in a compact indented form
    #[arg(long)]
    print_ast: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();
    let opts = Opts::parse();
    let (name, source) = if opts.demo {
        ("demo.html".to_owned(), DEMO_TEMPLATE.to_owned())
    } else if let Some(file_name) = &opts.input_file_name {
        let ab_path = absolute_path(file_name)?;
        let source = fs::read_to_string(&ab_path)
            .with_context(|| format!("cannot read {}", ab_path.display()))?;
        (file_name.clone(), source)
    } else {
        let mut s = String::new();
        io::stdin().read_to_string(&mut s)?;
        ("stdin.html".to_owned(), s)
    };
    debug!("compiling {} ({} bytes)", name, source.len());

    let option = CompileOption {
        delimiters: get_delimiters(&opts.delimiters)?,
        binding_prefixes: get_binding_prefixes(&opts.binding_prefixes)?,
        view_model: opts.view_model,
        runtime_module: opts.runtime_module,
        ..CompileOption::default()
    };
    let show = ShowOption {
        dump_parse: opts.dump_parse,
        dump_transform: opts.dump_transform,
        print_ast: opts.print_ast,
    };
    compile_to_stdout((name, source, option, show))
}
