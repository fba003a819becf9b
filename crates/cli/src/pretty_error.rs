use codespan_reporting::{
    diagnostic::{Diagnostic, Label},
    files::SimpleFiles,
    term::{
        self,
        termcolor::{ColorChoice, StandardStream},
    },
};
use compiler::error::{CompilationError, ErrorHandler};
use log::warn;
use std::{cell::Cell, rc::Rc};

/// Prints each error as a labeled source snippet on stderr
/// and counts how many were seen.
#[derive(Clone)]
pub struct PrettyErrorHandler {
    name: String,
    source: String,
    count: Rc<Cell<usize>>,
}

impl PrettyErrorHandler {
    pub fn new(name: String, source: String) -> Self {
        Self {
            name,
            source,
            count: Rc::new(Cell::new(0)),
        }
    }
    pub fn error_count(&self) -> usize {
        self.count.get()
    }
}

impl ErrorHandler for PrettyErrorHandler {
    fn on_error(&self, err: CompilationError) {
        self.count.set(self.count.get() + 1);
        let mut files = SimpleFiles::new();
        let file_id = files.add(self.name.as_str(), self.source.as_str());
        let diagnostic = Diagnostic::error()
            .with_message(format!("{:?}", err.kind))
            .with_labels(vec![
                Label::primary(file_id, err.location.clone()).with_message(err.to_string())
            ]);

        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = term::Config::default();

        let mut lock = writer.lock();
        if let Err(e) = term::emit(&mut lock, &config, &files, &diagnostic) {
            warn!("unable to render diagnostic: {}", e);
        }
    }
}
