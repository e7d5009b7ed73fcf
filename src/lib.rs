//! blend65 semantic checking: runs the analyzer over a parsed program and reports what it found
//! as user-facing diagnostics.

pub mod features;
pub mod logging;

pub use blend_config::{Config, load_config};
pub use blend_core::{Diagnostic, Location, Severity};
pub use blend_semantic::SemanticInfo;

use blend_semantic::SemanticAnalyzer;
use blend_syntax::Program;

use crate::features::diagnostics::DiagnosticProvider;
use crate::features::hover::{Hover, HoverProvider};

#[derive(Debug)]
pub struct CheckReport {
    pub info: SemanticInfo,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// One diagnostic per paragraph, in the order they were found.
    pub fn render(&self) -> String {
        self.diagnostics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn hover(&self, program: &Program, byte_offset: usize) -> Option<Hover> {
        HoverProvider::new().hover(program, &self.info, byte_offset)
    }
}

pub fn check_program(program: &Program, config: &Config) -> CheckReport {
    let module = program.module.as_ref().map(|module| module.name.as_str());
    let _span = tracing::info_span!("check_program", module, items = program.items.len()).entered();

    let info = SemanticAnalyzer::new(&config.analysis).analyze(program);
    let diagnostics = DiagnosticProvider::new().get_diagnostics(&info);

    if diagnostics.is_empty() {
        tracing::info!("program checked without errors");
    } else {
        tracing::info!(errors = diagnostics.len(), "program checked");
    }

    CheckReport { info, diagnostics }
}
