//! Syntax tree for blend65 programs.
//!
//! The parser lives outside this repository; these are the nodes it hands to semantic analysis.
//! Every node carries the [`Location`](blend_core::Location) it was parsed from.

pub mod ast;
pub mod builder;
pub mod visitor;

pub use ast::*;
pub use visitor::AstVisitor;

/// Finds the identifier covering a byte offset, e.g. the name under an editor cursor.
#[derive(Debug)]
pub struct NodeFinder<'ast> {
    pub byte_offset: usize,
    pub result: Option<&'ast Ident>,
}

impl NodeFinder<'_> {
    pub fn new(byte_offset: usize) -> Self {
        Self {
            byte_offset,
            result: None,
        }
    }
}

impl<'ast> AstVisitor<'ast> for NodeFinder<'ast> {
    fn visit_ident(&mut self, ident: &'ast Ident) {
        if self.result.is_none() && ident.location.contains(self.byte_offset) {
            self.result = Some(ident);
        }
    }
}
