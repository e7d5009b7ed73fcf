//! Semantic analysis for blend65: the type system, the scoped symbol table and the
//! function/callback rules, driven over a whole program by [`SemanticAnalyzer`].

pub mod analysis;
pub mod analyzer;
pub mod diagnostics;
pub mod error;
pub mod scope;
pub mod symbol_table;
pub mod types;
pub mod validation;

pub use analysis::function_analyzer::FunctionAnalyzer;
pub use analysis::variable_analyzer::VariableAnalyzer;
pub use analyzer::{SemanticAnalyzer, SemanticInfo};
pub use error::{ErrorKind, Result, SemanticError, SemanticErrors};
pub use scope::{Scope, ScopeId, ScopeKind};
pub use symbol_table::{FunctionSymbol, ParameterSymbol, Symbol, SymbolKind, SymbolTable, VariableSymbol};
pub use types::{ArrayType, CallbackType, PrimitiveType, Type};
pub use validation::expression::{ExpressionAnalyzer, TypeInference};
pub use validation::type_checker::TypeChecker;
