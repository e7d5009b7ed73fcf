use blend_config::AnalysisConfig;
use blend_core::Location;
use blend_syntax::{Block, Expr, FunctionDecl, If, Item, Program, Return, Stmt, VariableDecl, While};

use crate::analysis::function_analyzer::FunctionAnalyzer;
use crate::analysis::variable_analyzer::VariableAnalyzer;
use crate::diagnostics::Diagnostics;
use crate::error::{ErrorKind, SemanticError};
use crate::scope::{ScopeId, ScopeKind};
use crate::symbol_table::{FunctionSymbol, Symbol, SymbolTable, VariableSymbol};
use crate::types::Type;
use crate::validation::constant::ConstantEvaluator;
use crate::validation::expression::{ExpressionAnalyzer, TypeInference};

#[derive(Debug)]
pub struct SemanticInfo {
    pub symbol_table: SymbolTable,
    /// Every problem found, in the order the program was walked.
    pub diagnostics: Vec<SemanticError>,
    /// Set when the program names a module; its declarations live there instead of the root.
    pub module_scope: Option<ScopeId>,
}

impl SemanticInfo {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// The scope holding the program's top-level declarations.
    pub fn top_level_scope(&self) -> ScopeId {
        self.module_scope.unwrap_or(ScopeId::ROOT)
    }

    pub fn errors_of(&self, kind: ErrorKind) -> impl Iterator<Item = &SemanticError> {
        self.diagnostics.iter().filter(move |error| error.kind == kind)
    }
}

/// What the declaration pass already did with a top-level item.
enum Declared {
    Function(Option<FunctionSymbol>),
    Constant,
    Pending,
}

/// Walks a whole program, building the symbol table and collecting every semantic error.
///
/// Analysis never stops at the first problem: a rejected declaration is left out of the table
/// and the walk carries on with the next item.
#[derive(Debug)]
pub struct SemanticAnalyzer {
    symbol_table: SymbolTable,
    diagnostics: Diagnostics,
    functions: FunctionAnalyzer,
    return_types: Vec<Type>,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl SemanticAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            symbol_table: SymbolTable::new(),
            diagnostics: Diagnostics::new(),
            functions: FunctionAnalyzer::new(config),
            return_types: Vec::new(),
        }
    }

    pub fn analyze(mut self, program: &Program) -> SemanticInfo {
        let module = program.module.as_ref().map(|module| module.name.as_str());
        let _span = tracing::debug_span!("analyze", module).entered();

        let module_scope = module.map(|_| self.symbol_table.push_scope(ScopeKind::Module));

        let mut item_errors: Vec<Vec<SemanticError>> =
            std::iter::repeat_with(Vec::new).take(program.items.len()).collect();

        // constants and signatures in source order, so a signature can size its arrays with a
        // constant declared above it
        let first_pass: Vec<Declared> = program
            .items
            .iter()
            .zip(&mut item_errors)
            .map(|(item, errors)| {
                self.collect_errors(errors, |this| match item {
                    Item::Function(decl) => Declared::Function(this.declare_function(decl)),
                    Item::Variable(decl) if this.is_folded_constant(decl) => {
                        this.declare_variable(decl);
                        Declared::Constant
                    }
                    Item::Variable(_) => Declared::Pending,
                })
            })
            .collect();

        // every signature is known here, so bodies can call functions declared further down
        let second_pass = program.items.iter().zip(first_pass).zip(&mut item_errors);
        for ((item, declared), errors) in second_pass {
            self.collect_errors(errors, |this| match (item, declared) {
                (Item::Variable(decl), Declared::Pending) => this.declare_variable(decl),
                (Item::Function(decl), Declared::Function(Some(function))) => {
                    if let Some(body) = &decl.body {
                        this.check_function_body(&function, body);
                    }
                }
                _ => {}
            });
        }

        if let Some(scope) = module_scope {
            self.symbol_table.close_scope(scope);
        }

        let diagnostics: Vec<SemanticError> = item_errors.into_iter().flatten().collect();
        tracing::debug!(errors = diagnostics.len(), "semantic analysis finished");

        SemanticInfo {
            symbol_table: self.symbol_table,
            diagnostics,
            module_scope,
        }
    }

    fn declare_function(&mut self, decl: &FunctionDecl) -> Option<FunctionSymbol> {
        let result = self
            .functions
            .analyze_function_declaration(decl, &mut self.symbol_table);
        self.diagnostics.absorb(result)
    }

    /// A `const` whose initializer already folds can be declared ahead of the signatures.
    fn is_folded_constant(&self, decl: &VariableDecl) -> bool {
        decl.constant
            && decl.initializer.as_ref().is_some_and(|init| {
                ConstantEvaluator::new(&self.symbol_table).evaluate(init).is_ok()
            })
    }

    /// Runs `f` with a fresh accumulator and moves whatever it reported into `errors`.
    fn collect_errors<T>(
        &mut self,
        errors: &mut Vec<SemanticError>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let outer = std::mem::take(&mut self.diagnostics);
        let value = f(self);
        errors.extend(std::mem::replace(&mut self.diagnostics, outer).items());
        value
    }

    fn declare_variable(&mut self, decl: &VariableDecl) {
        let inference = ExpressionAnalyzer::new(&self.functions);
        let result = VariableAnalyzer::new(&self.functions).declare_variable(
            decl,
            &mut self.symbol_table,
            &inference,
        );
        self.diagnostics.absorb(result);
    }

    fn check_function_body(&mut self, function: &FunctionSymbol, body: &Block) {
        self.in_scope(ScopeKind::Function, |this| {
            for param in &function.params {
                let symbol = Symbol::Variable(VariableSymbol {
                    name: param.name.clone(),
                    ty: param.ty.clone(),
                    scope: this.symbol_table.current_scope(),
                    location: param.location,
                    storage: None,
                    is_const: false,
                    constant_value: None,
                });
                if let Err(error) = this.symbol_table.declare_symbol(symbol) {
                    this.diagnostics.push(error);
                }
            }

            this.return_types.push(function.return_type.clone());
            this.check_statements(&body.statements);
            this.return_types.pop();
        });
    }

    /// Runs `f` in a fresh child scope, closing it again afterwards.
    fn in_scope(&mut self, kind: ScopeKind, f: impl FnOnce(&mut Self)) {
        let scope = self.symbol_table.push_scope(kind);
        f(self);
        self.symbol_table.close_scope(scope);
    }

    fn check_statements(&mut self, statements: &[Stmt]) {
        statements.iter().for_each(|stmt| self.check_statement(stmt));
    }

    fn check_block(&mut self, block: &Block) {
        self.in_scope(ScopeKind::Block, |this| this.check_statements(&block.statements));
    }

    fn check_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Variable(decl) => self.declare_variable(decl),
            Stmt::Assign(assign) => {
                let inference = ExpressionAnalyzer::new(&self.functions);
                let result = VariableAnalyzer::new(&self.functions).validate_assignment(
                    assign,
                    &self.symbol_table,
                    &inference,
                );
                self.diagnostics.absorb(result);
            }
            Stmt::Expr(expr) => _ = self.infer(expr),
            Stmt::Return(ret) => self.check_return(ret),
            Stmt::If(If {
                condition,
                then_branch,
                else_branch,
                ..
            }) => {
                self.check_condition(condition);
                self.check_block(then_branch);
                if let Some(else_branch) = else_branch {
                    self.check_block(else_branch);
                }
            }
            Stmt::While(While {
                condition, body, ..
            }) => {
                self.check_condition(condition);
                self.check_block(body);
            }
            Stmt::Block(block) => self.check_block(block),
        }
    }

    fn check_return(&mut self, ret: &Return) {
        let Some(expected) = self.return_types.last().cloned() else {
            self.error(ErrorKind::InvalidScope, ret.location, "return outside of a function");
            return;
        };

        match &ret.value {
            Some(value) if expected.is_void() => {
                _ = self.infer(value);
                self.error(
                    ErrorKind::TypeMismatch,
                    ret.location,
                    "function returns 'void' but a value was returned",
                );
            }
            Some(value) => {
                let inference = ExpressionAnalyzer::new(&self.functions);
                let result = VariableAnalyzer::new(&self.functions).validate_value(
                    &expected,
                    value,
                    ret.location,
                    &self.symbol_table,
                    &inference,
                );
                self.diagnostics.absorb(result);
            }
            None if !expected.is_void() => self.error(
                ErrorKind::TypeMismatch,
                ret.location,
                format!("missing return value, expected '{expected}'"),
            ),
            None => {}
        }
    }

    fn check_condition(&mut self, condition: &Expr) {
        if let Some(ty) = self.infer(condition)
            && ty != Type::BOOLEAN
        {
            self.error(
                ErrorKind::TypeMismatch,
                condition.location(),
                format!("condition must be 'boolean', found '{ty}'"),
            );
        }
    }

    fn infer(&mut self, expr: &Expr) -> Option<Type> {
        let inference = ExpressionAnalyzer::new(&self.functions);
        self.diagnostics
            .absorb(inference.infer_type(expr, &self.symbol_table))
    }

    fn error(&mut self, kind: ErrorKind, location: Location, message: impl Into<String>) {
        self.diagnostics.error(kind, location, message);
    }
}
