use blend_core::Location;
use blend_syntax::{Assign, Expr, VariableDecl};

use crate::analysis::function_analyzer::FunctionAnalyzer;
use crate::diagnostics::Diagnostics;
use crate::error::{ErrorKind, Result, SemanticError};
use crate::symbol_table::{Symbol, SymbolTable, VariableSymbol};
use crate::types::Type;
use crate::validation::constant::ConstantEvaluator;
use crate::validation::expression::TypeInference;

/// Declares variables and checks stores into them.
#[derive(Debug, Clone, Copy)]
pub struct VariableAnalyzer<'a> {
    functions: &'a FunctionAnalyzer,
}

impl<'a> VariableAnalyzer<'a> {
    pub fn new(functions: &'a FunctionAnalyzer) -> Self {
        Self { functions }
    }

    /// Validates `decl` and registers it in the current scope. Nothing is registered on failure.
    pub fn declare_variable(
        &self,
        decl: &VariableDecl,
        table: &mut SymbolTable,
        inference: &dyn TypeInference,
    ) -> Result<VariableSymbol> {
        let name = decl.name.name.as_str();
        let mut diagnostics = Diagnostics::new();

        let declared = decl.ty.as_ref().and_then(|annotation| {
            diagnostics.absorb(self.functions.type_checker().resolve_type(annotation, table))
        });

        if let Some(existing) = table.current().lookup(name) {
            diagnostics.push(SemanticError::duplicate_symbol(name, existing, decl.name.location));
        }

        let ty = match (&decl.ty, &decl.initializer) {
            (None, None) => {
                diagnostics.push(
                    SemanticError::invalid_operation(
                        decl.location,
                        format!("cannot infer the type of '{name}' without an initializer"),
                    )
                    .with_suggestion(format!("annotate it, for example `let {name}: byte`")),
                );
                None
            }
            (Some(_), None) => declared,
            (Some(_), Some(init)) => {
                if let Some(ty) = &declared {
                    diagnostics.absorb(self.validate_value(ty, init, decl.location, table, inference));
                }
                declared
            }
            (None, Some(init)) => {
                let ty = diagnostics.absorb(inference.infer_type(init, table));
                if let Some(ty) = &ty
                    && ty.as_callback().is_some()
                {
                    diagnostics.absorb(self.validate_value(ty, init, decl.location, table, inference));
                }
                ty
            }
        };

        if decl.constant && decl.initializer.is_none() {
            diagnostics.push(SemanticError::invalid_operation(
                decl.location,
                format!("constant '{name}' must be initialized"),
            ));
        }

        if let Some(ty) = &ty
            && ty.is_void()
        {
            diagnostics.push(SemanticError::invalid_operation(
                decl.location,
                format!("variable '{name}' cannot have type 'void'"),
            ));
        }

        let Some(ty) = diagnostics.finish(ty)? else {
            return Err(SemanticError::invalid_operation(
                decl.location,
                format!("could not determine the type of '{name}'"),
            )
            .into());
        };

        let constant_value = match &decl.initializer {
            Some(init) if decl.constant && ty.is_numeric() => {
                ConstantEvaluator::new(table).evaluate(init).ok()
            }
            _ => None,
        };

        let symbol = VariableSymbol {
            name: name.to_string(),
            ty,
            scope: table.current_scope(),
            location: decl.location,
            storage: decl.storage,
            is_const: decl.constant,
            constant_value,
        };

        table.declare_symbol(Symbol::Variable(symbol.clone()))?;
        Ok(symbol)
    }

    /// Checks `target = value` against the variable currently bound to `target`.
    pub fn validate_assignment(
        &self,
        assign: &Assign,
        table: &SymbolTable,
        inference: &dyn TypeInference,
    ) -> Result<()> {
        let target = &assign.target;

        match table.lookup_symbol(&target.name) {
            None => Err(SemanticError::undefined_symbol(&target.name, target.location).into()),
            Some(Symbol::Function(_)) => Err(SemanticError::invalid_operation(
                assign.location,
                format!("cannot assign to function '{}'", target.name),
            )
            .into()),
            Some(Symbol::Variable(variable)) if variable.is_const => {
                Err(SemanticError::new(
                    ErrorKind::InvalidOperation,
                    assign.location,
                    format!("cannot assign to constant '{}'", target.name),
                )
                .with_suggestion(format!("'{}' was declared at {}", target.name, variable.location))
                .into())
            }
            Some(Symbol::Variable(variable)) => {
                self.validate_value(&variable.ty, &assign.value, assign.location, table, inference)
            }
        }
    }

    /// Checks that `value` may be stored in a slot of type `target`.
    ///
    /// A bare function name is a function reference, which only the callback rules may accept.
    pub fn validate_value(
        &self,
        target: &Type,
        value: &Expr,
        location: Location,
        table: &SymbolTable,
        inference: &dyn TypeInference,
    ) -> Result<()> {
        if let Some(ident) = value.as_ident()
            && let Some(function) = table.lookup_function(&ident.name)
        {
            return self.functions.validate_callback_assignment(target, function, location);
        }

        let source = inference.infer_type(value, table)?;
        if self
            .functions
            .type_checker()
            .is_assignment_compatible(target, &source)
        {
            return Ok(());
        }

        Err(SemanticError::type_mismatch(
            value.location(),
            format!("cannot assign a value of type '{source}' to '{target}'"),
        )
        .into())
    }
}

#[cfg(test)]
mod tests {
    use blend_syntax::{BinaryOp, FunctionDecl, StorageClass, Stmt, TypeAnnotation};

    use super::*;
    use crate::validation::expression::ExpressionAnalyzer;

    struct Fixture {
        functions: FunctionAnalyzer,
        table: SymbolTable,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                functions: FunctionAnalyzer::default(),
                table: SymbolTable::new(),
            }
        }

        fn function(&mut self, decl: FunctionDecl) {
            self.functions
                .analyze_function_declaration(&decl, &mut self.table)
                .unwrap();
        }

        fn declare(&mut self, decl: VariableDecl) -> Result<VariableSymbol> {
            let inference = ExpressionAnalyzer::new(&self.functions);
            VariableAnalyzer::new(&self.functions).declare_variable(&decl, &mut self.table, &inference)
        }

        fn assign(&self, target: &str, value: Expr) -> Result<()> {
            let Stmt::Assign(assign) = Stmt::assign(target, value) else {
                unreachable!();
            };
            let inference = ExpressionAnalyzer::new(&self.functions);
            VariableAnalyzer::new(&self.functions).validate_assignment(&assign, &self.table, &inference)
        }
    }

    fn named(name: &str) -> Option<TypeAnnotation> {
        Some(TypeAnnotation::named(name))
    }

    fn irq_slot() -> Option<TypeAnnotation> {
        Some(TypeAnnotation::callback(vec![], None))
    }

    #[test]
    fn test_annotated_and_inferred_variables() {
        let mut fixture = Fixture::new();

        let border = fixture
            .declare(VariableDecl::new("border", named("byte")).storage(StorageClass::ZeroPage))
            .unwrap();
        assert_eq!(border.ty, Type::BYTE);
        assert_eq!(border.storage, Some(StorageClass::ZeroPage));

        let address = fixture
            .declare(VariableDecl::new("address", None).init(Expr::number(0xD020)))
            .unwrap();
        assert_eq!(address.ty, Type::WORD);
    }

    #[test]
    fn test_initializer_must_fit() {
        let mut fixture = Fixture::new();

        assert!(fixture
            .declare(VariableDecl::new("wide", named("word")).init(Expr::number(1)))
            .is_ok());

        let errors = fixture
            .declare(VariableDecl::new("narrow", named("byte")).init(Expr::number(1000)))
            .unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::TypeMismatch]);
        insta::assert_snapshot!(errors.first().message, @"cannot assign a value of type 'word' to 'byte'");
        assert!(fixture.table.lookup_variable("narrow").is_none());
    }

    #[test]
    fn test_constants_are_folded() {
        let mut fixture = Fixture::new();
        fixture
            .declare(VariableDecl::new("COLS", named("byte")).init(Expr::number(40)).constant())
            .unwrap();

        let size = Expr::binary(BinaryOp::Mul, Expr::ident("COLS"), Expr::number(25));
        let screen = fixture
            .declare(VariableDecl::new("SCREEN_SIZE", named("word")).init(size).constant())
            .unwrap();
        assert_eq!(screen.constant_value, Some(1000));

        let buffer = fixture
            .declare(VariableDecl::new(
                "buffer",
                Some(TypeAnnotation::array(TypeAnnotation::named("byte"), Expr::ident("SCREEN_SIZE"))),
            ))
            .unwrap();
        assert_eq!(buffer.ty, Type::array(Type::BYTE, 1000));
    }

    #[test]
    fn test_declaration_errors() {
        let mut fixture = Fixture::new();

        let errors = fixture
            .declare(VariableDecl::new("LIMIT", named("byte")).constant())
            .unwrap_err();
        insta::assert_snapshot!(errors.first().message, @"constant 'LIMIT' must be initialized");

        let errors = fixture.declare(VariableDecl::new("mystery", None)).unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::InvalidOperation]);

        let errors = fixture.declare(VariableDecl::new("nothing", named("void"))).unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::InvalidOperation]);

        fixture.declare(VariableDecl::new("x", named("byte"))).unwrap();
        let errors = fixture.declare(VariableDecl::new("x", named("word"))).unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::DuplicateSymbol]);
    }

    #[test]
    fn test_callback_variables_take_callback_functions_only() {
        let mut fixture = Fixture::new();
        fixture.function(FunctionDecl::new("onIrq").callback());
        fixture.function(FunctionDecl::new("plain"));

        let handler = fixture
            .declare(VariableDecl::new("handler", irq_slot()).init(Expr::ident("onIrq")))
            .unwrap();
        assert_eq!(handler.ty, Type::callback(vec![], Type::VOID));

        let errors = fixture
            .declare(VariableDecl::new("other", irq_slot()).init(Expr::ident("plain")))
            .unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::CallbackMismatch]);

        let errors = fixture
            .declare(VariableDecl::new("inferred", None).init(Expr::ident("plain")))
            .unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::CallbackMismatch]);
    }

    #[test]
    fn test_assignment_targets() {
        let mut fixture = Fixture::new();
        fixture.function(FunctionDecl::new("onIrq").callback());
        fixture.function(FunctionDecl::new("plain"));
        fixture.declare(VariableDecl::new("counter", named("byte"))).unwrap();
        fixture
            .declare(VariableDecl::new("MAX", named("byte")).init(Expr::number(8)).constant())
            .unwrap();
        fixture.declare(VariableDecl::new("handler", irq_slot())).unwrap();

        assert!(fixture.assign("counter", Expr::number(3)).is_ok());
        assert!(fixture.assign("handler", Expr::ident("onIrq")).is_ok());

        let cases = [
            ("missing", Expr::number(1), ErrorKind::UndefinedSymbol),
            ("MAX", Expr::number(1), ErrorKind::InvalidOperation),
            ("plain", Expr::number(1), ErrorKind::InvalidOperation),
            ("counter", Expr::boolean(true), ErrorKind::TypeMismatch),
            ("handler", Expr::ident("plain"), ErrorKind::CallbackMismatch),
        ];

        for (target, value, kind) in cases {
            let errors = fixture.assign(target, value).unwrap_err();
            assert_eq!(errors.kinds(), vec![kind], "assigning to {target}");
        }
    }
}
