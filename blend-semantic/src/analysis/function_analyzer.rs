//! Validation of function declarations, callback assignment and call sites.
//!
//! A function marked `callback` may be installed in a hardware vector (raster or timer
//! interrupts, dispatch tables), so its shape is restricted beyond ordinary type safety, and only
//! such functions may be stored in callback-typed slots even when another function has a
//! matching signature.

use std::collections::HashMap;

use blend_config::AnalysisConfig;
use blend_core::Location;
use blend_syntax::{Expr, FunctionDecl, Parameter};

use crate::analysis::variable_analyzer::VariableAnalyzer;
use crate::diagnostics::Diagnostics;
use crate::error::{ErrorKind, Result, SemanticError};
use crate::symbol_table::{FunctionSymbol, ParameterSymbol, Symbol, SymbolTable, VariableSymbol};
use crate::types::{CallbackType, Type};
use crate::validation::expression::{ExpressionAnalyzer, TypeInference};
use crate::validation::type_checker::TypeChecker;

#[derive(Debug, Clone)]
pub struct FunctionAnalyzer {
    max_callback_params: usize,
    type_checker: TypeChecker,
}

impl Default for FunctionAnalyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl FunctionAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            max_callback_params: config.max_callback_params,
            type_checker: TypeChecker::new(config.callback_widening),
        }
    }

    pub fn type_checker(&self) -> &TypeChecker {
        &self.type_checker
    }

    /// Validates `decl` and registers it in the table's current scope.
    ///
    /// Every independent problem is reported in one failure, and nothing is registered unless
    /// the whole declaration is valid.
    pub fn analyze_function_declaration(
        &self,
        decl: &FunctionDecl,
        table: &mut SymbolTable,
    ) -> Result<FunctionSymbol> {
        let name = decl.name.name.as_str();
        let scope = table.current();
        let mut diagnostics = Diagnostics::new();

        let params = self.resolve_parameters(decl, table, &mut diagnostics);
        let return_type = match &decl.return_type {
            Some(annotation) => diagnostics
                .absorb(self.type_checker.resolve_type(annotation, table))
                .unwrap_or(Type::VOID),
            None => Type::VOID,
        };

        if let Some(existing) = scope.lookup(name) {
            diagnostics.push(SemanticError::duplicate_symbol(name, existing, decl.name.location));
        }

        if decl.callback {
            self.check_callback_shape(decl, &params, &return_type, &mut diagnostics);
        }

        check_parameter_names(decl, &mut diagnostics);
        check_parameter_order(decl, &mut diagnostics);

        if decl.exported && !scope.kind().allows_exports() {
            diagnostics.push(
                SemanticError::new(
                    ErrorKind::InvalidScope,
                    decl.location,
                    format!(
                        "function '{name}' cannot be exported from a {} scope",
                        scope.kind()
                    ),
                )
                .with_suggestion("move the declaration to the top level of the module or remove `export`"),
            );
        }

        if name.is_empty() {
            diagnostics.push(SemanticError::invalid_operation(
                decl.location,
                "function declaration is missing a name",
            ));
        }

        if !diagnostics.is_empty() {
            tracing::debug!(name, errors = diagnostics.len(), "rejected function declaration");
        }
        diagnostics.finish(())?;

        let symbol = FunctionSymbol {
            name: name.to_string(),
            params,
            return_type,
            scope: table.current_scope(),
            location: decl.location,
            is_callback: decl.callback,
            is_exported: decl.exported,
        };

        table.declare_symbol(Symbol::Function(symbol.clone()))?;
        Ok(symbol)
    }

    fn resolve_parameters(
        &self,
        decl: &FunctionDecl,
        table: &SymbolTable,
        diagnostics: &mut Diagnostics,
    ) -> Vec<ParameterSymbol> {
        decl.params
            .iter()
            .filter_map(|param| {
                let ty = diagnostics.absorb(self.type_checker.resolve_type(&param.ty, table))?;
                if let Some(default) = &param.default_value {
                    let inference = ExpressionAnalyzer::new(self);
                    diagnostics.absorb(VariableAnalyzer::new(self).validate_value(
                        &ty,
                        default,
                        default.location(),
                        table,
                        &inference,
                    ));
                }
                Some(ParameterSymbol {
                    name: param.name.name.clone(),
                    ty,
                    optional: param.is_optional(),
                    default_value: param.default_value.clone(),
                    location: param.location,
                })
            })
            .collect()
    }

    fn check_callback_shape(
        &self,
        decl: &FunctionDecl,
        params: &[ParameterSymbol],
        return_type: &Type,
        diagnostics: &mut Diagnostics,
    ) {
        let name = &decl.name.name;

        if decl.params.len() > self.max_callback_params {
            diagnostics.push(
                SemanticError::callback_mismatch(
                    decl.location,
                    format!(
                        "callback function '{name}' has {} parameters, at most {} are allowed",
                        decl.params.len(),
                        self.max_callback_params
                    ),
                )
                .with_suggestion("pass the extra values through zero-page variables"),
            );
        }

        for param in params.iter().filter(|param| !param.ty.is_callback_safe()) {
            diagnostics.push(
                SemanticError::callback_mismatch(
                    param.location,
                    format!(
                        "parameter '{}' of callback function '{name}' has type '{}', \
                         callback parameters must be byte, word, boolean or void",
                        param.name, param.ty
                    ),
                )
                .with_suggestion("pass an address as a word instead"),
            );
        }

        if !return_type.is_callback_safe() {
            diagnostics.push(SemanticError::callback_mismatch(
                decl.return_type
                    .as_ref()
                    .map_or(decl.location, |annotation| annotation.location()),
                format!(
                    "callback function '{name}' returns '{return_type}', \
                     callbacks must return byte, word, boolean or void"
                ),
            ));
        }
    }

    /// Checks that the function `source` may be stored in a slot of type `target`.
    pub fn validate_callback_assignment(
        &self,
        target: &Type,
        source: &FunctionSymbol,
        location: Location,
    ) -> Result<()> {
        let Type::Callback(target_callback) = target else {
            return Err(SemanticError::callback_mismatch(
                location,
                format!(
                    "cannot assign to non-callback type '{target}': '{}' is a function",
                    source.name
                ),
            )
            .with_suggestion(format!("declare the target as '{}'", source.signature()))
            .into());
        };

        if !source.is_callback {
            return Err(SemanticError::callback_mismatch(
                location,
                format!(
                    "Only callback functions can be assigned to callback variables, \
                     '{}' is not declared as callback",
                    source.name
                ),
            )
            .with_suggestion(format!("declare it as `callback function {}`", source.name))
            .into());
        }

        let signature = source.signature();
        if !self.type_checker.is_callback_compatible(target_callback, &signature) {
            return Err(SemanticError::callback_mismatch(
                location,
                format!(
                    "callback signature mismatch: expected '{target_callback}', \
                     '{}' has '{signature}'",
                    source.name
                ),
            )
            .into());
        }

        Ok(())
    }

    /// Checks a direct call and yields the function's return type.
    pub fn validate_function_call(
        &self,
        function: &FunctionSymbol,
        args: &[Expr],
        location: Location,
        table: &SymbolTable,
        inference: &dyn TypeInference,
    ) -> Result<Type> {
        let required = function.required_params();
        let total = function.params.len();

        if args.len() < required || args.len() > total {
            let expected = if required == total {
                format!("{total}")
            } else {
                format!("{required} to {total}")
            };
            return Err(SemanticError::type_mismatch(
                location,
                format!(
                    "function '{}' expects {expected} argument(s), got {}",
                    function.name,
                    args.len()
                ),
            )
            .into());
        }

        let params = function.params.iter().map(|param| &param.ty);
        let diagnostics = self.check_arguments(&function.name, params, args, table, inference);
        diagnostics.finish(function.return_type.clone())
    }

    /// Checks an indirect call through a callback-typed variable and yields its return type.
    ///
    /// Optional parameters cannot be honoured here since the concrete target is unknown, so the
    /// argument count has to match exactly.
    pub fn validate_callback_call(
        &self,
        variable: &VariableSymbol,
        args: &[Expr],
        location: Location,
        table: &SymbolTable,
        inference: &dyn TypeInference,
    ) -> Result<Type> {
        let Type::Callback(callback) = &variable.ty else {
            return Err(SemanticError::callback_mismatch(
                location,
                format!(
                    "'{}' has type '{}' and cannot be called",
                    variable.name, variable.ty
                ),
            )
            .into());
        };

        if args.len() != callback.arity() {
            return Err(SemanticError::type_mismatch(
                location,
                format!(
                    "callback '{}' expects exactly {} argument(s), got {}",
                    variable.name,
                    callback.arity(),
                    args.len()
                ),
            )
            .with_suggestion("indirect calls must pass every parameter")
            .into());
        }

        let diagnostics =
            self.check_arguments(&variable.name, callback.params.iter(), args, table, inference);
        diagnostics.finish(callback_return(callback))
    }

    fn check_arguments<'t>(
        &self,
        callee: &str,
        params: impl Iterator<Item = &'t Type>,
        args: &[Expr],
        table: &SymbolTable,
        inference: &dyn TypeInference,
    ) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();

        for (position, (param, arg)) in params.zip(args).enumerate() {
            // a bare function name is a function reference and has to pass the callback gate
            if let Some(ident) = arg.as_ident()
                && let Some(function) = table.lookup_function(&ident.name)
            {
                diagnostics.absorb(self.validate_callback_assignment(param, function, arg.location()));
                continue;
            }

            let Some(arg_type) = diagnostics.absorb(inference.infer_type(arg, table)) else {
                continue;
            };

            if !self.type_checker.is_assignment_compatible(param, &arg_type) {
                diagnostics.push(SemanticError::type_mismatch(
                    arg.location(),
                    format!(
                        "argument {} of '{callee}' expects '{param}', found '{arg_type}'",
                        position + 1
                    ),
                ));
            }
        }

        diagnostics
    }
}

fn callback_return(callback: &CallbackType) -> Type {
    callback.return_type.as_ref().clone()
}

fn check_parameter_names(decl: &FunctionDecl, diagnostics: &mut Diagnostics) {
    let mut seen: HashMap<&str, Location> = HashMap::new();

    for param in &decl.params {
        let name = param.name.name.as_str();
        match seen.get(name) {
            Some(first) => diagnostics.push(
                SemanticError::new(
                    ErrorKind::DuplicateSymbol,
                    param.location,
                    format!(
                        "duplicate parameter '{name}' in function '{}'",
                        decl.name.name
                    ),
                )
                .with_suggestion(format!("first declared at {first}")),
            ),
            None => {
                seen.insert(name, param.location);
            }
        }
    }
}

/// Optional parameters must trail the required ones for the call arity window to make sense.
fn check_parameter_order(decl: &FunctionDecl, diagnostics: &mut Diagnostics) {
    let mut first_optional: Option<&Parameter> = None;

    for param in &decl.params {
        if param.is_optional() {
            first_optional.get_or_insert(param);
        } else if let Some(optional) = first_optional {
            diagnostics.push(SemanticError::invalid_operation(
                param.location,
                format!(
                    "required parameter '{}' cannot follow optional parameter '{}'",
                    param.name.name, optional.name.name
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use blend_syntax::TypeAnnotation;

    use super::*;
    use crate::scope::ScopeKind;

    fn byte() -> TypeAnnotation {
        TypeAnnotation::named("byte")
    }

    fn declare_slot(table: &mut SymbolTable, name: &str, ty: Type) -> VariableSymbol {
        let variable = VariableSymbol {
            name: name.into(),
            ty,
            scope: table.current_scope(),
            location: Location::default(),
            storage: None,
            is_const: false,
            constant_value: None,
        };
        table.declare_symbol(Symbol::Variable(variable.clone())).unwrap();
        variable
    }

    fn call(
        analyzer: &FunctionAnalyzer,
        table: &SymbolTable,
        function: &FunctionSymbol,
        args: Vec<Expr>,
    ) -> Result<Type> {
        let inference = ExpressionAnalyzer::new(analyzer);
        analyzer.validate_function_call(function, &args, Location::default(), table, &inference)
    }

    #[test]
    fn test_plain_function_declaration() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();
        let decl = FunctionDecl::new("add")
            .param(Parameter::new("a", byte()))
            .param(Parameter::new("b", byte()))
            .returns(byte());

        let symbol = analyzer.analyze_function_declaration(&decl, &mut table).unwrap();

        assert_eq!(symbol.return_type, Type::BYTE);
        assert_eq!(symbol.params.len(), 2);
        assert!(!symbol.is_callback);
        assert_eq!(table.lookup_function("add"), Some(&symbol));
    }

    #[test]
    fn test_callback_declaration_defaults_to_void() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();
        let decl = FunctionDecl::new("onIrq").callback();

        let symbol = analyzer.analyze_function_declaration(&decl, &mut table).unwrap();

        assert!(symbol.is_callback);
        assert_eq!(symbol.return_type, Type::VOID);
        assert_eq!(symbol.signature(), CallbackType::new(vec![], Type::VOID));
    }

    #[test]
    fn test_callback_parameter_limit() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();

        let four = (0..4).fold(FunctionDecl::new("four").callback(), |decl, i| {
            decl.param(Parameter::new(format!("p{i}"), byte()))
        });
        assert!(analyzer.analyze_function_declaration(&four, &mut table).is_ok());

        let five = (0..5).fold(FunctionDecl::new("five").callback(), |decl, i| {
            decl.param(Parameter::new(format!("p{i}"), byte()))
        });
        let errors = analyzer.analyze_function_declaration(&five, &mut table).unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::CallbackMismatch]);
        insta::assert_snapshot!(errors.first().message, @"callback function 'five' has 5 parameters, at most 4 are allowed");
        assert!(table.lookup_function("five").is_none());
    }

    #[test]
    fn test_callback_parameter_limit_follows_config() {
        let config = AnalysisConfig {
            max_callback_params: 1,
            ..AnalysisConfig::default()
        };
        let analyzer = FunctionAnalyzer::new(&config);
        let mut table = SymbolTable::new();
        let decl = FunctionDecl::new("twice")
            .callback()
            .param(Parameter::new("a", byte()))
            .param(Parameter::new("b", byte()));

        let errors = analyzer.analyze_function_declaration(&decl, &mut table).unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::CallbackMismatch]);
    }

    #[test]
    fn test_callback_rejects_complex_types() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();
        let decl = FunctionDecl::new("onKey")
            .callback()
            .param(Parameter::new("name", TypeAnnotation::named("string")))
            .returns(TypeAnnotation::array(byte(), Expr::number(2)));

        let errors = analyzer.analyze_function_declaration(&decl, &mut table).unwrap_err();
        assert_eq!(
            errors.kinds(),
            vec![ErrorKind::CallbackMismatch, ErrorKind::CallbackMismatch]
        );
        insta::assert_snapshot!(
            errors.first().message,
            @"parameter 'name' of callback function 'onKey' has type 'string', callback parameters must be byte, word, boolean or void"
        );
    }

    #[test]
    fn test_duplicate_function() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();
        let decl = FunctionDecl::new("main");

        analyzer.analyze_function_declaration(&decl, &mut table).unwrap();
        let errors = analyzer.analyze_function_declaration(&decl, &mut table).unwrap_err();

        assert_eq!(errors.kinds(), vec![ErrorKind::DuplicateSymbol]);
        assert_eq!(table.root().len(), 1);
    }

    #[test]
    fn test_export_requires_global_or_module_scope() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();

        let module = table.push_scope(ScopeKind::Module);
        let exported = FunctionDecl::new("init").exported();
        assert!(analyzer.analyze_function_declaration(&exported, &mut table).is_ok());

        let result = table.with_scope(ScopeKind::Function, |table| {
            analyzer.analyze_function_declaration(&FunctionDecl::new("helper").exported(), table)
        });
        let errors = result.unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::InvalidScope]);
        insta::assert_snapshot!(errors.first().message, @"function 'helper' cannot be exported from a function scope");

        table.close_scope(module);
    }

    #[test]
    fn test_every_problem_is_reported_and_nothing_is_declared() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();
        let decl = FunctionDecl::new("broken")
            .param(Parameter::new("x", TypeAnnotation::named("sprite")))
            .param(Parameter::new("y", byte()).optional())
            .param(Parameter::new("y", byte()));

        let errors = analyzer.analyze_function_declaration(&decl, &mut table).unwrap_err();

        assert_eq!(
            errors.kinds(),
            vec![
                ErrorKind::UndefinedSymbol,
                ErrorKind::DuplicateSymbol,
                ErrorKind::InvalidOperation
            ]
        );
        assert!(table.root().is_empty());
    }

    #[test]
    fn test_missing_name() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();

        let errors = analyzer
            .analyze_function_declaration(&FunctionDecl::new(""), &mut table)
            .unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::InvalidOperation]);
    }

    #[test]
    fn test_only_callbacks_can_fill_callback_slots() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();
        let plain = analyzer
            .analyze_function_declaration(&FunctionDecl::new("plain"), &mut table)
            .unwrap();
        let handler = analyzer
            .analyze_function_declaration(&FunctionDecl::new("onIrq").callback(), &mut table)
            .unwrap();
        let slot = Type::callback(vec![], Type::VOID);

        assert!(analyzer.validate_callback_assignment(&slot, &handler, Location::default()).is_ok());

        let errors = analyzer
            .validate_callback_assignment(&slot, &plain, Location::default())
            .unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::CallbackMismatch]);
        assert!(errors.first().message.contains("Only callback functions can be assigned"));

        let errors = analyzer
            .validate_callback_assignment(&Type::WORD, &handler, Location::default())
            .unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::CallbackMismatch]);
    }

    #[test]
    fn test_callback_signature_mismatch_names_both_sides() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();
        let decl = FunctionDecl::new("onRaster")
            .callback()
            .param(Parameter::new("line", TypeAnnotation::named("word")));
        let handler = analyzer.analyze_function_declaration(&decl, &mut table).unwrap();
        let slot = Type::callback(vec![Type::BYTE], Type::VOID);

        let errors = analyzer
            .validate_callback_assignment(&slot, &handler, Location::default())
            .unwrap_err();
        insta::assert_snapshot!(
            errors.first().message,
            @"callback signature mismatch: expected 'callback(byte): void', 'onRaster' has 'callback(word): void'"
        );

        let widening = FunctionAnalyzer::new(&AnalysisConfig {
            callback_widening: true,
            ..AnalysisConfig::default()
        });
        assert!(widening.validate_callback_assignment(&slot, &handler, Location::default()).is_ok());
    }

    #[test]
    fn test_call_arity_window() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();
        let decl = FunctionDecl::new("plot")
            .param(Parameter::new("x", byte()))
            .param(Parameter::new("y", byte()))
            .param(Parameter::new("color", byte()).with_default(Expr::number(1)))
            .returns(TypeAnnotation::named("boolean"));
        let plot = analyzer.analyze_function_declaration(&decl, &mut table).unwrap();

        let two = vec![Expr::number(1), Expr::number(2)];
        assert_eq!(call(&analyzer, &table, &plot, two).unwrap(), Type::BOOLEAN);

        let three = vec![Expr::number(1), Expr::number(2), Expr::number(3)];
        assert!(call(&analyzer, &table, &plot, three).is_ok());

        let errors = call(&analyzer, &table, &plot, vec![Expr::number(1)]).unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::TypeMismatch]);
        insta::assert_snapshot!(errors.first().message, @"function 'plot' expects 2 to 3 argument(s), got 1");

        let four = vec![Expr::number(1); 4];
        assert!(call(&analyzer, &table, &plot, four).is_err());
    }

    #[test]
    fn test_call_argument_types() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();
        let decl = FunctionDecl::new("poke")
            .param(Parameter::new("address", TypeAnnotation::named("word")))
            .param(Parameter::new("value", byte()));
        let poke = analyzer.analyze_function_declaration(&decl, &mut table).unwrap();

        let widened = vec![Expr::number(1), Expr::number(2)];
        assert_eq!(call(&analyzer, &table, &poke, widened).unwrap(), Type::VOID);

        let wrong = vec![Expr::boolean(true), Expr::number(0xD020)];
        let errors = call(&analyzer, &table, &poke, wrong).unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::TypeMismatch, ErrorKind::TypeMismatch]);
        insta::assert_snapshot!(errors.first().message, @"argument 1 of 'poke' expects 'word', found 'boolean'");
    }

    #[test]
    fn test_default_value_must_fit_the_parameter() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();
        let decl = FunctionDecl::new("fill")
            .param(Parameter::new("color", byte()).with_default(Expr::string("red")));

        let errors = analyzer.analyze_function_declaration(&decl, &mut table).unwrap_err();

        assert_eq!(errors.kinds(), vec![ErrorKind::TypeMismatch]);
        insta::assert_snapshot!(errors.first().message, @"cannot assign a value of type 'string' to 'byte'");
        assert!(table.lookup_function("fill").is_none());
    }

    #[test]
    fn test_function_arguments_pass_the_callback_gate() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();
        analyzer
            .analyze_function_declaration(&FunctionDecl::new("plain"), &mut table)
            .unwrap();
        analyzer
            .analyze_function_declaration(&FunctionDecl::new("onIrq").callback(), &mut table)
            .unwrap();
        let decl = FunctionDecl::new("install")
            .param(Parameter::new("handler", TypeAnnotation::callback(vec![], None)));
        let install = analyzer.analyze_function_declaration(&decl, &mut table).unwrap();

        assert!(call(&analyzer, &table, &install, vec![Expr::ident("onIrq")]).is_ok());

        let errors = call(&analyzer, &table, &install, vec![Expr::ident("plain")]).unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::CallbackMismatch]);
        assert!(errors.first().message.contains("'plain' is not declared as callback"));

        let chain = declare_slot(
            &mut table,
            "chain",
            Type::callback(vec![Type::callback(vec![], Type::VOID)], Type::VOID),
        );
        let inference = ExpressionAnalyzer::new(&analyzer);
        let location = Location::default();

        assert!(analyzer
            .validate_callback_call(&chain, &[Expr::ident("onIrq")], location, &table, &inference)
            .is_ok());

        let errors = analyzer
            .validate_callback_call(&chain, &[Expr::ident("plain")], location, &table, &inference)
            .unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::CallbackMismatch]);
    }

    #[test]
    fn test_indirect_call_needs_exact_arity() {
        let analyzer = FunctionAnalyzer::default();
        let mut table = SymbolTable::new();
        let handler = declare_slot(&mut table, "handler", Type::callback(vec![Type::BYTE], Type::WORD));
        let counter = declare_slot(&mut table, "counter", Type::BYTE);
        let inference = ExpressionAnalyzer::new(&analyzer);
        let location = Location::default();

        let ty = analyzer
            .validate_callback_call(&handler, &[Expr::number(7)], location, &table, &inference)
            .unwrap();
        assert_eq!(ty, Type::WORD);

        let errors = analyzer
            .validate_callback_call(&handler, &[], location, &table, &inference)
            .unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::TypeMismatch]);

        let errors = analyzer
            .validate_callback_call(&counter, &[], location, &table, &inference)
            .unwrap_err();
        assert_eq!(errors.kinds(), vec![ErrorKind::CallbackMismatch]);
    }
}
