//! Shorthand constructors for syntax nodes.
//!
//! Nodes built here carry a default location unless one is attached with `at`.

use blend_core::Location;

use crate::ast::*;

impl Ident {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Self::new(name, Location::default())
    }
}

impl TypeAnnotation {
    pub fn named(name: impl Into<String>) -> Self {
        TypeAnnotation::Named(Ident::new(name, Location::default()))
    }

    pub fn array(element: TypeAnnotation, size: Expr) -> Self {
        TypeAnnotation::Array {
            element: Box::new(element),
            size: Box::new(size),
            location: Location::default(),
        }
    }

    pub fn callback(params: Vec<TypeAnnotation>, return_type: Option<TypeAnnotation>) -> Self {
        TypeAnnotation::Callback {
            params,
            return_type: return_type.map(Box::new),
            location: Location::default(),
        }
    }
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeAnnotation) -> Self {
        Self {
            name: Ident::new(name, Location::default()),
            ty,
            optional: false,
            default_value: None,
            location: Location::default(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_default(mut self, value: Expr) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self.name.location = location;
        self
    }
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Ident::new(name, Location::default()),
            params: Vec::new(),
            return_type: None,
            body: None,
            callback: false,
            exported: false,
            location: Location::default(),
        }
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, return_type: TypeAnnotation) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn callback(mut self) -> Self {
        self.callback = true;
        self
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn body(mut self, statements: Vec<Stmt>) -> Self {
        self.body = Some(Block {
            statements,
            location: self.location,
        });
        self
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self.name.location = location;
        self
    }
}

impl VariableDecl {
    pub fn new(name: impl Into<String>, ty: Option<TypeAnnotation>) -> Self {
        Self {
            name: Ident::new(name, Location::default()),
            ty,
            initializer: None,
            storage: None,
            constant: false,
            location: Location::default(),
        }
    }

    pub fn init(mut self, value: Expr) -> Self {
        self.initializer = Some(value);
        self
    }

    pub fn constant(mut self) -> Self {
        self.constant = true;
        self
    }

    pub fn storage(mut self, storage: StorageClass) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self.name.location = location;
        self
    }
}

impl Expr {
    pub fn number(value: i64) -> Self {
        Expr::Number {
            value,
            location: Location::default(),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Expr::Bool {
            value,
            location: Location::default(),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::String {
            value: value.into(),
            location: Location::default(),
        }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(Ident::new(name, Location::default()))
    }

    pub fn unary(op: UnaryOp, expr: Expr) -> Self {
        let location = expr.location();
        Expr::Unary(Unary {
            op,
            expr: Box::new(expr),
            location,
        })
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        let location = lhs.location().merge(rhs.location());
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            op,
            location,
        })
    }

    pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call(Call {
            callee: Box::new(Expr::ident(callee)),
            args,
            location: Location::default(),
        })
    }

    pub fn index(target: Expr, index: Expr) -> Self {
        let location = target.location();
        Expr::Index(Index {
            target: Box::new(target),
            index: Box::new(index),
            location,
        })
    }
}

impl Stmt {
    pub fn assign(target: impl Into<String>, value: Expr) -> Self {
        Stmt::Assign(Assign {
            target: Ident::new(target, Location::default()),
            value,
            location: Location::default(),
        })
    }

    pub fn ret(value: Option<Expr>) -> Self {
        Stmt::Return(Return {
            value,
            location: Location::default(),
        })
    }

    pub fn block(statements: Vec<Stmt>) -> Self {
        Stmt::Block(Block {
            statements,
            location: Location::default(),
        })
    }

    pub fn if_else(condition: Expr, then_branch: Vec<Stmt>, else_branch: Option<Vec<Stmt>>) -> Self {
        Stmt::If(If {
            condition,
            then_branch: Block {
                statements: then_branch,
                location: Location::default(),
            },
            else_branch: else_branch.map(|statements| Block {
                statements,
                location: Location::default(),
            }),
            location: Location::default(),
        })
    }

    pub fn while_loop(condition: Expr, body: Vec<Stmt>) -> Self {
        Stmt::While(While {
            condition,
            body: Block {
                statements: body,
                location: Location::default(),
            },
            location: Location::default(),
        })
    }
}
