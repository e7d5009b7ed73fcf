use blend_core::Location;
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Program {
    pub module: Option<Ident>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Item {
    Function(FunctionDecl),
    Variable(VariableDecl),
}

impl Item {
    pub fn location(&self) -> Location {
        match self {
            Item::Function(function) => function.location,
            Item::Variable(variable) => variable.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ident {
    pub name: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeAnnotation {
    /// `byte`, `word`, `boolean`, `void`, `string`, or an unknown name the analyzer rejects.
    Named(Ident),
    /// `byte[16]`
    Array {
        element: Box<TypeAnnotation>,
        size: Box<Expr>,
        location: Location,
    },
    /// `callback(byte, word): boolean`; a missing return type means `void`.
    Callback {
        params: Vec<TypeAnnotation>,
        return_type: Option<Box<TypeAnnotation>>,
        location: Location,
    },
}

impl TypeAnnotation {
    pub fn location(&self) -> Location {
        match self {
            TypeAnnotation::Named(ident) => ident.location,
            TypeAnnotation::Array { location, .. } => *location,
            TypeAnnotation::Callback { location, .. } => *location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: Ident,
    pub ty: TypeAnnotation,
    pub optional: bool,
    pub default_value: Option<Expr>,
    pub location: Location,
}

impl Parameter {
    /// A parameter with a default value is optional even without the explicit marker.
    pub fn is_optional(&self) -> bool {
        self.optional || self.default_value.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: Ident,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    /// `None` for bodiless declarations, e.g. routines implemented in assembly.
    pub body: Option<Block>,
    pub callback: bool,
    pub exported: bool,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StorageClass {
    ZeroPage,
    Ram,
    Data,
    Const,
    IO,
}

impl std::fmt::Display for StorageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageClass::ZeroPage => write!(f, "@zp"),
            StorageClass::Ram => write!(f, "@ram"),
            StorageClass::Data => write!(f, "@data"),
            StorageClass::Const => write!(f, "@const"),
            StorageClass::IO => write!(f, "@io"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDecl {
    pub name: Ident,
    pub ty: Option<TypeAnnotation>,
    pub initializer: Option<Expr>,
    pub storage: Option<StorageClass>,
    pub constant: bool,
    pub location: Location,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Variable(VariableDecl),
    Assign(Assign),
    Expr(Expr),
    Return(Return),
    If(If),
    While(While),
    Block(Block),
}

impl Stmt {
    pub fn location(&self) -> Location {
        match self {
            Stmt::Variable(variable) => variable.location,
            Stmt::Assign(assign) => assign.location,
            Stmt::Expr(expr) => expr.location(),
            Stmt::Return(ret) => ret.location,
            Stmt::If(if_stmt) => if_stmt.location,
            Stmt::While(while_stmt) => while_stmt.location,
            Stmt::Block(block) => block.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assign {
    pub target: Ident,
    pub value: Expr,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Return {
    pub value: Option<Expr>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct If {
    pub condition: Expr,
    pub then_branch: Block,
    pub else_branch: Option<Block>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct While {
    pub condition: Expr,
    pub body: Block,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Number { value: i64, location: Location },
    Bool { value: bool, location: Location },
    String { value: String, location: Location },
    Ident(Ident),
    Unary(Unary),
    Binary(Binary),
    Call(Call),
    Index(Index),
}

impl Expr {
    pub fn location(&self) -> Location {
        match self {
            Expr::Number { location, .. } => *location,
            Expr::Bool { location, .. } => *location,
            Expr::String { location, .. } => *location,
            Expr::Ident(ident) => ident.location,
            Expr::Unary(unary) => unary.location,
            Expr::Binary(binary) => binary.location,
            Expr::Call(call) => call.location,
            Expr::Index(index) => index.location,
        }
    }

    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Expr::Ident(ident) => Some(ident),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
            UnaryOp::BitNot => write!(f, "~"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOp::Add
                | BinaryOp::Sub
                | BinaryOp::Mul
                | BinaryOp::Div
                | BinaryOp::Mod
                | BinaryOp::BitAnd
                | BinaryOp::BitOr
                | BinaryOp::BitXor
                | BinaryOp::Shl
                | BinaryOp::Shr
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        };
        write!(f, "{symbol}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unary {
    pub op: UnaryOp,
    pub expr: Box<Expr>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binary {
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub op: BinaryOp,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Index {
    pub target: Box<Expr>,
    pub index: Box<Expr>,
    pub location: Location,
}
