use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimitiveType {
    Byte,
    Word,
    Boolean,
    Void,
    String,
}

impl PrimitiveType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "byte" => Some(PrimitiveType::Byte),
            "word" => Some(PrimitiveType::Word),
            "boolean" | "bool" => Some(PrimitiveType::Boolean),
            "void" => Some(PrimitiveType::Void),
            "string" => Some(PrimitiveType::String),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, PrimitiveType::Byte | PrimitiveType::Word)
    }

    /// Whether a value of this type can be stored in `target` without loss.
    pub fn widens_to(&self, target: PrimitiveType) -> bool {
        *self == target || matches!((self, target), (PrimitiveType::Byte, PrimitiveType::Word))
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimitiveType::Byte => write!(f, "byte"),
            PrimitiveType::Word => write!(f, "word"),
            PrimitiveType::Boolean => write!(f, "boolean"),
            PrimitiveType::Void => write!(f, "void"),
            PrimitiveType::String => write!(f, "string"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ArrayType {
    pub element: Box<Type>,
    pub size: usize,
}

/// The type of a function pointer, e.g. an interrupt vector slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CallbackType {
    pub params: Vec<Type>,
    pub return_type: Box<Type>,
}

impl CallbackType {
    pub fn new(params: Vec<Type>, return_type: Type) -> Self {
        Self {
            params,
            return_type: Box::new(return_type),
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    Primitive(PrimitiveType),
    Array(ArrayType),
    Callback(CallbackType),
}

impl Type {
    pub const BYTE: Type = Type::Primitive(PrimitiveType::Byte);
    pub const WORD: Type = Type::Primitive(PrimitiveType::Word);
    pub const BOOLEAN: Type = Type::Primitive(PrimitiveType::Boolean);
    pub const VOID: Type = Type::Primitive(PrimitiveType::Void);
    pub const STRING: Type = Type::Primitive(PrimitiveType::String);

    pub fn array(element: Type, size: usize) -> Self {
        Type::Array(ArrayType {
            element: Box::new(element),
            size,
        })
    }

    pub fn callback(params: Vec<Type>, return_type: Type) -> Self {
        Type::Callback(CallbackType::new(params, return_type))
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            Type::Primitive(primitive) => Some(*primitive),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<&CallbackType> {
        match self {
            Type::Callback(callback) => Some(callback),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Primitive(PrimitiveType::Void))
    }

    pub fn is_numeric(&self) -> bool {
        self.as_primitive().is_some_and(|primitive| primitive.is_numeric())
    }

    /// Types a hardware dispatch slot can pass or return: scalars that fit a register pair.
    pub fn is_callback_safe(&self) -> bool {
        matches!(
            self.as_primitive(),
            Some(PrimitiveType::Byte | PrimitiveType::Word | PrimitiveType::Boolean | PrimitiveType::Void)
        )
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Primitive(primitive) => write!(f, "{primitive}"),
            Type::Array(array) => write!(f, "{}[{}]", array.element, array.size),
            Type::Callback(callback) => write!(f, "{callback}"),
        }
    }
}

impl std::fmt::Display for CallbackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self
            .params
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "callback({params}): {}", self.return_type)
    }
}
