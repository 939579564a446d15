//! Arithmetic expression and statement IR.
//!
//! The IR is a pair of closed sums: [`Expr`] for expression-typed nodes and
//! [`Stmt`] for statement-typed nodes. Every consumer discriminates with a
//! `match`, so adding a kind forces a decision at every use site.
//!
//! Expressions carry no per-node type annotation; scalar integer, float,
//! boolean, and vector kinds share the one sum, and each analysis declares
//! which kinds lie inside its domain.

use std::fmt;

/// Scalar type tag for [`Expr::Cast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int32,
    Int64,
    UInt32,
    Float32,
    Float64,
}

/// Expression-typed IR node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Integer literal
    IntImm(i64),
    /// Floating-point literal
    FloatImm(f64),
    /// Numeric conversion: `cast<ty>(e)`
    Cast(Type, Box<Expr>),
    /// Variable reference
    Var(String),
    /// Addition: `a + b`
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction: `a - b`
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication: `a * b`
    Mul(Box<Expr>, Box<Expr>),
    /// Division: `a / b`
    Div(Box<Expr>, Box<Expr>),
    /// Modulo: `a % b`
    Mod(Box<Expr>, Box<Expr>),
    /// Lattice minimum: `min(a, b)`
    Min(Box<Expr>, Box<Expr>),
    /// Lattice maximum: `max(a, b)`
    Max(Box<Expr>, Box<Expr>),
    /// Comparison: `a == b`
    Eq(Box<Expr>, Box<Expr>),
    /// Comparison: `a != b`
    Ne(Box<Expr>, Box<Expr>),
    /// Comparison: `a < b`
    Lt(Box<Expr>, Box<Expr>),
    /// Comparison: `a <= b`
    Le(Box<Expr>, Box<Expr>),
    /// Comparison: `a > b`
    Gt(Box<Expr>, Box<Expr>),
    /// Comparison: `a >= b`
    Ge(Box<Expr>, Box<Expr>),
    /// Boolean conjunction: `a && b`
    And(Box<Expr>, Box<Expr>),
    /// Boolean disjunction: `a || b`
    Or(Box<Expr>, Box<Expr>),
    /// Boolean negation: `!a`
    Not(Box<Expr>),
    /// Conditional value: `select(cond, t, f)`
    Select(Box<Expr>, Box<Expr>, Box<Expr>),
    /// Memory read: `name[index]`
    Load { name: String, index: Box<Expr> },
    /// Vector constructor: `base`, `base + stride`, ... (`lanes` values)
    Ramp {
        base: Box<Expr>,
        stride: Box<Expr>,
        lanes: usize,
    },
    /// Vector constructor: `value` repeated across `lanes` lanes
    Broadcast { value: Box<Expr>, lanes: usize },
    /// Opaque call: `name(args...)`
    Call { name: String, args: Vec<Expr> },
    /// Scoped binding: `let name = value in body`
    Let {
        name: String,
        value: Box<Expr>,
        body: Box<Expr>,
    },
}

impl Expr {
    /// Integer literal
    pub fn int(value: i64) -> Self {
        Expr::IntImm(value)
    }

    /// Floating-point literal
    pub fn float(value: f64) -> Self {
        Expr::FloatImm(value)
    }

    /// Variable reference
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    /// Numeric conversion: `cast<ty>(self)`
    pub fn cast(self, ty: Type) -> Self {
        Expr::Cast(ty, Box::new(self))
    }

    /// Addition: `self + other`
    pub fn add(self, other: Self) -> Self {
        Expr::Add(Box::new(self), Box::new(other))
    }

    /// Subtraction: `self - other`
    pub fn sub(self, other: Self) -> Self {
        Expr::Sub(Box::new(self), Box::new(other))
    }

    /// Multiplication: `self * other`
    pub fn mul(self, other: Self) -> Self {
        Expr::Mul(Box::new(self), Box::new(other))
    }

    /// Division: `self / other`
    pub fn div(self, other: Self) -> Self {
        Expr::Div(Box::new(self), Box::new(other))
    }

    /// Modulo: `self % other`
    pub fn modulo(self, other: Self) -> Self {
        Expr::Mod(Box::new(self), Box::new(other))
    }

    /// Lattice minimum: `min(self, other)`
    pub fn min(self, other: Self) -> Self {
        Expr::Min(Box::new(self), Box::new(other))
    }

    /// Lattice maximum: `max(self, other)`
    pub fn max(self, other: Self) -> Self {
        Expr::Max(Box::new(self), Box::new(other))
    }

    /// Comparison: `self == other`
    pub fn eq(self, other: Self) -> Self {
        Expr::Eq(Box::new(self), Box::new(other))
    }

    /// Comparison: `self != other`
    pub fn ne(self, other: Self) -> Self {
        Expr::Ne(Box::new(self), Box::new(other))
    }

    /// Comparison: `self < other`
    pub fn lt(self, other: Self) -> Self {
        Expr::Lt(Box::new(self), Box::new(other))
    }

    /// Comparison: `self <= other`
    pub fn le(self, other: Self) -> Self {
        Expr::Le(Box::new(self), Box::new(other))
    }

    /// Comparison: `self > other`
    pub fn gt(self, other: Self) -> Self {
        Expr::Gt(Box::new(self), Box::new(other))
    }

    /// Comparison: `self >= other`
    pub fn ge(self, other: Self) -> Self {
        Expr::Ge(Box::new(self), Box::new(other))
    }

    /// Boolean conjunction: `self && other`
    pub fn and(self, other: Self) -> Self {
        Expr::And(Box::new(self), Box::new(other))
    }

    /// Boolean disjunction: `self || other`
    pub fn or(self, other: Self) -> Self {
        Expr::Or(Box::new(self), Box::new(other))
    }

    /// Boolean negation: `!self`
    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// Conditional value: `select(cond, t, f)`
    pub fn select(cond: Self, t: Self, f: Self) -> Self {
        Expr::Select(Box::new(cond), Box::new(t), Box::new(f))
    }

    /// Memory read: `name[index]`
    pub fn load(name: impl Into<String>, index: Self) -> Self {
        Expr::Load {
            name: name.into(),
            index: Box::new(index),
        }
    }

    /// Vector constructor: `ramp(base, stride, lanes)`
    pub fn ramp(base: Self, stride: Self, lanes: usize) -> Self {
        Expr::Ramp {
            base: Box::new(base),
            stride: Box::new(stride),
            lanes,
        }
    }

    /// Vector constructor: `broadcast(value, lanes)`
    pub fn broadcast(value: Self, lanes: usize) -> Self {
        Expr::Broadcast {
            value: Box::new(value),
            lanes,
        }
    }

    /// Opaque call: `name(args...)`
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    /// Scoped binding: `let name = value in body`
    pub fn let_in(name: impl Into<String>, value: Self, body: Self) -> Self {
        Expr::Let {
            name: name.into(),
            value: Box::new(value),
            body: Box::new(body),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::IntImm(v) => write!(f, "{}", v),
            Expr::FloatImm(v) => write!(f, "{}", v),
            Expr::Cast(ty, e) => write!(f, "cast<{:?}>({})", ty, e),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Add(a, b) => write!(f, "({} + {})", a, b),
            Expr::Sub(a, b) => write!(f, "({} - {})", a, b),
            Expr::Mul(a, b) => write!(f, "({}*{})", a, b),
            Expr::Div(a, b) => write!(f, "({}/{})", a, b),
            Expr::Mod(a, b) => write!(f, "({} % {})", a, b),
            Expr::Min(a, b) => write!(f, "min({}, {})", a, b),
            Expr::Max(a, b) => write!(f, "max({}, {})", a, b),
            Expr::Eq(a, b) => write!(f, "({} == {})", a, b),
            Expr::Ne(a, b) => write!(f, "({} != {})", a, b),
            Expr::Lt(a, b) => write!(f, "({} < {})", a, b),
            Expr::Le(a, b) => write!(f, "({} <= {})", a, b),
            Expr::Gt(a, b) => write!(f, "({} > {})", a, b),
            Expr::Ge(a, b) => write!(f, "({} >= {})", a, b),
            Expr::And(a, b) => write!(f, "({} && {})", a, b),
            Expr::Or(a, b) => write!(f, "({} || {})", a, b),
            Expr::Not(a) => write!(f, "!{}", a),
            Expr::Select(c, t, e) => write!(f, "select({}, {}, {})", c, t, e),
            Expr::Load { name, index } => write!(f, "{}[{}]", name, index),
            Expr::Ramp { base, stride, lanes } => write!(f, "ramp({}, {}, {})", base, stride, lanes),
            Expr::Broadcast { value, lanes } => write!(f, "broadcast({}, {})", value, lanes),
            Expr::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Let { name, value, body } => write!(f, "(let {} = {} in {})", name, value, body),
        }
    }
}

/// Statement-typed IR node.
///
/// Statements are a separate sum from [`Expr`]: value analyses are simply
/// not defined over them, and the substitution pass walks both.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Scoped binding whose body is a statement
    LetStmt {
        name: String,
        value: Expr,
        body: Box<Stmt>,
    },
    /// Debug print of a list of values
    Print(Vec<Expr>),
    /// Runtime assertion with a message
    AssertStmt { condition: Expr, message: String },
    /// Produce/update/consume grouping for one pipeline stage
    Pipeline {
        name: String,
        produce: Box<Stmt>,
        update: Option<Box<Stmt>>,
        consume: Box<Stmt>,
    },
    /// Serial loop: `for name in [min, min+extent)`
    For {
        name: String,
        min: Expr,
        extent: Expr,
        body: Box<Stmt>,
    },
    /// Memory write: `name[index] = value`
    Store {
        name: String,
        value: Expr,
        index: Expr,
    },
    /// Multi-dimensional write: `name(args...) = values...`
    Provide {
        name: String,
        values: Vec<Expr>,
        args: Vec<Expr>,
    },
    /// Scoped allocation of `size` elements
    Allocate {
        name: String,
        size: Expr,
        body: Box<Stmt>,
    },
    /// Scoped realization over per-dimension `(min, extent)` bounds
    Realize {
        name: String,
        bounds: Vec<(Expr, Expr)>,
        body: Box<Stmt>,
    },
    /// Sequencing: first, then rest
    Block(Box<Stmt>, Box<Stmt>),
}
