//! AST (abstract syntax tree) types for the LuduScript language.
//!
//! The tree is strictly owned: every node owns its children, nothing is
//! shared. Each expression and statement carries the source line it started
//! on so later stages can report errors against it.

/// Literal payloads. Integers and floats are distinct variants so `3` and
/// `3.0` stay distinguishable all the way to the output.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Neg,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Binding strength, higher binds tighter. All levels are
    /// left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq | BinaryOp::Ne => 3,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 6,
        }
    }
}

/// An expression together with the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub line: usize,
}

impl Expr {
    pub fn new(kind: ExprKind, line: usize) -> Self {
        Self { kind, line }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Ident(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },
    /// `callee(args...)`. Parsed but rejected by the interpreter.
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `target.name`. Parsed but rejected by the interpreter.
    Member {
        target: Box<Expr>,
        name: String,
    },
}

/// Declared type of a `num(...)`, `str(...)` or `bool(...)` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclType {
    Num,
    Str,
    Bool,
}

impl DeclType {
    pub fn keyword(self) -> &'static str {
        match self {
            DeclType::Num => "num",
            DeclType::Str => "str",
            DeclType::Bool => "bool",
        }
    }
}

/// How a declaration obtains its value.
#[derive(Debug, Clone, PartialEq)]
pub enum Initializer {
    /// `num(x)` or `num(x) {}`: the type's default value
    Default,
    /// `num(x) { expr }`
    Expr(Expr),
    /// `num(x) { stmt... }`: evaluated as a block expression
    Block(Vec<Stmt>),
}

/// One `elif (cond) { body }` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ElifClause {
    pub cond: Expr,
    pub body: Vec<Stmt>,
}

/// A statement together with the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: usize,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: usize) -> Self {
        Self { kind, line }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expr(Expr),
    Assign {
        name: String,
        expr: Expr,
    },
    Decl {
        ty: DeclType,
        name: String,
        init: Initializer,
    },
    If {
        cond: Expr,
        then_body: Vec<Stmt>,
        elifs: Vec<ElifClause>,
        else_body: Option<Vec<Stmt>>,
    },
    /// `for (var, args...) { body }` with one to three range arguments.
    For {
        var: String,
        args: Vec<Expr>,
        body: Vec<Stmt>,
    },
    Obj {
        class: String,
        id: Expr,
        body: Vec<Stmt>,
    },
    /// `break { body }`: body runs before the loop is left.
    Break(Vec<Stmt>),
    /// `continue { body }`: body runs before the next iteration starts.
    Continue(Vec<Stmt>),
}

/// Entire program: the top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}
