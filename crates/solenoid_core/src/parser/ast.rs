//! Abstract syntax tree for the inline-assembly language.
//!
//! Every node struct carries a [`SourceLocation`] field (`loc`) that
//! pinpoints its position in the source text.  [`SourceLocation`] is a type
//! alias for [`crate::parser::scanner::Span`] so it is `Copy`.
//!
//! The tree is uniquely owned: each node owns its children outright and no
//! node is shared between parents.
//!
//! # Structure
//!
//! - [`Block`] — root node of every parse.
//! - [`Statement`] — statement nodes.
//! - [`Expression`] — expression nodes.
//! - [`Literal`], [`Identifier`], [`TypedName`] — shared leaf types.

use smallvec::SmallVec;

use crate::intern::Name;
use crate::parser::scanner::Span;

// ─────────────────────────────────────────────────────────────────────────────
// Source location
// ─────────────────────────────────────────────────────────────────────────────

/// Source location attached to every AST node — a half-open `[start, end)`
/// span in the source text.
pub type SourceLocation = Span;

// ─────────────────────────────────────────────────────────────────────────────
// Common helpers
// ─────────────────────────────────────────────────────────────────────────────

/// A reference to a name in scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// Source location.
    pub loc: SourceLocation,
    /// The canonical name.
    pub name: Name,
}

/// The value category of a [`Literal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    String,
    Boolean,
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// Source location, covering the `:type` suffix when present.
    pub loc: SourceLocation,
    /// The value category.
    pub kind: LiteralKind,
    /// The literal text: the raw lexeme for numbers and booleans, the
    /// decoded content for strings.
    pub value: Name,
    /// The declared type.  Always present in the typed dialect, always
    /// absent in the loose dialect.
    pub type_name: Option<Name>,
}

/// A name with an optional declared type, used for variable declarations,
/// function parameters, and return variables.  The type is mandatory in the
/// typed dialect and absent in the loose dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedName {
    /// Source location, covering the `:type` suffix when present.
    pub loc: SourceLocation,
    pub name: Name,
    pub type_name: Option<Name>,
}

/// Typed-name sequences sit in declarations, parameter lists, and return
/// lists, which almost always bind one or two names.
pub type TypedNameList = SmallVec<[TypedName; 2]>;

/// Assignment targets, almost always a single identifier.
pub type IdentifierList = SmallVec<[Identifier; 2]>;

// ─────────────────────────────────────────────────────────────────────────────
// Expressions
// ─────────────────────────────────────────────────────────────────────────────

/// An assembly expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Identifier(Identifier),
    FunctionCall(FunctionCall),
}

impl Expression {
    /// Returns the source location of this expression.
    pub fn loc(&self) -> SourceLocation {
        match self {
            Expression::Literal(e) => e.loc,
            Expression::Identifier(e) => e.loc,
            Expression::FunctionCall(e) => e.loc,
        }
    }
}

/// `name(arg, …)` — a user-function or built-in invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Source location, from the function name through the closing `)`.
    pub loc: SourceLocation,
    /// The function name; its location lies within `loc`.
    pub function_name: Identifier,
    /// Argument expressions in source order.
    pub arguments: Vec<Expression>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Statements
// ─────────────────────────────────────────────────────────────────────────────

/// An assembly statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `{ … }` nested block.
    Block(Block),
    /// `let a, b := expr` (initializer optional).
    VariableDeclaration(VariableDeclaration),
    /// `a, b := expr`.
    Assignment(Assignment),
    /// `if cond { … }`.
    If(If),
    /// `switch expr case … default …`.
    Switch(Switch),
    /// `for { pre } cond { post } { body }`.
    ForLoop(ForLoop),
    /// `function name(params) -> returns { … }`.
    FunctionDefinition(FunctionDefinition),
    /// `break`.
    Break(Break),
    /// `continue`.
    Continue(Continue),
    /// `leave` — return from the enclosing function.
    Leave(Leave),
    /// A bare expression in statement position.
    Expression(ExpressionStatement),
}

impl Statement {
    /// Returns the source location of this statement.
    pub fn loc(&self) -> SourceLocation {
        match self {
            Statement::Block(s) => s.loc,
            Statement::VariableDeclaration(s) => s.loc,
            Statement::Assignment(s) => s.loc,
            Statement::If(s) => s.loc,
            Statement::Switch(s) => s.loc,
            Statement::ForLoop(s) => s.loc,
            Statement::FunctionDefinition(s) => s.loc,
            Statement::Break(s) => s.loc,
            Statement::Continue(s) => s.loc,
            Statement::Leave(s) => s.loc,
            Statement::Expression(s) => s.loc,
        }
    }
}

/// An ordered sequence of statements; the location spans the braces.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub loc: SourceLocation,
    pub statements: Vec<Statement>,
}

/// `let a, b := expr`.  Without an initializer the variables are
/// default-initialized downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub loc: SourceLocation,
    pub variables: TypedNameList,
    pub value: Option<Box<Expression>>,
}

/// `a, b := expr`.  Target/value arity is not checked at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Source location, from the first target through the value.
    pub loc: SourceLocation,
    pub variable_names: IdentifierList,
    pub value: Box<Expression>,
}

/// `if cond { … }` — the language has no else branch.
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub loc: SourceLocation,
    pub condition: Box<Expression>,
    pub body: Block,
}

/// `switch expr case … default …`.
///
/// Holds at least one case; at most one is the default and the default, if
/// present, is last.  Both facts are enforced during parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub loc: SourceLocation,
    pub expression: Box<Expression>,
    pub cases: Vec<Case>,
}

/// One arm of a [`Switch`]; `value == None` is the default case.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub loc: SourceLocation,
    pub value: Option<Literal>,
    pub body: Block,
}

impl Case {
    pub fn is_default(&self) -> bool {
        self.value.is_none()
    }
}

/// `for { pre } cond { post } { body }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub loc: SourceLocation,
    pub pre: Block,
    pub condition: Box<Expression>,
    pub post: Block,
    pub body: Block,
}

/// `function name(params) -> returns { … }`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub loc: SourceLocation,
    pub name: Name,
    pub parameters: TypedNameList,
    pub return_variables: TypedNameList,
    pub body: Block,
}

/// `break`.
#[derive(Debug, Clone, PartialEq)]
pub struct Break {
    pub loc: SourceLocation,
}

/// `continue`.
#[derive(Debug, Clone, PartialEq)]
pub struct Continue {
    pub loc: SourceLocation,
}

/// `leave`.
#[derive(Debug, Clone, PartialEq)]
pub struct Leave {
    pub loc: SourceLocation,
}

/// A bare expression in statement position: a call, or — in the loose
/// dialect — a lone identifier or literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub loc: SourceLocation,
    pub expression: Expression,
}
