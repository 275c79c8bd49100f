//! Recursive-descent parser for the inline-assembly language.
//!
//! See [`Parser`] for the main entry point.
//!
//! The parser drives a [`Scanner`] one token at a time, consults a
//! [`Dialect`] to classify names, and records problems into an
//! [`ErrorReporter`].  Recoverable violations (a misplaced `break`, a
//! function defined in a for-loop init block) leave the AST intact; fatal
//! violations abandon the parse, and [`Parser::parse`] returns `None` with
//! at least one diagnostic recorded.

use crate::diagnostics::ErrorReporter;
use crate::error::{SolenoidError, SolenoidResult};
use crate::intern::{Interner, Name};
use crate::parser::ast::{
    Assignment, Block, Break, Case, Continue, Expression, ExpressionStatement, ForLoop,
    FunctionCall, FunctionDefinition, Identifier, IdentifierList, If, Leave, Literal, LiteralKind,
    Statement, Switch, TypedName, TypedNameList, VariableDeclaration,
};
use crate::parser::dialect::{Dialect, Flavour};
use crate::parser::scanner::{Position, Scanner, Span, TokenKind};

use num_bigint::BigUint;
use smallvec::smallvec;

/// Nesting bound for grammar productions.  Inputs deeper than this fail
/// with a fatal diagnostic instead of exhausting the stack.
const MAX_RECURSION_DEPTH: usize = 1024;

// ─────────────────────────────────────────────────────────────────────────────
// Parser state
// ─────────────────────────────────────────────────────────────────────────────

/// The lexical region the parser currently occupies relative to the
/// innermost for-loop, used to validate `break`, `continue`, and nested
/// `function` definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ForLoopComponent {
    None,
    Pre,
    Post,
    Body,
}

/// The pre-disambiguation result of parsing "something that could be an
/// identifier, a built-in invocation head, or a literal".  The token that
/// follows decides whether it becomes a call, an assignment target, or a
/// bare expression.
#[derive(Debug)]
enum ElementaryOperation {
    Identifier(Identifier),
    Literal(Literal),
    /// An empty-argument call shell for a built-in name; argument parsing
    /// attaches to it in [`Parser::parse_call`].
    FunctionCall(FunctionCall),
}

/// Recursive-descent parser producing a [`Block`] per parse.
///
/// # Example
///
/// ```
/// use solenoid_core::diagnostics::ErrorReporter;
/// use solenoid_core::parser::{Dialect, Parser};
/// use solenoid_core::parser::scanner::Scanner;
///
/// let dialect = Dialect::typed();
/// let mut scanner = Scanner::new("{ let x:u256 := 1:u256 }");
/// let mut reporter = ErrorReporter::new();
/// let block = Parser::new(&mut scanner, &dialect, &mut reporter).parse(false);
/// assert!(block.is_some());
/// assert!(!reporter.has_errors());
/// ```
pub struct Parser<'a, 'src> {
    scanner: &'a mut Scanner<'src>,
    dialect: &'a Dialect,
    reporter: &'a mut ErrorReporter,
    interner: Interner,
    recursion_depth: usize,
    inside_function: bool,
    for_loop_component: ForLoopComponent,
}

impl<'a, 'src> Parser<'a, 'src> {
    pub fn new(
        scanner: &'a mut Scanner<'src>,
        dialect: &'a Dialect,
        reporter: &'a mut ErrorReporter,
    ) -> Self {
        Self {
            scanner,
            dialect,
            reporter,
            interner: Interner::new(),
            recursion_depth: 0,
            inside_function: false,
            for_loop_component: ForLoopComponent::None,
        }
    }

    // ── Entry point ─────────────────────────────────────────────────────────

    /// Parse a single block of assembly code.
    ///
    /// With `reuse_scanner` the scanner is left positioned just past the
    /// closing brace for the embedding parser to continue; otherwise end of
    /// source is required there.
    ///
    /// Returns `None` when a fatal error aborted the parse; at least one
    /// diagnostic has then been recorded in the reporter.
    pub fn parse(&mut self, reuse_scanner: bool) -> Option<Block> {
        self.recursion_depth = 0;

        // Dotted names address sub-resources of contract-level objects, so
        // the whole parse runs with periods accepted in identifiers.  The
        // mode is restored on both exit paths.
        self.scanner.set_period_in_identifier(true);
        let result = self.parse_root(reuse_scanner);
        self.scanner.set_period_in_identifier(false);

        match result {
            Ok(block) => Some(block),
            Err(SolenoidError::FatalParse(_)) => {
                debug_assert!(
                    self.reporter.has_errors(),
                    "fatal error detected, but no error was reported"
                );
                None
            }
        }
    }

    fn parse_root(&mut self, reuse_scanner: bool) -> SolenoidResult<Block> {
        let block = self.parse_block()?;
        if !reuse_scanner {
            self.expect_token(TokenKind::Eos)?;
        }
        Ok(block)
    }

    // ── Token helpers ───────────────────────────────────────────────────────

    fn current_token(&self) -> TokenKind {
        self.scanner.current_token()
    }

    fn location(&self) -> Span {
        self.scanner.location()
    }

    fn end_position(&self) -> Position {
        self.scanner.end_position()
    }

    fn advance(&mut self) {
        self.scanner.advance();
    }

    /// Intern the current token's lexeme.
    fn intern_current_literal(&mut self) -> Name {
        self.interner.intern(self.scanner.current_literal())
    }

    /// Require the current token to be `kind` and consume it.
    fn expect_token(&mut self, kind: TokenKind) -> SolenoidResult<()> {
        if self.current_token() != kind {
            return Err(self.fatal_here(format!(
                "Expected token {} got '{}'",
                kind.name(),
                self.current_token().name()
            )));
        }
        self.advance();
        Ok(())
    }

    /// Record a fatal parser error at the current token.
    fn fatal_here(&mut self, message: impl Into<String>) -> SolenoidError {
        let span = self.location();
        self.reporter.fatal_parser_error(span, message)
    }

    /// Record a recoverable syntax error at the current token.
    fn syntax_error_here(&mut self, message: impl Into<String>) {
        let span = self.location();
        self.reporter.syntax_error(span, message);
    }

    /// Run a production under the recursion-depth guard.  The counter is
    /// decremented on both exit paths.
    fn with_recursion_guard<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> SolenoidResult<T>,
    ) -> SolenoidResult<T> {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            return Err(self.fatal_here("Maximum recursion depth reached."));
        }
        self.recursion_depth += 1;
        let result = f(self);
        self.recursion_depth -= 1;
        result
    }

    // ── Block ───────────────────────────────────────────────────────────────

    fn parse_block(&mut self) -> SolenoidResult<Block> {
        self.with_recursion_guard(|p| {
            let mut loc = p.location();
            p.expect_token(TokenKind::LBrace)?;
            let mut statements = Vec::new();
            while p.current_token() != TokenKind::RBrace {
                statements.push(p.parse_statement()?);
            }
            p.expect_token(TokenKind::RBrace)?;
            loc.end = p.end_position();
            Ok(Block { loc, statements })
        })
    }

    // ── Statement dispatch ──────────────────────────────────────────────────

    fn parse_statement(&mut self) -> SolenoidResult<Statement> {
        self.with_recursion_guard(|p| p.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> SolenoidResult<Statement> {
        match self.current_token() {
            TokenKind::Let => {
                return Ok(Statement::VariableDeclaration(
                    self.parse_variable_declaration()?,
                ));
            }
            TokenKind::Function => {
                return Ok(Statement::FunctionDefinition(
                    self.parse_function_definition()?,
                ));
            }
            TokenKind::LBrace => return Ok(Statement::Block(self.parse_block()?)),
            TokenKind::If => {
                let mut loc = self.location();
                self.advance();
                let condition = Box::new(self.parse_expression()?);
                let body = self.parse_block()?;
                loc.end = body.loc.end;
                return Ok(Statement::If(If {
                    loc,
                    condition,
                    body,
                }));
            }
            TokenKind::Switch => return self.parse_switch(),
            TokenKind::For => return Ok(Statement::ForLoop(self.parse_for_loop()?)),
            TokenKind::Break => {
                let loc = self.location();
                self.check_break_continue_position("break");
                self.advance();
                return Ok(Statement::Break(Break { loc }));
            }
            TokenKind::Continue => {
                let loc = self.location();
                self.check_break_continue_position("continue");
                self.advance();
                return Ok(Statement::Continue(Continue { loc }));
            }
            TokenKind::Identifier if self.scanner.current_literal() == "leave" => {
                let loc = self.location();
                if !self.inside_function {
                    self.reporter
                        .syntax_error(loc, "Keyword \"leave\" can only be used inside a function.");
                }
                self.advance();
                return Ok(Statement::Leave(Leave { loc }));
            }
            _ => {}
        }

        // Options left: a call, an assignment, or — in the loose dialect —
        // a bare identifier or literal.  One token of lookahead decides.
        let elementary = self.parse_elementary_operation()?;

        match self.current_token() {
            TokenKind::LParen => {
                let expression = self.parse_call(elementary)?;
                Ok(Statement::Expression(ExpressionStatement {
                    loc: expression.loc(),
                    expression,
                }))
            }
            TokenKind::Comma | TokenKind::AssemblyAssign => self.parse_assignment(elementary),
            _ => {
                if self.dialect.flavour() == Flavour::Loose {
                    match elementary {
                        ElementaryOperation::Identifier(identifier) => {
                            return Ok(Statement::Expression(ExpressionStatement {
                                loc: identifier.loc,
                                expression: Expression::Identifier(identifier),
                            }));
                        }
                        ElementaryOperation::Literal(literal) => {
                            return Ok(Statement::Expression(ExpressionStatement {
                                loc: literal.loc,
                                expression: Expression::Literal(literal),
                            }));
                        }
                        ElementaryOperation::FunctionCall(_) => {}
                    }
                }
                Err(self.fatal_here("Call or assignment expected."))
            }
        }
    }

    // ── Assignment ──────────────────────────────────────────────────────────

    /// Parse `a, b, … := value` given the already-parsed first target.
    /// Every target — including the first — must be a plain identifier and
    /// must not name a built-in.
    fn parse_assignment(&mut self, first: ElementaryOperation) -> SolenoidResult<Statement> {
        let mut variable_names: IdentifierList = smallvec![];
        let mut elementary = first;

        loop {
            let identifier = match elementary {
                ElementaryOperation::Identifier(identifier) => identifier,
                ElementaryOperation::FunctionCall(call) => {
                    // Built-in call shells only arise from built-in names.
                    return Err(self.fatal_here(format!(
                        "Cannot assign to builtin function \"{}\".",
                        call.function_name.name
                    )));
                }
                ElementaryOperation::Literal(_) => {
                    let (token, context) = if self.current_token() == TokenKind::Comma {
                        (",", " in multiple assignment.")
                    } else {
                        (":=", " in assignment.")
                    };
                    return Err(self.fatal_here(format!(
                        "Variable name must precede \"{token}\"{context}"
                    )));
                }
            };

            if self.dialect.builtin(identifier.name.as_str()) {
                return Err(self.fatal_here(format!(
                    "Cannot assign to builtin function \"{}\".",
                    identifier.name
                )));
            }

            variable_names.push(identifier);

            if self.current_token() != TokenKind::Comma {
                break;
            }
            self.expect_token(TokenKind::Comma)?;
            elementary = self.parse_elementary_operation()?;
        }

        let mut loc = variable_names[0].loc;
        self.expect_token(TokenKind::AssemblyAssign)?;
        let value = Box::new(self.parse_expression()?);
        loc.end = value.loc().end;

        Ok(Statement::Assignment(Assignment {
            loc,
            variable_names,
            value,
        }))
    }

    // ── Switch / case ───────────────────────────────────────────────────────

    fn parse_switch(&mut self) -> SolenoidResult<Statement> {
        let mut loc = self.location();
        self.advance();
        let expression = Box::new(self.parse_expression()?);

        let mut cases = Vec::new();
        while self.current_token() == TokenKind::Case {
            cases.push(self.parse_case()?);
        }
        if self.current_token() == TokenKind::Default {
            cases.push(self.parse_case()?);
        }
        if self.current_token() == TokenKind::Default {
            return Err(self.fatal_here("Only one default case allowed."));
        } else if self.current_token() == TokenKind::Case {
            return Err(self.fatal_here("Case not allowed after default case."));
        }
        if cases.is_empty() {
            return Err(self.fatal_here("Switch statement without any cases."));
        }

        if let Some(last) = cases.last() {
            loc.end = last.body.loc.end;
        }
        Ok(Statement::Switch(Switch {
            loc,
            expression,
            cases,
        }))
    }

    fn parse_case(&mut self) -> SolenoidResult<Case> {
        self.with_recursion_guard(|p| {
            let mut loc = p.location();
            let value = match p.current_token() {
                TokenKind::Default => {
                    p.advance();
                    None
                }
                TokenKind::Case => {
                    p.advance();
                    match p.parse_elementary_operation()? {
                        ElementaryOperation::Literal(literal) => Some(literal),
                        _ => return Err(p.fatal_here("Literal expected.")),
                    }
                }
                _ => unreachable!("case or default case expected"),
            };
            let body = p.parse_block()?;
            loc.end = body.loc.end;
            Ok(Case { loc, value, body })
        })
    }

    // ── For loop ────────────────────────────────────────────────────────────

    fn parse_for_loop(&mut self) -> SolenoidResult<ForLoop> {
        self.with_recursion_guard(|p| {
            let outer = p.for_loop_component;
            let result = p.parse_for_loop_inner();
            p.for_loop_component = outer;
            result
        })
    }

    fn parse_for_loop_inner(&mut self) -> SolenoidResult<ForLoop> {
        let mut loc = self.location();
        self.expect_token(TokenKind::For)?;

        self.for_loop_component = ForLoopComponent::Pre;
        let pre = self.parse_block()?;
        // The condition belongs to neither the init nor the body rules.
        self.for_loop_component = ForLoopComponent::None;
        let condition = Box::new(self.parse_expression()?);
        self.for_loop_component = ForLoopComponent::Post;
        let post = self.parse_block()?;
        self.for_loop_component = ForLoopComponent::Body;
        let body = self.parse_block()?;

        loc.end = body.loc.end;
        Ok(ForLoop {
            loc,
            pre,
            condition,
            post,
            body,
        })
    }

    fn check_break_continue_position(&mut self, which: &str) {
        match self.for_loop_component {
            ForLoopComponent::None => self.syntax_error_here(format!(
                "Keyword \"{which}\" needs to be inside a for-loop body."
            )),
            ForLoopComponent::Pre => self.syntax_error_here(format!(
                "Keyword \"{which}\" in for-loop init block is not allowed."
            )),
            ForLoopComponent::Post => self.syntax_error_here(format!(
                "Keyword \"{which}\" in for-loop post block is not allowed."
            )),
            ForLoopComponent::Body => {}
        }
    }

    // ── Function definition ─────────────────────────────────────────────────

    fn parse_function_definition(&mut self) -> SolenoidResult<FunctionDefinition> {
        self.with_recursion_guard(|p| {
            if p.for_loop_component == ForLoopComponent::Pre {
                p.syntax_error_here("Functions cannot be defined inside a for-loop init block.");
            }
            let outer = p.for_loop_component;
            p.for_loop_component = ForLoopComponent::None;
            let result = p.parse_function_definition_inner();
            p.for_loop_component = outer;
            result
        })
    }

    fn parse_function_definition_inner(&mut self) -> SolenoidResult<FunctionDefinition> {
        let mut loc = self.location();
        self.expect_token(TokenKind::Function)?;
        let name = self.expect_asm_identifier()?;

        self.expect_token(TokenKind::LParen)?;
        let mut parameters: TypedNameList = smallvec![];
        while self.current_token() != TokenKind::RParen {
            parameters.push(self.parse_typed_name()?);
            if self.current_token() == TokenKind::RParen {
                break;
            }
            self.expect_token(TokenKind::Comma)?;
        }
        self.expect_token(TokenKind::RParen)?;

        let mut return_variables: TypedNameList = smallvec![];
        if self.current_token() == TokenKind::Sub {
            self.expect_token(TokenKind::Sub)?;
            self.expect_token(TokenKind::GreaterThan)?;
            loop {
                return_variables.push(self.parse_typed_name()?);
                if self.current_token() == TokenKind::LBrace {
                    break;
                }
                self.expect_token(TokenKind::Comma)?;
            }
        }

        let outer_inside_function = self.inside_function;
        self.inside_function = true;
        let body = self.parse_block();
        self.inside_function = outer_inside_function;
        let body = body?;

        loc.end = body.loc.end;
        Ok(FunctionDefinition {
            loc,
            name,
            parameters,
            return_variables,
            body,
        })
    }

    // ── Variable declaration ────────────────────────────────────────────────

    fn parse_variable_declaration(&mut self) -> SolenoidResult<VariableDeclaration> {
        self.with_recursion_guard(|p| {
            let mut loc = p.location();
            p.expect_token(TokenKind::Let)?;

            let mut variables: TypedNameList = smallvec![];
            loop {
                variables.push(p.parse_typed_name()?);
                if p.current_token() != TokenKind::Comma {
                    break;
                }
                p.expect_token(TokenKind::Comma)?;
            }
            // The loop pushes before testing, so the list is never empty.
            loc.end = variables[variables.len() - 1].loc.end;

            let value = if p.current_token() == TokenKind::AssemblyAssign {
                p.expect_token(TokenKind::AssemblyAssign)?;
                let value = p.parse_expression()?;
                loc.end = value.loc().end;
                Some(Box::new(value))
            } else {
                None
            };

            Ok(VariableDeclaration {
                loc,
                variables,
                value,
            })
        })
    }

    // ── Expressions ─────────────────────────────────────────────────────────

    fn parse_expression(&mut self) -> SolenoidResult<Expression> {
        self.with_recursion_guard(|p| {
            let operation = p.parse_elementary_operation()?;
            match operation {
                ElementaryOperation::FunctionCall(_) => p.parse_call(operation),
                operation if p.current_token() == TokenKind::LParen => p.parse_call(operation),
                ElementaryOperation::Identifier(identifier) => {
                    Ok(Expression::Identifier(identifier))
                }
                ElementaryOperation::Literal(literal) => Ok(Expression::Literal(literal)),
            }
        })
    }

    /// Parse the unified head of identifiers, built-in invocations, and
    /// literals.  Identifier-class tokens cover plain identifiers plus the
    /// soft-reserved words of the surrounding contract language.
    fn parse_elementary_operation(&mut self) -> SolenoidResult<ElementaryOperation> {
        self.with_recursion_guard(|p| match p.current_token() {
            TokenKind::Identifier
            | TokenKind::Return
            | TokenKind::Byte
            | TokenKind::Bool
            | TokenKind::Address => {
                let name = p.intern_current_literal();
                let loc = p.location();
                let identifier = Identifier { loc, name };
                p.advance();
                if p.dialect.builtin(identifier.name.as_str()) {
                    // Built-ins are callable only; parse_call enforces the
                    // opening parenthesis and the assignment path reports
                    // targeted built-ins by name.
                    Ok(ElementaryOperation::FunctionCall(FunctionCall {
                        loc: identifier.loc,
                        function_name: identifier,
                        arguments: Vec::new(),
                    }))
                } else {
                    Ok(ElementaryOperation::Identifier(identifier))
                }
            }
            TokenKind::StringLiteral
            | TokenKind::Number
            | TokenKind::TrueLiteral
            | TokenKind::FalseLiteral => {
                let kind = match p.current_token() {
                    TokenKind::StringLiteral => LiteralKind::String,
                    TokenKind::Number => {
                        if !is_valid_number_literal(p.scanner.current_literal()) {
                            return Err(p.fatal_here("Invalid number literal."));
                        }
                        LiteralKind::Number
                    }
                    _ => LiteralKind::Boolean,
                };

                let mut loc = p.location();
                let value = p.intern_current_literal();
                p.advance();

                let type_name = if p.dialect.flavour() == Flavour::Typed {
                    p.expect_token(TokenKind::Colon)?;
                    let type_name = p.expect_asm_identifier()?;
                    loc.end = p.end_position();
                    Some(type_name)
                } else if kind == LiteralKind::Boolean {
                    // The loose dialect's parent language has its own
                    // boolean syntax.
                    return Err(p
                        .reporter
                        .fatal_parser_error(loc, "True and false are not valid literals."));
                } else {
                    None
                };

                Ok(ElementaryOperation::Literal(Literal {
                    loc,
                    kind,
                    value,
                    type_name,
                }))
            }
            _ => Err(p.fatal_here(match p.dialect.flavour() {
                Flavour::Typed => "Literal or identifier expected.",
                Flavour::Loose => "Literal, identifier or instruction expected.",
            })),
        })
    }

    // ── Call parsing ────────────────────────────────────────────────────────

    fn parse_call(&mut self, initial_op: ElementaryOperation) -> SolenoidResult<Expression> {
        self.with_recursion_guard(|p| {
            let (mut loc, function_name, mut arguments) = match initial_op {
                ElementaryOperation::Identifier(identifier) => {
                    (identifier.loc, identifier, Vec::new())
                }
                ElementaryOperation::FunctionCall(call) => {
                    (call.loc, call.function_name, call.arguments)
                }
                ElementaryOperation::Literal(_) => {
                    return Err(p.fatal_here(match p.dialect.flavour() {
                        Flavour::Typed => "Function name expected.",
                        Flavour::Loose => {
                            "Assembly instruction or function name required in front of \"(\"."
                        }
                    }));
                }
            };

            p.expect_token(TokenKind::LParen)?;
            if p.current_token() != TokenKind::RParen {
                arguments.push(p.parse_expression()?);
                while p.current_token() != TokenKind::RParen {
                    p.expect_token(TokenKind::Comma)?;
                    arguments.push(p.parse_expression()?);
                }
            }
            p.expect_token(TokenKind::RParen)?;
            loc.end = p.end_position();

            Ok(Expression::FunctionCall(FunctionCall {
                loc,
                function_name,
                arguments,
            }))
        })
    }

    // ── Typed names and identifiers ─────────────────────────────────────────

    fn parse_typed_name(&mut self) -> SolenoidResult<TypedName> {
        self.with_recursion_guard(|p| {
            let mut loc = p.location();
            let name = p.expect_asm_identifier()?;
            let type_name = if p.dialect.flavour() == Flavour::Typed {
                p.expect_token(TokenKind::Colon)?;
                let type_name = p.expect_asm_identifier()?;
                loc.end = p.end_position();
                Some(type_name)
            } else {
                loc.end = p.end_position();
                None
            };
            Ok(TypedName {
                loc,
                name,
                type_name,
            })
        })
    }

    /// Consume an identifier-class token and return its name.  Built-in
    /// names are not usable as identifiers.
    fn expect_asm_identifier(&mut self) -> SolenoidResult<Name> {
        match self.current_token() {
            TokenKind::Identifier
            | TokenKind::Return
            | TokenKind::Byte
            | TokenKind::Bool
            | TokenKind::Address => {}
            _ => {
                self.expect_token(TokenKind::Identifier)?;
            }
        }
        let name = self.intern_current_literal();
        if self.dialect.builtin(name.as_str()) {
            return Err(self.fatal_here(format!(
                "Cannot use builtin function name \"{name}\" as identifier name."
            )));
        }
        self.advance();
        Ok(name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Numeric-literal validation
// ─────────────────────────────────────────────────────────────────────────────

/// A number literal is valid iff it is `0x`-prefixed hexadecimal or plain
/// decimal, and its value fits an unsigned 256-bit integer.
fn is_valid_number_literal(literal: &str) -> bool {
    let value = if let Some(hex) = literal.strip_prefix("0x") {
        BigUint::parse_bytes(hex.as_bytes(), 16)
    } else if !literal.is_empty() && literal.bytes().all(|b| b.is_ascii_digit()) {
        BigUint::parse_bytes(literal.as_bytes(), 10)
    } else {
        None
    };
    match value {
        Some(value) => value.bits() <= 256,
        None => false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
