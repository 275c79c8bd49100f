//! AST → source text rendering.
//!
//! Renders a parsed tree back to a single line of assembly source.  The
//! output re-parses to a structurally identical tree (modulo locations),
//! which the round-trip tests rely on.  Type suffixes are emitted exactly
//! when the nodes carry type names, so typed-dialect trees render in the
//! typed dialect and loose-dialect trees in the loose one.

use std::fmt::Write;

use crate::parser::ast::{
    Block, Case, Expression, FunctionDefinition, Literal, LiteralKind, Statement, TypedName,
};

/// Render a block, braces included.
pub fn print_block(block: &Block) -> String {
    let mut out = String::new();
    write_block(&mut out, block);
    out
}

/// Render a single statement.
pub fn print_statement(statement: &Statement) -> String {
    let mut out = String::new();
    write_statement(&mut out, statement);
    out
}

/// Render a single expression.
pub fn print_expression(expression: &Expression) -> String {
    let mut out = String::new();
    write_expression(&mut out, expression);
    out
}

fn write_block(out: &mut String, block: &Block) {
    out.push('{');
    for statement in &block.statements {
        out.push(' ');
        write_statement(out, statement);
    }
    out.push_str(" }");
}

fn write_statement(out: &mut String, statement: &Statement) {
    match statement {
        Statement::Block(block) => write_block(out, block),
        Statement::VariableDeclaration(decl) => {
            out.push_str("let ");
            write_typed_name_list(out, &decl.variables);
            if let Some(value) = &decl.value {
                out.push_str(" := ");
                write_expression(out, value);
            }
        }
        Statement::Assignment(assignment) => {
            for (i, target) in assignment.variable_names.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(target.name.as_str());
            }
            out.push_str(" := ");
            write_expression(out, &assignment.value);
        }
        Statement::If(if_stmt) => {
            out.push_str("if ");
            write_expression(out, &if_stmt.condition);
            out.push(' ');
            write_block(out, &if_stmt.body);
        }
        Statement::Switch(switch) => {
            out.push_str("switch ");
            write_expression(out, &switch.expression);
            for case in &switch.cases {
                out.push(' ');
                write_case(out, case);
            }
        }
        Statement::ForLoop(for_loop) => {
            out.push_str("for ");
            write_block(out, &for_loop.pre);
            out.push(' ');
            write_expression(out, &for_loop.condition);
            out.push(' ');
            write_block(out, &for_loop.post);
            out.push(' ');
            write_block(out, &for_loop.body);
        }
        Statement::FunctionDefinition(function) => write_function_definition(out, function),
        Statement::Break(_) => out.push_str("break"),
        Statement::Continue(_) => out.push_str("continue"),
        Statement::Leave(_) => out.push_str("leave"),
        Statement::Expression(stmt) => write_expression(out, &stmt.expression),
    }
}

fn write_case(out: &mut String, case: &Case) {
    match &case.value {
        Some(literal) => {
            out.push_str("case ");
            write_literal(out, literal);
        }
        None => out.push_str("default"),
    }
    out.push(' ');
    write_block(out, &case.body);
}

fn write_function_definition(out: &mut String, function: &FunctionDefinition) {
    out.push_str("function ");
    out.push_str(function.name.as_str());
    out.push('(');
    write_typed_name_list(out, &function.parameters);
    out.push(')');
    if !function.return_variables.is_empty() {
        out.push_str(" -> ");
        write_typed_name_list(out, &function.return_variables);
    }
    out.push(' ');
    write_block(out, &function.body);
}

fn write_expression(out: &mut String, expression: &Expression) {
    match expression {
        Expression::Literal(literal) => write_literal(out, literal),
        Expression::Identifier(identifier) => out.push_str(identifier.name.as_str()),
        Expression::FunctionCall(call) => {
            out.push_str(call.function_name.name.as_str());
            out.push('(');
            for (i, argument) in call.arguments.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expression(out, argument);
            }
            out.push(')');
        }
    }
}

fn write_typed_name_list(out: &mut String, names: &[TypedName]) {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(name.name.as_str());
        if let Some(type_name) = &name.type_name {
            out.push(':');
            out.push_str(type_name.as_str());
        }
    }
}

fn write_literal(out: &mut String, literal: &Literal) {
    match literal.kind {
        LiteralKind::Number | LiteralKind::Boolean => out.push_str(literal.value.as_str()),
        LiteralKind::String => {
            out.push('"');
            for c in literal.value.as_str().chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    c if (c as u32) < 0x20 => {
                        let _ = write!(out, "\\x{:02x}", c as u32);
                    }
                    c => out.push(c),
                }
            }
            out.push('"');
        }
    }
    if let Some(type_name) = &literal.type_name {
        out.push(':');
        out.push_str(type_name.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorReporter;
    use crate::parser::dialect::Dialect;
    use crate::parser::grammar::Parser;
    use crate::parser::scanner::Scanner;

    fn parse(src: &str, dialect: &Dialect) -> Block {
        let mut scanner = Scanner::new(src);
        let mut reporter = ErrorReporter::new();
        let block = Parser::new(&mut scanner, dialect, &mut reporter).parse(false);
        assert!(
            !reporter.has_errors(),
            "unexpected diagnostics: {:?}",
            reporter.errors()
        );
        block.expect("parse failed")
    }

    /// Parse, print, and compare against the source (whose layout already
    /// matches the printer's).
    fn assert_fixpoint(src: &str, dialect: &Dialect) {
        let block = parse(src, dialect);
        assert_eq!(print_block(&block), src);
    }

    #[test]
    fn test_print_empty_block() {
        assert_fixpoint("{ }", &Dialect::typed());
    }

    #[test]
    fn test_print_declaration_and_call() {
        assert_fixpoint("{ let x:u256 := add(1:u256, 2:u256) }", &Dialect::typed());
    }

    #[test]
    fn test_print_switch() {
        assert_fixpoint(
            "{ switch x case 0:u256 { } case 1:u256 { y := x } default { } }",
            &Dialect::typed(),
        );
    }

    #[test]
    fn test_print_for_loop() {
        assert_fixpoint(
            "{ for { let i:u256 := 0:u256 } lt(i, 10:u256) { i := next(i) } { break } }",
            &Dialect::typed(),
        );
    }

    #[test]
    fn test_print_function_definition() {
        assert_fixpoint(
            "{ function f(a:u256, b:u256) -> c:u256 { c := a leave } }",
            &Dialect::typed(),
        );
        assert_fixpoint("{ function f() { } }", &Dialect::typed());
    }

    #[test]
    fn test_print_loose_statements() {
        assert_fixpoint("{ dup1 42 mstore(0, 1) }", &Dialect::loose());
    }

    #[test]
    fn test_print_string_escapes() {
        let src = "{ let s:string := \"a\\n\\\"b\\\\\":string }";
        let block = parse(src, &Dialect::typed());
        assert_eq!(print_block(&block), src);
    }

    #[test]
    fn test_reparse_preserves_structure() {
        let dialect = Dialect::typed();
        let src = "{ let a:u256, b:u256 := f() if a { b := a } }";
        let block = parse(src, &dialect);
        let printed = print_block(&block);
        let reparsed = parse(&printed, &dialect);
        assert_eq!(print_block(&reparsed), printed);
    }
}
