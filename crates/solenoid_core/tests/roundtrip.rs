//! Property-based round-trip tests.
//!
//! Generates well-formed ASTs — placement rules respected by construction:
//! `break`/`continue` only in for-loop bodies, `leave` only in function
//! bodies, no function definitions in for-loop init blocks — renders them
//! with the printer, re-parses the rendering, and requires the re-parse to
//! print identically.

use proptest::prelude::*;

use solenoid_core::diagnostics::ErrorReporter;
use solenoid_core::intern::Name;
use solenoid_core::parser::ast::{
    Assignment, Block, Break, Case, Continue, Expression, ExpressionStatement, ForLoop,
    FunctionCall, FunctionDefinition, Identifier, If, Leave, Literal, LiteralKind, Statement,
    Switch, TypedName, TypedNameList, VariableDeclaration,
};
use solenoid_core::parser::printer::print_block;
use solenoid_core::parser::scanner::{Scanner, Span};
use solenoid_core::parser::{Dialect, Parser};

/// Words that can never be generated as identifiers: hard keywords plus the
/// contextual `leave`.  (`return`, `byte`, `bool`, and `address` are soft
/// reserved and stay valid identifiers.)
const FORBIDDEN_NAMES: &[&str] = &[
    "let", "function", "if", "switch", "case", "default", "for", "break", "continue", "true",
    "false", "leave",
];

fn parse(src: &str, dialect: &Dialect) -> Block {
    let mut scanner = Scanner::new(src);
    let mut reporter = ErrorReporter::new();
    let block = Parser::new(&mut scanner, dialect, &mut reporter).parse(false);
    assert!(
        !reporter.has_errors(),
        "diagnostics for {src:?}: {:?}",
        reporter.errors()
    );
    block.unwrap_or_else(|| panic!("parse failed for {src:?}"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Strategies
// ─────────────────────────────────────────────────────────────────────────────

/// Whether generated literals and typed names carry `:type` annotations.
#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Typed,
    Loose,
}

fn ident_name() -> impl Strategy<Value = Name> {
    "[a-z_][a-z0-9_]{0,6}"
        .prop_filter("reserved word", |s| !FORBIDDEN_NAMES.contains(&s.as_str()))
        .prop_map(|s| Name::from(s.as_str()))
}

fn identifier() -> impl Strategy<Value = Identifier> {
    ident_name().prop_map(|name| Identifier {
        loc: Span::default(),
        name,
    })
}

fn type_name() -> impl Strategy<Value = Name> {
    prop_oneof![
        Just(Name::from("u256")),
        Just(Name::from("u64")),
        Just(Name::from("bool")),
        Just(Name::from("string")),
    ]
}

fn literal(mode: Mode) -> BoxedStrategy<Literal> {
    let number = any::<u128>().prop_map(|n| (LiteralKind::Number, n.to_string()));
    let string = "[a-zA-Z0-9 ]{0,8}".prop_map(|s| (LiteralKind::String, s));
    let body = match mode {
        // The loose dialect rejects boolean literals outright.
        Mode::Loose => prop_oneof![number, string].boxed(),
        Mode::Typed => prop_oneof![
            number,
            string,
            any::<bool>().prop_map(|b| (LiteralKind::Boolean, b.to_string()))
        ]
        .boxed(),
    };
    match mode {
        Mode::Typed => (body, type_name())
            .prop_map(|((kind, value), ty)| Literal {
                loc: Span::default(),
                kind,
                value: Name::from(value.as_str()),
                type_name: Some(ty),
            })
            .boxed(),
        Mode::Loose => body
            .prop_map(|(kind, value)| Literal {
                loc: Span::default(),
                kind,
                value: Name::from(value.as_str()),
                type_name: None,
            })
            .boxed(),
    }
}

fn typed_name(mode: Mode) -> BoxedStrategy<TypedName> {
    match mode {
        Mode::Typed => (ident_name(), type_name())
            .prop_map(|(name, ty)| TypedName {
                loc: Span::default(),
                name,
                type_name: Some(ty),
            })
            .boxed(),
        Mode::Loose => ident_name()
            .prop_map(|name| TypedName {
                loc: Span::default(),
                name,
                type_name: None,
            })
            .boxed(),
    }
}

fn typed_name_list(mode: Mode, max: usize) -> impl Strategy<Value = TypedNameList> {
    prop::collection::vec(typed_name(mode), 1..=max).prop_map(|v| v.into_iter().collect())
}

fn expression(mode: Mode, depth: u32) -> BoxedStrategy<Expression> {
    let leaf = prop_oneof![
        literal(mode).prop_map(Expression::Literal),
        identifier().prop_map(Expression::Identifier),
    ];
    if depth == 0 {
        return leaf.boxed();
    }
    prop_oneof![
        leaf,
        (
            identifier(),
            prop::collection::vec(expression(mode, depth - 1), 0..3)
        )
            .prop_map(|(function_name, arguments)| {
                Expression::FunctionCall(FunctionCall {
                    loc: Span::default(),
                    function_name,
                    arguments,
                })
            }),
    ]
    .boxed()
}

fn call_statement(mode: Mode, depth: u32) -> BoxedStrategy<Statement> {
    (
        identifier(),
        prop::collection::vec(expression(mode, depth), 0..3),
    )
        .prop_map(|(function_name, arguments)| {
            Statement::Expression(ExpressionStatement {
                loc: Span::default(),
                expression: Expression::FunctionCall(FunctionCall {
                    loc: Span::default(),
                    function_name,
                    arguments,
                }),
            })
        })
        .boxed()
}

/// Statements valid in any context.  In the loose dialect this includes
/// bare identifiers and literals.
fn leaf_statement(mode: Mode) -> BoxedStrategy<Statement> {
    let common = prop_oneof![
        (typed_name_list(mode, 2), expression(mode, 1)).prop_map(|(variables, value)| {
            Statement::VariableDeclaration(VariableDeclaration {
                loc: Span::default(),
                variables,
                value: Some(Box::new(value)),
            })
        }),
        typed_name_list(mode, 2).prop_map(|variables| {
            Statement::VariableDeclaration(VariableDeclaration {
                loc: Span::default(),
                variables,
                value: None,
            })
        }),
        (
            prop::collection::vec(identifier(), 1..3),
            expression(mode, 1)
        )
            .prop_map(|(targets, value)| {
                Statement::Assignment(Assignment {
                    loc: Span::default(),
                    variable_names: targets.into_iter().collect(),
                    value: Box::new(value),
                })
            }),
        call_statement(mode, 1),
    ];
    match mode {
        Mode::Typed => common.boxed(),
        Mode::Loose => prop_oneof![
            common,
            identifier().prop_map(|identifier| {
                Statement::Expression(ExpressionStatement {
                    loc: Span::default(),
                    expression: Expression::Identifier(identifier),
                })
            }),
            literal(Mode::Loose).prop_map(|literal| {
                Statement::Expression(ExpressionStatement {
                    loc: Span::default(),
                    expression: Expression::Literal(literal),
                })
            }),
        ]
        .boxed(),
    }
}

fn statement(mode: Mode, depth: u32, in_function: bool, in_loop_body: bool) -> BoxedStrategy<Statement> {
    let mut options: Vec<BoxedStrategy<Statement>> = vec![leaf_statement(mode)];
    if in_loop_body {
        options.push(
            Just(Statement::Break(Break {
                loc: Span::default(),
            }))
            .boxed(),
        );
        options.push(
            Just(Statement::Continue(Continue {
                loc: Span::default(),
            }))
            .boxed(),
        );
    }
    if in_function {
        options.push(
            Just(Statement::Leave(Leave {
                loc: Span::default(),
            }))
            .boxed(),
        );
    }
    if depth > 0 {
        options.push(
            block(mode, depth - 1, in_function, in_loop_body)
                .prop_map(Statement::Block)
                .boxed(),
        );
        options.push(
            (
                expression(mode, 1),
                block(mode, depth - 1, in_function, in_loop_body),
            )
                .prop_map(|(condition, body)| {
                    Statement::If(If {
                        loc: Span::default(),
                        condition: Box::new(condition),
                        body,
                    })
                })
                .boxed(),
        );
        options.push(switch_statement(mode, depth, in_function, in_loop_body));
        options.push(for_statement(mode, depth, in_function));
        options.push(function_statement(mode, depth));
    }
    proptest::strategy::Union::new(options).boxed()
}

fn switch_statement(
    mode: Mode,
    depth: u32,
    in_function: bool,
    in_loop_body: bool,
) -> BoxedStrategy<Statement> {
    let case = (literal(mode), block(mode, depth - 1, in_function, in_loop_body)).prop_map(
        |(value, body)| Case {
            loc: Span::default(),
            value: Some(value),
            body,
        },
    );
    let default = block(mode, depth - 1, in_function, in_loop_body).prop_map(|body| Case {
        loc: Span::default(),
        value: None,
        body,
    });
    (
        expression(mode, 1),
        prop::collection::vec(case, 0..3),
        prop::option::of(default),
    )
        .prop_filter("switch needs at least one case", |(_, cases, default)| {
            !cases.is_empty() || default.is_some()
        })
        .prop_map(|(scrutinee, mut cases, default)| {
            if let Some(default) = default {
                cases.push(default);
            }
            Statement::Switch(Switch {
                loc: Span::default(),
                expression: Box::new(scrutinee),
                cases,
            })
        })
        .boxed()
}

fn for_statement(mode: Mode, depth: u32, in_function: bool) -> BoxedStrategy<Statement> {
    // Init and post blocks stay leaf-only: no `break`/`continue` and no
    // function definitions are allowed there.
    let plain_block = prop::collection::vec(leaf_statement(mode), 0..3).prop_map(|statements| {
        Block {
            loc: Span::default(),
            statements,
        }
    });
    (
        plain_block.clone(),
        expression(mode, 1),
        plain_block,
        block(mode, depth - 1, in_function, true),
    )
        .prop_map(|(pre, condition, post, body)| {
            Statement::ForLoop(ForLoop {
                loc: Span::default(),
                pre,
                condition: Box::new(condition),
                post,
                body,
            })
        })
        .boxed()
}

fn function_statement(mode: Mode, depth: u32) -> BoxedStrategy<Statement> {
    (
        ident_name(),
        prop::collection::vec(typed_name(mode), 0..3),
        prop::collection::vec(typed_name(mode), 0..3),
        block(mode, depth - 1, true, false),
    )
        .prop_map(|(name, parameters, return_variables, body)| {
            Statement::FunctionDefinition(FunctionDefinition {
                loc: Span::default(),
                name,
                parameters: parameters.into_iter().collect(),
                return_variables: return_variables.into_iter().collect(),
                body,
            })
        })
        .boxed()
}

fn block(
    mode: Mode,
    depth: u32,
    in_function: bool,
    in_loop_body: bool,
) -> BoxedStrategy<Block> {
    prop::collection::vec(statement(mode, depth, in_function, in_loop_body), 0..4)
        .prop_map(|statements| Block {
            loc: Span::default(),
            statements,
        })
        .boxed()
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn roundtrip_typed_dialect(ast in block(Mode::Typed, 2, false, false)) {
        let dialect = Dialect::typed();
        let printed = print_block(&ast);
        let reparsed = parse(&printed, &dialect);
        prop_assert_eq!(print_block(&reparsed), printed);
    }

    #[test]
    fn roundtrip_loose_dialect(ast in block(Mode::Loose, 2, false, false)) {
        let dialect = Dialect::loose();
        let printed = print_block(&ast);
        let reparsed = parse(&printed, &dialect);
        prop_assert_eq!(print_block(&reparsed), printed);
    }
}
