//! `solenoid_core` — the foundational library for the Solenoid
//! smart-contract inline-assembly front end.
//!
//! # Crate layout
//!
//! - [`diagnostics`] — Structured parser diagnostics and the reporter sink.
//! - [`error`] — Front-end error types and `SolenoidResult` alias.
//! - [`instructions`] — EVM instruction set and mnemonic tables.
//! - [`intern`] — String interning for AST names.
//! - [`parser`] — Assembly parser infrastructure (scanner, AST, grammar,
//!   printer).

/// Structured parser diagnostics and the reporter sink.
pub mod diagnostics;
/// Front-end error types and [`SolenoidResult`](error::SolenoidResult) alias.
pub mod error;
/// EVM instruction set and mnemonic tables.
pub mod instructions;
/// String interning for AST names.
pub mod intern;
/// Assembly parser infrastructure (scanner, AST, grammar, printer).
pub mod parser;
