//! EVM instruction set and mnemonic tables.
//!
//! [`Instruction`] enumerates the opcodes; [`instructions`] and
//! [`instruction_names`] expose lazily-built, process-wide mappings between
//! lowercase mnemonics and opcodes for use by assembly tooling.  The maps
//! exclude `JUMPDEST` (a position marker, not an operation expressible by
//! name) and the `PUSH*` family (their immediates make them inexpressible
//! as plain calls).

use std::collections::BTreeMap;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Instruction
// ─────────────────────────────────────────────────────────────────────────────

/// An EVM instruction opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Instruction {
    // ── 0x00: stop and arithmetic ─────────────────────────────────────────
    Stop = 0x00,
    Add = 0x01,
    Mul = 0x02,
    Sub = 0x03,
    Div = 0x04,
    Sdiv = 0x05,
    Mod = 0x06,
    Smod = 0x07,
    Addmod = 0x08,
    Mulmod = 0x09,
    Exp = 0x0a,
    Signextend = 0x0b,

    // ── 0x10: comparison and bitwise logic ────────────────────────────────
    Lt = 0x10,
    Gt = 0x11,
    Slt = 0x12,
    Sgt = 0x13,
    Eq = 0x14,
    Iszero = 0x15,
    And = 0x16,
    Or = 0x17,
    Xor = 0x18,
    Not = 0x19,
    Byte = 0x1a,
    Shl = 0x1b,
    Shr = 0x1c,
    Sar = 0x1d,

    // ── 0x20: hashing ─────────────────────────────────────────────────────
    Keccak256 = 0x20,

    // ── 0x30: environment ─────────────────────────────────────────────────
    Address = 0x30,
    Balance = 0x31,
    Origin = 0x32,
    Caller = 0x33,
    Callvalue = 0x34,
    Calldataload = 0x35,
    Calldatasize = 0x36,
    Calldatacopy = 0x37,
    Codesize = 0x38,
    Codecopy = 0x39,
    Gasprice = 0x3a,
    Extcodesize = 0x3b,
    Extcodecopy = 0x3c,
    Returndatasize = 0x3d,
    Returndatacopy = 0x3e,
    Extcodehash = 0x3f,

    // ── 0x40: block information ───────────────────────────────────────────
    Blockhash = 0x40,
    Coinbase = 0x41,
    Timestamp = 0x42,
    Number = 0x43,
    Difficulty = 0x44,
    Gaslimit = 0x45,
    Chainid = 0x46,
    Selfbalance = 0x47,

    // ── 0x50: stack, memory, storage, and flow ────────────────────────────
    Pop = 0x50,
    Mload = 0x51,
    Mstore = 0x52,
    Mstore8 = 0x53,
    Sload = 0x54,
    Sstore = 0x55,
    Jump = 0x56,
    Jumpi = 0x57,
    Pc = 0x58,
    Msize = 0x59,
    Gas = 0x5a,
    Jumpdest = 0x5b,

    // ── 0x60–0x7f: push with immediate ────────────────────────────────────
    Push1 = 0x60,
    Push2 = 0x61,
    Push3 = 0x62,
    Push4 = 0x63,
    Push5 = 0x64,
    Push6 = 0x65,
    Push7 = 0x66,
    Push8 = 0x67,
    Push9 = 0x68,
    Push10 = 0x69,
    Push11 = 0x6a,
    Push12 = 0x6b,
    Push13 = 0x6c,
    Push14 = 0x6d,
    Push15 = 0x6e,
    Push16 = 0x6f,
    Push17 = 0x70,
    Push18 = 0x71,
    Push19 = 0x72,
    Push20 = 0x73,
    Push21 = 0x74,
    Push22 = 0x75,
    Push23 = 0x76,
    Push24 = 0x77,
    Push25 = 0x78,
    Push26 = 0x79,
    Push27 = 0x7a,
    Push28 = 0x7b,
    Push29 = 0x7c,
    Push30 = 0x7d,
    Push31 = 0x7e,
    Push32 = 0x7f,

    // ── 0x80–0x8f: duplicate ──────────────────────────────────────────────
    Dup1 = 0x80,
    Dup2 = 0x81,
    Dup3 = 0x82,
    Dup4 = 0x83,
    Dup5 = 0x84,
    Dup6 = 0x85,
    Dup7 = 0x86,
    Dup8 = 0x87,
    Dup9 = 0x88,
    Dup10 = 0x89,
    Dup11 = 0x8a,
    Dup12 = 0x8b,
    Dup13 = 0x8c,
    Dup14 = 0x8d,
    Dup15 = 0x8e,
    Dup16 = 0x8f,

    // ── 0x90–0x9f: swap ───────────────────────────────────────────────────
    Swap1 = 0x90,
    Swap2 = 0x91,
    Swap3 = 0x92,
    Swap4 = 0x93,
    Swap5 = 0x94,
    Swap6 = 0x95,
    Swap7 = 0x96,
    Swap8 = 0x97,
    Swap9 = 0x98,
    Swap10 = 0x99,
    Swap11 = 0x9a,
    Swap12 = 0x9b,
    Swap13 = 0x9c,
    Swap14 = 0x9d,
    Swap15 = 0x9e,
    Swap16 = 0x9f,

    // ── 0xa0: logging ─────────────────────────────────────────────────────
    Log0 = 0xa0,
    Log1 = 0xa1,
    Log2 = 0xa2,
    Log3 = 0xa3,
    Log4 = 0xa4,

    // ── 0xf0: system ──────────────────────────────────────────────────────
    Create = 0xf0,
    Call = 0xf1,
    Callcode = 0xf2,
    Return = 0xf3,
    Delegatecall = 0xf4,
    Create2 = 0xf5,
    Staticcall = 0xfa,
    Revert = 0xfd,
    Invalid = 0xfe,
    Selfdestruct = 0xff,
}

impl Instruction {
    /// The opcode byte.
    pub fn opcode(self) -> u8 {
        self as u8
    }

    /// Returns `true` for the `PUSH1`…`PUSH32` family.
    pub fn is_push(self) -> bool {
        matches!(self.opcode(), 0x60..=0x7f)
    }

    /// Returns `true` for the `DUP1`…`DUP16` family.
    pub fn is_dup(self) -> bool {
        matches!(self.opcode(), 0x80..=0x8f)
    }

    /// Returns `true` for the `SWAP1`…`SWAP16` family.
    pub fn is_swap(self) -> bool {
        matches!(self.opcode(), 0x90..=0x9f)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mnemonic table
// ─────────────────────────────────────────────────────────────────────────────

/// Canonical mnemonics, including the historical aliases `SHA3` and
/// `SUICIDE` which share an opcode with `KECCAK256` and `SELFDESTRUCT`.
static MNEMONICS: &[(&str, Instruction)] = &[
    ("STOP", Instruction::Stop),
    ("ADD", Instruction::Add),
    ("MUL", Instruction::Mul),
    ("SUB", Instruction::Sub),
    ("DIV", Instruction::Div),
    ("SDIV", Instruction::Sdiv),
    ("MOD", Instruction::Mod),
    ("SMOD", Instruction::Smod),
    ("ADDMOD", Instruction::Addmod),
    ("MULMOD", Instruction::Mulmod),
    ("EXP", Instruction::Exp),
    ("SIGNEXTEND", Instruction::Signextend),
    ("LT", Instruction::Lt),
    ("GT", Instruction::Gt),
    ("SLT", Instruction::Slt),
    ("SGT", Instruction::Sgt),
    ("EQ", Instruction::Eq),
    ("ISZERO", Instruction::Iszero),
    ("AND", Instruction::And),
    ("OR", Instruction::Or),
    ("XOR", Instruction::Xor),
    ("NOT", Instruction::Not),
    ("BYTE", Instruction::Byte),
    ("SHL", Instruction::Shl),
    ("SHR", Instruction::Shr),
    ("SAR", Instruction::Sar),
    ("KECCAK256", Instruction::Keccak256),
    ("SHA3", Instruction::Keccak256),
    ("ADDRESS", Instruction::Address),
    ("BALANCE", Instruction::Balance),
    ("ORIGIN", Instruction::Origin),
    ("CALLER", Instruction::Caller),
    ("CALLVALUE", Instruction::Callvalue),
    ("CALLDATALOAD", Instruction::Calldataload),
    ("CALLDATASIZE", Instruction::Calldatasize),
    ("CALLDATACOPY", Instruction::Calldatacopy),
    ("CODESIZE", Instruction::Codesize),
    ("CODECOPY", Instruction::Codecopy),
    ("GASPRICE", Instruction::Gasprice),
    ("EXTCODESIZE", Instruction::Extcodesize),
    ("EXTCODECOPY", Instruction::Extcodecopy),
    ("RETURNDATASIZE", Instruction::Returndatasize),
    ("RETURNDATACOPY", Instruction::Returndatacopy),
    ("EXTCODEHASH", Instruction::Extcodehash),
    ("BLOCKHASH", Instruction::Blockhash),
    ("COINBASE", Instruction::Coinbase),
    ("TIMESTAMP", Instruction::Timestamp),
    ("NUMBER", Instruction::Number),
    ("DIFFICULTY", Instruction::Difficulty),
    ("GASLIMIT", Instruction::Gaslimit),
    ("CHAINID", Instruction::Chainid),
    ("SELFBALANCE", Instruction::Selfbalance),
    ("POP", Instruction::Pop),
    ("MLOAD", Instruction::Mload),
    ("MSTORE", Instruction::Mstore),
    ("MSTORE8", Instruction::Mstore8),
    ("SLOAD", Instruction::Sload),
    ("SSTORE", Instruction::Sstore),
    ("JUMP", Instruction::Jump),
    ("JUMPI", Instruction::Jumpi),
    ("PC", Instruction::Pc),
    ("MSIZE", Instruction::Msize),
    ("GAS", Instruction::Gas),
    ("JUMPDEST", Instruction::Jumpdest),
    ("PUSH1", Instruction::Push1),
    ("PUSH2", Instruction::Push2),
    ("PUSH3", Instruction::Push3),
    ("PUSH4", Instruction::Push4),
    ("PUSH5", Instruction::Push5),
    ("PUSH6", Instruction::Push6),
    ("PUSH7", Instruction::Push7),
    ("PUSH8", Instruction::Push8),
    ("PUSH9", Instruction::Push9),
    ("PUSH10", Instruction::Push10),
    ("PUSH11", Instruction::Push11),
    ("PUSH12", Instruction::Push12),
    ("PUSH13", Instruction::Push13),
    ("PUSH14", Instruction::Push14),
    ("PUSH15", Instruction::Push15),
    ("PUSH16", Instruction::Push16),
    ("PUSH17", Instruction::Push17),
    ("PUSH18", Instruction::Push18),
    ("PUSH19", Instruction::Push19),
    ("PUSH20", Instruction::Push20),
    ("PUSH21", Instruction::Push21),
    ("PUSH22", Instruction::Push22),
    ("PUSH23", Instruction::Push23),
    ("PUSH24", Instruction::Push24),
    ("PUSH25", Instruction::Push25),
    ("PUSH26", Instruction::Push26),
    ("PUSH27", Instruction::Push27),
    ("PUSH28", Instruction::Push28),
    ("PUSH29", Instruction::Push29),
    ("PUSH30", Instruction::Push30),
    ("PUSH31", Instruction::Push31),
    ("PUSH32", Instruction::Push32),
    ("DUP1", Instruction::Dup1),
    ("DUP2", Instruction::Dup2),
    ("DUP3", Instruction::Dup3),
    ("DUP4", Instruction::Dup4),
    ("DUP5", Instruction::Dup5),
    ("DUP6", Instruction::Dup6),
    ("DUP7", Instruction::Dup7),
    ("DUP8", Instruction::Dup8),
    ("DUP9", Instruction::Dup9),
    ("DUP10", Instruction::Dup10),
    ("DUP11", Instruction::Dup11),
    ("DUP12", Instruction::Dup12),
    ("DUP13", Instruction::Dup13),
    ("DUP14", Instruction::Dup14),
    ("DUP15", Instruction::Dup15),
    ("DUP16", Instruction::Dup16),
    ("SWAP1", Instruction::Swap1),
    ("SWAP2", Instruction::Swap2),
    ("SWAP3", Instruction::Swap3),
    ("SWAP4", Instruction::Swap4),
    ("SWAP5", Instruction::Swap5),
    ("SWAP6", Instruction::Swap6),
    ("SWAP7", Instruction::Swap7),
    ("SWAP8", Instruction::Swap8),
    ("SWAP9", Instruction::Swap9),
    ("SWAP10", Instruction::Swap10),
    ("SWAP11", Instruction::Swap11),
    ("SWAP12", Instruction::Swap12),
    ("SWAP13", Instruction::Swap13),
    ("SWAP14", Instruction::Swap14),
    ("SWAP15", Instruction::Swap15),
    ("SWAP16", Instruction::Swap16),
    ("LOG0", Instruction::Log0),
    ("LOG1", Instruction::Log1),
    ("LOG2", Instruction::Log2),
    ("LOG3", Instruction::Log3),
    ("LOG4", Instruction::Log4),
    ("CREATE", Instruction::Create),
    ("CALL", Instruction::Call),
    ("CALLCODE", Instruction::Callcode),
    ("RETURN", Instruction::Return),
    ("DELEGATECALL", Instruction::Delegatecall),
    ("CREATE2", Instruction::Create2),
    ("STATICCALL", Instruction::Staticcall),
    ("REVERT", Instruction::Revert),
    ("INVALID", Instruction::Invalid),
    ("SELFDESTRUCT", Instruction::Selfdestruct),
    ("SUICIDE", Instruction::Selfdestruct),
];

// ─────────────────────────────────────────────────────────────────────────────
// Memoized lookup maps
// ─────────────────────────────────────────────────────────────────────────────

static INSTRUCTIONS: OnceLock<BTreeMap<String, Instruction>> = OnceLock::new();
static INSTRUCTION_NAMES: OnceLock<BTreeMap<Instruction, String>> = OnceLock::new();

/// Lowercase mnemonic → opcode, for every instruction expressible by name
/// in assembly source.  `JUMPDEST` and the `PUSH*` family are excluded.
///
/// Built once per process; safe to read from any thread.
pub fn instructions() -> &'static BTreeMap<String, Instruction> {
    INSTRUCTIONS.get_or_init(|| {
        let mut map = BTreeMap::new();
        for &(name, instruction) in MNEMONICS {
            if instruction == Instruction::Jumpdest || instruction.is_push() {
                continue;
            }
            map.insert(name.to_ascii_lowercase(), instruction);
        }
        map
    })
}

/// Opcode → lowercase mnemonic, the inverse of [`instructions`].
///
/// Two opcodes carry two mnemonics each; the inverse pins the modern names
/// `selfdestruct` and `keccak256`.
pub fn instruction_names() -> &'static BTreeMap<Instruction, String> {
    INSTRUCTION_NAMES.get_or_init(|| {
        let mut map = BTreeMap::new();
        for (name, &instruction) in instructions() {
            map.insert(instruction, name.clone());
        }
        map.insert(Instruction::Selfdestruct, "selfdestruct".to_string());
        map.insert(Instruction::Keccak256, "keccak256".to_string());
        map
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_values() {
        assert_eq!(Instruction::Stop.opcode(), 0x00);
        assert_eq!(Instruction::Keccak256.opcode(), 0x20);
        assert_eq!(Instruction::Jumpdest.opcode(), 0x5b);
        assert_eq!(Instruction::Push32.opcode(), 0x7f);
        assert_eq!(Instruction::Selfdestruct.opcode(), 0xff);
    }

    #[test]
    fn test_family_predicates() {
        assert!(Instruction::Push1.is_push());
        assert!(Instruction::Push32.is_push());
        assert!(!Instruction::Dup1.is_push());
        assert!(Instruction::Dup16.is_dup());
        assert!(Instruction::Swap1.is_swap());
        assert!(!Instruction::Add.is_dup());
    }

    #[test]
    fn test_instructions_excludes_jumpdest_and_push() {
        let map = instructions();
        assert!(!map.contains_key("jumpdest"));
        assert!(!map.contains_key("push1"));
        assert!(!map.contains_key("push32"));
        assert_eq!(map.get("add"), Some(&Instruction::Add));
        assert_eq!(map.get("dup16"), Some(&Instruction::Dup16));
    }

    #[test]
    fn test_instructions_includes_aliases() {
        let map = instructions();
        assert_eq!(map.get("keccak256"), Some(&Instruction::Keccak256));
        assert_eq!(map.get("sha3"), Some(&Instruction::Keccak256));
        assert_eq!(map.get("selfdestruct"), Some(&Instruction::Selfdestruct));
        assert_eq!(map.get("suicide"), Some(&Instruction::Selfdestruct));
    }

    #[test]
    fn test_instruction_names_pins_ambiguous_mnemonics() {
        let names = instruction_names();
        assert_eq!(
            names.get(&Instruction::Selfdestruct).map(String::as_str),
            Some("selfdestruct")
        );
        assert_eq!(
            names.get(&Instruction::Keccak256).map(String::as_str),
            Some("keccak256")
        );
    }

    #[test]
    fn test_maps_are_inverse_modulo_aliases() {
        for (name, instruction) in instructions() {
            if name == "sha3" || name == "suicide" {
                continue;
            }
            assert_eq!(instruction_names().get(instruction), Some(name));
        }
        for (instruction, name) in instruction_names() {
            assert_eq!(instructions().get(name), Some(instruction));
        }
    }
}
