use serde::{Deserialize, Serialize};

/// How a mnemonic treats its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpClass {
    /// Stores, branches and jumps: every operand is read, nothing is written.
    ReadOnly,
    /// Everything else: first operand is the destination, the rest are read.
    Write,
}

#[derive(Debug, Clone, Copy)]
pub struct MnemonicDesc {
    pub mnemonic: &'static str,
    pub class: OpClass,
    /// Cycles until the result is usable by a consumer, forwarding assumed.
    pub latency: u64,
}

pub const TABLE: &[MnemonicDesc] = &[
    MnemonicDesc {
        mnemonic: "S.D",
        class: OpClass::ReadOnly,
        latency: 1,
    },
    MnemonicDesc {
        mnemonic: "SW",
        class: OpClass::ReadOnly,
        latency: 1,
    },
    MnemonicDesc {
        mnemonic: "SB",
        class: OpClass::ReadOnly,
        latency: 1,
    },
    MnemonicDesc {
        mnemonic: "BEQ",
        class: OpClass::ReadOnly,
        latency: 1,
    },
    MnemonicDesc {
        mnemonic: "BNE",
        class: OpClass::ReadOnly,
        latency: 1,
    },
    MnemonicDesc {
        mnemonic: "JR",
        class: OpClass::ReadOnly,
        latency: 1,
    },
    MnemonicDesc {
        mnemonic: "DIV.D",
        class: OpClass::Write,
        latency: 10,
    },
    MnemonicDesc {
        mnemonic: "DIV",
        class: OpClass::Write,
        latency: 10,
    },
    MnemonicDesc {
        mnemonic: "MUL.D",
        class: OpClass::Write,
        latency: 4,
    },
    MnemonicDesc {
        mnemonic: "MUL",
        class: OpClass::Write,
        latency: 4,
    },
    MnemonicDesc {
        mnemonic: "L.D",
        class: OpClass::Write,
        latency: 2,
    },
    MnemonicDesc {
        mnemonic: "LW",
        class: OpClass::Write,
        latency: 2,
    },
];

pub fn lookup(mnemonic: &str) -> Option<&'static MnemonicDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}

/// Category for an uppercase mnemonic. Unlisted mnemonics write a destination.
pub fn classify(mnemonic: &str) -> OpClass {
    lookup(mnemonic).map(|d| d.class).unwrap_or(OpClass::Write)
}

/// Result latency for an uppercase mnemonic. Unlisted mnemonics take 1 cycle.
pub fn latency(mnemonic: &str) -> u64 {
    lookup(mnemonic).map(|d| d.latency).unwrap_or(1)
}
