//! RISC-V integer register file with ABI names

use super::{RegisterFile, Word};
use crate::logging::codes;

/// ABI names by register index; `$0` is the hardwired zero register
pub const REGISTER_NAMES: [&str; 32] = [
    "$0", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Registers present in the RV32E base
pub const EMBEDDED_REGISTER_COUNT: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("Unknown register '{name}'")]
    Unknown { name: String },

    #[error("Register '{name}' is not present in this register file")]
    Unavailable { name: String },
}

impl RegisterError {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::machine::INVALID_MACHINE_IMAGE
    }
}

/// The 32 (or 16 for RV32E) general purpose registers plus `pc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiscvRegisters {
    gpr: [Word; 32],
    pc: Word,
    embedded: bool,
}

impl Default for RiscvRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl RiscvRegisters {
    /// Full RV32I/RV64I register file, all zero
    pub fn new() -> Self {
        Self {
            gpr: [0; 32],
            pc: 0,
            embedded: false,
        }
    }

    /// RV32E register file (`x0`..`x15` only)
    pub fn embedded() -> Self {
        Self {
            embedded: true,
            ..Self::new()
        }
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Number of implemented registers
    pub fn count(&self) -> usize {
        if self.embedded {
            EMBEDDED_REGISTER_COUNT
        } else {
            REGISTER_NAMES.len()
        }
    }

    /// Index of an ABI name, with or without a leading `$`
    pub fn index_of(name: &str) -> Option<usize> {
        REGISTER_NAMES
            .iter()
            .position(|&candidate| candidate == name)
            .or_else(|| {
                let bare = name.strip_prefix('$')?;
                REGISTER_NAMES.iter().position(|&candidate| candidate == bare)
            })
    }

    pub fn get(&self, index: usize) -> Option<Word> {
        if index < self.count() {
            self.gpr.get(index).copied()
        } else {
            None
        }
    }

    /// Write a register by index; writes to `$0` are discarded
    pub fn set(&mut self, index: usize, value: Word) -> bool {
        if index >= self.count() {
            return false;
        }
        if index != 0 {
            self.gpr[index] = value;
        }
        true
    }

    /// Write a register by ABI name
    pub fn set_named(&mut self, name: &str, value: Word) -> Result<(), RegisterError> {
        let index = Self::index_of(name).ok_or_else(|| RegisterError::Unknown {
            name: name.to_string(),
        })?;

        if self.set(index, value) {
            Ok(())
        } else {
            Err(RegisterError::Unavailable {
                name: name.to_string(),
            })
        }
    }

    pub fn pc(&self) -> Word {
        self.pc
    }

    pub fn set_pc(&mut self, pc: Word) {
        self.pc = pc;
    }
}

impl RegisterFile for RiscvRegisters {
    fn read_register(&self, name: &str) -> Option<Word> {
        if name == "pc" || name == "$pc" {
            return Some(self.pc);
        }
        Self::index_of(name).and_then(|index| self.get(index))
    }
}
