//! Guest machine collaborators
//!
//! The evaluator never owns machine state. It reads registers and memory
//! through the two traits below, bundled per call in an [`EvalContext`].

pub mod memory;
pub mod riscv;

#[cfg(test)]
pub mod testing;

use crate::logging::codes;

pub use memory::{PhysicalMemory, DEFAULT_MEMORY_BASE};
pub use riscv::{RiscvRegisters, REGISTER_NAMES};

// ============================================================================
// MACHINE WORD
// ============================================================================

/// Native integer width of the guest registers and memory reads
#[cfg(not(feature = "isa64"))]
pub type Word = u32;

/// Native integer width of the guest registers and memory reads
#[cfg(feature = "isa64")]
pub type Word = u64;

/// Bytes read by a dereference
pub const WORD_BYTES: usize = std::mem::size_of::<Word>();

pub const WORD_BITS: u32 = Word::BITS;

// ============================================================================
// COLLABORATOR TRAITS
// ============================================================================

/// Read-only view of the guest register file
pub trait RegisterFile {
    /// Value of the register named by `name` (token text, including `$`)
    fn read_register(&self, name: &str) -> Option<Word>;
}

/// Read-only view of guest physical memory
pub trait GuestMemory {
    /// Read `width` bytes at `addr` as a little-endian word
    fn read(&self, addr: Word, width: usize) -> Result<Word, MemoryError>;
}

/// Guest memory read failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryError {
    #[error("Address {addr:#x} (+{width} bytes) is outside guest memory")]
    OutOfBounds { addr: Word, width: usize },

    #[error("Unsupported read width: {width} bytes")]
    UnsupportedWidth { width: usize },
}

impl MemoryError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            MemoryError::OutOfBounds { .. } => codes::machine::UNREADABLE_ADDRESS,
            MemoryError::UnsupportedWidth { .. } => codes::machine::UNSUPPORTED_WIDTH,
        }
    }
}

impl<T: RegisterFile + ?Sized> RegisterFile for &T {
    fn read_register(&self, name: &str) -> Option<Word> {
        (**self).read_register(name)
    }
}

impl<T: GuestMemory + ?Sized> GuestMemory for &T {
    fn read(&self, addr: Word, width: usize) -> Result<Word, MemoryError> {
        (**self).read(addr, width)
    }
}

// ============================================================================
// EVALUATION CONTEXT
// ============================================================================

/// Machine state visible to one evaluation
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub registers: &'a dyn RegisterFile,
    pub memory: &'a dyn GuestMemory,
}

impl<'a> EvalContext<'a> {
    pub fn new(registers: &'a dyn RegisterFile, memory: &'a dyn GuestMemory) -> Self {
        Self { registers, memory }
    }

    pub fn read_register(&self, name: &str) -> Option<Word> {
        self.registers.read_register(name)
    }

    pub fn read_memory(&self, addr: Word, width: usize) -> Result<Word, MemoryError> {
        self.memory.read(addr, width)
    }
}

impl std::fmt::Debug for EvalContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvalContext").finish_non_exhaustive()
    }
}

/// Register file with no registers
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRegisters;

impl RegisterFile for NoRegisters {
    fn read_register(&self, _name: &str) -> Option<Word> {
        None
    }
}

/// Memory with no readable addresses
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMemory;

impl GuestMemory for NoMemory {
    fn read(&self, addr: Word, width: usize) -> Result<Word, MemoryError> {
        Err(MemoryError::OutOfBounds { addr, width })
    }
}
