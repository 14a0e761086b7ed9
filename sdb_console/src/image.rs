//! TOML machine images
//!
//! ```toml
//! embedded = false
//! pc = 0x80000000
//!
//! [registers]
//! sp = 0x80001000
//! "$t0" = 7
//!
//! [[memory]]
//! base = 0x80000000
//! size = 4096
//! words = [0x00000297, 0xdeadbeef]
//! ```

use sdb_expr::machine::riscv::RegisterError;
use sdb_expr::machine::{GuestMemory, DEFAULT_MEMORY_BASE, WORD_BYTES};
use sdb_expr::{EvalContext, MemoryError, PhysicalMemory, RiscvRegisters, Word};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Bytes mapped when an image does not describe any memory
pub const DEFAULT_SEGMENT_SIZE: usize = 0x10000;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Failed to read machine image '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid machine image: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid register entry: {0}")]
    Register(#[from] RegisterError),

    #[error("Memory segment at {base:#x} is invalid: {source}")]
    Memory {
        base: Word,
        #[source]
        source: MemoryError,
    },
}

impl ImageError {
    pub fn error_code(&self) -> sdb_expr::logging::Code {
        match self {
            ImageError::Memory { source, .. } => source.error_code(),
            _ => sdb_expr::logging::codes::machine::INVALID_MACHINE_IMAGE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemorySegment {
    pub base: Word,
    /// Segment size in bytes; grows to fit `words` when smaller
    #[serde(default)]
    pub size: usize,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl MemorySegment {
    fn build(&self) -> Result<PhysicalMemory, ImageError> {
        let size = self.size.max(self.words.len() * WORD_BYTES);
        let mut memory = PhysicalMemory::new(self.base, size);
        memory
            .load_words(self.base, &self.words)
            .map_err(|source| ImageError::Memory {
                base: self.base,
                source,
            })?;
        Ok(memory)
    }
}

/// Serialized guest state the console evaluates against
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MachineImage {
    /// RV32E register file
    pub embedded: bool,
    pub pc: Word,
    pub registers: BTreeMap<String, Word>,
    pub memory: Vec<MemorySegment>,
}

impl MachineImage {
    pub fn from_toml_str(text: &str) -> Result<Self, ImageError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ImageError> {
        let text = std::fs::read_to_string(path).map_err(|source| ImageError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn build(&self) -> Result<Machine, ImageError> {
        let mut registers = if self.embedded {
            RiscvRegisters::embedded()
        } else {
            RiscvRegisters::new()
        };
        registers.set_pc(self.pc);
        for (name, value) in &self.registers {
            registers.set_named(name, *value)?;
        }

        let segments = if self.memory.is_empty() {
            vec![PhysicalMemory::new(DEFAULT_MEMORY_BASE, DEFAULT_SEGMENT_SIZE)]
        } else {
            self.memory
                .iter()
                .map(MemorySegment::build)
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Machine {
            registers,
            memory: SegmentedMemory { segments },
        })
    }
}

/// Guest memory made of disjoint physical segments
#[derive(Debug, Clone)]
pub struct SegmentedMemory {
    segments: Vec<PhysicalMemory>,
}

impl SegmentedMemory {
    pub fn segments(&self) -> &[PhysicalMemory] {
        &self.segments
    }
}

impl GuestMemory for SegmentedMemory {
    fn read(&self, addr: Word, width: usize) -> Result<Word, MemoryError> {
        for segment in &self.segments {
            match segment.read(addr, width) {
                Err(MemoryError::OutOfBounds { .. }) => continue,
                result => return result,
            }
        }
        Err(MemoryError::OutOfBounds { addr, width })
    }
}

/// Registers and memory built from an image
#[derive(Debug, Clone)]
pub struct Machine {
    pub registers: RiscvRegisters,
    pub memory: SegmentedMemory,
}

impl Machine {
    pub fn context(&self) -> EvalContext<'_> {
        EvalContext::new(&self.registers, &self.memory)
    }
}
