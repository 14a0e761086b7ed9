//! Test double for the guest machine

use super::{EvalContext, GuestMemory, MemoryError, RegisterFile, Word};
use std::cell::RefCell;
use std::collections::HashMap;

/// Registers and word-addressed memory backed by maps; records every read
#[derive(Debug, Default)]
pub struct MockMachine {
    registers: HashMap<String, Word>,
    memory: HashMap<Word, Word>,
    register_reads: RefCell<Vec<String>>,
    memory_reads: RefCell<Vec<(Word, usize)>>,
}

impl MockMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_register(mut self, name: &str, value: Word) -> Self {
        self.registers.insert(name.to_string(), value);
        self
    }

    pub fn with_word(mut self, addr: Word, value: Word) -> Self {
        self.memory.insert(addr, value);
        self
    }

    pub fn context(&self) -> EvalContext<'_> {
        EvalContext::new(self, self)
    }

    pub fn register_reads(&self) -> Vec<String> {
        self.register_reads.borrow().clone()
    }

    pub fn memory_reads(&self) -> Vec<(Word, usize)> {
        self.memory_reads.borrow().clone()
    }
}

impl RegisterFile for MockMachine {
    fn read_register(&self, name: &str) -> Option<Word> {
        self.register_reads.borrow_mut().push(name.to_string());
        self.registers.get(name).copied()
    }
}

impl GuestMemory for MockMachine {
    fn read(&self, addr: Word, width: usize) -> Result<Word, MemoryError> {
        self.memory_reads.borrow_mut().push((addr, width));
        self.memory
            .get(&addr)
            .copied()
            .ok_or(MemoryError::OutOfBounds { addr, width })
    }
}
