//! Flat little-endian guest physical memory

use super::{GuestMemory, MemoryError, Word, WORD_BYTES};

/// Guest physical address where memory starts
pub const DEFAULT_MEMORY_BASE: Word = 0x8000_0000;

/// Contiguous byte array mapped at `base`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalMemory {
    base: Word,
    bytes: Vec<u8>,
}

impl PhysicalMemory {
    /// Zero-filled memory of `size` bytes at `base`
    pub fn new(base: Word, size: usize) -> Self {
        Self {
            base,
            bytes: vec![0; size],
        }
    }

    /// Memory at `base` initialized from `bytes`
    pub fn from_bytes(base: Word, bytes: Vec<u8>) -> Self {
        Self { base, bytes }
    }

    pub fn base(&self) -> Word {
        self.base
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    fn check_width(width: usize) -> Result<(), MemoryError> {
        match width {
            1 | 2 | 4 | 8 if width <= WORD_BYTES => Ok(()),
            _ => Err(MemoryError::UnsupportedWidth { width }),
        }
    }

    /// Byte range backing `[addr, addr + width)`
    fn range(&self, addr: Word, width: usize) -> Result<std::ops::Range<usize>, MemoryError> {
        let out_of_bounds = MemoryError::OutOfBounds { addr, width };
        let offset = addr
            .checked_sub(self.base)
            .and_then(|offset| usize::try_from(offset).ok())
            .ok_or_else(|| out_of_bounds.clone())?;
        let end = offset
            .checked_add(width)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(out_of_bounds)?;
        Ok(offset..end)
    }

    /// Write `width` low-order bytes of `value` at `addr`
    pub fn write(&mut self, addr: Word, width: usize, value: Word) -> Result<(), MemoryError> {
        Self::check_width(width)?;
        let range = self.range(addr, width)?;
        let le = value.to_le_bytes();
        self.bytes[range].copy_from_slice(&le[..width]);
        Ok(())
    }

    /// Copy raw bytes into memory starting at `addr`
    pub fn load(&mut self, addr: Word, data: &[u8]) -> Result<(), MemoryError> {
        let range = self.range(addr, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Store consecutive machine words starting at `addr`
    pub fn load_words(&mut self, addr: Word, words: &[Word]) -> Result<(), MemoryError> {
        let data: Vec<u8> = words.iter().flat_map(|word| word.to_le_bytes()).collect();
        self.load(addr, &data)
    }
}

impl GuestMemory for PhysicalMemory {
    fn read(&self, addr: Word, width: usize) -> Result<Word, MemoryError> {
        Self::check_width(width)?;
        let range = self.range(addr, width)?;
        let mut le = [0u8; WORD_BYTES];
        le[..width].copy_from_slice(&self.bytes[range]);
        Ok(Word::from_le_bytes(le))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_little_endian_reads() {
        let memory =
            PhysicalMemory::from_bytes(DEFAULT_MEMORY_BASE, vec![0x78, 0x56, 0x34, 0x12, 0xff]);
        assert_eq!(memory.read(DEFAULT_MEMORY_BASE, 4), Ok(0x1234_5678));
        assert_eq!(memory.read(DEFAULT_MEMORY_BASE, 2), Ok(0x5678));
        assert_eq!(memory.read(DEFAULT_MEMORY_BASE + 4, 1), Ok(0xff));
    }

    #[test]
    fn test_out_of_bounds() {
        let memory = PhysicalMemory::new(DEFAULT_MEMORY_BASE, 8);
        assert_matches!(memory.read(0, 4), Err(MemoryError::OutOfBounds { addr: 0, width: 4 }));
        assert_matches!(
            memory.read(DEFAULT_MEMORY_BASE + 6, 4),
            Err(MemoryError::OutOfBounds { .. })
        );
        assert_matches!(memory.read(Word::MAX, 4), Err(MemoryError::OutOfBounds { .. }));
    }

    #[test]
    fn test_unsupported_width() {
        let memory = PhysicalMemory::new(DEFAULT_MEMORY_BASE, 8);
        assert_matches!(
            memory.read(DEFAULT_MEMORY_BASE, 3),
            Err(MemoryError::UnsupportedWidth { width: 3 })
        );
        assert_matches!(
            memory.read(DEFAULT_MEMORY_BASE, WORD_BYTES * 2),
            Err(MemoryError::UnsupportedWidth { .. })
        );
    }

    #[test]
    fn test_write_then_read() {
        let mut memory = PhysicalMemory::new(0, 16);
        memory.write(4, 4, 0xdead_beef).unwrap();
        memory.load_words(8, &[1, 2]).unwrap();
        assert_eq!(memory.read(4, 4), Ok(0xdead_beef));
        assert_eq!(memory.read(4, 1), Ok(0xef));
        assert_eq!(memory.read(8, WORD_BYTES), Ok(1));
        assert!(memory.load(15, &[1, 2]).is_err());
    }
}
