//! # SDB Console
//!
//! Front end pieces of the debugger console: machine image loading and the
//! batch checker for `<expected> <expression>` files.

pub mod batch;
pub mod image;

pub use batch::{check_lines, BatchReport, CaseFailure, FailureKind};
pub use image::{ImageError, Machine, MachineImage, MemorySegment, SegmentedMemory};
