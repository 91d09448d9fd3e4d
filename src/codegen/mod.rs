use std::fmt;

pub mod codegen;
pub mod listing;

/// Number of single-byte cells on the tape. Pointer moves wrap around this
/// boundary rather than fault.
pub const TAPE_SIZE: usize = 30_000;

/// Identity of one lowered loop construct. Ids come from a monotonically
/// increasing counter that is never reset, so sibling and nested loops are
/// always distinguishable from each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopId(pub u32);

impl fmt::Display for LoopId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "loop_{}", self.0)
    }
}

/// A single lowered operation over the tape and index register
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// Add the amount (always ±1) to the byte at the current cell, modulo 256
    CellDelta(i8),

    /// Add the amount (always ±1) to the index register, modulo the tape size
    PointerDelta(i16),

    /// Write the current cell, zero-extended, to the output stream
    Write,

    /// Read one byte from the input stream into the current cell; at end of
    /// input, store zero instead
    Read,

    /// A pre-test loop: test the current cell on entry and again after every
    /// pass over the body, falling through to the exit once it reads zero
    Loop { id: LoopId, body: Vec<Operation> },
}

/// The compiled artifact handed to a backend: the tape geometry plus the
/// lowered operations in source order. Running its entry point means
/// executing the operations against a fresh zeroed tape and index register,
/// then returning status 0. The program owns its operations exclusively and
/// never changes once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    tape_size: usize,
    operations: Vec<Operation>,
    loop_count: u32,
}

impl Program {
    pub fn tape_size(&self) -> usize {
        self.tape_size
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// How many loop constructs were lowered (also one past the highest
    /// `LoopId` handed out).
    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }
}

/// An opaque consumer of compiled programs: a direct interpreter, a
/// serializer, a JIT. Anything that honors the `Program` contract fits
/// behind this trait.
pub trait Backend {
    type Artifact;
    type Error;

    fn consume(&mut self, program: &Program) -> Result<Self::Artifact, Self::Error>;
}
