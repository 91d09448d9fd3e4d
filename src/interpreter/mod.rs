pub mod program_interpreter;

use std::io::{self, Read, Write};

use thiserror::Error;

use crate::codegen::TAPE_SIZE;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("stream I/O failed")]
    Io(#[from] io::Error),

    #[error("still running after {limit} steps")]
    StepLimitReached { limit: u64 },
}

/// The machine state a compiled program runs against: the zero-filled tape,
/// the 16-bit index register selecting the active cell, and the two byte
/// streams. One runtime backs one program execution at a time.
pub struct Runtime {
    /// The 16-bit register selecting the active cell
    index: u16,

    /// Our statically sized, zero-initialized cell array
    tape: Vec<u8>,

    in_stream: Box<dyn Read>,
    out_stream: Box<dyn Write>,
}

impl Runtime {
    pub fn new(in_stream: Box<dyn Read>, out_stream: Box<dyn Write>) -> Self {
        Self {
            index: 0,
            tape: vec![0; TAPE_SIZE],
            in_stream,
            out_stream,
        }
    }

    /// Zero the tape and index register again, as if freshly allocated.
    /// The streams stay where they are.
    pub fn reset(&mut self) {
        self.tape = vec![0; self.tape.len()];
        self.index = 0;
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    /// The byte at the current cell.
    pub fn cell(&self) -> u8 {
        self.tape[self.index as usize]
    }

    /// Is the current cell zero? This decides every loop test.
    pub fn cell_is_zero(&self) -> bool {
        self.tape[self.index as usize] == 0
    }

    /// Adds to the current cell modulo 256. Overflow in either direction
    /// wraps; that is defined behavior, not an error.
    pub fn add_to_cell(&mut self, amount: i8) {
        let cell = &mut self.tape[self.index as usize];
        *cell = cell.wrapping_add_signed(amount);
    }

    /// Moves the index register, wrapping around both ends of the tape.
    ///
    /// `%` is a truncating remainder, so stepping left off cell zero leaves
    /// -1 rather than `TAPE_SIZE - 1`. A ±1 move can end up at most one step
    /// out of range, so -1 is the only negative value the remainder can
    /// produce and patching exactly that value up is sufficient.
    pub fn move_pointer(&mut self, amount: i16) {
        let mut next = (self.index as i16).wrapping_add(amount) % TAPE_SIZE as i16;
        if next == -1 {
            next = TAPE_SIZE as i16 - 1;
        }
        self.index = next as u16;
    }

    /// Writes the current cell to the output stream.
    pub fn write_cell(&mut self) -> io::Result<()> {
        let byte = [self.tape[self.index as usize]];
        self.out_stream.write_all(&byte)
    }

    /// Reads one byte from the input stream into the current cell. End of
    /// input stores zero, whatever the cell held before.
    pub fn read_cell(&mut self) -> io::Result<()> {
        let mut byte = [0u8; 1];
        let value = match self.in_stream.read_exact(&mut byte) {
            Ok(()) => byte[0],
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => 0,
            Err(e) => return Err(e),
        };
        self.tape[self.index as usize] = value;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out_stream.flush()
    }
}
