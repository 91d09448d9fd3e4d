use thiserror::Error;

pub mod lexer;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // `>`: Move the index register one cell to the right
    MoveRight,
    // `<`: Move the index register one cell to the left
    MoveLeft,

    // `+`: Increment the byte at the current cell by one
    Increment,
    // `-`: Decrement the byte at the current cell by one
    Decrement,

    // `.`: Write the byte at the current cell to the output stream
    Write,
    // `,`: Read the next byte from the input stream into the current cell
    Read,

    // `[`: Start of a loop body; the current cell is tested before every pass
    LoopStart,
    // `]`: End of a loop body; control returns to the test
    LoopEnd,

    // End of file: no more tokens left
    Eof,

    // Every other character, coalesced into runs
    Comment(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("no matching ] for the [ at {line}:{col}")]
    UnclosedLoop { line: usize, col: usize },

    #[error("no matching [ for the ] at {line}:{col}")]
    UnmatchedClose { line: usize, col: usize },
}
