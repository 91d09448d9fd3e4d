//! brainflow compiles brainfuck into a structured control-flow program
//! over a fixed 30,000-cell wrap-around tape, and ships two reference
//! backends behind one trait: a direct interpreter and a listing emitter.

pub use codegen::codegen::CodeGenerator;
pub use codegen::listing::ListingEmitter;
pub use codegen::{Backend, LoopId, Operation, Program, TAPE_SIZE};
pub use interpreter::program_interpreter::ProgramInterpreter;
pub use interpreter::{ExecutionError, Runtime};
pub use lexer::{LexerError, TokenKind};
pub use parser::{AstKind, BasicBlock, ParseError};

pub mod codegen;
pub mod interpreter;
pub mod lexer;
pub mod parser;

use thiserror::Error;

/// Any way the frontend can reject a source program. Once either stage
/// fails nothing is lowered; there is no partial artifact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Lexer(#[from] LexerError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Compiles brainfuck source text into a `Program` ready for any backend.
pub fn compile(source: &str) -> Result<Program, CompileError> {
    let tokens = lexer::lexer::Lexer::new(source).collect_results()?;
    let ast = parser::parser::Parser::new(&tokens).parse_program()?;
    Ok(CodeGenerator::new().lower(&ast))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{compile, CompileError, LexerError};

    #[test]
    fn unmatched_open_fails_before_lowering() {
        assert_eq!(
            compile("["),
            Err(CompileError::Lexer(LexerError::UnclosedLoop {
                line: 1,
                col: 1
            }))
        );
    }

    #[test]
    fn stray_close_fails_before_lowering() {
        assert_eq!(
            compile("+]"),
            Err(CompileError::Lexer(LexerError::UnmatchedClose {
                line: 1,
                col: 2
            }))
        );
    }

    #[test]
    fn empty_source_compiles_to_an_empty_program() {
        let program = compile("").unwrap();
        assert_eq!(program.operations().len(), 0);
    }

    #[test]
    fn comments_compile_to_nothing() {
        let program = compile("this text is no program at all").unwrap();
        assert_eq!(program.operations().len(), 0);
    }
}
