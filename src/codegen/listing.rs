use std::convert::Infallible;
use std::fmt::Write;

use super::{Backend, Operation, Program};

/// Serializes a `Program` into a human-readable listing: one operation per
/// line, loop bodies indented and bracketed under their unique labels. This
/// is the persisted-artifact side of the backend contract; the interpreter
/// is the executing side.
pub struct ListingEmitter;

impl ListingEmitter {
    pub fn new() -> Self {
        Self
    }

    fn write_block(out: &mut String, operations: &[Operation], indent: usize) {
        for operation in operations {
            for _ in 0..indent {
                out.push_str("  ");
            }

            match operation {
                Operation::CellDelta(amount) => {
                    let _ = writeln!(out, "cell {:+}", amount);
                }
                Operation::PointerDelta(amount) => {
                    let _ = writeln!(out, "ptr {:+}", amount);
                }
                Operation::Write => out.push_str("write\n"),
                Operation::Read => out.push_str("read\n"),
                Operation::Loop { id, body } => {
                    let _ = writeln!(out, "{} {{", id);
                    Self::write_block(out, body, indent + 1);
                    for _ in 0..indent {
                        out.push_str("  ");
                    }
                    out.push_str("}\n");
                }
            }
        }
    }
}

impl Default for ListingEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for ListingEmitter {
    type Artifact = String;
    type Error = Infallible;

    fn consume(&mut self, program: &Program) -> Result<String, Infallible> {
        let mut out = String::new();
        let _ = writeln!(out, "tape {} cells", program.tape_size());
        Self::write_block(&mut out, program.operations(), 0);
        out.push_str("ret 0\n");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::ListingEmitter;
    use crate::codegen::codegen::CodeGenerator;
    use crate::codegen::Backend;
    use crate::lexer::lexer::Lexer;
    use crate::parser::parser::Parser;

    fn listing(source: &str) -> String {
        let tokens = Lexer::new(source)
            .collect_results()
            .expect("test source must lex");
        let ast = Parser::new(&tokens)
            .parse_program()
            .expect("test source must parse");
        let program = CodeGenerator::new().lower(&ast);
        ListingEmitter::new().consume(&program).unwrap()
    }

    #[test]
    fn renders_a_flat_program() {
        assert_eq!(
            listing("+>."),
            "tape 30000 cells\ncell +1\nptr +1\nwrite\nret 0\n"
        );
    }

    #[test]
    fn renders_loops_with_their_labels() {
        assert_eq!(
            listing("[-][,]"),
            concat!(
                "tape 30000 cells\n",
                "loop_0 {\n",
                "  cell -1\n",
                "}\n",
                "loop_1 {\n",
                "  read\n",
                "}\n",
                "ret 0\n",
            )
        );
    }

    #[test]
    fn empty_program_still_returns() {
        assert_eq!(listing(""), "tape 30000 cells\nret 0\n");
    }
}
