use crate::parser::{AstKind, BasicBlock};

use super::{LoopId, Operation, Program, TAPE_SIZE};

/// Lowers an AST into a `Program` with a single depth-first pass. The
/// generator carries the loop-id counter across the whole walk, which is
/// what keeps every lowered loop independently addressable.
pub struct CodeGenerator {
    next_loop_id: u32,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self { next_loop_id: 0 }
    }

    pub fn lower(mut self, program: &BasicBlock) -> Program {
        let operations = self.lower_block(program);

        Program {
            tape_size: TAPE_SIZE,
            operations,
            loop_count: self.next_loop_id,
        }
    }

    fn lower_block(&mut self, block: &BasicBlock) -> Vec<Operation> {
        block
            .instructions
            .iter()
            .map(|instruction| match instruction {
                AstKind::Increment => Operation::CellDelta(1),
                AstKind::Decrement => Operation::CellDelta(-1),
                AstKind::MoveRight => Operation::PointerDelta(1),
                AstKind::MoveLeft => Operation::PointerDelta(-1),
                AstKind::Write => Operation::Write,
                AstKind::Read => Operation::Read,
                AstKind::Loop(body) => {
                    let id = self.fresh_loop_id();
                    Operation::Loop {
                        id,
                        body: self.lower_block(body),
                    }
                }
            })
            .collect()
    }

    fn fresh_loop_id(&mut self) -> LoopId {
        let id = LoopId(self.next_loop_id);
        self.next_loop_id += 1;
        id
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::CodeGenerator;
    use crate::codegen::{LoopId, Operation, Program, TAPE_SIZE};
    use crate::lexer::lexer::Lexer;
    use crate::parser::parser::Parser;

    fn lower(source: &str) -> Program {
        let tokens = Lexer::new(source)
            .collect_results()
            .expect("test source must lex");
        let ast = Parser::new(&tokens)
            .parse_program()
            .expect("test source must parse");
        CodeGenerator::new().lower(&ast)
    }

    #[test]
    fn lowers_primitives_in_source_order() {
        assert_eq!(
            lower("+-><.,").operations(),
            &[
                Operation::CellDelta(1),
                Operation::CellDelta(-1),
                Operation::PointerDelta(1),
                Operation::PointerDelta(-1),
                Operation::Write,
                Operation::Read,
            ]
        );
    }

    #[test]
    fn empty_source_lowers_to_an_empty_program() {
        let program = lower("");
        assert_eq!(program.operations(), &[]);
        assert_eq!(program.loop_count(), 0);
        assert_eq!(program.tape_size(), TAPE_SIZE);
    }

    #[test]
    fn sibling_loops_get_distinct_ids() {
        let program = lower("[][]");
        assert_eq!(
            program.operations(),
            &[
                Operation::Loop {
                    id: LoopId(0),
                    body: vec![]
                },
                Operation::Loop {
                    id: LoopId(1),
                    body: vec![]
                },
            ]
        );
        assert_eq!(program.loop_count(), 2);
    }

    #[test]
    fn nested_loops_get_distinct_ids() {
        let program = lower("[[-]]");
        assert_eq!(
            program.operations(),
            &[Operation::Loop {
                id: LoopId(0),
                body: vec![Operation::Loop {
                    id: LoopId(1),
                    body: vec![Operation::CellDelta(-1)],
                }],
            }]
        );
    }

    #[test]
    fn loop_bodies_keep_source_order() {
        let program = lower("[->+<]");
        assert_eq!(
            program.operations(),
            &[Operation::Loop {
                id: LoopId(0),
                body: vec![
                    Operation::CellDelta(-1),
                    Operation::PointerDelta(1),
                    Operation::CellDelta(1),
                    Operation::PointerDelta(-1),
                ],
            }]
        );
    }
}
