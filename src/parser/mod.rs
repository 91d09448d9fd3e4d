use thiserror::Error;

pub mod parser;

/// Hard cap on loop nesting. Parsing itself runs on an explicit stack, but
/// lowering and interpretation walk the finished tree with call recursion,
/// so the depth has to stay far below any realistic call-stack limit.
pub const MAX_LOOP_DEPTH: usize = 1_000;

#[derive(Debug, Clone, PartialEq)]
pub enum AstKind {
    MoveRight,
    MoveLeft,

    Increment,
    Decrement,

    Write,
    Read,

    Loop(BasicBlock),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    pub instructions: Vec<AstKind>,
}

impl BasicBlock {
    /// Number of primitive (non-loop) instructions in the whole tree.
    pub fn leaf_count(&self) -> usize {
        self.instructions
            .iter()
            .map(|instruction| match instruction {
                AstKind::Loop(body) => body.leaf_count(),
                _ => 1,
            })
            .sum()
    }

    /// Deepest loop nesting anywhere in the tree.
    pub fn max_depth(&self) -> usize {
        self.instructions
            .iter()
            .map(|instruction| match instruction {
                AstKind::Loop(body) => 1 + body.max_depth(),
                _ => 0,
            })
            .max()
            .unwrap_or(0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("loop nesting is deeper than the supported maximum of {max}")]
    NestingTooDeep { max: usize },

    #[error("a [ was never closed before the end of the token stream")]
    UnclosedLoop,

    #[error("a ] appeared with no [ open")]
    UnmatchedClose,
}
