use std::mem;

use crate::lexer::TokenKind;

use super::{AstKind, BasicBlock, ParseError, MAX_LOOP_DEPTH};

pub struct Parser<'a> {
    tokens: std::slice::Iter<'a, TokenKind>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [TokenKind]) -> Parser<'a> {
        Parser {
            tokens: tokens.iter(),
        }
    }

    /// Builds the block tree with an explicit stack of open blocks: `[`
    /// pushes the block under construction, `]` pops it back and attaches
    /// the finished body as a `Loop`. Nesting depth therefore never grows
    /// the call stack, however pathological the input.
    pub fn parse_program(&mut self) -> Result<BasicBlock, ParseError> {
        let mut current = vec![];
        let mut open_blocks: Vec<Vec<AstKind>> = vec![];

        while let Some(token) = self.tokens.next() {
            match token {
                TokenKind::MoveRight => current.push(AstKind::MoveRight),
                TokenKind::MoveLeft => current.push(AstKind::MoveLeft),
                TokenKind::Increment => current.push(AstKind::Increment),
                TokenKind::Decrement => current.push(AstKind::Decrement),
                TokenKind::Write => current.push(AstKind::Write),
                TokenKind::Read => current.push(AstKind::Read),
                TokenKind::LoopStart => {
                    if open_blocks.len() == MAX_LOOP_DEPTH {
                        return Err(ParseError::NestingTooDeep {
                            max: MAX_LOOP_DEPTH,
                        });
                    }
                    open_blocks.push(mem::take(&mut current));
                }
                TokenKind::LoopEnd => {
                    // the lexer rejects unbalanced sources before we run,
                    // but a caller can hand us any token slice
                    let parent = open_blocks.pop().ok_or(ParseError::UnmatchedClose)?;
                    let body = mem::replace(&mut current, parent);
                    current.push(AstKind::Loop(BasicBlock { instructions: body }));
                }
                TokenKind::Eof => break,
                TokenKind::Comment(_) => continue,
            }
        }

        if !open_blocks.is_empty() {
            return Err(ParseError::UnclosedLoop);
        }

        Ok(BasicBlock {
            instructions: current,
        })
    }
}
