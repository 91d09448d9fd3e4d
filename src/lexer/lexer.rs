use super::{LexerError, TokenKind};

fn is_command(c: char) -> bool {
    matches!(c, '>' | '<' | '+' | '-' | '.' | ',' | '[' | ']')
}

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /** Human readable position in the source */
    pub cur_line: usize,
    pub cur_col: usize,

    /** 'raw' offset within the source (in terms of 'codepoints') */
    pub codepoint_offset: usize,

    chars: std::iter::Peekable<std::str::Chars<'a>>,
    // positions of every [ still waiting for its ]
    open_loops: Vec<(usize, usize)>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            cur_col: 1,
            cur_line: 1,

            codepoint_offset: 0,

            chars: source.chars().peekable(),
            open_loops: vec![],
        }
    }

    fn transform_to_type(&mut self, c: char, line: usize, col: usize) -> Result<TokenKind, LexerError> {
        match c {
            '>' => Ok(TokenKind::MoveRight),
            '<' => Ok(TokenKind::MoveLeft),
            '+' => Ok(TokenKind::Increment),
            '-' => Ok(TokenKind::Decrement),
            '.' => Ok(TokenKind::Write),
            ',' => Ok(TokenKind::Read),
            '[' => {
                self.open_loops.push((line, col));
                Ok(TokenKind::LoopStart)
            }
            ']' => {
                if self.open_loops.pop().is_some() {
                    Ok(TokenKind::LoopEnd)
                } else {
                    Err(LexerError::UnmatchedClose { line, col })
                }
            }
            c => {
                // Simplify the comment stream down to strings
                let mut comment = String::from(c);
                while let Some(&next) = self.chars.peek() {
                    if is_command(next) {
                        break;
                    }
                    comment.push(next);
                    self.consume_char();
                }

                Ok(TokenKind::Comment(comment))
            }
        }
    }

    fn consume_char(&mut self) -> Option<char> {
        match self.chars.next() {
            Some(c) => {
                self.cur_col += 1;
                if c == '\n' {
                    self.cur_line += 1;
                    self.cur_col = 1;
                }
                self.codepoint_offset += 1;
                Some(c)
            }
            None => None,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.consume_char();
        }
    }

    pub fn next_token(&mut self) -> Result<TokenKind, LexerError> {
        self.skip_whitespace();

        let (line, col) = (self.cur_line, self.cur_col);
        if let Some(c) = self.consume_char() {
            self.transform_to_type(c, line, col)
        } else if let Some(&(line, col)) = self.open_loops.last() {
            Err(LexerError::UnclosedLoop { line, col })
        } else {
            Ok(TokenKind::Eof)
        }
    }

    pub fn collect_results(&mut self) -> Result<Vec<TokenKind>, LexerError> {
        let mut v = vec![];
        loop {
            match self.next_token() {
                Ok(TokenKind::Eof) => return Ok(v),
                Err(e) => return Err(e),
                Ok(tok) => v.push(tok),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Lexer;
    use crate::lexer::{LexerError, TokenKind};

    fn lex(source: &str) -> Result<Vec<TokenKind>, LexerError> {
        Lexer::new(source).collect_results()
    }

    #[test]
    fn lexes_every_command() {
        assert_eq!(
            lex("><+-.,[]").unwrap(),
            vec![
                TokenKind::MoveRight,
                TokenKind::MoveLeft,
                TokenKind::Increment,
                TokenKind::Decrement,
                TokenKind::Write,
                TokenKind::Read,
                TokenKind::LoopStart,
                TokenKind::LoopEnd,
            ]
        );
    }

    #[test]
    fn coalesces_comment_runs() {
        assert_eq!(
            lex("abc+def").unwrap(),
            vec![
                TokenKind::Comment("abc".to_owned()),
                TokenKind::Increment,
                TokenKind::Comment("def".to_owned()),
            ]
        );
    }

    #[test]
    fn skips_whitespace_between_commands() {
        assert_eq!(
            lex("  +\n\t-").unwrap(),
            vec![TokenKind::Increment, TokenKind::Decrement]
        );
    }

    #[test]
    fn stray_close_is_an_error() {
        assert_eq!(lex("]"), Err(LexerError::UnmatchedClose { line: 1, col: 1 }));
        assert_eq!(lex("[]]"), Err(LexerError::UnmatchedClose { line: 1, col: 3 }));
    }

    #[test]
    fn unclosed_loop_is_an_error() {
        assert_eq!(lex("["), Err(LexerError::UnclosedLoop { line: 1, col: 1 }));
        assert_eq!(lex("+[->"), Err(LexerError::UnclosedLoop { line: 1, col: 2 }));
    }

    #[test]
    fn reports_the_outermost_unclosed_loop() {
        // the inner pair matches up, the first [ is the one left hanging
        assert_eq!(lex("[[]"), Err(LexerError::UnclosedLoop { line: 1, col: 1 }));
    }

    #[test]
    fn tracks_lines_across_newlines() {
        assert_eq!(
            lex("+\n+\n]"),
            Err(LexerError::UnmatchedClose { line: 3, col: 1 })
        );
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(lex("").unwrap(), vec![]);
    }
}
