//! Lexer module for the markup dialect
//!
//! This module converts raw text into a sequence of typed tokens, one
//! structural decision per source line, with explicit Indent/Dedent tokens.
//!
//! Indentation handling
//!
//! Indentation is turned into semantic Indent and Dedent tokens, which map
//! nicely to brace tokens for more standard syntaxes. The lexer keeps a stack
//! of indent widths (initialized to `[0]`): a wider line pushes and emits
//! Indent, a narrower line pops and emits one Dedent per popped entry. A
//! width that matches no remaining stack entry is tolerated silently; popping
//! just stops once the stack top no longer exceeds it.
//!
//! The lexer is total: any input tokenizes, degrading at worst to a sequence
//! of Paragraph tokens, and after end of input every remaining indent level
//! is closed with a Dedent before `Eof` is returned forever.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::Lexer;
pub use tokens::{Token, TokenKind};

/// Tokenize a whole source string, draining the lexer up to and including
/// the first `Eof`.
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token == Token::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
