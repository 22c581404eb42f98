//! Lexical analysis for 6502 assembly source
//!
//! Turns source text into a flat list of [`Token`]s, one [`TokenType::Newline`]
//! per line break, ending in [`TokenType::Eof`]. Numbers are parsed here
//! (`$42`, `%1010`, `66`) and identifiers are upper-cased, so mnemonics and
//! labels are case-insensitive. Spaces and tabs separate tokens and are not
//! emitted.
//!
//! ```
//! use em6502::assembler::lexer::{tokenize, TokenType};
//!
//! let tokens = tokenize("lda #$42 ; load").unwrap();
//!
//! assert_eq!(tokens[0].token_type, TokenType::Identifier("LDA".to_string()));
//! assert_eq!(tokens[1].token_type, TokenType::Hash);
//! assert_eq!(tokens[2].token_type, TokenType::Number(0x42));
//! assert_eq!(tokens[3].token_type, TokenType::Comment(" load".to_string()));
//! assert_eq!(tokens[4].token_type, TokenType::Eof);
//! ```

use std::fmt;

/// Classification of lexical tokens in 6502 assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenType {
    /// Mnemonics, labels, directive names, register names (upper-cased)
    Identifier(String),

    /// Numeric literal, already parsed from hex, binary or decimal
    Number(u16),

    /// `:` after a label definition
    Colon,
    /// `,` between operands and before an index register
    Comma,
    /// `#` immediate prefix
    Hash,
    /// `=` constant assignment
    Equal,
    /// `(` indirect open
    LParen,
    /// `)` indirect close
    RParen,
    /// `.` directive prefix
    Dot,

    /// Text after `;`, without the `;`
    Comment(String),
    /// Line break (LF or CRLF)
    Newline,
    /// End of input
    Eof,
}

/// A single lexical token with its source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,

    /// Source line (1-indexed)
    pub line: usize,

    /// Column within the line (0-indexed, in bytes)
    pub column: usize,
}

/// Errors found while tokenizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    /// A character that cannot start any token
    UnexpectedCharacter { ch: char, line: usize, column: usize },

    /// A letter other than A-F after `$`
    InvalidHexDigit { ch: char, line: usize, column: usize },

    /// A digit other than 0 or 1 after `%`
    InvalidBinaryDigit { ch: char, line: usize, column: usize },

    /// `$` or `%` with no digits after it
    MissingDigits { prefix: char, line: usize, column: usize },

    /// A literal that does not fit in 16 bits
    NumberTooLarge { text: String, line: usize, column: usize },
}

impl LexerError {
    /// Source position as (line, column).
    pub fn location(&self) -> (usize, usize) {
        match *self {
            LexerError::UnexpectedCharacter { line, column, .. }
            | LexerError::InvalidHexDigit { line, column, .. }
            | LexerError::InvalidBinaryDigit { line, column, .. }
            | LexerError::MissingDigits { line, column, .. }
            | LexerError::NumberTooLarge { line, column, .. } => (line, column),
        }
    }
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LexerError::UnexpectedCharacter { ch, .. } => {
                write!(f, "unexpected character '{}'", ch)
            }
            LexerError::InvalidHexDigit { ch, .. } => write!(f, "invalid hex digit '{}'", ch),
            LexerError::InvalidBinaryDigit { ch, .. } => {
                write!(f, "invalid binary digit '{}'", ch)
            }
            LexerError::MissingDigits { prefix, .. } => {
                write!(f, "expected digits after '{}'", prefix)
            }
            LexerError::NumberTooLarge { text, .. } => {
                write!(f, "number {} does not fit in 16 bits", text)
            }
        }
    }
}

impl std::error::Error for LexerError {}

struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: usize,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Lexer {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
            line_start: 0,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    fn advance(&mut self) {
        self.chars.next();
    }

    fn column(&mut self) -> usize {
        let pos = match self.chars.peek() {
            Some(&(pos, _)) => pos,
            None => self.source.len(),
        };
        pos - self.line_start
    }

    fn token(&self, token_type: TokenType, column: usize) -> Token {
        Token {
            token_type,
            line: self.line,
            column,
        }
    }

    /// Collect characters while `accept` holds.
    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if !accept(ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text
    }

    /// Digits after a `$` or `%` prefix. Any other alphanumeric is an error.
    fn scan_prefixed(&mut self, prefix: char, radix: u32, start_col: usize) -> Result<Token, LexerError> {
        self.advance();
        let digits = self.take_while(|ch| ch.is_digit(radix));

        if let Some(ch) = self.peek().filter(|ch| ch.is_ascii_alphanumeric()) {
            let (line, column) = (self.line, self.column());
            return Err(if radix == 16 {
                LexerError::InvalidHexDigit { ch, line, column }
            } else {
                LexerError::InvalidBinaryDigit { ch, line, column }
            });
        }
        if digits.is_empty() {
            return Err(LexerError::MissingDigits {
                prefix,
                line: self.line,
                column: start_col,
            });
        }

        let value = u16::from_str_radix(&digits, radix).map_err(|_| LexerError::NumberTooLarge {
            text: format!("{}{}", prefix, digits),
            line: self.line,
            column: start_col,
        })?;
        Ok(self.token(TokenType::Number(value), start_col))
    }

    fn scan_decimal(&mut self, start_col: usize) -> Result<Token, LexerError> {
        let digits = self.take_while(|ch| ch.is_ascii_digit());
        let value = digits.parse::<u16>().map_err(|_| LexerError::NumberTooLarge {
            text: digits.clone(),
            line: self.line,
            column: start_col,
        })?;
        Ok(self.token(TokenType::Number(value), start_col))
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexerError> {
        self.take_while(|ch| ch == ' ' || ch == '\t');

        let Some(ch) = self.peek() else {
            return Ok(None);
        };
        let start_col = self.column();

        let punctuation = match ch {
            ':' => Some(TokenType::Colon),
            ',' => Some(TokenType::Comma),
            '#' => Some(TokenType::Hash),
            '=' => Some(TokenType::Equal),
            '(' => Some(TokenType::LParen),
            ')' => Some(TokenType::RParen),
            '.' => Some(TokenType::Dot),
            _ => None,
        };
        if let Some(token_type) = punctuation {
            self.advance();
            return Ok(Some(self.token(token_type, start_col)));
        }

        match ch {
            '\n' | '\r' => {
                self.advance();
                if ch == '\r' && self.peek() == Some('\n') {
                    self.advance();
                }
                let token = self.token(TokenType::Newline, start_col);
                self.line += 1;
                self.line_start = match self.chars.peek() {
                    Some(&(pos, _)) => pos,
                    None => self.source.len(),
                };
                Ok(Some(token))
            }
            ';' => {
                self.advance();
                let text = self.take_while(|ch| ch != '\n' && ch != '\r');
                Ok(Some(self.token(TokenType::Comment(text), start_col)))
            }
            '$' => self.scan_prefixed('$', 16, start_col).map(Some),
            '%' => self.scan_prefixed('%', 2, start_col).map(Some),
            '0'..='9' => self.scan_decimal(start_col).map(Some),
            'a'..='z' | 'A'..='Z' | '_' => {
                let name = self.take_while(|ch| ch.is_ascii_alphanumeric() || ch == '_');
                Ok(Some(self.token(TokenType::Identifier(name.to_uppercase()), start_col)))
            }
            _ => Err(LexerError::UnexpectedCharacter {
                ch,
                line: self.line,
                column: start_col,
            }),
        }
    }

    /// Skip the rest of a bad token so lexing can resume.
    fn recover(&mut self) {
        while let Some(ch) = self.peek() {
            if matches!(ch, ' ' | '\t' | '\n' | '\r' | ';' | ',') {
                break;
            }
            self.advance();
        }
    }
}

/// Tokenize assembly source.
///
/// Errors do not stop the scan: every lexical error in the source is
/// collected and returned together.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Vec<LexerError>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    loop {
        match lexer.next_token() {
            Ok(Some(token)) => tokens.push(token),
            Ok(None) => {
                let column = lexer.column();
                tokens.push(lexer.token(TokenType::Eof, column));
                break;
            }
            Err(err) => {
                errors.push(err);
                lexer.recover();
            }
        }
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}
