//! Assembly source parser
//!
//! Groups tokens into lines and gives each line its shape: an optional label,
//! then one instruction, directive or constant. Operand syntax picks the
//! operand form; the exact addressing mode is settled later, once symbol
//! values are known.

use crate::assembler::lexer::{Token, TokenType};
use crate::assembler::{validate_label, AssemblerDirective, AssemblerError, ErrorType};
use crate::{Mnemonic, OPCODE_TABLE};

/// An operand value: a literal or a reference to a label or constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Number(u16),
    Symbol(String),
}

/// Operand forms as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Nothing after the mnemonic
    None,
    /// `A`
    Accumulator,
    /// `#value`
    Immediate(Value),
    /// `value`: zero page, absolute or a branch target
    Direct(Value),
    /// `value,X`
    IndexedX(Value),
    /// `value,Y`
    IndexedY(Value),
    /// `(value)`
    Indirect(Value),
    /// `(value,X)`
    IndirectX(Value),
    /// `(value),Y`
    IndirectY(Value),
}

impl Operand {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Operand::None | Operand::Accumulator => None,
            Operand::Immediate(v)
            | Operand::Direct(v)
            | Operand::IndexedX(v)
            | Operand::IndexedY(v)
            | Operand::Indirect(v)
            | Operand::IndirectX(v)
            | Operand::IndirectY(v) => Some(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Instruction { mnemonic: Mnemonic, operand: Operand },
    Directive(AssemblerDirective),
    /// `NAME = value`
    Constant { name: String, value: u16 },
}

/// A parsed line of assembly source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyLine {
    /// Line number in source (1-indexed)
    pub line_number: usize,

    /// Column where the statement (or label) starts
    pub column: usize,

    /// Label defined on this line, without the colon
    pub label: Option<String>,

    pub statement: Option<Statement>,
}

/// Look up a mnemonic by its upper-case spelling.
pub fn parse_mnemonic(name: &str) -> Option<Mnemonic> {
    OPCODE_TABLE
        .iter()
        .map(|m| m.mnemonic)
        .find(|m| *m != Mnemonic::Illegal && m.as_str() == name)
}

/// Parse every line of a token stream.
///
/// Comments and blank lines are dropped. Lines with errors are skipped and
/// their errors collected, so one pass reports every bad line.
pub fn parse(tokens: &[Token]) -> (Vec<AssemblyLine>, Vec<AssemblerError>) {
    let mut lines = Vec::new();
    let mut errors = Vec::new();

    let significant: Vec<&Token> = tokens
        .iter()
        .filter(|t| !matches!(t.token_type, TokenType::Comment(_)))
        .collect();

    for line in significant.split(|t| matches!(t.token_type, TokenType::Newline | TokenType::Eof)) {
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(parsed) => lines.push(parsed),
            Err(err) => errors.push(err),
        }
    }

    (lines, errors)
}

fn error_at(token: &Token, error_type: ErrorType, message: String) -> AssemblerError {
    AssemblerError {
        error_type,
        line: token.line,
        column: token.column,
        message,
    }
}

fn parse_line(tokens: &[&Token]) -> Result<AssemblyLine, AssemblerError> {
    let first = tokens[0];
    let kinds: Vec<TokenType> = tokens.iter().map(|t| t.token_type.clone()).collect();

    let mut line = AssemblyLine {
        line_number: first.line,
        column: first.column,
        label: None,
        statement: None,
    };

    if let [TokenType::Identifier(name), TokenType::Equal, rest @ ..] = kinds.as_slice() {
        validate_label(name).map_err(|msg| error_at(first, ErrorType::InvalidLabel, msg))?;
        let value = match rest {
            [TokenType::Number(n)] => *n,
            _ => {
                return Err(error_at(
                    tokens[1],
                    ErrorType::SyntaxError,
                    format!("constant {} needs a single numeric value", name),
                ))
            }
        };
        line.statement = Some(Statement::Constant {
            name: name.clone(),
            value,
        });
        return Ok(line);
    }

    let mut start = 0;
    if let [TokenType::Identifier(name), TokenType::Colon, ..] = kinds.as_slice() {
        validate_label(name).map_err(|msg| error_at(first, ErrorType::InvalidLabel, msg))?;
        line.label = Some(name.clone());
        start = 2;
    }

    let (head, rest) = (&tokens[start..], &kinds[start..]);
    line.statement = match rest {
        [] => None,
        [TokenType::Dot, TokenType::Identifier(name), args @ ..] => {
            Some(Statement::Directive(parse_directive(name, args, head[1])?))
        }
        [TokenType::Identifier(name), args @ ..] => {
            let mnemonic = parse_mnemonic(name).ok_or_else(|| {
                error_at(head[0], ErrorType::InvalidMnemonic, format!("unknown mnemonic {}", name))
            })?;
            let operand = parse_operand(args, head[0])?;
            line.column = head[0].column;
            Some(Statement::Instruction { mnemonic, operand })
        }
        _ => {
            return Err(error_at(
                head[0],
                ErrorType::SyntaxError,
                "expected a label, mnemonic or directive".to_string(),
            ))
        }
    };

    Ok(line)
}

fn value_of(kind: &TokenType) -> Option<Value> {
    match kind {
        TokenType::Number(n) => Some(Value::Number(*n)),
        TokenType::Identifier(name) => Some(Value::Symbol(name.clone())),
        _ => None,
    }
}

fn parse_operand(args: &[TokenType], at: &Token) -> Result<Operand, AssemblerError> {
    use TokenType::{Comma, Hash, Identifier, LParen, RParen};

    let invalid = || error_at(at, ErrorType::InvalidOperand, "unrecognized operand".to_string());
    let value = |kind: &TokenType| value_of(kind).ok_or_else(&invalid);

    let operand = match args {
        [] => Operand::None,
        [Identifier(r)] if r == "A" => Operand::Accumulator,
        [Hash, v] => Operand::Immediate(value(v)?),
        [v] => Operand::Direct(value(v)?),
        [v, Comma, Identifier(r)] if r == "X" => Operand::IndexedX(value(v)?),
        [v, Comma, Identifier(r)] if r == "Y" => Operand::IndexedY(value(v)?),
        [LParen, v, RParen] => Operand::Indirect(value(v)?),
        [LParen, v, Comma, Identifier(r), RParen] if r == "X" => Operand::IndirectX(value(v)?),
        [LParen, v, RParen, Comma, Identifier(r)] if r == "Y" => Operand::IndirectY(value(v)?),
        _ => return Err(invalid()),
    };
    Ok(operand)
}

fn parse_directive(
    name: &str,
    args: &[TokenType],
    at: &Token,
) -> Result<AssemblerDirective, AssemblerError> {
    let invalid = |message: String| error_at(at, ErrorType::InvalidDirective, message);

    match name {
        "ORG" => match args {
            [TokenType::Number(address)] => Ok(AssemblerDirective::Origin { address: *address }),
            _ => Err(invalid(".ORG takes one numeric address".to_string())),
        },
        "BYTE" | "WORD" => {
            let values = args
                .split(|k| *k == TokenType::Comma)
                .map(|item| match item {
                    [kind] => value_of(kind),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| invalid(format!(".{} takes a comma-separated list of values", name)))?;

            Ok(if name == "BYTE" {
                AssemblerDirective::Byte { values }
            } else {
                AssemblerDirective::Word { values }
            })
        }
        _ => Err(invalid(format!("unknown directive .{}", name))),
    }
}
