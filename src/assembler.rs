//! # 6502 Assembler
//!
//! Turns assembly source into machine code the interpreter can run.
//!
//! Assembly takes two passes over the parsed lines. The first assigns an
//! address to every label and picks each instruction's opcode, which fixes
//! its size. The second resolves operand values and emits bytes. Forward
//! references to labels therefore work anywhere; they always assemble to the
//! absolute form, since their value is unknown when the size is chosen.
//!
//! ## Syntax
//!
//! - `label:` defines a label at the current address
//! - `NAME = value` defines a constant; constants below $100 that are defined
//!   before use select zero-page forms
//! - `.org addr` moves the current address, `.byte` and `.word` emit data
//!   (words little-endian) and accept labels
//! - numbers are `$hex`, `%binary` or decimal; `;` starts a comment
//! - mnemonics, labels and registers are case-insensitive
//!
//! ```
//! use em6502::assembler::assemble_at;
//! use em6502::CPU;
//!
//! let source = "
//!         LDX #$05
//! loop:   DEX
//!         BNE loop
//!         STX $10
//! ";
//! let output = assemble_at(source, 0x0600).unwrap();
//! assert_eq!(output.bytes(), vec![0xA2, 0x05, 0xCA, 0xD0, 0xFD, 0x86, 0x10]);
//!
//! let mut cpu = CPU::default();
//! output.load_into(&mut cpu);
//! cpu.run(Some(12)).unwrap();
//! assert_eq!(cpu.x(), 0);
//! ```

pub mod encoder;
pub mod lexer;
pub mod parser;
pub mod symbol_table;

use std::fmt;

use log::debug;

use crate::{MemoryBus, CPU, OPCODE_TABLE};
use lexer::LexerError;
use parser::{AssemblyLine, Statement, Value};
use symbol_table::SymbolTable;

/// Longest accepted label or constant name
pub const MAX_LABEL_LEN: usize = 32;

/// Complete output from assembling source code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerOutput {
    /// Contiguous runs of bytes in address order of emission
    pub segments: Vec<Segment>,

    /// Every label and constant, in definition order
    pub symbol_table: Vec<Symbol>,
}

/// A run of bytes that starts at `address`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub address: u16,
    pub bytes: Vec<u8>,
}

impl Segment {
    fn end(&self) -> u32 {
        self.address as u32 + self.bytes.len() as u32
    }
}

impl AssemblerOutput {
    /// All emitted bytes, segments concatenated in emission order.
    pub fn bytes(&self) -> Vec<u8> {
        self.segments
            .iter()
            .flat_map(|s| s.bytes.iter().copied())
            .collect()
    }

    /// Address of the first emitted byte.
    pub fn origin(&self) -> Option<u16> {
        self.segments.first().map(|s| s.address)
    }

    /// Value of a label or constant. Names are case-insensitive.
    pub fn lookup_symbol_addr(&self, name: &str) -> Option<u16> {
        let name = name.to_uppercase();
        self.symbol_table
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.value)
    }

    /// Copy every segment into the CPU's memory and point PC at the first
    /// one. Other registers are untouched.
    pub fn load_into<M: MemoryBus>(&self, cpu: &mut CPU<M>) {
        for segment in &self.segments {
            cpu.load_program(&segment.bytes, segment.address);
        }
        if let Some(origin) = self.origin() {
            cpu.set_pc(origin);
        }
    }
}

/// What a symbol names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// `name:`, an address in the program
    Label,
    /// `NAME = value`
    Constant,
}

/// A symbol table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Upper-cased name
    pub name: String,

    pub kind: SymbolKind,

    /// Address for labels, assigned value for constants
    pub value: u16,

    /// Source line of the definition
    pub defined_at: usize,
}

/// An error encountered during assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerError {
    pub error_type: ErrorType,

    /// Line number where the error occurred (1-indexed)
    pub line: usize,

    /// Column where the offending token starts (0-indexed)
    pub column: usize,

    pub message: String,
}

impl fmt::Display for AssemblerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}:{}: {}", self.line, self.column + 1, self.message)
    }
}

impl std::error::Error for AssemblerError {}

impl From<LexerError> for AssemblerError {
    fn from(err: LexerError) -> Self {
        let (line, column) = err.location();
        AssemblerError {
            error_type: ErrorType::SyntaxError,
            line,
            column,
            message: err.to_string(),
        }
    }
}

/// Classification of assembly errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Invalid token or line shape
    SyntaxError,

    /// Reference to a label or constant that is never defined
    UndefinedLabel,

    /// Second definition of a name
    DuplicateLabel,

    /// Label name breaks the naming rules
    InvalidLabel,

    /// Not a documented 6502 mnemonic
    InvalidMnemonic,

    /// Operand form the instruction does not have
    InvalidOperand,

    /// Value or branch distance out of range, or code past $FFFF
    RangeError,

    /// Unknown directive or bad directive arguments
    InvalidDirective,
}

/// Assembler directives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblerDirective {
    /// `.org $XXXX`
    Origin { address: u16 },

    /// `.byte $XX, label, ...`
    Byte { values: Vec<Value> },

    /// `.word $XXXX, label, ...`
    Word { values: Vec<Value> },
}

/// Assemble source with the location counter starting at $0000.
pub fn assemble(source: &str) -> Result<AssemblerOutput, Vec<AssemblerError>> {
    assemble_at(source, 0x0000)
}

/// Assemble source with the location counter starting at `origin`.
///
/// `.org` lines still move it. Every error found is returned, sorted by
/// line.
pub fn assemble_at(source: &str, origin: u16) -> Result<AssemblerOutput, Vec<AssemblerError>> {
    let tokens = lexer::tokenize(source)
        .map_err(|errs| errs.into_iter().map(AssemblerError::from).collect::<Vec<_>>())?;

    let (lines, mut errors) = parser::parse(&tokens);
    let (symbols, placements) = layout(&lines, origin, &mut errors);
    let segments = emit(&placements, &symbols, &mut errors);

    if !errors.is_empty() {
        errors.sort_by_key(|e| (e.line, e.column));
        return Err(errors);
    }

    let output = AssemblerOutput {
        segments,
        symbol_table: symbols.into_symbols(),
    };
    debug!(
        "Assembled {} bytes in {} segment(s), {} symbol(s)",
        output.segments.iter().map(|s| s.bytes.len()).sum::<usize>(),
        output.segments.len(),
        output.symbol_table.len()
    );
    Ok(output)
}

/// A line that emits bytes, with its address and chosen opcode.
struct Placement<'a> {
    address: u16,
    line: &'a AssemblyLine,
    opcode: Option<u8>,
}

fn line_error(line: &AssemblyLine, error_type: ErrorType, message: String) -> AssemblerError {
    AssemblerError {
        error_type,
        line: line.line_number,
        column: line.column,
        message,
    }
}

fn define(
    symbols: &mut SymbolTable,
    errors: &mut Vec<AssemblerError>,
    line: &AssemblyLine,
    name: &str,
    kind: SymbolKind,
    value: u16,
) {
    if let Err(earlier) = symbols.add_symbol(name.to_string(), kind, value, line.line_number) {
        errors.push(line_error(
            line,
            ErrorType::DuplicateLabel,
            format!("{} already defined on line {}", name, earlier.defined_at),
        ));
    }
}

/// Pass one: define symbols, choose opcodes, assign addresses.
fn layout<'a>(
    lines: &'a [AssemblyLine],
    origin: u16,
    errors: &mut Vec<AssemblerError>,
) -> (SymbolTable, Vec<Placement<'a>>) {
    let mut symbols = SymbolTable::new();
    let mut placements = Vec::new();
    let mut pc = origin as u32;

    for line in lines {
        if let Some(label) = &line.label {
            match u16::try_from(pc) {
                Ok(address) => define(&mut symbols, errors, line, label, SymbolKind::Label, address),
                Err(_) => errors.push(line_error(
                    line,
                    ErrorType::RangeError,
                    format!("label {} is past $FFFF", label),
                )),
            }
        }

        let (size, opcode) = match &line.statement {
            None => continue,
            Some(Statement::Constant { name, value }) => {
                define(&mut symbols, errors, line, name, SymbolKind::Constant, *value);
                continue;
            }
            Some(Statement::Directive(AssemblerDirective::Origin { address })) => {
                pc = *address as u32;
                continue;
            }
            Some(Statement::Directive(AssemblerDirective::Byte { values })) => (values.len(), None),
            Some(Statement::Directive(AssemblerDirective::Word { values })) => {
                (values.len() * 2, None)
            }
            Some(Statement::Instruction { mnemonic, operand }) => {
                let zero_page = operand
                    .value()
                    .is_some_and(|value| fits_zero_page(value, &symbols));
                match encoder::select_opcode(*mnemonic, operand, zero_page) {
                    Ok(opcode) => (OPCODE_TABLE[opcode as usize].size_bytes as usize, Some(opcode)),
                    Err(message) => {
                        errors.push(line_error(line, ErrorType::InvalidOperand, message));
                        continue;
                    }
                }
            }
        };

        if pc + size as u32 > 0x10000 {
            errors.push(line_error(
                line,
                ErrorType::RangeError,
                "code runs past $FFFF".to_string(),
            ));
            break;
        }
        placements.push(Placement {
            address: pc as u16,
            line,
            opcode,
        });
        pc += size as u32;
    }

    (symbols, placements)
}

/// Literals below $100 and constants defined so far below $100. Labels never
/// qualify, so an instruction's size does not depend on where labels land.
fn fits_zero_page(value: &Value, symbols: &SymbolTable) -> bool {
    match value {
        Value::Number(n) => *n <= 0xFF,
        Value::Symbol(name) => symbols
            .lookup_symbol(name)
            .is_some_and(|s| s.kind == SymbolKind::Constant && s.value <= 0xFF),
    }
}

fn resolve(value: &Value, symbols: &SymbolTable, line: &AssemblyLine) -> Result<u16, AssemblerError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Symbol(name) => symbols.lookup_symbol(name).map(|s| s.value).ok_or_else(|| {
            line_error(line, ErrorType::UndefinedLabel, format!("undefined label {}", name))
        }),
    }
}

/// Bytes for one placed line.
fn encode_line(
    placement: &Placement,
    symbols: &SymbolTable,
) -> Result<Vec<u8>, AssemblerError> {
    let line = placement.line;
    let range_error = |message: String| line_error(line, ErrorType::RangeError, message);

    match (&line.statement, placement.opcode) {
        (Some(Statement::Instruction { operand, .. }), Some(opcode)) => {
            let value = match operand.value() {
                Some(value) => resolve(value, symbols, line)?,
                None => 0,
            };
            encoder::encode(opcode, value, placement.address).map_err(|e| range_error(e.to_string()))
        }
        (Some(Statement::Directive(AssemblerDirective::Byte { values })), _) => values
            .iter()
            .map(|v| {
                let value = resolve(v, symbols, line)?;
                u8::try_from(value)
                    .map_err(|_| range_error(format!(".BYTE value ${:04X} does not fit in one byte", value)))
            })
            .collect(),
        (Some(Statement::Directive(AssemblerDirective::Word { values })), _) => {
            let mut bytes = Vec::with_capacity(values.len() * 2);
            for v in values {
                bytes.extend_from_slice(&resolve(v, symbols, line)?.to_le_bytes());
            }
            Ok(bytes)
        }
        _ => Ok(Vec::new()),
    }
}

/// Pass two: resolve operands and gather bytes into contiguous segments.
fn emit(
    placements: &[Placement],
    symbols: &SymbolTable,
    errors: &mut Vec<AssemblerError>,
) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();

    for placement in placements {
        let bytes = match encode_line(placement, symbols) {
            Ok(bytes) => bytes,
            Err(err) => {
                errors.push(err);
                continue;
            }
        };

        match segments.last_mut() {
            Some(segment) if segment.end() == placement.address as u32 => {
                segment.bytes.extend(bytes)
            }
            _ => segments.push(Segment {
                address: placement.address,
                bytes,
            }),
        }
    }

    segments
}

/// Check a label or constant name.
///
/// Names start with a letter or underscore, continue with letters, digits
/// and underscores, and are at most [`MAX_LABEL_LEN`] long. The register
/// names A, X and Y are reserved.
pub(crate) fn validate_label(name: &str) -> Result<(), String> {
    let Some(first) = name.chars().next() else {
        return Err("label name cannot be empty".to_string());
    };

    if name.len() > MAX_LABEL_LEN {
        return Err(format!(
            "label name too long (max {} characters): {}",
            MAX_LABEL_LEN, name
        ));
    }
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(format!("label must start with a letter, not '{}'", first));
    }
    if let Some(ch) = name.chars().find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '_')) {
        return Err(format!("label contains invalid character '{}'", ch));
    }
    if matches!(name.to_ascii_uppercase().as_str(), "A" | "X" | "Y") {
        return Err(format!("{} is a register name", name));
    }

    Ok(())
}
