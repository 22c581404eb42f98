//! Symbol table for labels and constants

use crate::assembler::{Symbol, SymbolKind};

/// Symbols defined so far, in definition order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol.
    ///
    /// Returns the earlier definition if `name` is already taken. The table
    /// is left unchanged in that case.
    pub fn add_symbol(
        &mut self,
        name: String,
        kind: SymbolKind,
        value: u16,
        defined_at: usize,
    ) -> Result<(), Symbol> {
        if let Some(existing) = self.lookup_symbol(&name) {
            return Err(existing.clone());
        }

        self.symbols.push(Symbol {
            name,
            kind,
            value,
            defined_at,
        });
        Ok(())
    }

    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}
