//! Symbol alphabet, reel strips and reel sets

use std::fmt;

use serde::Serialize;

use crate::error::{SlotMathError, SlotMathResult};

/// Number of reel columns
pub const REELS: usize = 5;
/// Number of visible rows per reel
pub const ROWS: usize = 3;
/// Size of the closed symbol alphabet (10 paying + Wild + Scatter)
pub const ALPHABET_SIZE: usize = 12;

const SYMBOL_NAMES: [&str; ALPHABET_SIZE] = [
    "H1", "H2", "H3", "H4", "L1", "L2", "L3", "L4", "L5", "L6", "WILD", "SCATTER",
];

/// Symbol type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum SymbolKind {
    /// Ordinary paying symbol
    Regular = 0,
    /// Wild - substitutes in line evaluation
    Wild = 1,
    /// Scatter - pays anywhere, triggers free games
    Scatter = 2,
}

/// A symbol of the game alphabet.
///
/// The wrapped id is the pay-table row. Ids `0..=9` are paying symbols
/// ordered from the top payer down, `10` is Wild and `11` is Scatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Symbol(u8);

impl Symbol {
    pub const H1: Symbol = Symbol(0);
    pub const H2: Symbol = Symbol(1);
    pub const H3: Symbol = Symbol(2);
    pub const H4: Symbol = Symbol(3);
    pub const L1: Symbol = Symbol(4);
    pub const L2: Symbol = Symbol(5);
    pub const L3: Symbol = Symbol(6);
    pub const L4: Symbol = Symbol(7);
    pub const L5: Symbol = Symbol(8);
    pub const L6: Symbol = Symbol(9);
    pub const WILD: Symbol = Symbol(10);
    pub const SCATTER: Symbol = Symbol(11);

    /// Look up a symbol by id
    pub fn from_id(id: u8) -> SlotMathResult<Self> {
        if (id as usize) < ALPHABET_SIZE {
            Ok(Symbol(id))
        } else {
            Err(SlotMathError::UnknownSymbol(id))
        }
    }

    /// Raw id
    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Pay-table row index
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn kind(self) -> SymbolKind {
        match self {
            Symbol::WILD => SymbolKind::Wild,
            Symbol::SCATTER => SymbolKind::Scatter,
            _ => SymbolKind::Regular,
        }
    }

    #[inline]
    pub fn is_wild(self) -> bool {
        self == Symbol::WILD
    }

    #[inline]
    pub fn is_scatter(self) -> bool {
        self == Symbol::SCATTER
    }

    #[inline]
    pub fn is_regular(self) -> bool {
        self.kind() == SymbolKind::Regular
    }

    /// Display name (e.g. "H1", "L6", "WILD")
    pub fn name(self) -> &'static str {
        SYMBOL_NAMES[self.index()]
    }

    /// All symbols in id order
    pub fn all() -> impl Iterator<Item = Symbol> {
        (0..ALPHABET_SIZE as u8).map(Symbol)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A cyclic reel strip of paying symbols
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReelStrip {
    /// Reel index
    reel_index: u8,
    /// Symbols in strip order
    symbols: Vec<Symbol>,
}

impl ReelStrip {
    /// Build a strip from raw symbol ids.
    ///
    /// Fails on an empty strip, an id outside the alphabet, or a Wild or
    /// Scatter: those are only ever inserted by the screen generator.
    pub fn from_ids(reel_index: usize, ids: &[u8]) -> SlotMathResult<Self> {
        if ids.is_empty() {
            return Err(SlotMathError::EmptyStrip { reel: reel_index });
        }
        let mut symbols = Vec::with_capacity(ids.len());
        for (position, &id) in ids.iter().enumerate() {
            let symbol = Symbol::from_id(id)?;
            if !symbol.is_regular() {
                return Err(SlotMathError::SpecialOnStrip {
                    reel: reel_index,
                    position,
                    symbol: id,
                });
            }
            symbols.push(symbol);
        }
        Ok(Self {
            reel_index: reel_index as u8,
            symbols,
        })
    }

    /// Get symbol at position (wraps around)
    #[inline]
    pub fn symbol_at(&self, position: usize) -> Symbol {
        self.symbols[position % self.symbols.len()]
    }

    pub fn reel_index(&self) -> usize {
        self.reel_index as usize
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Get total strip length
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed strip
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Occurrences of `symbol` on the strip
    pub fn count(&self, symbol: Symbol) -> usize {
        self.symbols.iter().filter(|&&s| s == symbol).count()
    }
}

/// One strip per reel column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReelSet {
    name: String,
    strips: Vec<ReelStrip>,
}

impl ReelSet {
    /// Build a reel set from raw strips, exactly one per column
    pub fn new(name: impl Into<String>, strips: &[&[u8]]) -> SlotMathResult<Self> {
        let name = name.into();
        if strips.len() != REELS {
            return Err(SlotMathError::ReelCount {
                name,
                expected: REELS,
                actual: strips.len(),
            });
        }
        let strips = strips
            .iter()
            .enumerate()
            .map(|(reel, ids)| ReelStrip::from_ids(reel, ids))
            .collect::<SlotMathResult<Vec<_>>>()?;
        Ok(Self { name, strips })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn strip(&self, reel: usize) -> &ReelStrip {
        &self.strips[reel]
    }

    pub fn strips(&self) -> &[ReelStrip] {
        &self.strips
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_classification() {
        assert_eq!(Symbol::WILD.kind(), SymbolKind::Wild);
        assert_eq!(Symbol::SCATTER.kind(), SymbolKind::Scatter);
        assert!(Symbol::H1.is_regular());
        assert!(Symbol::L6.is_regular());
        assert_eq!(Symbol::all().filter(|s| s.is_regular()).count(), 10);
    }

    #[test]
    fn test_symbol_ids_preserved() {
        assert_eq!(Symbol::H1.id(), 0);
        assert_eq!(Symbol::L6.id(), 9);
        assert_eq!(Symbol::WILD.index(), 10);
        assert_eq!(Symbol::from_id(11), Ok(Symbol::SCATTER));
        assert_eq!(Symbol::from_id(12), Err(SlotMathError::UnknownSymbol(12)));
    }

    #[test]
    fn test_symbol_names() {
        assert_eq!(Symbol::H1.to_string(), "H1");
        assert_eq!(Symbol::L1.name(), "L1");
        assert_eq!(Symbol::SCATTER.name(), "SCATTER");
    }

    #[test]
    fn test_strip_wraps() {
        let strip = ReelStrip::from_ids(0, &[3, 1, 4]).unwrap();
        assert_eq!(strip.symbol_at(0), Symbol::H4);
        assert_eq!(strip.symbol_at(3), Symbol::H4);
        assert_eq!(strip.symbol_at(5), Symbol::L1);
        assert_eq!(strip.len(), 3);
    }

    #[test]
    fn test_strip_rejects_specials() {
        let err = ReelStrip::from_ids(2, &[1, 2, 10]).unwrap_err();
        assert_eq!(
            err,
            SlotMathError::SpecialOnStrip {
                reel: 2,
                position: 2,
                symbol: 10
            }
        );
        assert!(matches!(
            ReelStrip::from_ids(0, &[]),
            Err(SlotMathError::EmptyStrip { reel: 0 })
        ));
        assert!(matches!(
            ReelStrip::from_ids(0, &[0, 42]),
            Err(SlotMathError::UnknownSymbol(42))
        ));
    }

    #[test]
    fn test_reel_set_width() {
        let strip: &[u8] = &[0, 1, 2];
        assert!(ReelSet::new("ok", &[strip; REELS]).is_ok());
        let err = ReelSet::new("short", &[strip; 4]).unwrap_err();
        assert!(matches!(err, SlotMathError::ReelCount { actual: 4, .. }));
    }
}
