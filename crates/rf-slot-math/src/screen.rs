//! Screen generation: reel stops plus weighted Wild/Scatter overlays

use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::error::{SlotMathError, SlotMathResult};
use crate::symbols::{REELS, ROWS, ReelSet, Symbol};
use crate::weights::{WeightTable, pick_weighted};

/// Number of cells in the visible window
pub const CELLS: usize = REELS * ROWS;

// ═══════════════════════════════════════════════════════════════════════════════
// SPECIAL SYMBOL PLACEMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// How many special symbols of one kind land on a screen, and on which reels.
///
/// `count_weights[n]` is the weight of placing exactly `n` symbols.
/// `column_weights[reel]` biases the reel choice; a reel that received
/// a symbol is excluded from further draws in the same spin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialPlacement {
    pub count_weights: WeightTable,
    pub column_weights: [u32; REELS],
}

impl SpecialPlacement {
    pub fn new(count_weights: &[u32], column_weights: [u32; REELS]) -> Self {
        Self {
            count_weights: WeightTable::new(count_weights),
            column_weights,
        }
    }

    /// Placement that never inserts anything
    pub fn none() -> Self {
        Self::new(&[1], [0; REELS])
    }

    /// Count table may not ask for more symbols than there are reels
    pub fn validate(&self, name: &str) -> SlotMathResult<()> {
        let len = self.count_weights.len();
        if len == 0 || len > REELS + 1 {
            return Err(SlotMathError::WeightLength {
                name: name.to_string(),
                expected: format!("1..={}", REELS + 1),
                actual: len,
            });
        }
        Ok(())
    }

    /// Expected number of symbols placed per spin
    pub fn expected_count(&self) -> f64 {
        self.count_weights.mean()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCREEN
// ═══════════════════════════════════════════════════════════════════════════════

/// The 5×3 visible window, stored column-major (`ROWS * reel + row`),
/// together with the stop offsets that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Screen {
    cells: [Symbol; CELLS],
    stops: [usize; REELS],
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            cells: [Symbol::H1; CELLS],
            stops: [0; REELS],
        }
    }
}

impl Screen {
    /// Build a screen from explicit columns (top row first)
    pub fn from_columns(columns: [[Symbol; ROWS]; REELS]) -> Self {
        let mut screen = Self::default();
        for (reel, column) in columns.iter().enumerate() {
            for (row, &symbol) in column.iter().enumerate() {
                screen.set(reel, row, symbol);
            }
        }
        screen
    }

    #[inline]
    pub const fn cell_index(reel: usize, row: usize) -> usize {
        ROWS * reel + row
    }

    #[inline]
    pub fn get(&self, reel: usize, row: usize) -> Symbol {
        self.cells[Self::cell_index(reel, row)]
    }

    #[inline]
    pub fn set(&mut self, reel: usize, row: usize, symbol: Symbol) {
        self.cells[Self::cell_index(reel, row)] = symbol;
    }

    pub fn cells(&self) -> &[Symbol; CELLS] {
        &self.cells
    }

    /// Stop offsets of the last spin
    pub fn stops(&self) -> [usize; REELS] {
        self.stops
    }

    /// Occurrences of `symbol` anywhere on screen
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells.iter().filter(|&&s| s == symbol).count()
    }

    /// Fill the window from uniformly drawn stops on `reels`
    pub fn spin<R: Rng + ?Sized>(&mut self, reels: &ReelSet, rng: &mut R) {
        for reel in 0..REELS {
            let strip = reels.strip(reel);
            let stop = rng.random_range(0..strip.len());
            self.stops[reel] = stop;
            for row in 0..ROWS {
                self.cells[Self::cell_index(reel, row)] = strip.symbol_at(stop + row);
            }
        }
    }

    /// Overwrite cells with `symbol` per `placement`, returning how many
    /// were placed. At most one symbol lands on each reel.
    pub fn place_specials<R: Rng + ?Sized>(
        &mut self,
        symbol: Symbol,
        placement: &SpecialPlacement,
        rng: &mut R,
    ) -> usize {
        let wanted = placement.count_weights.pick(rng).unwrap_or(0);
        let mut columns = placement.column_weights;
        let mut placed = 0;
        for _ in 0..wanted {
            let Some(reel) = pick_weighted(&columns, rng) else {
                break;
            };
            let row = rng.random_range(0..ROWS);
            self.cells[Self::cell_index(reel, row)] = symbol;
            columns[reel] = 0;
            placed += 1;
        }
        placed
    }

    /// Spin `reels`, then insert Wilds and then Scatters.
    ///
    /// Returns the number of Scatters placed.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        reels: &ReelSet,
        wilds: &SpecialPlacement,
        scatters: &SpecialPlacement,
        rng: &mut R,
    ) -> usize {
        self.spin(reels, rng);
        self.place_specials(Symbol::WILD, wilds, rng);
        self.place_specials(Symbol::SCATTER, scatters, rng)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            for reel in 0..REELS {
                if reel > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:>7}", self.get(reel, row).name())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
