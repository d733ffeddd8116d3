//! Paytable and line/scatter evaluation

use serde::Serialize;

use crate::error::{SlotMathError, SlotMathResult};
use crate::screen::Screen;
use crate::symbols::{ALPHABET_SIZE, REELS, ROWS, Symbol};

/// Payout columns per symbol: index `REELS - hits`, last column is "no match"
pub const PAY_COLUMNS: usize = REELS + 1;
/// Upper bound on paylines (evaluation buffers are sized from it)
pub const MAX_PAYLINES: usize = 15;
/// Slot of the scatter pseudo-line in [`SpinEvaluation`]
pub const SCATTER_SLOT: usize = MAX_PAYLINES;

/// A payline definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Payline {
    /// Row visited on each reel
    pub rows: [u8; REELS],
}

impl Payline {
    pub const fn new(rows: [u8; REELS]) -> Self {
        Self { rows }
    }

    /// Symbols under this line
    #[inline]
    pub fn combination(&self, screen: &Screen) -> [Symbol; REELS] {
        std::array::from_fn(|reel| screen.get(reel, self.rows[reel] as usize))
    }
}

/// Low-value wild demotion: a line starting with exactly `leading_wilds`
/// wilds pays as that many wilds when the substituted symbol pays no more
/// than `max_pay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WildDemotion {
    pub leading_wilds: u8,
    pub max_pay: u32,
}

/// Result of evaluating one payline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineResult {
    /// Symbol the line pays as
    pub symbol: Symbol,
    /// Length of the winning run (0 if the line does not pay)
    pub hits: u8,
    /// Prize before any free-game multiplier
    pub prize: u32,
    /// Whether the winning run contains a Wild
    pub wild_in_run: bool,
}

/// Per-spin evaluation buffers, reused across spins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinEvaluation {
    /// Hit count per payline; the last slot holds the scatter count
    pub line_hits: [u8; MAX_PAYLINES + 1],
    /// Win per payline; the last slot holds the scatter pay
    pub line_wins: [u64; MAX_PAYLINES + 1],
    /// Scatters on screen
    pub scatter_count: u8,
    /// Sum over all line wins and the scatter pay
    pub total_win: u64,
}

impl Default for SpinEvaluation {
    fn default() -> Self {
        Self {
            line_hits: [0; MAX_PAYLINES + 1],
            line_wins: [0; MAX_PAYLINES + 1],
            scatter_count: 0,
            total_win: 0,
        }
    }
}

impl SpinEvaluation {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Win from paylines alone
    pub fn line_total(&self) -> u64 {
        self.total_win - self.line_wins[SCATTER_SLOT]
    }

    pub fn scatter_win(&self) -> u64 {
        self.line_wins[SCATTER_SLOT]
    }

    /// Number of paying lines (scatter excluded)
    pub fn winning_lines(&self) -> usize {
        self.line_wins[..SCATTER_SLOT].iter().filter(|&&w| w > 0).count()
    }
}

/// Line pays, scatter pays, payline shapes and demotion rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayTable {
    line_pays: [[u32; PAY_COLUMNS]; ALPHABET_SIZE],
    scatter_pays: [u32; PAY_COLUMNS],
    paylines: Vec<Payline>,
    demotions: Vec<WildDemotion>,
}

impl PayTable {
    pub fn new(
        line_pays: [[u32; PAY_COLUMNS]; ALPHABET_SIZE],
        scatter_pays: [u32; PAY_COLUMNS],
        paylines: Vec<Payline>,
        demotions: Vec<WildDemotion>,
    ) -> SlotMathResult<Self> {
        let table = Self {
            line_pays,
            scatter_pays,
            paylines,
            demotions,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> SlotMathResult<()> {
        if self.paylines.len() > MAX_PAYLINES {
            return Err(SlotMathError::TooManyPaylines {
                actual: self.paylines.len(),
                max: MAX_PAYLINES,
            });
        }
        for (index, line) in self.paylines.iter().enumerate() {
            if let Some(&row) = line.rows.iter().find(|&&r| r as usize >= ROWS) {
                return Err(SlotMathError::PaylineRow {
                    index,
                    row,
                    rows: ROWS,
                });
            }
        }
        for demotion in &self.demotions {
            if demotion.leading_wilds == 0 || demotion.leading_wilds as usize >= REELS {
                return Err(SlotMathError::InvalidConfig(format!(
                    "wild demotion needs 1..{} leading wilds, got {}",
                    REELS, demotion.leading_wilds
                )));
            }
        }
        Ok(())
    }

    /// Payout for `hits` consecutive `symbol`s (0 hits pays nothing)
    #[inline]
    pub fn pay(&self, symbol: Symbol, hits: u8) -> u32 {
        self.line_pays[symbol.index()][REELS - hits as usize]
    }

    /// Payout for `count` scatters anywhere
    #[inline]
    pub fn scatter_pay(&self, count: u8) -> u32 {
        self.scatter_pays[(count as usize).min(REELS)]
    }

    pub fn paylines(&self) -> &[Payline] {
        &self.paylines
    }

    pub fn demotions(&self) -> &[WildDemotion] {
        &self.demotions
    }

    /// Score a single 5-symbol combination
    pub fn evaluate_line(&self, combination: &[Symbol; REELS]) -> LineResult {
        let leading_wilds = combination.iter().take_while(|s| s.is_wild()).count();
        let mut symbol = combination
            .get(leading_wilds)
            .copied()
            .unwrap_or(Symbol::WILD);

        let mut hits = combination
            .iter()
            .take_while(|&&s| s == symbol || s.is_wild())
            .count() as u8;

        if let Some(demotion) = self
            .demotions
            .iter()
            .find(|d| d.leading_wilds as usize == leading_wilds)
        {
            if self.pay(symbol, hits) <= demotion.max_pay {
                symbol = Symbol::WILD;
                hits = demotion.leading_wilds;
            }
        }

        let prize = self.pay(symbol, hits);
        if prize == 0 {
            return LineResult {
                symbol,
                hits: 0,
                prize: 0,
                wild_in_run: false,
            };
        }
        LineResult {
            symbol,
            hits,
            prize,
            wild_in_run: combination[..hits as usize].iter().any(|s| s.is_wild()),
        }
    }

    /// Evaluate every payline plus the scatter pseudo-line into `out`.
    ///
    /// Lines whose winning run includes a Wild are multiplied by
    /// `wild_multiplier`; pass 1 for base-game spins.
    pub fn evaluate_into(&self, screen: &Screen, wild_multiplier: u32, out: &mut SpinEvaluation) {
        out.clear();
        let mut total = 0u64;
        for (i, line) in self.paylines.iter().enumerate() {
            let result = self.evaluate_line(&line.combination(screen));
            let mut win = u64::from(result.prize);
            if result.wild_in_run {
                win *= u64::from(wild_multiplier);
            }
            out.line_hits[i] = result.hits;
            out.line_wins[i] = win;
            total += win;
        }

        let scatters = screen.count(Symbol::SCATTER) as u8;
        let scatter_win = u64::from(self.scatter_pay(scatters));
        out.scatter_count = scatters;
        out.line_hits[SCATTER_SLOT] = scatters;
        out.line_wins[SCATTER_SLOT] = scatter_win;
        out.total_win = total + scatter_win;
    }

    /// Allocating convenience wrapper over [`evaluate_into`](Self::evaluate_into)
    pub fn evaluate(&self, screen: &Screen, wild_multiplier: u32) -> SpinEvaluation {
        let mut out = SpinEvaluation::default();
        self.evaluate_into(screen, wild_multiplier, &mut out);
        out
    }
}
