//! Compiled-in game data: reel strips, pays, paylines and weight tables
//!
//! Symbol ids follow [`Symbol`](crate::Symbol): `0..=9` are H1..H4, L1..L6
//! from the top payer down, `10` is Wild, `11` is Scatter.

use crate::error::SlotMathResult;
use crate::free_games::{FreeGameLevel, FreeGameRules};
use crate::paytable::{PAY_COLUMNS, PayTable, Payline, WildDemotion};
use crate::screen::SpecialPlacement;
use crate::symbols::{ALPHABET_SIZE, REELS, ReelSet};

// ═══════════════════════════════════════════════════════════════════════════════
// REEL STRIPS
// ═══════════════════════════════════════════════════════════════════════════════

pub const BASE_STRIP_A: [u8; 224] = [
    4, 5, 1, 7, 9, 8, 6, 1, 7, 8, 3, 6, 4, 0, 9, 5, 1, 6, 8, 3, 9, 5, 1, 6,
    4, 2, 8, 7, 3, 4, 5, 2, 6, 7, 3, 8, 9, 0, 7, 4, 3, 9, 5, 1, 6, 8, 2, 4,
    5, 1, 6, 7, 3, 5, 9, 1, 8, 9, 2, 6, 4, 0, 7, 8, 2, 5, 4, 1, 9, 7, 3, 6,
    9, 2, 4, 5, 3, 6, 8, 9, 7, 2, 8, 6, 1, 5, 4, 3, 8, 7, 1, 9, 8, 2, 7, 9,
    0, 6, 7, 3, 4, 5, 1, 9, 8, 2, 4, 7, 1, 5, 8, 2, 9, 6, 3, 1, 5, 9, 3, 7,
    6, 1, 4, 8, 1, 2, 9, 4, 1, 6, 8, 2, 7, 5, 1, 3, 9, 8, 3, 7, 4, 1, 5, 6,
    1, 2, 4, 9, 3, 8, 6, 2, 5, 7, 0, 1, 8, 9, 1, 7, 4, 1, 6, 5, 2, 3, 4, 7,
    1, 5, 8, 2, 9, 6, 1, 3, 5, 9, 3, 7, 6, 1, 4, 8, 2, 1, 9, 4, 1, 6, 8, 2,
    7, 5, 3, 9, 8, 3, 7, 4, 1, 5, 6, 2, 4, 9, 3, 8, 6, 2, 5, 7, 1, 0, 8, 9,
    1, 7, 4, 1, 6, 5, 3, 2,
];

pub const BASE_STRIP_B: [u8; 221] = [
    4, 5, 0, 7, 9, 8, 6, 3, 7, 8, 0, 6, 4, 2, 9, 5, 1, 6, 8, 3, 9, 5, 0, 6,
    4, 3, 8, 7, 2, 4, 5, 6, 7, 3, 8, 9, 0, 7, 4, 3, 9, 5, 1, 6, 8, 2, 4, 5,
    0, 6, 7, 2, 5, 9, 0, 8, 9, 3, 6, 4, 7, 8, 2, 5, 4, 0, 9, 7, 3, 6, 9, 2,
    4, 5, 3, 6, 8, 7, 9, 2, 8, 6, 1, 5, 4, 3, 8, 7, 9, 6, 2, 7, 9, 0, 8, 7,
    3, 4, 5, 0, 9, 8, 2, 4, 7, 1, 5, 8, 2, 9, 6, 3, 0, 5, 9, 3, 7, 6, 0, 4,
    8, 0, 2, 9, 4, 0, 6, 8, 2, 7, 5, 0, 3, 9, 8, 3, 7, 4, 0, 5, 6, 0, 2, 4,
    9, 3, 8, 6, 2, 5, 7, 0, 1, 8, 9, 0, 7, 4, 0, 6, 5, 2, 3, 4, 7, 0, 5, 8,
    2, 9, 6, 0, 3, 5, 9, 3, 7, 6, 0, 4, 8, 2, 9, 4, 0, 6, 8, 2, 7, 5, 3, 0,
    9, 8, 3, 7, 4, 0, 5, 6, 2, 4, 9, 3, 8, 6, 2, 5, 7, 1, 0, 8, 9, 0, 7, 4,
    0, 6, 5, 2, 3,
];

pub const BASE_STRIP_C: [u8; 238] = [
    4, 5, 3, 7, 9, 1, 0, 8, 6, 0, 7, 8, 1, 6, 4, 0, 1, 9, 5, 1, 6, 8, 3, 9,
    5, 1, 6, 4, 2, 0, 8, 7, 3, 4, 5, 2, 6, 7, 3, 8, 9, 0, 1, 7, 4, 3, 9, 5,
    1, 6, 8, 2, 4, 5, 0, 2, 6, 7, 3, 5, 9, 1, 8, 9, 2, 6, 4, 0, 1, 7, 8, 2,
    5, 4, 1, 9, 7, 3, 6, 9, 2, 0, 4, 5, 3, 6, 8, 0, 9, 7, 2, 8, 6, 0, 5, 4,
    3, 0, 8, 7, 1, 9, 8, 2, 7, 9, 0, 1, 6, 7, 3, 4, 5, 1, 9, 8, 2, 3, 4, 7,
    0, 5, 8, 2, 9, 6, 3, 2, 5, 9, 3, 7, 6, 1, 4, 8, 0, 2, 9, 4, 1, 6, 8, 2,
    7, 5, 0, 3, 9, 8, 3, 7, 4, 0, 5, 6, 1, 2, 4, 9, 3, 8, 6, 2, 5, 7, 0, 1,
    8, 9, 0, 7, 4, 1, 6, 5, 2, 3, 4, 7, 0, 5, 8, 2, 9, 6, 1, 3, 5, 9, 3, 7,
    6, 1, 4, 8, 2, 0, 9, 4, 1, 6, 8, 2, 7, 5, 3, 0, 9, 8, 3, 7, 4, 0, 5, 6,
    2, 1, 4, 9, 3, 8, 6, 2, 5, 7, 1, 0, 8, 9, 0, 7, 4, 1, 6, 5, 3, 2,
];

pub const FREE_STRIP: [u8; 222] = [
    4, 5, 3, 7, 9, 1, 8, 6, 0, 7, 8, 1, 6, 4, 0, 9, 5, 1, 6, 8, 3, 9, 5, 1,
    6, 4, 2, 8, 7, 3, 4, 5, 2, 6, 7, 3, 8, 9, 0, 7, 4, 3, 9, 5, 1, 6, 8, 2,
    4, 5, 0, 6, 7, 3, 5, 9, 1, 8, 9, 2, 6, 4, 0, 7, 8, 2, 5, 4, 1, 9, 7, 3,
    6, 9, 2, 4, 5, 3, 6, 8, 0, 9, 7, 2, 8, 6, 0, 5, 4, 3, 8, 7, 1, 9, 8, 2,
    7, 9, 0, 6, 7, 3, 4, 5, 1, 9, 8, 2, 1, 4, 7, 0, 5, 8, 2, 9, 6, 3, 5, 9,
    3, 7, 6, 1, 4, 8, 0, 9, 4, 1, 6, 8, 2, 7, 5, 0, 9, 8, 3, 7, 4, 0, 5, 6,
    1, 2, 4, 9, 3, 8, 6, 2, 5, 7, 0, 8, 9, 0, 7, 4, 1, 6, 5, 2, 4, 7, 0, 5,
    8, 2, 9, 6, 1, 3, 5, 9, 3, 7, 6, 1, 4, 8, 2, 9, 4, 1, 6, 8, 2, 7, 5, 3,
    0, 9, 8, 3, 7, 4, 0, 5, 6, 2, 3, 4, 9, 3, 8, 6, 2, 5, 7, 1, 8, 9, 0, 7,
    4, 1, 6, 5, 3, 2,
];

/// First base-game reel set
pub fn base_reels_a() -> SlotMathResult<ReelSet> {
    ReelSet::new(
        "base-a",
        &[&BASE_STRIP_A[..], &BASE_STRIP_B[..], &BASE_STRIP_C[..], &BASE_STRIP_C[..], &BASE_STRIP_C[..]],
    )
}

/// Second base-game reel set (first two reels swapped)
pub fn base_reels_b() -> SlotMathResult<ReelSet> {
    ReelSet::new(
        "base-b",
        &[&BASE_STRIP_B[..], &BASE_STRIP_A[..], &BASE_STRIP_C[..], &BASE_STRIP_C[..], &BASE_STRIP_C[..]],
    )
}

pub fn free_reels() -> SlotMathResult<ReelSet> {
    let strip: &[u8] = &FREE_STRIP;
    ReelSet::new("free", &[strip; REELS])
}

// ═══════════════════════════════════════════════════════════════════════════════
// PAYS
// ═══════════════════════════════════════════════════════════════════════════════

/// Line pays in credits, columns are 5, 4, 3, 2, 1 of a kind, then "no match"
pub const LINE_PAYS: [[u32; PAY_COLUMNS]; ALPHABET_SIZE] = [
    [500, 200, 30, 10, 0, 0],   // H1
    [300, 100, 20, 5, 0, 0],    // H2
    [200, 60, 15, 0, 0, 0],     // H3
    [150, 50, 10, 0, 0, 0],     // H4
    [100, 40, 8, 0, 0, 0],      // L1
    [100, 40, 8, 0, 0, 0],      // L2
    [80, 30, 6, 0, 0, 0],       // L3
    [80, 30, 6, 0, 0, 0],       // L4
    [60, 20, 5, 0, 0, 0],       // L5
    [60, 20, 5, 0, 0, 0],       // L6
    [1000, 400, 150, 20, 0, 0], // WILD
    [0, 0, 0, 0, 0, 0],         // SCATTER
];

/// Scatter pays by count anywhere (0..=5)
pub const SCATTER_PAYS: [u32; PAY_COLUMNS] = [0, 0, 10, 40, 200, 1000];

pub const PAYLINE_ROWS: [[u8; REELS]; 15] = [
    [1, 1, 1, 1, 1],
    [2, 2, 2, 2, 2],
    [0, 0, 0, 0, 0],
    [0, 1, 2, 1, 0],
    [2, 1, 0, 1, 2],
    [1, 0, 0, 0, 1],
    [1, 2, 2, 2, 1],
    [2, 1, 1, 1, 2],
    [0, 1, 1, 1, 0],
    [0, 0, 1, 2, 2],
    [2, 2, 1, 0, 0],
    [1, 2, 1, 2, 1],
    [1, 0, 1, 0, 1],
    [2, 1, 2, 1, 2],
    [0, 1, 0, 1, 0],
];

pub fn paylines() -> Vec<Payline> {
    PAYLINE_ROWS.iter().map(|&rows| Payline::new(rows)).collect()
}

/// Leading-wild demotion thresholds: (wilds, max substituted pay)
pub fn wild_demotions() -> Vec<WildDemotion> {
    [(4, 400), (3, 150), (2, 20)]
        .into_iter()
        .map(|(leading_wilds, max_pay)| WildDemotion {
            leading_wilds,
            max_pay,
        })
        .collect()
}

pub fn pay_table() -> SlotMathResult<PayTable> {
    PayTable::new(LINE_PAYS, SCATTER_PAYS, paylines(), wild_demotions())
}

// ═══════════════════════════════════════════════════════════════════════════════
// BASE GAME WEIGHTS
// ═══════════════════════════════════════════════════════════════════════════════

pub const BASE_WILD_COUNT: [u32; 6] = [2100, 820, 200, 32, 6, 1];
pub const BASE_WILD_COLUMNS: [u32; REELS] = [1, 1, 4, 5, 6];

pub const BASE_SCATTER_COUNT: [u32; 6] = [24000, 4800, 900, 180, 11, 1];
/// Bought feature: at least three scatters every spin
pub const BUY_BONUS_SCATTER_COUNT: [u32; 6] = [0, 0, 0, 180, 11, 1];
pub const BASE_SCATTER_COLUMNS: [u32; REELS] = [6, 5, 4, 3, 2];

// ═══════════════════════════════════════════════════════════════════════════════
// FREE GAME WEIGHTS
// ═══════════════════════════════════════════════════════════════════════════════

pub const FREE_MULTIPLIERS: [u32; 4] = [2, 10, 50, 150];
/// Cumulative scatters needed to enter each level
pub const FREE_LEVEL_THRESHOLDS: [u32; 4] = [0, 3, 7, 12];

pub const FREE_WILD_COUNT: [[u32; 6]; 4] = [
    [2400, 3800, 490, 50, 9, 1],
    [2700, 3600, 430, 45, 8, 1],
    [3100, 3400, 380, 40, 7, 1],
    [3900, 3200, 340, 35, 6, 1],
];
pub const FREE_WILD_COLUMNS: [u32; REELS] = [7, 7, 8, 9, 9];

pub const FREE_SCATTER_COUNT: [[u32; 6]; 4] = [
    [11000, 16000, 3000, 180, 10, 1],
    [70000, 20000, 2800, 560, 10, 1],
    [80000, 23000, 2600, 620, 10, 1],
    [90000, 25000, 2400, 680, 10, 1],
];
pub const FREE_SCATTER_COLUMNS: [u32; REELS] = [1, 1, 1, 1, 1];

pub const BUY_BONUS_FREE_WILD_COUNT: [[u32; 6]; 4] = [
    [2000, 5000, 1500, 180, 14, 1],
    [2200, 4800, 1200, 140, 12, 1],
    [2500, 4600, 1000, 110, 10, 1],
    [2900, 4400, 900, 90, 8, 1],
];
pub const BUY_BONUS_FREE_WILD_COLUMNS: [u32; REELS] = [1, 1, 1, 1, 1];

pub const BUY_BONUS_FREE_SCATTER_COUNT: [[u32; 6]; 4] = [
    [10000, 18000, 3000, 200, 10, 1],
    [60000, 22000, 2800, 560, 10, 1],
    [70000, 25000, 2600, 640, 10, 1],
    [80000, 27000, 2400, 710, 10, 1],
];

pub const FREE_INITIAL_SPINS: u32 = 5;
pub const FREE_RETRIGGER_SPINS: u32 = 5;
pub const FREE_LEVEL_UP_SPINS: u32 = 5;
/// Scatters needed to trigger (base) or retrigger (free) the feature
pub const TRIGGER_SCATTERS: u8 = 3;

fn free_game_rules(
    wild_counts: &[[u32; 6]; 4],
    wild_columns: [u32; REELS],
    scatter_counts: &[[u32; 6]; 4],
) -> SlotMathResult<FreeGameRules> {
    let levels = (0..FREE_MULTIPLIERS.len())
        .map(|level| FreeGameLevel {
            threshold: FREE_LEVEL_THRESHOLDS[level],
            multiplier: FREE_MULTIPLIERS[level],
            wilds: SpecialPlacement::new(&wild_counts[level], wild_columns),
            scatters: SpecialPlacement::new(&scatter_counts[level], FREE_SCATTER_COLUMNS),
        })
        .collect();
    FreeGameRules::new(
        FREE_INITIAL_SPINS,
        FREE_RETRIGGER_SPINS,
        FREE_LEVEL_UP_SPINS,
        TRIGGER_SCATTERS,
        levels,
    )
}

pub fn normal_free_games() -> SlotMathResult<FreeGameRules> {
    free_game_rules(&FREE_WILD_COUNT, FREE_WILD_COLUMNS, &FREE_SCATTER_COUNT)
}

pub fn buy_bonus_free_games() -> SlotMathResult<FreeGameRules> {
    free_game_rules(
        &BUY_BONUS_FREE_WILD_COUNT,
        BUY_BONUS_FREE_WILD_COLUMNS,
        &BUY_BONUS_FREE_SCATTER_COUNT,
    )
}
