//! Trial accumulation and derived RTP statistics

use serde::{Deserialize, Serialize};

use crate::engine::TrialOutcome;

/// Highest free-game level tracked in the level histogram
pub const MAX_TRACKED_LEVELS: usize = 4;

// ═══════════════════════════════════════════════════════════════════════════════
// WIN BANDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Trial win bands, in multiples of the stake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinBand {
    /// No win
    Zero,
    /// Below the stake
    Sub1x,
    /// 1x to 5x
    X1To5,
    /// 5x to 20x
    X5To20,
    /// 20x to 100x
    X20To100,
    /// 100x to 1000x
    X100To1000,
    /// 1000x and up, below the cap
    X1000Plus,
    /// Capped trial
    Capped,
}

impl WinBand {
    pub const COUNT: usize = 8;

    pub const ALL: [WinBand; Self::COUNT] = [
        WinBand::Zero,
        WinBand::Sub1x,
        WinBand::X1To5,
        WinBand::X5To20,
        WinBand::X20To100,
        WinBand::X100To1000,
        WinBand::X1000Plus,
        WinBand::Capped,
    ];

    /// Classify `win` credits against `stake` credits
    #[inline]
    pub fn classify(win: u64, stake: u64, capped: bool) -> Self {
        if capped {
            return WinBand::Capped;
        }
        if win == 0 {
            return WinBand::Zero;
        }
        match win {
            w if w < stake => WinBand::Sub1x,
            w if w < 5 * stake => WinBand::X1To5,
            w if w < 20 * stake => WinBand::X5To20,
            w if w < 100 * stake => WinBand::X20To100,
            w if w < 1000 * stake => WinBand::X100To1000,
            _ => WinBand::X1000Plus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WinBand::Zero => "0x",
            WinBand::Sub1x => "<1x",
            WinBand::X1To5 => "1x-5x",
            WinBand::X5To20 => "5x-20x",
            WinBand::X20To100 => "20x-100x",
            WinBand::X100To1000 => "100x-1000x",
            WinBand::X1000Plus => ">=1000x",
            WinBand::Capped => "cap",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ACCUMULATOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Per-worker running sums. Merging is plain addition, so any number of
/// accumulators reduce in any order to the same result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialAccumulator {
    /// Credits staked per trial
    pub stake: u64,
    pub trials: u64,
    pub total_win: u64,
    pub base_win: u64,
    pub free_win: u64,
    /// Sum of squared trial wins (credits²)
    pub total_win_sq: u128,
    /// Trials with a positive total win
    pub winning_trials: u64,
    pub triggers: u64,
    pub free_spins: u64,
    pub retriggers: u64,
    pub capped: u64,
    pub max_win: u64,
    /// Triggered rounds by final level
    pub final_levels: [u64; MAX_TRACKED_LEVELS],
    pub win_bands: [u64; WinBand::COUNT],
}

impl TrialAccumulator {
    pub fn new(stake: u64) -> Self {
        Self {
            stake,
            ..Default::default()
        }
    }

    /// Fold one trial in
    #[inline]
    pub fn record(&mut self, outcome: &TrialOutcome) {
        let total = outcome.total_win;
        self.trials += 1;
        self.total_win += total;
        self.base_win += outcome.base_win;
        self.free_win += outcome.free_win;
        self.total_win_sq += u128::from(total) * u128::from(total);
        if total > 0 {
            self.winning_trials += 1;
        }
        if total > self.max_win {
            self.max_win = total;
        }
        if outcome.triggered {
            self.triggers += 1;
            self.free_spins += u64::from(outcome.free_spins);
            self.retriggers += u64::from(outcome.retriggers);
            self.final_levels[outcome.final_level.min(MAX_TRACKED_LEVELS - 1)] += 1;
        }
        if outcome.capped {
            self.capped += 1;
        }
        let band = WinBand::classify(total, self.stake, outcome.capped);
        self.win_bands[band as usize] += 1;
    }

    /// Add another accumulator's sums into this one
    pub fn merge(&mut self, other: &TrialAccumulator) {
        if self.stake == 0 {
            self.stake = other.stake;
        }
        self.trials += other.trials;
        self.total_win += other.total_win;
        self.base_win += other.base_win;
        self.free_win += other.free_win;
        self.total_win_sq += other.total_win_sq;
        self.winning_trials += other.winning_trials;
        self.triggers += other.triggers;
        self.free_spins += other.free_spins;
        self.retriggers += other.retriggers;
        self.capped += other.capped;
        self.max_win = self.max_win.max(other.max_win);
        for (mine, theirs) in self.final_levels.iter_mut().zip(other.final_levels) {
            *mine += theirs;
        }
        for (mine, theirs) in self.win_bands.iter_mut().zip(other.win_bands) {
            *mine += theirs;
        }
    }

    /// Derive the report statistics
    pub fn stats(&self) -> RtpStats {
        RtpStats::from_accumulator(self)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DERIVED STATISTICS
// ═══════════════════════════════════════════════════════════════════════════════

/// Statistics derived from a [`TrialAccumulator`].
///
/// Ratios are fractions of the total stake (1.0 = 100% RTP).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtpStats {
    pub trials: u64,
    pub rtp: f64,
    pub rtp_base: f64,
    pub rtp_free: f64,
    /// Standard deviation of one trial's win, in stakes
    pub std_dev: f64,
    /// Reserved metric, always 0
    pub plus: f64,
    pub capped: u64,
    /// Fraction of trials with a positive win
    pub hit_rate: f64,
    /// Fraction of trials that entered free games
    pub trigger_rate: f64,
    pub avg_free_spins: f64,
    /// Average free-game win per round, in stakes
    pub avg_free_win: f64,
    pub retriggers: u64,
    /// Largest trial win, in stakes
    pub max_win: f64,
    /// Fraction of rounds ending at each level
    pub final_levels: [f64; MAX_TRACKED_LEVELS],
    /// Fraction of trials per [`WinBand`]
    pub win_bands: [f64; WinBand::COUNT],
}

impl RtpStats {
    pub fn from_accumulator(acc: &TrialAccumulator) -> Self {
        let trials = acc.trials as f64;
        let stake = acc.stake as f64;
        let staked = trials * stake;

        let ratio = |num: f64, den: f64| if den > 0.0 { num / den } else { 0.0 };

        let rtp = ratio(acc.total_win as f64, staked);
        let mean_sq = ratio(acc.total_win_sq as f64, trials * stake * stake);
        let std_dev = (mean_sq - rtp * rtp).max(0.0).sqrt();

        let rounds = acc.triggers as f64;

        Self {
            trials: acc.trials,
            rtp,
            rtp_base: ratio(acc.base_win as f64, staked),
            rtp_free: ratio(acc.free_win as f64, staked),
            std_dev,
            plus: 0.0,
            capped: acc.capped,
            hit_rate: ratio(acc.winning_trials as f64, trials),
            trigger_rate: ratio(rounds, trials),
            avg_free_spins: ratio(acc.free_spins as f64, rounds),
            avg_free_win: ratio(acc.free_win as f64, rounds * stake),
            retriggers: acc.retriggers,
            max_win: ratio(acc.max_win as f64, stake),
            final_levels: acc.final_levels.map(|n| ratio(n as f64, rounds)),
            win_bands: acc.win_bands.map(|n| ratio(n as f64, trials)),
        }
    }

    /// Average trials between free-game triggers (0 if never triggered)
    pub fn trigger_frequency(&self) -> f64 {
        if self.trigger_rate > 0.0 {
            1.0 / self.trigger_rate
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn outcome(base: u64, free: u64, triggered: bool, capped: bool) -> TrialOutcome {
        TrialOutcome {
            base_win: base,
            free_win: free,
            total_win: base + free,
            triggered,
            capped,
            free_spins: if triggered { 5 } else { 0 },
            retriggers: 0,
            final_level: if triggered { 1 } else { 0 },
            scatters: 0,
        }
    }

    #[test]
    fn test_band_classification() {
        assert_eq!(WinBand::classify(0, 10, false), WinBand::Zero);
        assert_eq!(WinBand::classify(5, 10, false), WinBand::Sub1x);
        assert_eq!(WinBand::classify(10, 10, false), WinBand::X1To5);
        assert_eq!(WinBand::classify(199, 10, false), WinBand::X5To20);
        assert_eq!(WinBand::classify(999, 10, false), WinBand::X20To100);
        assert_eq!(WinBand::classify(9_999, 10, false), WinBand::X100To1000);
        assert_eq!(WinBand::classify(10_000, 10, false), WinBand::X1000Plus);
        assert_eq!(WinBand::classify(100_000, 10, true), WinBand::Capped);
    }

    #[test]
    fn test_record_sums() {
        let mut acc = TrialAccumulator::new(10);
        acc.record(&outcome(0, 0, false, false));
        acc.record(&outcome(20, 0, false, false));
        acc.record(&outcome(40, 300, true, false));
        acc.record(&outcome(0, 0, false, false));

        assert_eq!(acc.trials, 4);
        assert_eq!(acc.total_win, 360);
        assert_eq!(acc.base_win, 60);
        assert_eq!(acc.free_win, 300);
        assert_eq!(acc.total_win_sq, 20 * 20 + 340 * 340);
        assert_eq!(acc.winning_trials, 2);
        assert_eq!(acc.triggers, 1);
        assert_eq!(acc.free_spins, 5);
        assert_eq!(acc.max_win, 340);
        assert_eq!(acc.final_levels, [0, 1, 0, 0]);
        assert_eq!(acc.win_bands[WinBand::Zero as usize], 2);
        assert_eq!(acc.win_bands.iter().sum::<u64>(), 4);
    }

    #[test]
    fn test_capped_trial_counts_once() {
        let mut acc = TrialAccumulator::new(10);
        acc.record(&outcome(0, 0, false, false));
        assert_eq!(acc.capped, 0);

        acc.record(&outcome(30, 99_970, true, true));
        assert_eq!(acc.capped, 1);
        assert_eq!(acc.win_bands[WinBand::Capped as usize], 1);
        assert_eq!(acc.max_win, 100_000);

        acc.record(&outcome(50, 0, false, false));
        assert_eq!(acc.capped, 1);
    }

    #[test]
    fn test_rtp_and_std_dev() {
        let mut acc = TrialAccumulator::new(10);
        acc.record(&outcome(0, 0, false, false));
        acc.record(&outcome(20, 0, false, false));

        let stats = acc.stats();
        // wins in stakes: 0 and 2
        assert_relative_eq!(stats.rtp, 1.0);
        assert_relative_eq!(stats.rtp_base, 1.0);
        assert_relative_eq!(stats.rtp_free, 0.0);
        assert_relative_eq!(stats.std_dev, 1.0);
        assert_relative_eq!(stats.hit_rate, 0.5);
        assert_relative_eq!(stats.max_win, 2.0);
        assert_eq!(stats.plus, 0.0);
    }

    #[test]
    fn test_base_plus_free_equals_total() {
        let mut acc = TrialAccumulator::new(10);
        for i in 0..100u64 {
            acc.record(&outcome(i % 7, (i % 3) * 50, i % 3 != 0, false));
        }
        let stats = acc.stats();
        assert_relative_eq!(stats.rtp, stats.rtp_base + stats.rtp_free, epsilon = 1e-12);
    }

    #[test]
    fn test_merge_matches_single_accumulator() {
        let outcomes: Vec<_> = (0..50u64)
            .map(|i| outcome(i * 3 % 11, if i % 5 == 0 { 700 } else { 0 }, i % 5 == 0, i == 25))
            .collect();

        let mut single = TrialAccumulator::new(10);
        outcomes.iter().for_each(|o| single.record(o));

        let mut left = TrialAccumulator::new(10);
        let mut right = TrialAccumulator::new(10);
        outcomes[..17].iter().for_each(|o| left.record(o));
        outcomes[17..].iter().for_each(|o| right.record(o));

        let mut merged = TrialAccumulator::default();
        merged.merge(&right);
        merged.merge(&left);
        assert_eq!(single.capped, 1);
        assert_eq!(merged, single);
    }

    #[test]
    fn test_empty_stats() {
        let stats = TrialAccumulator::new(10).stats();
        assert_eq!(stats.trials, 0);
        assert_eq!(stats.rtp, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.trigger_frequency(), 0.0);
    }
}
