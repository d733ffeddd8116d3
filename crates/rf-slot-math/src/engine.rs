//! Trial driver: base spin, optional free-game round, accumulation

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::free_games::{FreeGameLevel, FreeSpinOutcome, FreeSpinRecord, FreeSpinSource};
use crate::game::GameTables;
use crate::paytable::{PayTable, SpinEvaluation};
use crate::screen::Screen;
use crate::stats::TrialAccumulator;
use crate::symbols::ReelSet;

/// Result of one trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TrialOutcome {
    pub base_win: u64,
    pub free_win: u64,
    /// `base_win + free_win`, never above the win cap
    pub total_win: u64,
    pub triggered: bool,
    pub capped: bool,
    pub free_spins: u32,
    pub retriggers: u32,
    pub final_level: usize,
    /// Scatters on the base screen
    pub scatters: u8,
}

/// A trial with everything needed to replay it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialRecord {
    pub outcome: TrialOutcome,
    /// Index into the base reel sets
    pub base_reel_set: usize,
    pub base_screen: Screen,
    /// Per-line base wins, scatter pay last
    pub base_line_wins: Vec<u64>,
    pub free_spins: Vec<FreeSpinRecord>,
}

/// Monte Carlo slot engine.
///
/// Owns its random stream and every scratch buffer it spins into, so one
/// engine per worker runs without allocation or sharing. Tables are
/// shared read-only.
pub struct SlotEngine {
    tables: Arc<GameTables>,
    rng: ChaCha8Rng,
    screen: Screen,
    evaluation: SpinEvaluation,
}

impl SlotEngine {
    pub fn new(tables: Arc<GameTables>, rng: ChaCha8Rng) -> Self {
        Self {
            tables,
            rng,
            screen: Screen::default(),
            evaluation: SpinEvaluation::default(),
        }
    }

    /// Engine with a deterministic stream
    pub fn with_seed(tables: Arc<GameTables>, seed: u64) -> Self {
        Self::new(tables, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Reseed for a reproducible sequence
    pub fn seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn tables(&self) -> &GameTables {
        &self.tables
    }

    /// Play one trial
    pub fn play_trial(&mut self) -> TrialOutcome {
        self.play(None).0
    }

    /// Play one trial and keep its screens and free-spin history
    pub fn play_trial_detailed(&mut self) -> TrialRecord {
        let mut history = Vec::new();
        let (outcome, base_reel_set, base_screen, base_line_wins) = self.play(Some(&mut history));
        TrialRecord {
            outcome,
            base_reel_set,
            base_screen,
            base_line_wins,
            free_spins: history,
        }
    }

    fn play(
        &mut self,
        history: Option<&mut Vec<FreeSpinRecord>>,
    ) -> (TrialOutcome, usize, Screen, Vec<u64>) {
        let tables = &*self.tables;
        let cap = tables.win_cap();

        let reel_set = self.rng.random_range(0..tables.base_reels.len());
        self.screen.generate(
            &tables.base_reels[reel_set],
            &tables.base_wilds,
            &tables.base_scatters,
            &mut self.rng,
        );
        tables
            .pay_table
            .evaluate_into(&self.screen, 1, &mut self.evaluation);

        let base_screen = self.screen;
        let base_line_wins = if history.is_some() {
            let lines = tables.pay_table.paylines().len();
            let mut wins = self.evaluation.line_wins[..lines].to_vec();
            wins.push(self.evaluation.scatter_win());
            wins
        } else {
            Vec::new()
        };
        let scatters = self.evaluation.scatter_count;

        let mut outcome = TrialOutcome {
            base_win: self.evaluation.total_win.min(cap),
            capped: self.evaluation.total_win > cap,
            scatters,
            ..Default::default()
        };

        if !outcome.capped && tables.free_games.is_trigger(scatters) {
            let mut player = FreeSpinPlayer {
                reels: &tables.free_reels,
                pay_table: &tables.pay_table,
                rng: &mut self.rng,
                screen: &mut self.screen,
                evaluation: &mut self.evaluation,
            };
            let round = tables
                .free_games
                .play_round(&mut player, outcome.base_win, cap, history);
            outcome.triggered = true;
            outcome.free_win = round.win;
            outcome.capped = round.capped;
            outcome.free_spins = round.spins_played;
            outcome.retriggers = round.retriggers;
            outcome.final_level = round.final_level;
        }

        outcome.total_win = outcome.base_win + outcome.free_win;
        (outcome, reel_set, base_screen, base_line_wins)
    }

    /// Play `trials` trials into `acc`
    pub fn run(&mut self, trials: u64, acc: &mut TrialAccumulator) {
        for _ in 0..trials {
            let outcome = self.play_trial();
            acc.record(&outcome);
        }
    }
}

/// Borrowed view of an engine's buffers that plays free spins
struct FreeSpinPlayer<'a> {
    reels: &'a ReelSet,
    pay_table: &'a PayTable,
    rng: &'a mut ChaCha8Rng,
    screen: &'a mut Screen,
    evaluation: &'a mut SpinEvaluation,
}

impl FreeSpinSource for FreeSpinPlayer<'_> {
    fn play_free_spin(&mut self, level: &FreeGameLevel) -> FreeSpinOutcome {
        let scatters = self
            .screen
            .generate(self.reels, &level.wilds, &level.scatters, self.rng);
        self.pay_table
            .evaluate_into(self.screen, level.multiplier, self.evaluation);
        FreeSpinOutcome {
            scatters: scatters as u8,
            win: self.evaluation.total_win,
            stops: self.screen.stops(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameMode;
    use crate::symbols::Symbol;

    fn tables(mode: GameMode) -> Arc<GameTables> {
        Arc::new(GameTables::for_mode(mode).unwrap())
    }

    #[test]
    fn test_same_seed_same_trials() {
        let tables = tables(GameMode::Normal);
        let mut a = SlotEngine::with_seed(tables.clone(), 99);
        let mut b = SlotEngine::with_seed(tables, 99);
        for _ in 0..2000 {
            assert_eq!(a.play_trial(), b.play_trial());
        }
    }

    #[test]
    fn test_reseed_restarts_stream() {
        let mut engine = SlotEngine::with_seed(tables(GameMode::Normal), 5);
        let first: Vec<_> = (0..100).map(|_| engine.play_trial()).collect();
        engine.seed(5);
        let second: Vec<_> = (0..100).map(|_| engine.play_trial()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_trial_invariants() {
        let tables = tables(GameMode::Normal);
        let cap = tables.win_cap();
        let mut engine = SlotEngine::with_seed(tables, 7);
        for _ in 0..20_000 {
            let o = engine.play_trial();
            assert_eq!(o.total_win, o.base_win + o.free_win);
            assert!(o.total_win <= cap);
            assert_eq!(o.triggered, o.scatters >= 3);
            if o.triggered {
                assert!(o.free_spins >= 5);
                assert!(o.final_level <= 3);
            } else {
                assert_eq!(o.free_win, 0);
                assert_eq!(o.free_spins, 0);
            }
            if o.capped {
                assert_eq!(o.total_win, cap);
            }
        }
    }

    #[test]
    fn test_buy_bonus_always_triggers() {
        let mut engine = SlotEngine::with_seed(tables(GameMode::BuyBonus), 8);
        for _ in 0..200 {
            let o = engine.play_trial();
            assert!(o.triggered);
            assert!(o.free_spins >= 5);
        }
    }

    #[test]
    fn test_detailed_trial_matches_plain_trial() {
        let tables = tables(GameMode::BuyBonus);
        let mut plain = SlotEngine::with_seed(tables.clone(), 21);
        let mut detailed = SlotEngine::with_seed(tables, 21);
        for _ in 0..50 {
            let outcome = plain.play_trial();
            let record = detailed.play_trial_detailed();
            assert_eq!(record.outcome, outcome);
            assert_eq!(record.free_spins.len(), outcome.free_spins as usize);
            assert_eq!(record.base_line_wins.len(), 16);
            assert_eq!(record.base_screen.count(Symbol::SCATTER), outcome.scatters as usize);
            if !outcome.capped {
                let replayed: u64 = record.free_spins.iter().map(|r| r.win).sum();
                assert_eq!(replayed, outcome.free_win);
            }
        }
    }

    #[test]
    fn test_history_levels_follow_thresholds() {
        let tables = tables(GameMode::BuyBonus);
        let thresholds: Vec<u32> = tables.free_games.levels().iter().map(|l| l.threshold).collect();
        let mut engine = SlotEngine::with_seed(tables, 33);
        for _ in 0..50 {
            let record = engine.play_trial_detailed();
            let mut cumulative_before = 0;
            for spin in &record.free_spins {
                assert!(cumulative_before >= thresholds[spin.level]);
                if spin.level + 1 < thresholds.len() {
                    assert!(cumulative_before < thresholds[spin.level + 1]);
                }
                cumulative_before = spin.cumulative_scatters;
            }
        }
    }

    #[test]
    fn test_run_accumulates() {
        let tables = tables(GameMode::Normal);
        let mut engine = SlotEngine::with_seed(tables.clone(), 3);
        let mut acc = TrialAccumulator::new(tables.stake());
        engine.run(5_000, &mut acc);
        assert_eq!(acc.trials, 5_000);
        assert_eq!(acc.total_win, acc.base_win + acc.free_win);
        assert_eq!(acc.win_bands.iter().sum::<u64>(), 5_000);
    }
}
