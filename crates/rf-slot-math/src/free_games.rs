//! Leveled free games
//!
//! A round starts at level 0 with a fixed number of spins. Each spin can:
//! - retrigger (enough scatters on one screen adds spins)
//! - level up (cumulative scatters cross the next threshold, adds spins)
//! - trip the per-trial win cap, which ends the round immediately
//!
//! The state machine is separated from screen generation through
//! [`FreeSpinSource`], so rounds can be driven by scripted outcomes.

use serde::Serialize;

use crate::error::{SlotMathError, SlotMathResult};
use crate::screen::SpecialPlacement;
use crate::symbols::REELS;

// ═══════════════════════════════════════════════════════════════════════════════
// CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════

/// One free-game tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeGameLevel {
    /// Cumulative scatters needed to reach this level
    pub threshold: u32,
    /// Multiplier for winning lines whose run contains a Wild
    pub multiplier: u32,
    pub wilds: SpecialPlacement,
    pub scatters: SpecialPlacement,
}

/// Free game rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeGameRules {
    initial_spins: u32,
    retrigger_spins: u32,
    level_up_spins: u32,
    trigger_scatters: u8,
    levels: Vec<FreeGameLevel>,
}

impl FreeGameRules {
    pub fn new(
        initial_spins: u32,
        retrigger_spins: u32,
        level_up_spins: u32,
        trigger_scatters: u8,
        levels: Vec<FreeGameLevel>,
    ) -> SlotMathResult<Self> {
        let rules = Self {
            initial_spins,
            retrigger_spins,
            level_up_spins,
            trigger_scatters,
            levels,
        };
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> SlotMathResult<()> {
        if self.levels.is_empty() {
            return Err(SlotMathError::InvalidConfig(
                "free games need at least one level".into(),
            ));
        }
        if self.initial_spins == 0 {
            return Err(SlotMathError::InvalidConfig(
                "free games must award at least one spin".into(),
            ));
        }
        if self.trigger_scatters == 0 || self.trigger_scatters as usize > REELS {
            return Err(SlotMathError::InvalidConfig(format!(
                "trigger needs 1..={} scatters, got {}",
                REELS, self.trigger_scatters
            )));
        }

        let thresholds: Vec<u32> = self.levels.iter().map(|l| l.threshold).collect();
        let ascending = thresholds.windows(2).all(|w| w[0] < w[1]);
        if thresholds[0] != 0 || !ascending {
            return Err(SlotMathError::Thresholds(thresholds));
        }

        for (level, tier) in self.levels.iter().enumerate() {
            if tier.multiplier == 0 {
                return Err(SlotMathError::ZeroMultiplier { level });
            }
            tier.wilds.validate(&format!("free level {level} wild count"))?;
            tier.scatters.validate(&format!("free level {level} scatter count"))?;
        }
        Ok(())
    }

    pub fn levels(&self) -> &[FreeGameLevel] {
        &self.levels
    }

    pub fn max_level(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn initial_spins(&self) -> u32 {
        self.initial_spins
    }

    pub fn trigger_scatters(&self) -> u8 {
        self.trigger_scatters
    }

    /// Whether `scatters` on one screen (re)triggers the feature
    #[inline]
    pub fn is_trigger(&self, scatters: u8) -> bool {
        scatters >= self.trigger_scatters
    }

    /// Play a full round.
    ///
    /// `base_win` is the triggering spin's win, counted against `cap`.
    /// When `history` is given, one record per free spin is appended.
    pub fn play_round<S: FreeSpinSource + ?Sized>(
        &self,
        source: &mut S,
        base_win: u64,
        cap: u64,
        mut history: Option<&mut Vec<FreeSpinRecord>>,
    ) -> FreeGameRound {
        let mut state = FreeGameState::new(self);
        let mut round = FreeGameRound::default();
        let mut trial_total = base_win;

        while !state.is_finished() {
            let level = state.level;
            let spins_remaining = state.spins_remaining;
            let outcome = source.play_free_spin(&self.levels[level]);
            round.spins_played += 1;

            let award = state.apply_scatters(self, outcome.scatters);
            if award.retriggered {
                round.retriggers += 1;
            }

            if let Some(records) = history.as_deref_mut() {
                records.push(FreeSpinRecord {
                    spin: round.spins_played,
                    level,
                    multiplier: self.levels[level].multiplier,
                    spins_remaining,
                    stops: outcome.stops,
                    scatters: outcome.scatters,
                    cumulative_scatters: state.cumulative_scatters,
                    win: outcome.win,
                });
            }

            round.win += outcome.win;
            trial_total += outcome.win;
            if trial_total > cap {
                round.win = cap.saturating_sub(base_win);
                round.capped = true;
                log::debug!(
                    "Win cap {} reached after {} free spins at level {}",
                    cap,
                    round.spins_played,
                    state.level
                );
                break;
            }

            state.consume_spin();
        }

        round.final_level = state.level;
        round.scatters = state.cumulative_scatters;
        round
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STATE
// ═══════════════════════════════════════════════════════════════════════════════

/// Free game runtime state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FreeGameState {
    pub level: usize,
    pub spins_remaining: u32,
    pub cumulative_scatters: u32,
}

/// Spins granted by the scatters of one free spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScatterAward {
    pub retriggered: bool,
    pub levels_gained: u8,
    pub spins_added: u32,
}

impl FreeGameState {
    pub fn new(rules: &FreeGameRules) -> Self {
        Self {
            level: 0,
            spins_remaining: rules.initial_spins,
            cumulative_scatters: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.spins_remaining == 0
    }

    /// Apply retrigger and level-up for a spin that showed `scatters`.
    /// Does not consume the spin.
    pub fn apply_scatters(&mut self, rules: &FreeGameRules, scatters: u8) -> ScatterAward {
        let mut award = ScatterAward::default();

        if rules.is_trigger(scatters) {
            award.retriggered = true;
            award.spins_added += rules.retrigger_spins;
        }

        self.cumulative_scatters += u32::from(scatters);
        while self.level < rules.max_level()
            && self.cumulative_scatters >= rules.levels[self.level + 1].threshold
        {
            self.level += 1;
            award.levels_gained += 1;
            award.spins_added += rules.level_up_spins;
        }

        self.spins_remaining += award.spins_added;
        award
    }

    pub fn consume_spin(&mut self) {
        self.spins_remaining = self.spins_remaining.saturating_sub(1);
    }

    /// Full transition for an uncapped spin
    pub fn advance(&mut self, rules: &FreeGameRules, scatters: u8) -> ScatterAward {
        let award = self.apply_scatters(rules, scatters);
        self.consume_spin();
        award
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SPIN SOURCE & RESULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Produces free spins for a round
pub trait FreeSpinSource {
    /// Generate and evaluate one free spin with `level`'s tables
    fn play_free_spin(&mut self, level: &FreeGameLevel) -> FreeSpinOutcome;
}

/// What one free spin produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FreeSpinOutcome {
    pub scatters: u8,
    /// Spin win including the level multiplier and scatter pay
    pub win: u64,
    pub stops: [usize; REELS],
}

/// Audit record of one free spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FreeSpinRecord {
    /// 1-based spin number within the round
    pub spin: u32,
    /// Level the spin was played at
    pub level: usize,
    pub multiplier: u32,
    /// Spins remaining before this spin
    pub spins_remaining: u32,
    pub stops: [usize; REELS],
    pub scatters: u8,
    /// Cumulative scatters after this spin
    pub cumulative_scatters: u32,
    pub win: u64,
}

/// Summary of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FreeGameRound {
    pub win: u64,
    pub capped: bool,
    pub spins_played: u32,
    pub final_level: usize,
    pub retriggers: u32,
    pub scatters: u32,
}
