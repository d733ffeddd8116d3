//! Complete game definition per play mode

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SlotMathError, SlotMathResult};
use crate::free_games::FreeGameRules;
use crate::paytable::PayTable;
use crate::screen::SpecialPlacement;
use crate::symbols::ReelSet;
use crate::tables;

/// Credits wagered per base spin
pub const DEFAULT_BET: u64 = 10;
/// Maximum trial payout, in bets
pub const WIN_CAP_MULTIPLIER: u64 = 10_000;
/// Price of a bought feature, in bets
pub const BUY_BONUS_COST_MULTIPLIER: u64 = 150;

/// Play mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Regular paid spins
    #[default]
    Normal,
    /// Feature bought up front; every spin triggers free games
    BuyBonus,
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Normal => "normal",
            GameMode::BuyBonus => "buy_bonus",
        }
    }

    /// Stake per trial, in bets
    pub fn cost_multiplier(&self) -> u64 {
        match self {
            GameMode::Normal => 1,
            GameMode::BuyBonus => BUY_BONUS_COST_MULTIPLIER,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameMode {
    type Err = SlotMathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "normal" => Ok(GameMode::Normal),
            "buy_bonus" | "bonus" => Ok(GameMode::BuyBonus),
            other => Err(SlotMathError::InvalidConfig(format!(
                "unknown game mode '{other}'"
            ))),
        }
    }
}

/// Everything the engine needs to play one mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameTables {
    pub mode: GameMode,
    /// Credits per base bet
    pub bet: u64,
    pub win_cap_multiplier: u64,
    /// Base reel sets, one picked uniformly per trial
    pub base_reels: Vec<ReelSet>,
    pub free_reels: ReelSet,
    pub pay_table: PayTable,
    pub base_wilds: SpecialPlacement,
    pub base_scatters: SpecialPlacement,
    pub free_games: FreeGameRules,
}

impl GameTables {
    /// Build and validate the compiled-in tables for `mode`
    pub fn for_mode(mode: GameMode) -> SlotMathResult<Self> {
        let (base_scatter_count, free_games) = match mode {
            GameMode::Normal => (&tables::BASE_SCATTER_COUNT, tables::normal_free_games()?),
            GameMode::BuyBonus => (
                &tables::BUY_BONUS_SCATTER_COUNT,
                tables::buy_bonus_free_games()?,
            ),
        };

        let game = Self {
            mode,
            bet: DEFAULT_BET,
            win_cap_multiplier: WIN_CAP_MULTIPLIER,
            base_reels: vec![tables::base_reels_a()?, tables::base_reels_b()?],
            free_reels: tables::free_reels()?,
            pay_table: tables::pay_table()?,
            base_wilds: SpecialPlacement::new(&tables::BASE_WILD_COUNT, tables::BASE_WILD_COLUMNS),
            base_scatters: SpecialPlacement::new(base_scatter_count, tables::BASE_SCATTER_COLUMNS),
            free_games,
        };
        game.validate()?;
        Ok(game)
    }

    /// Re-check every table. Parts are validated on construction; this
    /// also covers fields changed after the fact.
    pub fn validate(&self) -> SlotMathResult<()> {
        if self.bet == 0 {
            return Err(SlotMathError::InvalidConfig("bet must be positive".into()));
        }
        if self.win_cap_multiplier == 0 {
            return Err(SlotMathError::InvalidConfig(
                "win cap must be positive".into(),
            ));
        }
        if self.base_reels.is_empty() {
            return Err(SlotMathError::NoBaseReels);
        }
        self.pay_table.validate()?;
        self.base_wilds.validate("base wild count")?;
        self.base_scatters.validate("base scatter count")?;
        self.free_games.validate()?;
        Ok(())
    }

    /// Maximum payout of one trial, in credits
    pub fn win_cap(&self) -> u64 {
        self.bet * self.win_cap_multiplier
    }

    /// Credits staked per trial
    pub fn stake(&self) -> u64 {
        self.bet * self.mode.cost_multiplier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_tables() {
        let game = GameTables::for_mode(GameMode::Normal).unwrap();
        assert_eq!(game.base_reels.len(), 2);
        assert_eq!(game.win_cap(), 100_000);
        assert_eq!(game.stake(), 10);
        assert!(game.base_scatters.count_weights.weights()[0] > 0);
    }

    #[test]
    fn test_buy_bonus_tables() {
        let game = GameTables::for_mode(GameMode::BuyBonus).unwrap();
        assert_eq!(game.stake(), 1500);
        assert_eq!(game.base_scatters.count_weights.weights()[..3], [0, 0, 0]);
        assert_eq!(
            game.free_games.levels()[0].wilds.column_weights,
            [1, 1, 1, 1, 1]
        );
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("normal".parse::<GameMode>().unwrap(), GameMode::Normal);
        assert_eq!("buy-bonus".parse::<GameMode>().unwrap(), GameMode::BuyBonus);
        assert_eq!("BUY_BONUS".parse::<GameMode>().unwrap(), GameMode::BuyBonus);
        assert!("turbo".parse::<GameMode>().is_err());
        assert_eq!(GameMode::BuyBonus.to_string(), "buy_bonus");
    }

    #[test]
    fn test_validate_rejects_zero_bet() {
        let mut game = GameTables::for_mode(GameMode::Normal).unwrap();
        game.bet = 0;
        assert!(game.validate().is_err());
        game.bet = 10;
        game.base_reels.clear();
        assert_eq!(game.validate(), Err(SlotMathError::NoBaseReels));
    }

    #[test]
    fn test_mode_serde_names() {
        let json = serde_json::to_string(&GameMode::BuyBonus).unwrap();
        assert_eq!(json, "\"buy_bonus\"");
        let mode: GameMode = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(mode, GameMode::Normal);
    }
}
