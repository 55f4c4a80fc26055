//! Players, turn order, legs and sets.

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::params::GameParams;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    /// Remaining score in the current leg.
    pub score: u32,
    /// Total of the last accepted visit.
    pub last_throw: u32,
    pub legs_won: u32,
    pub sets_won: u32,
}

impl PlayerState {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
            last_throw: 0,
            legs_won: 0,
            sets_won: 0,
        }
    }
}

/// Result of applying one visit to the current player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThrowOutcome {
    Accepted { player: usize, remaining: u32 },
    /// Total exceeded the remaining score, or would leave an uncheckable 1.
    Busted { player: usize, remaining: u32 },
    /// Exactly zero, but the last dart does not satisfy the checkout rule.
    CheckoutFailed { player: usize, remaining: u32 },
    LegWon { player: usize, set_won: bool },
}

impl ThrowOutcome {
    pub fn player(&self) -> usize {
        match *self {
            ThrowOutcome::Accepted { player, .. }
            | ThrowOutcome::Busted { player, .. }
            | ThrowOutcome::CheckoutFailed { player, .. }
            | ThrowOutcome::LegWon { player, .. } => player,
        }
    }

    /// `true` when the visit was voided and "no score" should be shown.
    pub fn is_no_score(&self) -> bool {
        matches!(
            self,
            ThrowOutcome::Busted { .. } | ThrowOutcome::CheckoutFailed { .. }
        )
    }

    /// `0` to continue, `player index + 1` when that player finished the leg.
    pub fn completion_code(&self) -> usize {
        match *self {
            ThrowOutcome::LegWon { player, .. } => player + 1,
            _ => 0,
        }
    }
}

/// Ordered players plus whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    players: Vec<PlayerState>,
    current: usize,
    leg_starter: usize,
    legs_played: u32,
    params: GameParams,
}

impl GameState {
    pub fn new<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        params: GameParams,
    ) -> Result<Self, GameError> {
        if params.starting_score < 2 {
            return Err(GameError::InvalidParams("starting_score must be at least 2"));
        }
        if params.legs_per_set == 0 {
            return Err(GameError::InvalidParams("legs_per_set must be positive"));
        }
        let players: Vec<PlayerState> = names
            .into_iter()
            .map(|n| PlayerState::new(n, params.starting_score))
            .collect();
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        Ok(Self {
            players,
            current: 0,
            leg_starter: 0,
            legs_played: 0,
            params,
        })
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn params(&self) -> &GameParams {
        &self.params
    }

    pub fn current_player(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &PlayerState {
        &self.players[self.current]
    }

    pub fn legs_played(&self) -> u32 {
        self.legs_played
    }

    /// Apply a visit `total` for the current player; `last_label` is the
    /// label of the visit's final dart.
    pub fn apply_throw(&mut self, total: u32, last_label: &str) -> ThrowOutcome {
        let player = self.current;
        let score = self.players[player].score;
        let checkout = self.params.checkout;

        let outcome = match score.checked_sub(total) {
            None => ThrowOutcome::Busted {
                player,
                remaining: score,
            },
            Some(0) if checkout.allows(last_label) => {
                let set_won = self.win_leg(player, total);
                return ThrowOutcome::LegWon { player, set_won };
            }
            Some(0) => ThrowOutcome::CheckoutFailed {
                player,
                remaining: score,
            },
            Some(1) if checkout.requires_double() => ThrowOutcome::Busted {
                player,
                remaining: score,
            },
            Some(remaining) => {
                let p = &mut self.players[player];
                p.score = remaining;
                p.last_throw = total;
                ThrowOutcome::Accepted { player, remaining }
            }
        };
        if outcome.is_no_score() {
            info!(
                "{}: no score ({total} from {score}, last dart {last_label})",
                self.players[player].name
            );
        }
        self.advance_turn();
        outcome
    }

    fn advance_turn(&mut self) {
        self.current = (self.current + 1) % self.players.len();
    }

    /// Credit the leg, roll sets over, and start the next leg.
    fn win_leg(&mut self, player: usize, total: u32) -> bool {
        let per_set = self.params.legs_per_set;
        let winner = &mut self.players[player];
        winner.last_throw = total;
        winner.legs_won += 1;
        let set_won = winner.legs_won % per_set == 0;
        info!("{} wins the leg ({} legs)", winner.name, winner.legs_won);
        if set_won {
            winner.sets_won += 1;
            info!("{} wins the set ({} sets)", winner.name, winner.sets_won);
            for p in &mut self.players {
                p.legs_won = 0;
            }
        }
        self.legs_played += 1;
        self.reset_leg();
        set_won
    }

    /// Restore starting scores; the next player in rotation opens the leg.
    pub fn reset_leg(&mut self) {
        for p in &mut self.players {
            p.score = self.params.starting_score;
        }
        self.leg_starter = (self.leg_starter + 1) % self.players.len();
        self.current = self.leg_starter;
    }
}
