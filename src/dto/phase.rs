use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{dto::game::RoundParam, state::state_machine::GamePhase};

/// Host flow phase exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PhaseSnapshot {
    /// Game loaded, not started.
    Idle,
    /// Board of a regular round is shown.
    Board { round: RoundParam },
    /// A clue is displayed.
    Clue {
        round: RoundParam,
        category: usize,
        row: usize,
    },
    /// The response to a clue is displayed.
    Answer {
        round: RoundParam,
        category: usize,
        row: usize,
    },
    /// The final clue is displayed.
    FinalClue,
    /// The final response is displayed.
    FinalAnswer,
    /// Showing final scores.
    Scores,
}

impl From<GamePhase> for PhaseSnapshot {
    fn from(value: GamePhase) -> Self {
        match value {
            GamePhase::Idle => PhaseSnapshot::Idle,
            GamePhase::Board(round) => PhaseSnapshot::Board {
                round: round.into(),
            },
            GamePhase::Clue { round, position } => PhaseSnapshot::Clue {
                round: round.into(),
                category: position.category,
                row: position.row,
            },
            GamePhase::Answer { round, position } => PhaseSnapshot::Answer {
                round: round.into(),
                category: position.category,
                row: position.row,
            },
            GamePhase::FinalClue => PhaseSnapshot::FinalClue,
            GamePhase::FinalAnswer => PhaseSnapshot::FinalAnswer,
            GamePhase::Scores => PhaseSnapshot::Scores,
        }
    }
}
