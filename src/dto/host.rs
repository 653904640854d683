//! Payloads of the host control API.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{phase::PhaseSnapshot, validation::validate_player_name},
    state::{
        game::Position,
        state_machine::{GameEvent, GamePhase, Judgement},
    },
};

/// Action requested by the host.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEventRequest {
    /// Leave the idle phase and show the first board.
    Start,
    /// Display the clue at the given cell of the current board.
    RevealClue { category: usize, row: usize },
    /// Display the correct response of the current clue.
    RevealAnswer,
    /// Record whether a player answered correctly.
    Judge {
        player: String,
        correct: bool,
        /// Required on daily doubles and the final clue.
        #[serde(default)]
        wager: Option<u32>,
    },
    /// Go back to the board after a clue.
    ReturnToBoard,
    /// Move to the next round.
    AdvanceRound,
    /// Show final scores, or close the game when they are shown.
    End,
}

impl Validate for HostEventRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let HostEventRequest::Judge { player, .. } = self {
            if let Err(e) = validate_player_name(player) {
                errors.add("player", e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<HostEventRequest> for GameEvent {
    fn from(value: HostEventRequest) -> Self {
        match value {
            HostEventRequest::Start => GameEvent::Start,
            HostEventRequest::RevealClue { category, row } => {
                GameEvent::RevealClue(Position::new(category, row))
            }
            HostEventRequest::RevealAnswer => GameEvent::RevealAnswer,
            HostEventRequest::Judge {
                player,
                correct,
                wager,
            } => GameEvent::Judge(Judgement {
                player: player.trim().to_owned(),
                correct,
                wager,
            }),
            HostEventRequest::ReturnToBoard => GameEvent::ReturnToBoard,
            HostEventRequest::AdvanceRound => GameEvent::AdvanceRound,
            HostEventRequest::End => GameEvent::End,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerScore {
    pub player: String,
    pub score: i32,
}

/// Phase and scores after a host action.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FlowSnapshot {
    pub phase: PhaseSnapshot,
    /// Players in order of first judgement.
    pub scores: Vec<PlayerScore>,
}

impl FlowSnapshot {
    pub fn new(phase: GamePhase, scores: &IndexMap<String, i32>) -> Self {
        Self {
            phase: phase.into(),
            scores: scores
                .iter()
                .map(|(player, score)| PlayerScore {
                    player: player.clone(),
                    score: *score,
                })
                .collect(),
        }
    }
}
