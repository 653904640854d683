use std::collections::HashSet;

use indexmap::IndexMap;
use thiserror::Error;

use crate::state::game::{ClueRef, GameData, Position, Round};

/// Where the host currently is in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Game loaded, not started.
    #[default]
    Idle,
    /// A regular board is shown and the host picks the next clue.
    Board(Round),
    /// A clue is displayed and players may buzz in.
    Clue { round: Round, position: Position },
    /// The correct response of a clue is displayed.
    Answer { round: Round, position: Position },
    /// The final clue is displayed while players write their responses.
    FinalClue,
    /// The final response is displayed and players are judged.
    FinalAnswer,
    /// Final scores are shown.
    Scores,
}

/// Host verdict on a player's response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgement {
    /// Name the score is kept under.
    pub player: String,
    /// Whether the response was accepted.
    pub correct: bool,
    /// Amount at stake on daily doubles and the final clue.
    pub wager: Option<u32>,
}

/// Host actions driving the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Leave the idle phase and show the first board.
    Start,
    /// Open the clue at a board position.
    RevealClue(Position),
    /// Show the answer of the open clue.
    RevealAnswer,
    /// Score one player on the open clue.
    Judge(Judgement),
    /// Close the open clue and go back to the board.
    ReturnToBoard,
    /// Move on to the next round or the final clue.
    AdvanceRound,
    /// Show the scores, or reset once they are shown.
    End,
}

impl GameEvent {
    fn name(&self) -> &'static str {
        match self {
            GameEvent::Start => "start",
            GameEvent::RevealClue(_) => "reveal_clue",
            GameEvent::RevealAnswer => "reveal_answer",
            GameEvent::Judge(_) => "judge",
            GameEvent::ReturnToBoard => "return_to_board",
            GameEvent::AdvanceRound => "advance_round",
            GameEvent::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("event `{event}` is not allowed during {from:?}")]
pub struct InvalidTransition {
    pub from: GamePhase,
    pub event: &'static str,
}

/// Reasons a host event is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error("no clue at {0}")]
    UnknownClue(Position),
    #[error("clue at {0} was already revealed")]
    AlreadyRevealed(Position),
    #[error("a wager is required for this clue")]
    MissingWager,
    #[error("player `{0}` was already judged on this clue")]
    AlreadyJudged(String),
}

/// Phase, revealed clues and scores of the loaded game.
#[derive(Debug, Clone, Default)]
pub struct HostFlow {
    phase: GamePhase,
    revealed: HashSet<ClueRef>,
    judged: HashSet<String>,
    scores: IndexMap<String, i32>,
}

impl HostFlow {
    /// Fresh flow in the idle phase with no scores.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Scores keyed by player, in order of first judgement.
    pub fn scores(&self) -> &IndexMap<String, i32> {
        &self.scores
    }

    /// Whether a clue has already been shown.
    pub fn is_revealed(&self, clue: ClueRef) -> bool {
        self.revealed.contains(&clue)
    }

    /// Apply a host event against `game` and return the new phase.
    ///
    /// Rejected events leave the flow untouched.
    pub fn apply(
        &mut self,
        event: GameEvent,
        game: &GameData,
        allow_negative: bool,
    ) -> Result<GamePhase, FlowError> {
        let next = match (self.phase, event) {
            (GamePhase::Idle, GameEvent::Start) => GamePhase::Board(Round::Single),
            (GamePhase::Board(round), GameEvent::RevealClue(position)) => {
                let clue = ClueRef::Board { round, position };
                if game.question(clue).is_none() {
                    return Err(FlowError::UnknownClue(position));
                }
                if !self.revealed.insert(clue) {
                    return Err(FlowError::AlreadyRevealed(position));
                }
                self.judged.clear();
                GamePhase::Clue { round, position }
            }
            (GamePhase::Clue { round, position }, GameEvent::RevealAnswer) => {
                GamePhase::Answer { round, position }
            }
            (GamePhase::Clue { round, position }, GameEvent::Judge(judgement)) => {
                let question = game
                    .question(ClueRef::Board { round, position })
                    .ok_or(FlowError::UnknownClue(position))?;
                let amount = if question.daily_double {
                    judgement.wager.ok_or(FlowError::MissingWager)?
                } else {
                    question.value.unwrap_or_default()
                };
                let correct = judgement.correct;
                self.award(judgement, amount, allow_negative)?;

                // Only the selecting player answers a daily double.
                if correct || question.daily_double {
                    GamePhase::Answer { round, position }
                } else {
                    GamePhase::Clue { round, position }
                }
            }
            (GamePhase::Answer { round, .. }, GameEvent::ReturnToBoard) => GamePhase::Board(round),
            (GamePhase::Board(round), GameEvent::AdvanceRound) => match round.next() {
                Some(next) => GamePhase::Board(next),
                None => {
                    self.revealed.insert(ClueRef::Final);
                    GamePhase::FinalClue
                }
            },
            (GamePhase::FinalClue, GameEvent::RevealAnswer) => {
                self.judged.clear();
                GamePhase::FinalAnswer
            }
            (GamePhase::FinalAnswer, GameEvent::Judge(judgement)) => {
                let amount = judgement.wager.ok_or(FlowError::MissingWager)?;
                self.award(judgement, amount, allow_negative)?;
                GamePhase::FinalAnswer
            }
            (GamePhase::Board(_) | GamePhase::FinalAnswer, GameEvent::End) => GamePhase::Scores,
            (GamePhase::Scores, GameEvent::End) => {
                *self = Self::new();
                GamePhase::Idle
            }
            (from, event) => {
                return Err(InvalidTransition {
                    from,
                    event: event.name(),
                }
                .into());
            }
        };

        self.phase = next;
        Ok(next)
    }

    fn award(
        &mut self,
        judgement: Judgement,
        amount: u32,
        allow_negative: bool,
    ) -> Result<(), FlowError> {
        let Judgement {
            player, correct, ..
        } = judgement;

        if !self.judged.insert(player.clone()) {
            return Err(FlowError::AlreadyJudged(player));
        }

        let delta = i32::try_from(amount).unwrap_or(i32::MAX);
        let score = self.scores.entry(player).or_insert(0);
        *score = if correct {
            score.saturating_add(delta)
        } else {
            score.saturating_sub(delta)
        };
        if !allow_negative {
            *score = (*score).max(0);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::game::tests::sample_game;

    fn judge(player: &str, correct: bool, wager: Option<u32>) -> GameEvent {
        GameEvent::Judge(Judgement {
            player: player.into(),
            correct,
            wager,
        })
    }

    fn daily_double_game() -> GameData {
        let mut game = sample_game();
        let clue = ClueRef::Board {
            round: Round::Single,
            position: Position::new(2, 2),
        };
        game.question_mut(clue).unwrap().daily_double = true;
        game
    }

    #[test]
    fn initial_phase_is_idle() {
        assert_eq!(HostFlow::new().phase(), GamePhase::Idle);
    }

    #[test]
    fn full_happy_path_through_game() {
        let game = sample_game();
        let mut flow = HostFlow::new();
        let position = Position::new(0, 1);

        assert_eq!(
            flow.apply(GameEvent::Start, &game, true).unwrap(),
            GamePhase::Board(Round::Single)
        );
        assert_eq!(
            flow.apply(GameEvent::RevealClue(position), &game, true).unwrap(),
            GamePhase::Clue {
                round: Round::Single,
                position
            }
        );
        assert_eq!(
            flow.apply(judge("ann", false, None), &game, true).unwrap(),
            GamePhase::Clue {
                round: Round::Single,
                position
            }
        );
        assert_eq!(
            flow.apply(judge("bob", true, None), &game, true).unwrap(),
            GamePhase::Answer {
                round: Round::Single,
                position
            }
        );
        assert_eq!(
            flow.apply(GameEvent::ReturnToBoard, &game, true).unwrap(),
            GamePhase::Board(Round::Single)
        );
        assert_eq!(
            flow.apply(GameEvent::AdvanceRound, &game, true).unwrap(),
            GamePhase::Board(Round::Double)
        );
        assert_eq!(
            flow.apply(GameEvent::AdvanceRound, &game, true).unwrap(),
            GamePhase::FinalClue
        );
        assert_eq!(
            flow.apply(GameEvent::RevealAnswer, &game, true).unwrap(),
            GamePhase::FinalAnswer
        );
        flow.apply(judge("bob", true, Some(300)), &game, true).unwrap();
        assert_eq!(
            flow.apply(GameEvent::End, &game, true).unwrap(),
            GamePhase::Scores
        );

        assert_eq!(flow.scores().get("ann"), Some(&-400));
        assert_eq!(flow.scores().get("bob"), Some(&700));
        assert_eq!(flow.scores().keys().collect::<Vec<_>>(), vec!["ann", "bob"]);

        assert_eq!(flow.apply(GameEvent::End, &game, true).unwrap(), GamePhase::Idle);
        assert!(flow.scores().is_empty());
    }

    #[test]
    fn negative_scores_are_clamped_when_disallowed() {
        let game = sample_game();
        let mut flow = HostFlow::new();
        flow.apply(GameEvent::Start, &game, false).unwrap();
        flow.apply(GameEvent::RevealClue(Position::new(0, 4)), &game, false)
            .unwrap();
        flow.apply(judge("ann", false, None), &game, false).unwrap();
        assert_eq!(flow.scores().get("ann"), Some(&0));
    }

    #[test]
    fn daily_double_requires_wager() {
        let game = daily_double_game();
        let mut flow = HostFlow::new();
        flow.apply(GameEvent::Start, &game, true).unwrap();
        flow.apply(GameEvent::RevealClue(Position::new(2, 2)), &game, true)
            .unwrap();

        assert_eq!(
            flow.apply(judge("ann", true, None), &game, true).unwrap_err(),
            FlowError::MissingWager
        );
        assert_eq!(
            flow.apply(judge("ann", false, Some(1500)), &game, true).unwrap(),
            GamePhase::Answer {
                round: Round::Single,
                position: Position::new(2, 2)
            }
        );
        assert_eq!(flow.scores().get("ann"), Some(&-1500));
    }

    #[test]
    fn player_is_judged_once_per_clue() {
        let game = sample_game();
        let mut flow = HostFlow::new();
        flow.apply(GameEvent::Start, &game, true).unwrap();
        flow.apply(GameEvent::RevealClue(Position::new(1, 0)), &game, true)
            .unwrap();
        flow.apply(judge("ann", false, None), &game, true).unwrap();

        assert_eq!(
            flow.apply(judge("ann", true, None), &game, true).unwrap_err(),
            FlowError::AlreadyJudged("ann".into())
        );
        assert_eq!(flow.scores().get("ann"), Some(&-200));
    }

    #[test]
    fn clue_cannot_be_revealed_twice() {
        let game = sample_game();
        let mut flow = HostFlow::new();
        let position = Position::new(5, 4);
        flow.apply(GameEvent::Start, &game, true).unwrap();
        flow.apply(GameEvent::RevealClue(position), &game, true).unwrap();
        flow.apply(GameEvent::RevealAnswer, &game, true).unwrap();
        flow.apply(GameEvent::ReturnToBoard, &game, true).unwrap();

        assert_eq!(
            flow.apply(GameEvent::RevealClue(position), &game, true)
                .unwrap_err(),
            FlowError::AlreadyRevealed(position)
        );
        assert!(flow.is_revealed(ClueRef::Board {
            round: Round::Single,
            position
        }));
        assert_eq!(flow.phase(), GamePhase::Board(Round::Single));
    }

    #[test]
    fn unknown_clue_is_rejected() {
        let game = sample_game();
        let mut flow = HostFlow::new();
        flow.apply(GameEvent::Start, &game, true).unwrap();
        assert_eq!(
            flow.apply(GameEvent::RevealClue(Position::new(7, 0)), &game, true)
                .unwrap_err(),
            FlowError::UnknownClue(Position::new(7, 0))
        );
    }

    #[test]
    fn invalid_transition_returns_error() {
        let game = sample_game();
        let mut flow = HostFlow::new();
        let err = flow.apply(GameEvent::RevealAnswer, &game, true).unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidTransition(InvalidTransition {
                from: GamePhase::Idle,
                event: "reveal_answer",
            })
        );
        assert_eq!(flow.phase(), GamePhase::Idle);
    }

    #[test]
    fn final_judgement_requires_wager() {
        let game = sample_game();
        let mut flow = HostFlow::new();
        flow.apply(GameEvent::Start, &game, true).unwrap();
        flow.apply(GameEvent::AdvanceRound, &game, true).unwrap();
        flow.apply(GameEvent::AdvanceRound, &game, true).unwrap();
        flow.apply(GameEvent::RevealAnswer, &game, true).unwrap();
        assert_eq!(
            flow.apply(judge("ann", true, None), &game, true).unwrap_err(),
            FlowError::MissingWager
        );
    }
}
