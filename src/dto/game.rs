use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    dto::{format_system_time, validation::validate_game_id},
    retrieve::media::VideoClip,
    state::{
        LoadedGame,
        game::{Board, FinalBoard, Question, Round},
    },
};

/// Path parameters identifying a game to retrieve.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Path)]
pub struct GameIdPath {
    /// Archive game id (up to 6 characters) or spreadsheet file id.
    #[validate(custom(function = "validate_game_id"))]
    pub id: String,
}

/// Regular round selector used in URLs and payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoundParam {
    Single,
    Double,
}

impl From<RoundParam> for Round {
    fn from(value: RoundParam) -> Self {
        match value {
            RoundParam::Single => Round::Single,
            RoundParam::Double => Round::Double,
        }
    }
}

impl From<Round> for RoundParam {
    fn from(value: Round) -> Self {
        match value {
            Round::Single => RoundParam::Single,
            Round::Double => RoundParam::Double,
        }
    }
}

/// Path parameters addressing a clue image on a regular board.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct ClueImagePath {
    pub round: RoundParam,
    /// Zero-based category column.
    pub category: usize,
    /// Zero-based clue row.
    pub row: usize,
}

/// Game picked from the archive front page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RandomGameResponse {
    pub game_id: String,
}

/// Full projection of the installed game returned to the host.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GameSnapshot {
    pub game_id: String,
    pub date: String,
    pub comments: String,
    pub loaded_at: String,
    pub boards: Vec<BoardSnapshot>,
    pub final_round: FinalSnapshot,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BoardSnapshot {
    pub round: RoundParam,
    pub categories: Vec<String>,
    pub clues: Vec<ClueSnapshot>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClueSnapshot {
    pub category: usize,
    pub row: usize,
    pub category_name: String,
    pub text: String,
    pub answer: String,
    pub value: Option<u32>,
    pub daily_double: bool,
    pub image_link: Option<String>,
    /// Whether the image bytes are already held by the server.
    pub image_cached: bool,
    pub video: Option<VideoSummary>,
}

/// Video attached to a clue, with its playback window.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VideoSummary {
    pub link: String,
    pub video_id: Option<String>,
    pub start_secs: Option<u32>,
    pub play_secs: Option<u32>,
    pub audio_only: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FinalSnapshot {
    pub category: String,
    pub clue: ClueSnapshot,
}

impl From<&Question> for ClueSnapshot {
    fn from(question: &Question) -> Self {
        Self {
            category: question.position.category,
            row: question.position.row,
            category_name: question.category.clone(),
            text: question.text.clone(),
            answer: question.answer.clone(),
            value: question.value,
            daily_double: question.daily_double,
            image_link: question.image_link.clone(),
            image_cached: question.image.is_some(),
            video: question.video_link.as_deref().map(VideoSummary::from_link),
        }
    }
}

impl VideoSummary {
    fn from_link(link: &str) -> Self {
        match VideoClip::parse(link) {
            Some(clip) => Self {
                link: link.to_owned(),
                video_id: Some(clip.video_id),
                start_secs: clip.start_secs,
                play_secs: Some(clip.play_secs),
                audio_only: clip.audio_only,
            },
            None => Self {
                link: link.to_owned(),
                video_id: None,
                start_secs: None,
                play_secs: None,
                audio_only: false,
            },
        }
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        Self {
            round: board.round().into(),
            categories: board.categories().to_vec(),
            clues: board.questions().iter().map(Into::into).collect(),
        }
    }
}

impl From<&FinalBoard> for FinalSnapshot {
    fn from(final_board: &FinalBoard) -> Self {
        Self {
            category: final_board.category.clone(),
            clue: (&final_board.question).into(),
        }
    }
}

impl From<&LoadedGame> for GameSnapshot {
    fn from(loaded: &LoadedGame) -> Self {
        let game = &loaded.game;
        Self {
            game_id: loaded.game_id.clone(),
            date: game.date().to_owned(),
            comments: game.comments().to_owned(),
            loaded_at: format_system_time(loaded.loaded_at),
            boards: game.boards().iter().map(Into::into).collect(),
            final_round: game.final_board().into(),
        }
    }
}
