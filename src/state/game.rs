//! Normalized in-memory representation of a trivia game.
//!
//! Both the spreadsheet and the archive importers terminate here: a
//! [`GameData`] is built once per retrieval and only its cached image bytes
//! change afterwards.

use std::fmt;

use thiserror::Error;

/// Number of categories on a regular board.
pub const CATEGORY_COUNT: usize = 6;
/// Number of clue rows per category.
pub const ROW_COUNT: usize = 5;
/// Point values indexed by round then row.
pub const POINT_VALUES: [[u32; ROW_COUNT]; 2] = [
    [200, 400, 600, 800, 1000],
    [400, 800, 1200, 1600, 2000],
];

/// Regular round of a game. The final round has its own board type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Round {
    /// First round, lower point values.
    Single,
    /// Second round, doubled point values.
    Double,
}

impl Round {
    /// Regular rounds in play order.
    pub const ALL: [Round; 2] = [Round::Single, Round::Double];

    /// Zero-based index of the round inside [`GameData::boards`].
    pub fn index(self) -> usize {
        match self {
            Round::Single => 0,
            Round::Double => 1,
        }
    }

    /// Point value of a clue on `row` in this round.
    pub fn point_value(self, row: usize) -> Option<u32> {
        POINT_VALUES[self.index()].get(row).copied()
    }

    /// Round following this one, `None` after the double round.
    pub fn next(self) -> Option<Round> {
        match self {
            Round::Single => Some(Round::Double),
            Round::Double => None,
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Round::Single => f.write_str("single"),
            Round::Double => f.write_str("double"),
        }
    }
}

/// Cell of a board: category column and clue row, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Category (column) index.
    pub category: usize,
    /// Row index, 0 being the cheapest clue.
    pub row: usize,
}

impl Position {
    /// Build a position from zero-based coordinates.
    pub fn new(category: usize, row: usize) -> Self {
        Self { category, row }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.category, self.row)
    }
}

/// Media link attached to a clue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLink {
    /// Still image shown alongside (or instead of) the clue text.
    Image(String),
    /// Video clip played when the clue is revealed.
    Video(String),
}

/// A single clue with its answer and display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Location on the board; `(0, 0)` for the final clue.
    pub position: Position,
    /// Prompt shown to the players.
    pub text: String,
    /// Expected response.
    pub answer: String,
    /// Name of the owning category.
    pub category: String,
    /// Link to an image illustrating the clue.
    pub image_link: Option<String>,
    /// Image bytes, fetched lazily the first time the clue is displayed.
    pub image: Option<Vec<u8>>,
    /// Link to a video clip for the clue.
    pub video_link: Option<String>,
    /// Point value, absent for the final clue.
    pub value: Option<u32>,
    /// Whether the clue is a daily double.
    pub daily_double: bool,
}

impl Question {
    /// Create a question without media, value or daily-double flag.
    pub fn new(
        position: Position,
        text: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            position,
            text: text.into(),
            answer: answer.into(),
            category: category.into(),
            image_link: None,
            image: None,
            video_link: None,
            value: None,
            daily_double: false,
        }
    }

    /// Attach the point value.
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the daily-double flag.
    pub fn with_daily_double(mut self, daily_double: bool) -> Self {
        self.daily_double = daily_double;
        self
    }

    /// Route an optional media link to the image or video slot.
    pub fn with_media(mut self, media: Option<MediaLink>) -> Self {
        match media {
            Some(MediaLink::Image(link)) => self.image_link = Some(link),
            Some(MediaLink::Video(link)) => self.video_link = Some(link),
            None => {}
        }
        self
    }

    /// Store fetched image bytes for later displays.
    pub fn cache_image(&mut self, bytes: Vec<u8>) {
        self.image = Some(bytes);
    }
}

/// Violations of the board layout invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected {expected} categories, got {actual}")]
    CategoryCount { expected: usize, actual: usize },
    #[error("clue position {0} is outside the board")]
    OutOfBounds(Position),
    #[error("clue position {0} appears more than once")]
    DuplicatePosition(Position),
}

/// One regular round: six categories and up to thirty clues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    round: Round,
    categories: Vec<String>,
    questions: Vec<Question>,
}

impl Board {
    /// Build a board, checking the category count and that every clue sits on
    /// a distinct cell inside the grid.
    pub fn new(
        round: Round,
        categories: Vec<String>,
        questions: Vec<Question>,
    ) -> Result<Self, BoardError> {
        if categories.len() != CATEGORY_COUNT {
            return Err(BoardError::CategoryCount {
                expected: CATEGORY_COUNT,
                actual: categories.len(),
            });
        }

        let mut seen = [[false; ROW_COUNT]; CATEGORY_COUNT];
        for question in &questions {
            let Position { category, row } = question.position;
            if category >= CATEGORY_COUNT || row >= ROW_COUNT {
                return Err(BoardError::OutOfBounds(question.position));
            }
            if std::mem::replace(&mut seen[category][row], true) {
                return Err(BoardError::DuplicatePosition(question.position));
            }
        }

        Ok(Self {
            round,
            categories,
            questions,
        })
    }

    /// Round this board belongs to.
    pub fn round(&self) -> Round {
        self.round
    }

    /// Category names in column order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Clues in the order they were imported.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Clue at `position`, if the board has one there.
    pub fn question(&self, position: Position) -> Option<&Question> {
        self.questions.iter().find(|q| q.position == position)
    }

    fn question_mut(&mut self, position: Position) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.position == position)
    }
}

/// Final round: a single category and clue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalBoard {
    /// Category name.
    pub category: String,
    /// The final clue, without value or daily-double flag.
    pub question: Question,
}

impl FinalBoard {
    /// Build the final board, stripping any value or daily-double flag.
    pub fn new(category: impl Into<String>, mut question: Question) -> Self {
        question.value = None;
        question.daily_double = false;
        Self {
            category: category.into(),
            question,
        }
    }
}

/// Reference to a clue anywhere in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClueRef {
    /// Clue on a regular board.
    Board {
        /// Round of the board.
        round: Round,
        /// Cell on that board.
        position: Position,
    },
    /// The final clue.
    Final,
}

/// A fully normalized game: two regular boards and the final round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameData {
    boards: Vec<Board>,
    final_board: FinalBoard,
    date: String,
    comments: String,
}

impl GameData {
    /// Assemble a game from its single and double boards and final round.
    pub fn new(
        single: Board,
        double: Board,
        final_board: FinalBoard,
        date: impl Into<String>,
        comments: impl Into<String>,
    ) -> Self {
        Self {
            boards: vec![single, double],
            final_board,
            date: date.into(),
            comments: comments.into(),
        }
    }

    /// Regular boards in round order.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Board of the given round.
    pub fn board(&self, round: Round) -> &Board {
        &self.boards[round.index()]
    }

    /// Final round board.
    pub fn final_board(&self) -> &FinalBoard {
        &self.final_board
    }

    /// Air date as printed by the source.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Free-text comments attached to the game.
    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// Look up any clue of the game.
    pub fn question(&self, clue: ClueRef) -> Option<&Question> {
        match clue {
            ClueRef::Board { round, position } => self.board(round).question(position),
            ClueRef::Final => Some(&self.final_board.question),
        }
    }

    /// Mutable access to a clue, used to cache fetched image bytes.
    pub fn question_mut(&mut self, clue: ClueRef) -> Option<&mut Question> {
        match clue {
            ClueRef::Board { round, position } => {
                self.boards[round.index()].question_mut(position)
            }
            ClueRef::Final => Some(&mut self.final_board.question),
        }
    }
}
