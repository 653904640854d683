//! Import of games authored in the shared spreadsheet template.
//!
//! Layout, zero-based rows, column A being index 0:
//!
//! * a header row per round (row 0 and row 13): categories in B..G, the
//!   daily-double addresses in the last cell;
//! * five clue rows under each header, the point value in column A;
//! * five answer rows starting seven rows below the header;
//! * the final round on the last row: category, clue and answer in B..D,
//!   air date in F and comments in H.

use std::{collections::HashSet, fmt};

use tracing::{debug, info};

use crate::state::game::{
    Board, CATEGORY_COUNT, FinalBoard, GameData, Position, Question, ROW_COUNT, Round,
};

use super::{
    GameRetriever,
    error::{MalformedInput, RetrieveError, RetrieveResult},
    links::extract_link,
    media::classify_link,
};

/// Rows of string cells as exported by the spreadsheet.
pub type Grid = Vec<Vec<String>>;

const ROUND_HEADER_ROWS: [(Round, usize); 2] = [(Round::Single, 0), (Round::Double, 13)];
const VALUE_COLUMN: usize = 0;
const FIRST_CATEGORY_COLUMN: usize = 1;
const ANSWER_ROW_OFFSET: usize = 7;
const MIN_ROWS: usize = 26;

const FINAL_CATEGORY_COLUMN: usize = 1;
const FINAL_CLUE_COLUMN: usize = 2;
const FINAL_ANSWER_COLUMN: usize = 3;
const FINAL_DATE_COLUMN: usize = 5;
const FINAL_COMMENTS_COLUMN: usize = 7;

/// Spreadsheet-style address of a grid cell, displayed as e.g. `C4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index, 0 being column A.
    pub column: usize,
}

impl CellAddress {
    /// Address of the cell at zero-based `row` and `column`.
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut column = self.column + 1;
        while column > 0 {
            let rem = (column - 1) % 26;
            letters.push(char::from(b'A' + rem as u8));
            column = (column - 1) / 26;
        }
        for letter in letters.iter().rev() {
            write!(f, "{letter}")?;
        }
        write!(f, "{}", self.row + 1)
    }
}

/// Decode a CSV export into a grid, keeping short rows as they are.
pub fn parse_csv(body: &[u8]) -> Result<Grid, csv::Error> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body)
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_owned).collect()))
        .collect()
}

/// Build a game from a grid following the template.
///
/// Any missing or unparseable cell aborts the import; there is no partial
/// recovery.
pub fn grid_to_game(grid: &[Vec<String>]) -> Result<GameData, MalformedInput> {
    if grid.len() < MIN_ROWS {
        return Err(MalformedInput::TooFewRows {
            rows: grid.len(),
            expected: MIN_ROWS,
        });
    }

    let [(single_round, single_header), (double_round, double_header)] = ROUND_HEADER_ROWS;
    let single = grid_to_board(grid, single_round, single_header)?;
    let double = grid_to_board(grid, double_round, double_header)?;

    let final_row = grid.len() - 1;
    let category = cell(grid, final_row, FINAL_CATEGORY_COLUMN)?;
    let extracted = extract_link(cell(grid, final_row, FINAL_CLUE_COLUMN)?);
    let answer = cell(grid, final_row, FINAL_ANSWER_COLUMN)?;
    let question = Question::new(Position::new(0, 0), extracted.text, answer, category)
        .with_media(extracted.link.map(classify_link));

    let date = cell(grid, final_row, FINAL_DATE_COLUMN)?;
    let comments = cell(grid, final_row, FINAL_COMMENTS_COLUMN)?;

    Ok(GameData::new(
        single,
        double,
        FinalBoard::new(category, question),
        date,
        comments,
    ))
}

fn grid_to_board(
    grid: &[Vec<String>],
    round: Round,
    header: usize,
) -> Result<Board, MalformedInput> {
    let categories = (0..CATEGORY_COUNT)
        .map(|column| cell(grid, header, FIRST_CATEGORY_COLUMN + column).map(str::to_owned))
        .collect::<Result<Vec<_>, _>>()?;

    let header_row = &grid[header];
    let daily_doubles = header_row
        .last()
        .map(|list| daily_double_addresses(list))
        .ok_or(MalformedInput::MissingCell {
            address: CellAddress::new(header, 0),
        })?;

    let mut questions = Vec::with_capacity(CATEGORY_COUNT * ROW_COUNT);
    for row in 0..ROW_COUNT {
        let clue_row = header + 1 + row;
        let answer_row = header + ANSWER_ROW_OFFSET + row;
        let value = parse_value(grid, clue_row)?;

        for (column, category) in categories.iter().enumerate() {
            let address = CellAddress::new(clue_row, FIRST_CATEGORY_COLUMN + column);
            let extracted = extract_link(cell(grid, clue_row, address.column)?);
            let answer = cell(grid, answer_row, address.column)?;
            let daily_double = daily_doubles.contains(&address.to_string());
            if daily_double {
                debug!(%address, %round, "daily double");
            }

            questions.push(
                Question::new(
                    Position::new(column, row),
                    extracted.text,
                    answer,
                    category.clone(),
                )
                .with_value(value)
                .with_daily_double(daily_double)
                .with_media(extracted.link.map(classify_link)),
            );
        }
    }

    Ok(Board::new(round, categories, questions)?)
}

fn cell(grid: &[Vec<String>], row: usize, column: usize) -> Result<&str, MalformedInput> {
    grid.get(row)
        .and_then(|cells| cells.get(column))
        .map(String::as_str)
        .ok_or(MalformedInput::MissingCell {
            address: CellAddress::new(row, column),
        })
}

fn parse_value(grid: &[Vec<String>], row: usize) -> Result<u32, MalformedInput> {
    let raw = cell(grid, row, VALUE_COLUMN)?;
    raw.trim()
        .parse()
        .map_err(|_| MalformedInput::InvalidValue {
            address: CellAddress::new(row, VALUE_COLUMN),
            value: raw.to_owned(),
        })
}

fn daily_double_addresses(list: &str) -> HashSet<String> {
    list.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_ascii_uppercase)
        .collect()
}

impl GameRetriever {
    /// Download the CSV export of spreadsheet `file_id` and import it.
    pub async fn get_spreadsheet_game(&self, file_id: &str) -> RetrieveResult<GameData> {
        let url = format!("{}/spreadsheet/ccc", self.sources().sheets_base_url());
        info!(file_id, "retrieving spreadsheet game");

        let body = self
            .get_bytes(&url, &[("key", file_id), ("output", "csv")])
            .await?;
        let grid =
            parse_csv(&body).map_err(|source| RetrieveError::DecodeCsv { url, source })?;

        Ok(grid_to_game(&grid)?)
    }
}
