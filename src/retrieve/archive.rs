//! Import of games from J! Archive show pages, live or replayed from the
//! Wayback Machine.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::state::game::{Board, FinalBoard, GameData, Position, Question, Round};

use super::{
    GameRetriever,
    error::{IncompleteGame, MalformedInput, RetrieveError, RetrieveResult},
    media::classify_link,
};

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- \w+, (.*?)$").expect("date pattern compiles"));
static ANSWER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"correct_response\\?">(.*?)</em"#).expect("answer pattern compiles")
});
static MEDIA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bhttps://www\.j-archive\.com\b[^"]*"#).expect("media pattern compiles")
});

struct Selectors {
    title: Selector,
    comments: Selector,
    round: Selector,
    final_round: Selector,
    category: Selector,
    category_name: Selector,
    clue: Selector,
    clue_text: Selector,
    daily_double: Selector,
    splash_footer: Selector,
    link: Selector,
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| {
    let parse = |css: &str| Selector::parse(css).expect("selector parses");
    Selectors {
        title: parse("#game_title > h1"),
        comments: parse("#game_comments"),
        round: parse(".round"),
        final_round: parse(".final_round"),
        category: parse(".category"),
        category_name: parse(".category_name"),
        clue: parse(".clue"),
        clue_text: parse(".clue_text"),
        daily_double: parse(".clue_value_daily_double"),
        splash_footer: parse(".splash_clue_footer"),
        link: parse("a"),
    }
});

/// Parse a show page into a game.
///
/// Pages with missing clue text are common in the archive; they yield
/// [`IncompleteGame`] instead of a partially filled board.
pub fn parse_game_page(html: &str) -> RetrieveResult<GameData> {
    let document = Html::parse_document(html);
    let sel = &*SELECTORS;

    let date = document
        .select(&sel.title)
        .next()
        .and_then(|heading| heading.text().next())
        .and_then(|title| DATE_PATTERN.captures(title.trim()))
        .and_then(|captures| captures.get(1))
        .map(|date| date.as_str().to_owned())
        .ok_or(IncompleteGame::MissingTitle)?;

    let comments = document
        .select(&sel.comments)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let rounds = document.select(&sel.round).take(2).collect::<Vec<_>>();
    let [single, double] = rounds[..] else {
        info!(found = rounds.len(), "game is incomplete: missing rounds");
        return Err(IncompleteGame::MissingRound {
            found: rounds.len(),
        }
        .into());
    };

    let single = parse_round(Round::Single, single)?;
    let double = parse_round(Round::Double, double)?;
    let final_board = parse_final_round(&document)?;

    Ok(GameData::new(single, double, final_board, date, comments))
}

fn parse_round(round: Round, element: ElementRef<'_>) -> RetrieveResult<Board> {
    let sel = &*SELECTORS;

    let categories = element
        .select(&sel.category)
        .map(|category| {
            category
                .select(&sel.category_name)
                .next()
                .map(element_text)
                .unwrap_or_default()
        })
        .collect::<Vec<_>>();

    let mut questions = Vec::new();
    for clue in element.select(&sel.clue) {
        let Some(text_element) = clue.select(&sel.clue_text).next() else {
            info!(%round, "game is incomplete: clue without text");
            return Err(IncompleteGame::MissingClueText { round }.into());
        };

        let id = text_element.value().attr("id").unwrap_or_default();
        let position = clue_position(id).ok_or_else(|| MalformedInput::ClueId { id: id.to_owned() })?;
        let category = categories
            .get(position.category)
            .cloned()
            .ok_or(MalformedInput::UnknownCategory { position })?;
        let answer = find_answer(clue).ok_or(MalformedInput::MissingAnswer { position })?;
        let daily_double = clue.select(&sel.daily_double).next().is_some();
        let media = find_media_link(text_element);
        debug!(%round, %position, ?media, daily_double, "parsed clue");

        let mut question = Question::new(position, element_text(text_element), answer, category)
            .with_daily_double(daily_double)
            .with_media(media.map(classify_link));
        question.value = round.point_value(position.row);
        questions.push(question);
    }

    Ok(Board::new(round, categories, questions).map_err(MalformedInput::from)?)
}

fn parse_final_round(document: &Html) -> RetrieveResult<FinalBoard> {
    let sel = &*SELECTORS;

    let final_round = document
        .select(&sel.final_round)
        .next()
        .ok_or(IncompleteGame::MissingFinalRound)?;

    let category = final_round
        .select(&sel.category)
        .next()
        .and_then(|category| category.select(&sel.category_name).next())
        .map(element_text)
        .ok_or(MalformedInput::MissingFinalCategory)?;

    let Some(text_element) = final_round
        .select(&sel.clue)
        .next()
        .and_then(|clue| clue.select(&sel.clue_text).next())
    else {
        info!("game is incomplete: final clue without text");
        return Err(IncompleteGame::MissingFinalClueText.into());
    };

    let answer = find_answer(final_round).ok_or(MalformedInput::MissingFinalAnswer)?;
    let question = Question::new(
        Position::new(0, 0),
        element_text(text_element),
        answer,
        category.clone(),
    )
    .with_media(find_media_link(text_element).map(classify_link));

    Ok(FinalBoard::new(category, question))
}

/// Board position encoded in a clue id such as `clue_DJ_3_5` (1-based).
fn clue_position(id: &str) -> Option<Position> {
    let mut parts = id.rsplit('_');
    let row = parts.next()?.parse::<usize>().ok()?.checked_sub(1)?;
    let category = parts.next()?.parse::<usize>().ok()?.checked_sub(1)?;
    Some(Position::new(category, row))
}

/// Recover the correct response from the reveal markup under `element`.
///
/// Newer pages inline the response in a hidden cell; older ones carry it in
/// a mouse-over attribute, which the attribute values cover once decoded.
fn find_answer(element: ElementRef<'_>) -> Option<String> {
    let attribute_values = element
        .descendants()
        .filter_map(ElementRef::wrap)
        .flat_map(|el| {
            el.value()
                .attrs()
                .map(|(_, value)| value.to_owned())
                .collect::<Vec<_>>()
        });

    std::iter::once(element.html())
        .chain(attribute_values)
        .find_map(|markup| {
            ANSWER_PATTERN
                .captures(&markup)
                .and_then(|captures| captures.get(1))
                .map(|answer| fragment_text(answer.as_str()))
        })
}

fn find_media_link(text_element: ElementRef<'_>) -> Option<String> {
    MEDIA_PATTERN
        .find(&text_element.html())
        .map(|link| link.as_str().to_owned())
}

/// Text of a markup fragment with tags removed and entities decoded.
fn fragment_text(markup: &str) -> String {
    Html::parse_fragment(markup)
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_owned()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Game id linked from the second splash clue of the archive front page.
pub fn parse_random_game_id(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let sel = &*SELECTORS;

    let footer = document.select(&sel.splash_footer).nth(1)?;
    let href = footer.select(&sel.link).next()?.value().attr("href")?;
    let (_, query) = href.split_once("game_id=")?;
    let id = query
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>();

    (!id.is_empty()).then_some(id)
}

impl GameRetriever {
    /// Fetch and parse a show page, from `replay_url` when given, otherwise
    /// from the live archive.
    pub async fn get_archive_game(
        &self,
        game_id: &str,
        replay_url: Option<&str>,
    ) -> RetrieveResult<GameData> {
        info!(game_id, replay_url, "getting archive game");
        let html = match replay_url {
            Some(url) => self.get_text(url, &[]).await?,
            None => {
                let url = format!("{}/showgame.php", self.sources().archive_base_url());
                self.get_text(&url, &[("game_id", game_id)]).await?
            }
        };

        parse_game_page(&html)
    }

    /// Pick the id of a recently aired game from the archive front page.
    pub async fn random_game_id(&self) -> RetrieveResult<String> {
        let url = format!("{}/", self.sources().archive_base_url());
        let html = self.get_text(&url, &[]).await?;
        parse_random_game_id(&html).ok_or(RetrieveError::MissingGameLink { url })
    }
}
