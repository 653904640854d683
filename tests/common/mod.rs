#![allow(dead_code)]

use std::{collections::HashMap, convert::Infallible, net::SocketAddr, time::Duration};

use axum::{
    Router,
    body::Body,
    extract::Query,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tokio::net::TcpListener;

pub const REPLAYED_COMMENTS: &str = "Replayed from the latest capture.";
pub const LIVE_COMMENTS: &str = "Served by the live archive.";
pub const SHEET_ID: &str = "1_vBBsWn-EVc7npamLnOKHs34Mc2iAmd9hOGSzxHQX0Y";
/// Column A of the spreadsheet export; deliberately not the standard values.
pub const SHEET_SINGLE_VALUES: [u32; 5] = [100, 300, 500, 700, 900];
pub const SHEET_DOUBLE_VALUES: [u32; 5] = [250, 750, 1250, 1750, 2250];
pub const IMAGE_BYTES: [u8; 6] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
/// Pause between bytes of the trickled image; the whole body takes longer
/// than the image timeout.
pub const TRICKLE_GAP: Duration = Duration::from_millis(400);

const CDX_HEADER: &str =
    r#"["urlkey","timestamp","original","mimetype","statuscode","digest","length"]"#;
const OLD_CAPTURE: &str = "20190101000000";
const LATEST_CAPTURE: &str = "20210101000000";
const INCOMPLETE_CAPTURE: &str = "20220202000000";

fn clue_cell(prefix: &str, category: usize, row: usize, extra: &str) -> String {
    let id = format!("clue_{prefix}_{category}_{row}");
    format!(
        r#"<td class="clue"><table>
            <tr><td class="clue_header">{extra}</td></tr>
            <tr><td id="{id}" class="clue_text">{prefix} clue {category}-{row}</td></tr>
            <tr><td id="{id}_r" class="clue_text" style="display:none;"><em class="correct_response">{prefix} answer {category}-{row}</em></td></tr>
        </table></td>"#
    )
}

fn round_table(prefix: &str, skip: Option<(usize, usize)>) -> String {
    let mut html = String::from(r#"<table class="round"><tr>"#);
    for category in 1..=6 {
        html.push_str(&format!(
            r#"<td class="category"><table><tr><td class="category_name">{prefix} CAT {category}</td></tr></table></td>"#
        ));
    }
    html.push_str("</tr>");
    for row in 1..=5 {
        html.push_str("<tr>");
        for category in 1..=6 {
            if skip == Some((category, row)) {
                html.push_str(r#"<td class="clue"></td>"#);
                continue;
            }
            let extra = if prefix == "DJ" && (category, row) == (5, 2) {
                r#"<table><tr><td class="clue_value_daily_double">DD: $3,000</td></tr></table>"#
            } else {
                ""
            };
            html.push_str(&clue_cell(prefix, category, row, extra));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

/// Show page in the archive layout; `skip` leaves one single-round clue empty.
pub fn show_page(comments: &str, skip: Option<(usize, usize)>) -> String {
    format!(
        r#"<html><body>
        <div id="game_title"><h1>Show #7777 - Monday, January 4, 2021</h1></div>
        <div id="game_comments">{comments}</div>
        <div id="jeopardy_round">{}</div>
        <div id="double_jeopardy_round">{}</div>
        <div id="final_jeopardy_round"><table class="final_round">
            <tr><td class="category"><table><tr><td class="category_name">AUTHORS</td></tr></table></td></tr>
            <tr><td class="clue"><table>
                <tr><td id="clue_FJ" class="clue_text">He wrote "Moby-Dick".</td></tr>
                <tr><td id="clue_FJ_r" class="clue_text" style="display:none;"><em class="correct_response">Herman Melville</em></td></tr>
            </table></td></tr>
        </table></div>
        </body></html>"#,
        round_table("J", skip),
        round_table("DJ", None),
    )
}

pub fn front_page() -> String {
    r#"<html><body>
    <div class="splash_clue"><div class="splash_clue_footer"><a href="showgame.php?game_id=1111">first</a></div></div>
    <div class="splash_clue"><div class="splash_clue_footer"><a href="showgame.php?game_id=8123">second</a></div></div>
    </body></html>"#
        .to_owned()
}

/// Spreadsheet export following the game template.
pub fn template_csv() -> Vec<u8> {
    let mut grid = vec![vec![String::new(); 8]; 27];
    for (tag, header, values) in [
        ("single", 0, SHEET_SINGLE_VALUES),
        ("double", 13, SHEET_DOUBLE_VALUES),
    ] {
        for column in 0..6 {
            grid[header][1 + column] = format!("{tag} cat {column}");
            for row in 0..5 {
                grid[header + 1 + row][1 + column] = format!("{tag} clue {column}-{row}");
                grid[header + 7 + row][1 + column] = format!("{tag} answer {column}-{row}");
            }
        }
        for (row, value) in values.iter().enumerate() {
            grid[header + 1 + row][0] = value.to_string();
        }
    }
    grid[0][7] = "D3".into();
    grid[2][3] = "Watch https://youtu.be/dQw4w9WgXcQ?t=30&l=5 closely".into();
    grid[26] = vec![
        "Final".into(),
        "SCIENCE".into(),
        "It has the symbol Fe".into(),
        "What is iron?".into(),
        String::new(),
        "2024-06-01".into(),
        String::new(),
        "Office party".into(),
    ];

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in &grid {
        writer.write_record(row).unwrap();
    }
    writer.into_inner().unwrap()
}

fn cdx_row(timestamp: &str, game_id: &str) -> String {
    format!(
        r#"["com,j-archive)/showgame.php?game_id={game_id}","{timestamp}","j-archive.com/showgame.php?game_id={game_id}","text/html","200","DIGEST{timestamp}","5000"]"#
    )
}

/// Image streamed one byte at a time with a pause before each byte.
fn trickled_image() -> Response {
    let chunks = futures::stream::unfold(0, |sent| async move {
        if sent == IMAGE_BYTES.len() {
            return None;
        }
        if sent > 0 {
            tokio::time::sleep(TRICKLE_GAP).await;
        }
        Some((Ok::<_, Infallible>(vec![IMAGE_BYTES[sent]]), sent + 1))
    });
    ([(header::CONTENT_TYPE, "image/jpeg")], Body::from_stream(chunks)).into_response()
}

fn html(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], body).into_response()
}

fn json(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn upstream(uri: Uri, Query(params): Query<HashMap<String, String>>) -> Response {
    let path = uri.path();
    let game_id = params
        .get("url")
        .and_then(|url| url.rsplit_once("game_id="))
        .map(|(_, id)| id.to_owned())
        .or_else(|| params.get("game_id").cloned())
        .unwrap_or_default();

    match path {
        "/cdx/search/cdx" => match game_id.as_str() {
            "1234" => json(format!(
                "[{CDX_HEADER},{},{}]",
                cdx_row(OLD_CAPTURE, &game_id),
                cdx_row(LATEST_CAPTURE, &game_id)
            )),
            "555" => json("[]".into()),
            "777" => json(format!("[{CDX_HEADER}]")),
            "888" => json(format!("[{CDX_HEADER},{}]", cdx_row(INCOMPLETE_CAPTURE, &game_id))),
            _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        },
        "/showgame.php" => match game_id.as_str() {
            "555" | "777" => html(show_page(LIVE_COMMENTS, None)),
            _ => StatusCode::NOT_FOUND.into_response(),
        },
        "/spreadsheet/ccc" => {
            if params.get("key").map(String::as_str) == Some(SHEET_ID)
                && params.get("output").map(String::as_str) == Some("csv")
            {
                ([(header::CONTENT_TYPE, "text/csv")], template_csv()).into_response()
            } else {
                StatusCode::NOT_FOUND.into_response()
            }
        }
        "/" => html(front_page()),
        "/media/good.jpg" => ([(header::CONTENT_TYPE, "image/jpeg")], IMAGE_BYTES.to_vec()).into_response(),
        "/media/error.jpg" => html("<html><body>Not Found</body></html>".into()),
        "/media/trickle.jpg" => trickled_image(),
        "/media/slow.jpg" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            IMAGE_BYTES.to_vec().into_response()
        }
        _ if path.starts_with("/web/") => {
            let timestamp = path.split('/').nth(2).unwrap_or_default();
            if !path.ends_with("/showgame.php") {
                return StatusCode::NOT_FOUND.into_response();
            }
            match timestamp {
                LATEST_CAPTURE => html(show_page(REPLAYED_COMMENTS, None)),
                OLD_CAPTURE | INCOMPLETE_CAPTURE => html(show_page(REPLAYED_COMMENTS, Some((3, 4)))),
                _ => StatusCode::NOT_FOUND.into_response(),
            }
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Start a fake archive, Wayback and spreadsheet host.
pub async fn spawn_upstream() -> String {
    serve(Router::new().fallback(upstream)).await
}
