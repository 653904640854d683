//! Classification of clue media links and YouTube clip parameters.

use std::time::Duration;

use reqwest::Url;

use crate::state::game::MediaLink;

/// Connect and read timeout of the best-effort image fetch.
pub const IMAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(1);
/// Seconds a clip plays when the link does not say otherwise.
pub const DEFAULT_PLAY_SECS: u32 = 10;

/// Decide whether `link` points at a video or an image.
pub fn classify_link(link: String) -> MediaLink {
    if youtube_host(&link).is_some() {
        MediaLink::Video(link)
    } else {
        MediaLink::Image(link)
    }
}

fn youtube_host(link: &str) -> Option<Url> {
    let url = Url::parse(link).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    (host.contains("youtube.com") || host.contains("youtu.be")).then_some(url)
}

/// Playback parameters encoded in a YouTube link.
///
/// Besides the video id, links may carry `t` (start second), `l` (how many
/// seconds to play) and `a=1` (audio only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoClip {
    /// YouTube video id.
    pub video_id: String,
    /// Second to start playback at.
    pub start_secs: Option<u32>,
    /// Seconds to play before stopping.
    pub play_secs: u32,
    /// Hide the picture and play the sound only.
    pub audio_only: bool,
}

impl VideoClip {
    /// Parse a `youtu.be/<id>` or `youtube.com/watch?v=<id>` link.
    pub fn parse(link: &str) -> Option<Self> {
        let url = youtube_host(link)?;
        let host = url.host_str()?.to_ascii_lowercase();

        let mut video_id = None;
        let mut start_secs = None;
        let mut play_secs = DEFAULT_PLAY_SECS;
        let mut audio_only = false;

        if host.contains("youtu.be") {
            let id = url.path().trim_matches('/');
            if !id.is_empty() {
                video_id = Some(id.to_owned());
            }
        }

        for (key, value) in url.query_pairs() {
            match &*key {
                "v" if video_id.is_none() && host.contains("youtube.com") => {
                    video_id = Some(value.into_owned());
                }
                "t" => start_secs = parse_digits(&value).or(start_secs),
                "l" => play_secs = parse_digits(&value).unwrap_or(play_secs),
                "a" => audio_only = value == "1",
                _ => {}
            }
        }

        Some(Self {
            video_id: video_id?,
            start_secs,
            play_secs,
            audio_only,
        })
    }
}

fn parse_digits(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Reject payloads that are error pages rather than image data.
pub fn looks_like_image(body: &[u8]) -> bool {
    if body.is_empty() {
        return false;
    }
    let lowered = body.to_ascii_lowercase();
    !contains(&lowered, b"html") && !contains(body, b"Not Found")
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Content type to serve cached image bytes with, guessed from the link.
pub fn image_content_type(link: &str) -> &'static str {
    let path = Url::parse(link)
        .map(|url| url.path().to_ascii_lowercase())
        .unwrap_or_else(|_| link.to_ascii_lowercase());

    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
