use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ImageDisplay, Settings};

/// Presentation settings the display clients follow.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SettingsResponse {
    pub theme: String,
    pub show_text_with_images: ImageDisplay,
    /// Lockout applied to players buzzing before the clue is fully read.
    pub early_buzz_timeout_ms: u64,
    pub allow_negative: bool,
}

impl From<&Settings> for SettingsResponse {
    fn from(settings: &Settings) -> Self {
        Self {
            theme: settings.theme.clone(),
            show_text_with_images: settings.show_text_with_images,
            early_buzz_timeout_ms: settings.early_buzz_timeout_ms,
            allow_negative: settings.allow_negative,
        }
    }
}
