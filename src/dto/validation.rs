//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest accepted player name, in characters.
const MAX_PLAYER_NAME_LEN: usize = 40;

/// Validates a game identifier: non-empty ASCII alphanumerics, `-` or `_`.
///
/// # Examples
///
/// ```ignore
/// validate_game_id("1234") // Ok
/// validate_game_id("1_vBBsWn-EVc7npamLnOKHs34Mc2iAmd9hOGSzxHQX0Y") // Ok
/// validate_game_id("12/34") // Err - separator
/// ```
pub fn validate_game_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        let mut err = ValidationError::new("game_id_length");
        err.message = Some("Game ID must not be empty".into());
        return Err(err);
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        let mut err = ValidationError::new("game_id_format");
        err.message =
            Some("Game ID must contain only ASCII letters, digits, '-' or '_'".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a player name is non-blank and reasonably short.
pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("player_name_empty");
        err.message = Some("Player name must not be blank".into());
        return Err(err);
    }

    let len = name.chars().count();
    if len > MAX_PLAYER_NAME_LEN {
        let mut err = ValidationError::new("player_name_length");
        err.message = Some(
            format!("Player name must be at most {MAX_PLAYER_NAME_LEN} characters (got {len})")
                .into(),
        );
        return Err(err);
    }

    Ok(())
}
