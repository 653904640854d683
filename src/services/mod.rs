/// OpenAPI documentation generation.
pub mod documentation;
/// Game loading, snapshots and clue images.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Host actions driving the loaded game.
pub mod host_service;

#[cfg(test)]
pub(crate) mod testing;
