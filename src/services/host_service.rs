use tracing::{info, warn};

use crate::{
    dto::host::{FlowSnapshot, HostEventRequest},
    error::ServiceError,
    state::{SharedState, state_machine::GameEvent},
};

/// Apply a host action to the flow of the installed game.
pub async fn apply_event(
    state: &SharedState,
    request: HostEventRequest,
) -> Result<FlowSnapshot, ServiceError> {
    let current = state.current_game().read().await;
    let Some(loaded) = current.as_ref() else {
        return Err(ServiceError::InvalidState("no game loaded".into()));
    };

    let event = GameEvent::from(request);
    let allow_negative = state.config().settings().allow_negative;
    let mut flow = state.flow().write().await;
    let phase = match flow.apply(event.clone(), &loaded.game, allow_negative) {
        Ok(phase) => phase,
        Err(err) => {
            warn!(?event, error = %err, "host event rejected");
            return Err(err.into());
        }
    };

    info!(?event, ?phase, "host event applied");
    Ok(FlowSnapshot::new(phase, flow.scores()))
}

/// Current phase and scores.
pub async fn flow_snapshot(state: &SharedState) -> FlowSnapshot {
    let flow = state.flow().read().await;
    FlowSnapshot::new(flow.phase(), flow.scores())
}
