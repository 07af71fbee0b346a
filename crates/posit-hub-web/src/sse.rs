//! Server-Sent Events transport for session updates.
//!
//! Opening the stream creates the session; dropping it (browser tab closed,
//! connection lost) drops the guard captured by the stream and removes it.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::Stream;
use posit_hub_common::HubError;
use posit_hub_reactive::SessionEvent;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::state::SharedState;

/// GET /session/events — open a session and stream its events.
pub async fn session_events(
    State(state): State<SharedState>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, HubError> {
    let (handle, guard) = state.sessions.open()?;
    let rx = handle.subscribe();
    let initial = handle.initial_events().await;

    let live = BroadcastStream::new(rx).filter_map(move |result| match result {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!(session = %handle.id(), error = %e, "Session stream lagged");
            None
        }
    });

    let stream = tokio_stream::iter(initial)
        .chain(live)
        .filter_map(move |event| {
            let _session = &guard;
            to_sse_event(&event).map(Ok)
        });

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    ))
}

fn to_sse_event(event: &SessionEvent) -> Option<Event> {
    serde_json::to_string(event)
        .ok()
        .map(|data| Event::default().event(event.name()).data(data))
}
