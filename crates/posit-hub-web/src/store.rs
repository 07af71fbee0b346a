//! Registry of live sessions, one per open event stream.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use posit_hub_common::{HubError, Result};
use posit_hub_reactive::{InputUpdate, Session, SessionEvent, SessionSnapshot};
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

const EVENT_BUFFER: usize = 64;

/// A session plus the channel feeding its event stream.
pub struct SessionHandle {
    id: Uuid,
    session: Mutex<Session>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Apply an update, push the resulting events to the stream and return them.
    pub async fn apply(&self, update: InputUpdate) -> Result<Vec<SessionEvent>> {
        let input = update.id().to_string();
        // Held across the sends so the stream sees events in state-change order
        let mut session = self.session.lock().await;
        let events = session.apply(update)?;
        tracing::debug!(session = %self.id, input = %input, events = events.len(), "Input applied");
        for event in &events {
            // No receiver just means the stream is between reconnects
            let _ = self.events.send(event.clone());
        }
        Ok(events)
    }

    pub async fn initial_events(&self) -> Vec<SessionEvent> {
        self.session.lock().await.initial_events()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<SessionHandle>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session. It lives until the returned guard is dropped.
    pub fn open(&self) -> Result<(Arc<SessionHandle>, SessionGuard)> {
        let id = Uuid::new_v4();
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let handle = Arc::new(SessionHandle { id, session: Mutex::new(Session::new(id)?), events });

        let active = {
            let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
            sessions.insert(id, handle.clone());
            sessions.len()
        };
        tracing::info!(session = %id, active, "Session opened");

        Ok((handle, SessionGuard { id, store: self.clone() }))
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<SessionHandle>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(HubError::SessionNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(&self, id: Uuid) {
        let active = {
            let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
            sessions.remove(&id);
            sessions.len()
        };
        tracing::info!(session = %id, active, "Session closed");
    }
}

/// Removes its session from the store on drop.
pub struct SessionGuard {
    id: Uuid,
    store: SessionStore,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.store.remove(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posit_hub_reactive::controls::{CHAT_INPUT, CHAT_RESPONSE, SEND_CHAT, UPLOAD_DOCS, UPLOAD_STATUS};
    use posit_hub_reactive::FileDescriptor;

    #[test]
    fn test_guard_drop_removes_session() {
        let store = SessionStore::new();
        let (handle, guard) = store.open().unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get(handle.id()).is_ok());

        drop(guard);
        assert!(store.is_empty());
        assert!(matches!(store.get(handle.id()), Err(HubError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_apply_broadcasts_events() {
        let store = SessionStore::new();
        let (handle, _guard) = store.open().unwrap();
        let mut rx = handle.subscribe();

        handle
            .apply(InputUpdate::Text { id: CHAT_INPUT.into(), value: "hello".into() })
            .await
            .unwrap();
        let events = handle.apply(InputUpdate::Click { id: SEND_CHAT.into() }).await.unwrap();
        assert_eq!(events.len(), 1);

        let pushed = rx.recv().await.unwrap();
        assert_eq!(
            pushed,
            SessionEvent::Output { id: CHAT_RESPONSE.into(), value: "[Placeholder] You asked: hello".into() }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_applies_stream_in_state_order() {
        let store = SessionStore::new();
        let (handle, _guard) = store.open().unwrap();
        let mut rx = handle.subscribe();

        let tasks: Vec<_> = (1..=16u64)
            .map(|n| {
                let handle = handle.clone();
                tokio::spawn(async move {
                    let files = (0..n).map(|i| FileDescriptor::new(format!("doc{i}.pdf"), i)).collect();
                    handle.apply(InputUpdate::Files { id: UPLOAD_DOCS.into(), files }).await.unwrap()
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let mut last = None;
        while let Ok(event) = rx.try_recv() {
            last = Some(event);
        }
        let final_status = handle.snapshot().await.outputs[UPLOAD_STATUS].clone();
        assert_eq!(
            last,
            Some(SessionEvent::Output { id: UPLOAD_STATUS.into(), value: final_status })
        );
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let (a, _ga) = store.open().unwrap();
        let (b, _gb) = store.open().unwrap();
        assert_ne!(a.id(), b.id());

        a.apply(InputUpdate::Text { id: CHAT_INPUT.into(), value: "only in a".into() }).await.unwrap();
        a.apply(InputUpdate::Click { id: SEND_CHAT.into() }).await.unwrap();

        let snap_b = b.snapshot().await;
        assert_eq!(snap_b.outputs[CHAT_RESPONSE], "");
        assert_eq!(
            snap_b.inputs[CHAT_INPUT],
            posit_hub_reactive::InputValue::Text(String::new())
        );
    }
}
