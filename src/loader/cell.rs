//! Observable image holder
//!
//! [`ImageCell`] is the reactive endpoint of the loader: it holds the most
//! recent load outcome and broadcasts a [`LoadEvent`] whenever that outcome
//! changes. Hosts poll [`ImageCell::state`] or subscribe for push updates;
//! only the loader engine writes to it.
//!
//! The holder is three-valued. [`LoadState::Empty`] means nothing was ever
//! loaded, [`LoadState::Loaded`] carries the current data URL, and
//! [`LoadState::Failed`] records the most recent failure so hosts can tell
//! "no image yet" apart from "the pick went wrong".

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::loader::error::LoadErrorKind;

/// Identifier of a single load attempt
pub type LoadId = Uuid;

/// A successfully loaded image, ready for embedding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadedImage {
    /// `data:<mime>;base64,<payload>` string for the image bytes
    pub data_url: String,
    /// MIME type sniffed from the bytes
    pub mime: String,
    /// Size of the raw image in bytes (before base64 expansion)
    pub byte_len: usize,
    /// Name of the source the image came from, if it had one
    pub source_name: Option<String>,
    /// When the load completed (Unix millis)
    pub loaded_at: i64,
}

/// A failed load attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadFailure {
    pub kind: LoadErrorKind,
    pub message: String,
    pub source_name: Option<String>,
    /// When the failure was recorded (Unix millis)
    pub failed_at: i64,
}

/// Current contents of the holder
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    /// No load has completed yet
    #[default]
    Empty,
    /// The most recent load succeeded
    Loaded(LoadedImage),
    /// The most recent load failed
    Failed(LoadFailure),
}

impl LoadState {
    pub fn is_empty(&self) -> bool {
        matches!(self, LoadState::Empty)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    /// The current data URL, if the holder contains a loaded image
    pub fn data_url(&self) -> Option<&str> {
        match self {
            LoadState::Loaded(image) => Some(&image.data_url),
            _ => None,
        }
    }
}

/// Progress events broadcast by the holder
#[derive(Debug, Clone)]
pub enum LoadEvent {
    /// A load attempt was accepted and its read has begun
    Started {
        load_id: LoadId,
        source_name: Option<String>,
    },
    /// The attempt completed and the holder now contains this image
    Loaded { load_id: LoadId, image: LoadedImage },
    /// The attempt failed and the holder now records this failure
    Failed {
        load_id: LoadId,
        failure: LoadFailure,
    },
}

impl LoadEvent {
    /// The attempt this event belongs to
    pub fn load_id(&self) -> LoadId {
        match self {
            LoadEvent::Started { load_id, .. }
            | LoadEvent::Loaded { load_id, .. }
            | LoadEvent::Failed { load_id, .. } => *load_id,
        }
    }
}

/// Shared, observable holder for the most recent load outcome
pub struct ImageCell {
    state: RwLock<LoadState>,
    generation: AtomicU64,
    events: broadcast::Sender<LoadEvent>,
}

impl ImageCell {
    /// Create an empty holder whose event channel buffers `event_capacity`
    /// events per lagging subscriber
    pub fn new(event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity);
        Self {
            state: RwLock::new(LoadState::Empty),
            generation: AtomicU64::new(0),
            events,
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> LoadState {
        self.state.read().await.clone()
    }

    /// The current data URL, if any
    pub async fn data_url(&self) -> Option<String> {
        self.state.read().await.data_url().map(str::to_owned)
    }

    /// Monotonic counter, bumped on every settled load (success or failure).
    /// Lets pollers detect changes without comparing payloads.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Subscribe to load events. Only events sent after subscribing are
    /// delivered; slow subscribers that fall behind the channel capacity
    /// miss the oldest events.
    pub fn subscribe(&self) -> broadcast::Receiver<LoadEvent> {
        self.events.subscribe()
    }

    /// Number of live event subscribers
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    pub(crate) fn notify_started(&self, load_id: LoadId, source_name: Option<String>) {
        // Send errors just mean nobody is listening
        let _ = self.events.send(LoadEvent::Started {
            load_id,
            source_name,
        });
    }

    pub(crate) async fn set_loaded(&self, load_id: LoadId, image: LoadedImage) {
        // The write lock is held across the send so that event order always
        // matches state order: the last terminal event a subscriber sees is
        // the value the holder settled on.
        let mut state = self.state.write().await;
        *state = LoadState::Loaded(image.clone());
        self.generation.fetch_add(1, Ordering::SeqCst);
        let _ = self.events.send(LoadEvent::Loaded { load_id, image });
    }

    pub(crate) async fn set_failed(&self, load_id: LoadId, failure: LoadFailure) {
        // Same locking discipline as set_loaded
        let mut state = self.state.write().await;
        *state = LoadState::Failed(failure.clone());
        self.generation.fetch_add(1, Ordering::SeqCst);
        let _ = self.events.send(LoadEvent::Failed { load_id, failure });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> LoadedImage {
        LoadedImage {
            data_url: "data:image/png;base64,AAAA".to_string(),
            mime: "image/png".to_string(),
            byte_len: 3,
            source_name: Some("sample.png".to_string()),
            loaded_at: 1_700_000_000_000,
        }
    }

    fn sample_failure() -> LoadFailure {
        LoadFailure {
            kind: LoadErrorKind::UnrecognizedFormat,
            message: "Unrecognized image format".to_string(),
            source_name: Some("junk.bin".to_string()),
            failed_at: 1_700_000_000_000,
        }
    }

    #[tokio::test]
    async fn test_new_cell_is_empty() {
        let cell = ImageCell::new(16);
        assert!(cell.state().await.is_empty());
        assert_eq!(cell.data_url().await, None);
        assert_eq!(cell.generation(), 0);
    }

    #[tokio::test]
    async fn test_set_loaded_updates_state_and_generation() {
        let cell = ImageCell::new(16);
        let image = sample_image();

        cell.set_loaded(Uuid::new_v4(), image.clone()).await;

        assert_eq!(cell.state().await, LoadState::Loaded(image.clone()));
        assert_eq!(cell.data_url().await.as_deref(), Some(image.data_url.as_str()));
        assert_eq!(cell.generation(), 1);
    }

    #[tokio::test]
    async fn test_failed_state_is_distinct_from_empty() {
        let cell = ImageCell::new(16);
        cell.set_failed(Uuid::new_v4(), sample_failure()).await;

        let state = cell.state().await;
        assert!(state.is_failed());
        assert!(!state.is_empty());
        assert_eq!(state.data_url(), None);
        assert_eq!(cell.generation(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_receive_events_in_order() {
        let cell = ImageCell::new(16);
        let mut rx = cell.subscribe();

        let load_id = Uuid::new_v4();
        cell.notify_started(load_id, Some("sample.png".to_string()));
        cell.set_loaded(load_id, sample_image()).await;

        match rx.recv().await.unwrap() {
            LoadEvent::Started { load_id: id, .. } => assert_eq!(id, load_id),
            other => panic!("expected Started, got {:?}", other),
        }
        match rx.recv().await.unwrap() {
            LoadEvent::Loaded { load_id: id, image } => {
                assert_eq!(id, load_id);
                assert_eq!(image, sample_image());
            }
            other => panic!("expected Loaded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_multiple_subscribers_all_receive() {
        let cell = ImageCell::new(16);
        let mut rx1 = cell.subscribe();
        let mut rx2 = cell.subscribe();
        assert_eq!(cell.subscriber_count(), 2);

        cell.set_loaded(Uuid::new_v4(), sample_image()).await;

        assert!(matches!(rx1.recv().await.unwrap(), LoadEvent::Loaded { .. }));
        assert!(matches!(rx2.recv().await.unwrap(), LoadEvent::Loaded { .. }));
    }

    #[tokio::test]
    async fn test_events_before_subscribe_are_not_replayed() {
        let cell = ImageCell::new(16);
        cell.set_loaded(Uuid::new_v4(), sample_image()).await;

        let mut rx = cell.subscribe();
        assert!(rx.try_recv().is_err());
        // State is still observable even though the event was missed
        assert!(cell.state().await.is_loaded());
    }

    #[test]
    fn test_load_state_serialization_is_tagged() {
        let state = LoadState::Failed(sample_failure());
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"state\":\"failed\""));
        assert!(json.contains("\"kind\":\"unrecognized_format\""));

        let back: LoadState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
