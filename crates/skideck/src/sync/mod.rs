//! Cross-view propagation of navigation state.
//!
//! A view publishes its `(slide index, direction)` under [`DECK_STATE_KEY`]
//! after every navigation that moves it. Sibling views apply what they
//! receive straight to their own [`ContainerState`], never through their
//! navigator, so nothing is broadcast back.

pub mod companion;
pub mod file_medium;
pub mod medium;

use std::sync::Arc;
use std::sync::mpsc::{Receiver, channel};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::deck::slide::SlideRegistry;
use crate::deck::state::{ContainerState, DeckState, NavDirection};
use crate::error::Result;
use medium::{BroadcastMedium, StorageEvent, Subscription};

/// Key under which the serialized [`DeckSyncState`] is stored.
pub const DECK_STATE_KEY: &str = "deckState";

/// Wire form of a view's navigation state.
///
/// Serialized as `{"slideIndex": 2, "direction": "Forward"}`. The index is
/// signed so that a negative value from a misbehaving peer still parses and
/// is then rejected by range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSyncState {
    pub slide_index: i64,
    #[serde(default)]
    pub direction: NavDirection,
}

impl DeckSyncState {
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// The state to apply locally, if the index is inside `registry`.
    pub fn validate(&self, registry: &SlideRegistry) -> Option<DeckState> {
        let index = usize::try_from(self.slide_index).ok()?;
        registry.get(index)?;
        Some(DeckState {
            slide_index: index,
            direction: self.direction,
        })
    }
}

impl From<&DeckState> for DeckSyncState {
    fn from(state: &DeckState) -> Self {
        Self {
            slide_index: state.slide_index as i64,
            direction: state.direction,
        }
    }
}

/// Apply a received payload to `state`. Returns whether anything was applied.
///
/// Missing, malformed and out-of-range payloads leave `state` untouched.
pub fn apply_payload(
    payload: Option<&str>,
    registry: &SlideRegistry,
    state: &mut ContainerState,
) -> bool {
    let Some(payload) = payload else {
        debug!("ignoring empty sync payload");
        return false;
    };
    let sync = match DeckSyncState::decode(payload) {
        Ok(sync) => sync,
        Err(e) => {
            warn!("ignoring malformed sync payload: {e}");
            return false;
        }
    };
    let Some(next) = sync.validate(registry) else {
        warn!(
            index = sync.slide_index,
            slides = registry.len(),
            "ignoring out-of-range sync index"
        );
        return false;
    };
    state.set(next);
    true
}

/// Writes local navigation to the medium.
#[derive(Clone)]
pub struct SyncPublisher {
    medium: Arc<dyn BroadcastMedium>,
}

impl SyncPublisher {
    pub fn new(medium: Arc<dyn BroadcastMedium>) -> Self {
        Self { medium }
    }

    /// Failures are logged; a view keeps working when its peer is gone.
    pub fn publish(&self, state: &DeckState) {
        let payload = match DeckSyncState::from(state).encode() {
            Ok(payload) => payload,
            Err(e) => {
                warn!("failed to encode deck state: {e}");
                return;
            }
        };
        if let Err(e) = self.medium.write(DECK_STATE_KEY, &payload) {
            warn!("failed to publish deck state: {e}");
        }
    }
}

/// Queues payloads other views write and applies them on the owner's thread.
///
/// The medium may call the listener from any thread; it only enqueues the raw
/// payload and calls the waker. [`SyncReceiver::drain`] does the decoding and
/// applying on the view's own event loop.
pub struct SyncReceiver {
    medium: Arc<dyn BroadcastMedium>,
    queue: Receiver<Option<String>>,
    _subscription: Subscription,
}

impl SyncReceiver {
    pub fn listen(
        medium: Arc<dyn BroadcastMedium>,
        waker: impl Fn() + Send + Sync + 'static,
    ) -> Result<Self> {
        let (tx, rx) = channel();
        let subscription = medium.subscribe(Arc::new(move |event: &StorageEvent| {
            if event.key != DECK_STATE_KEY {
                return;
            }
            if tx.send(event.new_value.clone()).is_ok() {
                waker();
            }
        }))?;

        Ok(Self {
            medium,
            queue: rx,
            _subscription: subscription,
        })
    }

    /// Apply whatever another view last published, if anything.
    pub fn catch_up(&self, registry: &SlideRegistry, state: &mut ContainerState) -> bool {
        match self.medium.read(DECK_STATE_KEY) {
            Ok(Some(payload)) => apply_payload(Some(&payload), registry, state),
            Ok(None) => false,
            Err(e) => {
                debug!("no deck state to catch up with: {e}");
                false
            }
        }
    }

    /// Apply every queued payload in arrival order. Returns how many applied.
    pub fn drain(&self, registry: &SlideRegistry, state: &mut ContainerState) -> usize {
        let mut applied = 0;
        while let Ok(payload) = self.queue.try_recv() {
            if apply_payload(payload.as_deref(), registry, state) {
                applied += 1;
            }
        }
        applied
    }
}
