//! In-memory session record for one participant.
//!
//! Submissions are append-only events; the response map and answer history
//! are the folded view of those events. Revisiting an item overwrites the
//! recorded value, appends a back-navigation event, and does not duplicate
//! the id in the history.

use crate::config::AdaptiveConfig;
use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::item::{ItemId, Response, MAX_VALUE, MIN_VALUE};
use crate::pool::ItemPool;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Unique identifier for an assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Append-only record of a session mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub at: DateTime<Utc>,
    pub kind: SessionEventKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEventKind {
    Answered {
        item: ItemId,
        value: u8,
    },
    /// Back-navigation: a prior answer was revised.
    Revised {
        item: ItemId,
        previous: u8,
        value: u8,
    },
    Frozen,
}

/// The in-memory aggregate for one participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    /// Demographics are opaque to the core; the hosting application owns
    /// their schema.
    pub demographics: serde_json::Value,
    responses: HashMap<ItemId, Response>,
    answer_history: Vec<ItemId>,
    pending: HashSet<ItemId>,
    events: Vec<SessionEvent>,
    back_count: u32,
    frozen: bool,
    /// Hard cap on distinct answered items, enforced on submission.
    #[serde(default = "default_max_items")]
    max_items: usize,
}

fn default_max_items() -> usize {
    AdaptiveConfig::default().max_items
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            created_at: Utc::now(),
            demographics: serde_json::Value::Null,
            responses: HashMap::new(),
            answer_history: Vec::new(),
            pending: HashSet::new(),
            events: Vec::new(),
            back_count: 0,
            frozen: false,
            max_items: default_max_items(),
        }
    }

    /// A session with a non-default item cap.
    pub fn with_max_items(max_items: usize) -> Self {
        Self {
            max_items,
            ..Self::new()
        }
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Record an answer, enforcing the session invariants.
    ///
    /// Submitting an item that was already answered is a revision: the prior
    /// value is overwritten, a back-navigation event is logged, and the
    /// history keeps a single entry for the item.
    pub fn submit(
        &mut self,
        pool: &ItemPool,
        item_id: ItemId,
        value: u8,
        latency_ms: u64,
        unsure: bool,
    ) -> Result<()> {
        if self.frozen {
            return Err(Error::InvalidResponse(format!(
                "session {:?} is terminated",
                self.id.0
            )));
        }
        if !(MIN_VALUE..=MAX_VALUE).contains(&value) {
            return Err(Error::InvalidResponse(format!(
                "value {value} outside {MIN_VALUE}..={MAX_VALUE}"
            )));
        }
        if pool.item(&item_id).is_none() {
            return Err(Error::InvalidResponse(format!("unknown item {item_id}")));
        }
        // Revisions do not grow the history; only a new item counts against
        // the cap.
        if !self.responses.contains_key(&item_id) && self.answer_history.len() >= self.max_items {
            return Err(Error::InvalidResponse(format!(
                "item cap of {} answered items reached",
                self.max_items
            )));
        }

        let response = Response {
            value,
            unsure,
            latency_ms,
        };

        match self.responses.insert(item_id.clone(), response) {
            Some(previous) => {
                self.back_count += 1;
                self.events.push(SessionEvent {
                    at: Utc::now(),
                    kind: SessionEventKind::Revised {
                        item: item_id.clone(),
                        previous: previous.value,
                        value,
                    },
                });
                tracing::debug!(item = %item_id, "answer revised");
            }
            None => {
                self.answer_history.push(item_id.clone());
                self.events.push(SessionEvent {
                    at: Utc::now(),
                    kind: SessionEventKind::Answered {
                        item: item_id.clone(),
                        value,
                    },
                });
            }
        }

        self.pending.remove(&item_id);
        Ok(())
    }

    /// Freeze the session. Further submissions fail; the record becomes the
    /// input to scoring.
    pub fn freeze(&mut self) {
        if !self.frozen {
            self.frozen = true;
            self.events.push(SessionEvent {
                at: Utc::now(),
                kind: SessionEventKind::Frozen,
            });
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn response(&self, item_id: &ItemId) -> Option<&Response> {
        self.responses.get(item_id)
    }

    pub fn responses(&self) -> &HashMap<ItemId, Response> {
        &self.responses
    }

    /// Answered item ids in submission order. Revisions do not reorder.
    pub fn answer_history(&self) -> &[ItemId] {
        &self.answer_history
    }

    pub fn answered_count(&self) -> usize {
        self.answer_history.len()
    }

    pub fn is_answered(&self, item_id: &ItemId) -> bool {
        self.responses.contains_key(item_id)
    }

    /// Number of answered items drawn from a dimension.
    pub fn answered_in_dimension(&self, pool: &ItemPool, dimension: Dimension) -> usize {
        pool.items_by_dimension(dimension)
            .iter()
            .filter(|item| self.responses.contains_key(&item.id))
            .count()
    }

    /// Mark an item as proposed but not yet answered. Pending items are not
    /// proposed again until answered or cleared.
    pub fn mark_pending(&mut self, item_id: ItemId) {
        self.pending.insert(item_id);
    }

    pub fn clear_pending(&mut self, item_id: &ItemId) {
        self.pending.remove(item_id);
    }

    pub fn is_pending(&self, item_id: &ItemId) -> bool {
        self.pending.contains(item_id)
    }

    pub fn back_count(&self) -> u32 {
        self.back_count
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
