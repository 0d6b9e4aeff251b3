//! Keyed store of in-progress journeys held in a user's session.
//!
//! A browser session can run several wizards at once (for example one tab
//! creating an appointment while another allocates a prisoner). Each wizard is
//! addressed by a journey identifier taken from the URL path, and each entry
//! holds one slot per journey type. The map is capped at
//! `MAX_CONCURRENT_JOURNEYS` entries; a write that breaches the cap evicts the
//! entry created longest ago.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Maximum number of journeys tracked per session.
pub const MAX_CONCURRENT_JOURNEYS: usize = 100;

/// Journey identifier used by routes without a `journey_id` path segment.
pub const DEFAULT_JOURNEY_ID: &str = "default";

/// Journey type occupying one slot of a journey entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneySlot {
    CreateAppointment,
    Allocate,
    AllocationConfirmation,
}

impl JourneySlot {
    pub fn key(&self) -> &'static str {
        match self {
            Self::CreateAppointment => "createAppointmentJourney",
            Self::Allocate => "allocateJourney",
            Self::AllocationConfirmation => "allocationConfirmation",
        }
    }
}

/// State stored in a journey slot.
pub trait JourneyData: Serialize + DeserializeOwned {
    const SLOT: JourneySlot;
}

/// One in-progress journey.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyEntry {
    /// Creation time in milliseconds since the Unix epoch.
    pub instance_unix_epoch: i64,
    #[serde(default)]
    pub slots: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JourneyMap {
    #[serde(default)]
    entries: HashMap<String, JourneyEntry>,
}

impl JourneyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, journey_id: &str) -> bool {
        self.entries.contains_key(journey_id)
    }

    /// Reads a slot of a journey.
    ///
    /// # Returns
    /// - `Some(&Value)` - The slot value
    /// - `None` - The journey is not tracked or the slot was never written
    pub fn get(&self, journey_id: &str, slot: JourneySlot) -> Option<&Value> {
        self.entries.get(journey_id)?.slots.get(slot.key())
    }

    /// Writes a slot of a journey, creating the journey if needed.
    ///
    /// A new journey is stamped with `now`. After the write, if more than
    /// `MAX_CONCURRENT_JOURNEYS` journeys are tracked, the oldest is evicted.
    ///
    /// # Arguments
    /// - `journey_id` - Identifier from the request path
    /// - `slot` - Journey type being written
    /// - `value` - Serialized journey state
    /// - `now` - Creation stamp for a new entry
    ///
    /// # Returns
    /// - `Some(String)` - Identifier of the evicted journey
    /// - `None` - Nothing was evicted
    pub fn set(
        &mut self,
        journey_id: &str,
        slot: JourneySlot,
        value: Value,
        now: DateTime<Utc>,
    ) -> Option<String> {
        self.entries
            .entry(journey_id.to_string())
            .or_insert_with(|| JourneyEntry {
                instance_unix_epoch: now.timestamp_millis(),
                slots: BTreeMap::new(),
            })
            .slots
            .insert(slot.key().to_string(), value);

        self.evict_oldest()
    }

    /// Removes one slot of a journey, leaving the entry and its stamp in place.
    pub fn clear(&mut self, journey_id: &str, slot: JourneySlot) {
        if let Some(entry) = self.entries.get_mut(journey_id) {
            entry.slots.remove(slot.key());
        }
    }

    /// Removes the journey created longest ago if the map is over capacity.
    ///
    /// Ties on the creation stamp are broken by identifier so eviction is
    /// deterministic.
    ///
    /// # Returns
    /// - `Some(String)` - Identifier of the evicted journey
    /// - `None` - The map was within capacity
    pub fn evict_oldest(&mut self) -> Option<String> {
        if self.entries.len() <= MAX_CONCURRENT_JOURNEYS {
            return None;
        }

        let oldest = self
            .entries
            .iter()
            .min_by(|(a_id, a), (b_id, b)| {
                a.instance_unix_epoch
                    .cmp(&b.instance_unix_epoch)
                    .then_with(|| a_id.cmp(b_id))
            })
            .map(|(id, _)| id.clone())?;

        self.entries.remove(&oldest);

        Some(oldest)
    }
}
