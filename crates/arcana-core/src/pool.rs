//! Immutable item pool loaded from a serialized snapshot.
//!
//! Two snapshots ship with the crate: the self-report catalog (first-person
//! wording) and the friend-report catalog (third-person observable behavior).
//! The snapshot is the only compatibility surface of the pool; its schema is
//! a JSON object keyed by dimension code, each entry a list of
//! `{ item, text, reversed, correlation }`.

use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::item::{Item, ItemId};
use std::collections::{BTreeMap, HashMap};

const SELF_SNAPSHOT: &str = include_str!("../assets/items_self.json");
const FRIEND_SNAPSHOT: &str = include_str!("../assets/items_friend.json");

/// Known paraphrase pairs folded together during deduplication. Maps a
/// canonicalized paraphrase to the canonicalized form it duplicates.
const PARAPHRASES: &[(&str, &str)] = &[
    (
        "i often daydream about things that do not exist yet",
        "i often imagine things that do not exist yet",
    ),
    (
        "they keep going long after other people would stop",
        "they keep going long after others would stop",
    ),
];

/// Read-only catalog of items grouped by dimension.
#[derive(Debug, Clone)]
pub struct ItemPool {
    by_dimension: BTreeMap<Dimension, Vec<Item>>,
    by_id: HashMap<ItemId, Item>,
}

impl ItemPool {
    /// The bundled self-report catalog.
    pub fn bundled_self() -> Result<Self> {
        Self::from_snapshot(SELF_SNAPSHOT)
    }

    /// The bundled friend-report catalog (third-person wording).
    pub fn bundled_friend() -> Result<Self> {
        Self::from_snapshot(FRIEND_SNAPSHOT)
    }

    /// Load a pool from a snapshot. Performed once at process start; the
    /// pool is immutable afterwards.
    pub fn from_snapshot(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<Item>> = serde_json::from_str(json)?;

        let mut by_dimension: BTreeMap<Dimension, Vec<Item>> = BTreeMap::new();
        let mut by_id: HashMap<ItemId, Item> = HashMap::new();
        let mut seen_texts: HashMap<String, ItemId> = HashMap::new();

        for (code, entries) in raw {
            let dimension = Dimension::from_code(&code)
                .ok_or_else(|| Error::PoolFormat(format!("unknown dimension code {code:?}")))?;

            let slot = by_dimension.entry(dimension).or_default();
            for mut item in entries {
                item.dimension = dimension;

                if !(0.0..=1.0).contains(&item.correlation) {
                    return Err(Error::PoolFormat(format!(
                        "item {} has correlation {} outside [0, 1]",
                        item.id, item.correlation
                    )));
                }
                if by_id.contains_key(&item.id) {
                    return Err(Error::PoolFormat(format!("duplicate item id {}", item.id)));
                }

                let canon = canonicalize(&item.text);
                if let Some(existing) = seen_texts.get(&canon) {
                    tracing::warn!(
                        item = %item.id,
                        duplicate_of = %existing,
                        "dropping semantically duplicate item"
                    );
                    continue;
                }
                seen_texts.insert(canon, item.id.clone());

                by_id.insert(item.id.clone(), item.clone());
                slot.push(item);
            }
        }

        for dim in Dimension::ALL {
            if by_dimension.get(&dim).map_or(true, |v| v.is_empty()) {
                return Err(Error::PoolFormat(format!(
                    "dimension {dim} has no items in snapshot"
                )));
            }
        }

        tracing::info!(items = by_id.len(), "item pool loaded");
        Ok(Self { by_dimension, by_id })
    }

    /// Items loading on a dimension, in snapshot order.
    pub fn items_by_dimension(&self, dimension: Dimension) -> &[Item] {
        self.by_dimension
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.by_id.get(id)
    }

    pub fn is_reversed(&self, id: &ItemId) -> Option<bool> {
        self.by_id.get(id).map(|i| i.reversed)
    }

    pub fn correlation(&self, id: &ItemId) -> Option<f64> {
        self.by_id.get(id).map(|i| i.correlation)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.by_dimension.values().flatten()
    }
}

/// Canonicalize item text for duplicate detection: lowercase, fold
/// punctuation and whitespace, then apply the known paraphrase table.
fn canonicalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let folded = folded.split_whitespace().collect::<Vec<_>>().join(" ");

    for (paraphrase, canonical) in PARAPHRASES {
        if folded == *paraphrase {
            return (*canonical).to_string();
        }
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_pools_load() {
        let self_pool = ItemPool::bundled_self().unwrap();
        let friend_pool = ItemPool::bundled_friend().unwrap();

        for dim in Dimension::ALL {
            assert!(!self_pool.items_by_dimension(dim).is_empty());
            assert!(!friend_pool.items_by_dimension(dim).is_empty());
        }
    }

    #[test]
    fn test_correlations_in_range() {
        let pool = ItemPool::bundled_self().unwrap();
        for item in pool.iter() {
            assert!((0.0..=1.0).contains(&item.correlation), "{}", item.id);
        }
    }

    #[test]
    fn test_rejects_bad_correlation() {
        let json = r#"{
            "LUMEN": [{"item": "x_01", "text": "a", "reversed": false, "correlation": 1.5}]
        }"#;
        assert!(matches!(
            ItemPool::from_snapshot(json),
            Err(Error::PoolFormat(_))
        ));
    }

    #[test]
    fn test_rejects_missing_dimension() {
        let json = r#"{
            "LUMEN": [{"item": "x_01", "text": "a", "reversed": false, "correlation": 0.5}]
        }"#;
        assert!(matches!(
            ItemPool::from_snapshot(json),
            Err(Error::PoolFormat(_))
        ));
    }

    #[test]
    fn test_paraphrase_pair_folds_to_first_item() {
        // Two LUMEN items whose texts canonicalize to the same form; the
        // first listed survives, the paraphrase is dropped.
        let json = r#"{
            "LUMEN": [
                {"item": "l_01", "text": "I often imagine things that do not exist yet.", "reversed": false, "correlation": 0.8},
                {"item": "l_02", "text": "I often daydream about things that do not exist yet.", "reversed": false, "correlation": 0.9}
            ],
            "VESPER": [{"item": "v_01", "text": "v", "reversed": false, "correlation": 0.5}],
            "AETHER": [{"item": "a_01", "text": "a", "reversed": false, "correlation": 0.5}],
            "ORPHEUS": [{"item": "o_01", "text": "o", "reversed": false, "correlation": 0.5}],
            "CHRONOS": [{"item": "c_01", "text": "c", "reversed": false, "correlation": 0.5}],
            "TERRA": [{"item": "t_01", "text": "t", "reversed": false, "correlation": 0.5}],
            "IGNIS": [{"item": "i_01", "text": "i", "reversed": false, "correlation": 0.5}],
            "UMBRA": [{"item": "u_01", "text": "u", "reversed": false, "correlation": 0.5}]
        }"#;
        let pool = ItemPool::from_snapshot(json).unwrap();

        assert_eq!(pool.len(), 9);
        assert!(pool.item(&ItemId::from("l_01")).is_some());
        assert!(pool.item(&ItemId::from("l_02")).is_none());
        assert_eq!(pool.items_by_dimension(Dimension::Lumen).len(), 1);
    }

    #[test]
    fn test_paraphrase_fold_is_order_sensitive() {
        // Listed the other way round, the daydream wording is first seen and
        // survives instead.
        let json = r#"{
            "LUMEN": [
                {"item": "l_02", "text": "I often daydream about things that do not exist yet.", "reversed": false, "correlation": 0.9},
                {"item": "l_01", "text": "I often imagine things that do not exist yet.", "reversed": false, "correlation": 0.8}
            ],
            "VESPER": [{"item": "v_01", "text": "v", "reversed": false, "correlation": 0.5}],
            "AETHER": [{"item": "a_01", "text": "a", "reversed": false, "correlation": 0.5}],
            "ORPHEUS": [{"item": "o_01", "text": "o", "reversed": false, "correlation": 0.5}],
            "CHRONOS": [{"item": "c_01", "text": "c", "reversed": false, "correlation": 0.5}],
            "TERRA": [{"item": "t_01", "text": "t", "reversed": false, "correlation": 0.5}],
            "IGNIS": [{"item": "i_01", "text": "i", "reversed": false, "correlation": 0.5}],
            "UMBRA": [{"item": "u_01", "text": "u", "reversed": false, "correlation": 0.5}]
        }"#;
        let pool = ItemPool::from_snapshot(json).unwrap();

        assert!(pool.item(&ItemId::from("l_02")).is_some());
        assert!(pool.item(&ItemId::from("l_01")).is_none());
    }

    #[test]
    fn test_paraphrase_deduplication() {
        let pool = ItemPool::bundled_self().unwrap();
        let mut canons: Vec<String> = pool.iter().map(|i| canonicalize(&i.text)).collect();
        let before = canons.len();
        canons.sort();
        canons.dedup();
        assert_eq!(before, canons.len(), "pool contains duplicate item texts");
    }

    #[test]
    fn test_lookup_surface() {
        let pool = ItemPool::bundled_self().unwrap();
        let item = pool.items_by_dimension(Dimension::Lumen).first().unwrap();
        assert_eq!(pool.is_reversed(&item.id), Some(item.reversed));
        assert_eq!(pool.correlation(&item.id), Some(item.correlation));
        assert!(pool.item(&ItemId::from("missing_99")).is_none());
    }
}
