//! In-memory card registry.

use crate::card::Card;
use crate::transaction::CardDefinition;
use log::debug;
use std::collections::HashMap;

/// Index of a card inside a [`CardRegistry`].
pub type CardId = usize;

/// Every card defined in a batch, in definition order.
///
/// Holder names are not unique: two `Add` lines for the same holder produce
/// two independent cards, and a transaction for that holder reaches both.
/// Lookups go through a multimap keyed by the lower-cased holder name.
#[derive(Debug, Default)]
pub struct CardRegistry {
    cards: Vec<Card>,
    by_holder: HashMap<String, Vec<CardId>>,
}

impl CardRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry with one zero-balance card per definition.
    pub fn from_definitions<'a, I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = &'a CardDefinition>,
    {
        let mut registry = Self::new();
        for def in definitions {
            registry.insert(Card::from(def));
        }
        registry
    }

    /// Adds a card and returns its id.
    pub fn insert(&mut self, card: Card) -> CardId {
        let id = self.cards.len();
        let key = normalize(&card.holder_name);

        let ids = self.by_holder.entry(key).or_default();
        if !ids.is_empty() {
            debug!(
                "Holder {} already has {} card(s); transactions will reach all of them",
                card.holder_name,
                ids.len()
            );
        }
        ids.push(id);

        self.cards.push(card);
        id
    }

    /// Ids of every card held by `name` (case-insensitive), in definition order.
    pub fn matching(&self, name: &str) -> &[CardId] {
        self.by_holder
            .get(&normalize(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterates over all cards in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(holder: &str, number: &str, limit: i64) -> CardDefinition {
        CardDefinition {
            holder_name: holder.to_string(),
            number: number.to_string(),
            limit,
        }
    }

    #[test]
    fn test_from_definitions_creates_zero_balance_cards() {
        let defs = vec![def("Tom", "4111111111111111", 1000), def("Lisa", "5454545454545454", 3000)];
        let registry = CardRegistry::from_definitions(&defs);

        assert_eq!(registry.len(), 2);
        let tom = registry.get(0).unwrap();
        assert_eq!(tom.holder_name, "Tom");
        assert_eq!(tom.limit, 1000);
        assert_eq!(tom.balance, 0);
        assert!(registry.iter().all(|c| c.balance == 0));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let defs = vec![def("Tom", "4111111111111111", 1000)];
        let registry = CardRegistry::from_definitions(&defs);

        assert_eq!(registry.matching("tom"), &[0]);
        assert_eq!(registry.matching("TOM"), &[0]);
        assert!(registry.matching("Thomas").is_empty());
    }

    #[test]
    fn test_duplicate_holders_are_kept_apart() {
        let defs = vec![
            def("Tom", "4111111111111111", 1000),
            def("Lisa", "5454545454545454", 3000),
            def("tom", "79927398713", 500),
        ];
        let registry = CardRegistry::from_definitions(&defs);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.matching("Tom"), &[0, 2]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = CardRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.matching("Tom").is_empty());
        assert!(registry.get(0).is_none());
    }
}
