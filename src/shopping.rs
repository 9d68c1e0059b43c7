use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Currency, ItemDraft, ItemFrequency, ItemPatch, ShoppingBudget, ShoppingItem};

/// The active shopping list, the remembered frequent items, and the budget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
    recommendations: Vec<ShoppingItem>,
    budget: ShoppingBudget,
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl ShoppingList {
    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn recommendations(&self) -> &[ShoppingItem] {
        &self.recommendations
    }

    pub fn budget(&self) -> ShoppingBudget {
        self.budget
    }

    // Ids are shared between the list and the recommendations so an item
    // keeps its id when it is promoted.
    fn next_id(&self) -> u64 {
        self.items
            .iter()
            .chain(self.recommendations.iter())
            .map(|i| i.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    pub fn add(&mut self, draft: ItemDraft) -> u64 {
        let id = self.next_id();
        self.items.push(ShoppingItem {
            id,
            name: draft.name,
            cost: draft.cost,
            currency: draft.currency,
            note: draft.note,
            frequency: draft.frequency,
        });
        id
    }

    pub fn update(&mut self, id: u64, patch: &ItemPatch) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                patch.apply(item);
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != len_before
    }

    /// Takes an item off the list. A frequent item is remembered as a
    /// recommendation unless one with the same name already exists.
    pub fn mark_purchased(&mut self, id: u64) -> bool {
        let Some(idx) = self.items.iter().position(|i| i.id == id) else {
            return false;
        };
        let item = self.items.remove(idx);
        if item.frequency == ItemFrequency::Frequent
            && !self.recommendations.iter().any(|r| same_name(&r.name, &item.name))
        {
            self.recommendations.push(item);
        }
        true
    }

    /// Puts a copy of a recommendation back on the list. The recommendation
    /// itself stays remembered. Returns the id of the new list item.
    pub fn restore_recommendation(&mut self, id: u64) -> Option<u64> {
        let rec = self.recommendations.iter().find(|r| r.id == id)?.clone();
        let new_id = self.next_id();
        self.items.push(ShoppingItem { id: new_id, ..rec });
        Some(new_id)
    }

    pub fn forget_recommendation(&mut self, id: u64) -> bool {
        let len_before = self.recommendations.len();
        self.recommendations.retain(|r| r.id != id);
        self.recommendations.len() != len_before
    }

    /// Recommendations not already on the active list.
    pub fn visible_recommendations(&self) -> Vec<&ShoppingItem> {
        self.recommendations
            .iter()
            .filter(|r| !self.items.iter().any(|i| same_name(&i.name, &r.name)))
            .collect()
    }

    pub fn set_budget(&mut self, amount: f64, currency: Currency) {
        self.budget = ShoppingBudget { amount: amount.max(0.0), currency };
    }

    /// Planned spend per currency.
    pub fn totals(&self) -> BTreeMap<Currency, f64> {
        let mut m = BTreeMap::new();
        for i in &self.items {
            *m.entry(i.currency).or_insert(0.0) += i.cost;
        }
        m
    }

    /// Planned spend in the budget's currency.
    pub fn budget_total(&self) -> f64 {
        self.totals().get(&self.budget.currency).copied().unwrap_or(0.0)
    }

    pub fn is_over_budget(&self) -> bool {
        self.budget.amount > 0.0 && self.budget_total() > self.budget.amount
    }

    /// Budget left in its currency; negative when over.
    pub fn remaining(&self) -> f64 {
        self.budget.amount - self.budget_total()
    }

    /// Whether a single item costs more than the whole budget.
    pub fn item_over_budget(&self, item: &ShoppingItem) -> bool {
        item.currency == self.budget.currency
            && self.budget.amount > 0.0
            && item.cost > self.budget.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, cost: f64, currency: Currency, frequency: ItemFrequency) -> ItemDraft {
        ItemDraft { name: name.into(), cost, currency, note: String::new(), frequency }
    }

    #[test]
    fn frequent_items_are_promoted_once() {
        let mut s = ShoppingList::default();
        let milk = s.add(draft("Milk", 3.0, Currency::Dollar, ItemFrequency::Frequent));
        let cake = s.add(draft("Cake", 9.0, Currency::Dollar, ItemFrequency::OneTime));
        assert!(s.mark_purchased(milk));
        assert!(s.mark_purchased(cake));
        assert!(s.items().is_empty());
        assert_eq!(s.recommendations().len(), 1);
        assert_eq!(s.recommendations()[0].name, "Milk");

        let again = s.add(draft("milk", 3.5, Currency::Dollar, ItemFrequency::Frequent));
        s.mark_purchased(again);
        assert_eq!(s.recommendations().len(), 1);
        assert!(!s.mark_purchased(again));
    }

    #[test]
    fn restoring_keeps_the_recommendation_but_hides_it() {
        let mut s = ShoppingList::default();
        let milk = s.add(draft("Milk", 3.0, Currency::Dollar, ItemFrequency::Frequent));
        s.mark_purchased(milk);
        let rec = s.recommendations()[0].id;
        assert_eq!(s.visible_recommendations().len(), 1);

        let restored = s.restore_recommendation(rec).unwrap();
        assert_ne!(restored, rec);
        assert_eq!(s.items().len(), 1);
        assert_eq!(s.recommendations().len(), 1);
        assert!(s.visible_recommendations().is_empty());

        assert!(s.forget_recommendation(rec));
        assert_eq!(s.restore_recommendation(rec), None);
    }

    #[test]
    fn budget_is_tracked_in_its_own_currency() {
        let mut s = ShoppingList::default();
        s.set_budget(10.0, Currency::Euro);
        s.add(draft("Bread", 4.0, Currency::Euro, ItemFrequency::OneTime));
        let tv = s.add(draft("TV", 400.0, Currency::Dollar, ItemFrequency::OneTime));
        assert_eq!(s.budget_total(), 4.0);
        assert_eq!(s.remaining(), 6.0);
        assert!(!s.is_over_budget());
        assert_eq!(s.totals().get(&Currency::Dollar), Some(&400.0));
        // other currencies never count against the budget
        assert!(!s.item_over_budget(s.items().iter().find(|i| i.id == tv).unwrap()));

        let cheese = s.add(draft("Cheese", 12.0, Currency::Euro, ItemFrequency::OneTime));
        assert!(s.is_over_budget());
        assert!(s.item_over_budget(s.items().iter().find(|i| i.id == cheese).unwrap()));
    }

    #[test]
    fn zero_budget_is_never_exceeded() {
        let mut s = ShoppingList::default();
        s.add(draft("Rice", 5000.0, Currency::Naira, ItemFrequency::OneTime));
        assert!(!s.is_over_budget());
    }
}
