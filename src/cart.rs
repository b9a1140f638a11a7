use serde::Serialize;
use tracing::error;

use crate::model::{Catalog, DishId};


// One cart line. Quantity is always at least 1: a line that drops to zero
// is removed instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    pub dish_id: DishId,
    pub quantity: u32,
}

// In-memory cart keyed by dish id, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    // Bump the quantity, creating the line at 1 if absent
    pub fn add(&mut self, id: &DishId) -> u32 {
        match self.entries.iter_mut().find(|e| &e.dish_id == id) {
            Some(entry) => {
                entry.quantity = entry.quantity.saturating_add(1);
                entry.quantity
            }
            None => {
                self.entries.push(CartEntry { dish_id: id.clone(), quantity: 1 });
                1
            }
        }
    }

    // Drop one unit. Absent ids are a no-op; the line goes away at zero.
    pub fn remove(&mut self, id: &DishId) -> u32 {
        let Some(pos) = self.entries.iter().position(|e| &e.dish_id == id) else {
            return 0;
        };
        let entry = &mut self.entries[pos];
        entry.quantity = entry.quantity.saturating_sub(1);
        if entry.quantity == 0 {
            self.entries.remove(pos);
            0
        } else {
            entry.quantity
        }
    }

    pub fn quantity(&self, id: &DishId) -> u32 {
        self.entries
            .iter()
            .find(|e| &e.dish_id == id)
            .map(|e| e.quantity)
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Sum of price * quantity. Lines pointing at dishes missing from the
    // catalog break an internal invariant: they are reported and skipped.
    pub fn total_price(&self, catalog: &Catalog) -> u64 {
        self.entries
            .iter()
            .filter_map(|entry| match catalog.dish(&entry.dish_id) {
                Some(dish) => Some(dish.price.saturating_mul(u64::from(entry.quantity))),
                None => {
                    error!(dish_id = %entry.dish_id, "cart references a dish missing from the catalog");
                    None
                }
            })
            .fold(0u64, u64::saturating_add)
    }

    pub fn to_order_payload(&self) -> OrderPayload {
        OrderPayload {
            orders: self
                .entries
                .iter()
                .map(|e| OrderLine { dish_id: e.dish_id.clone(), amount: e.quantity })
                .collect(),
        }
    }
}


// Request body for order submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPayload {
    pub orders: Vec<OrderLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub dish_id: DishId,
    pub amount: u32,
}

impl OrderPayload {
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn total_items(&self) -> usize {
        self.orders.iter().map(|l| l.amount as usize).sum()
    }
}
