use crate::model::{Catalog, NormalizedDish};


// Active category selection. Empty means no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    active: Vec<String>,
}

impl CategoryFilter {
    // Select the category if it is off, deselect it if it is on
    pub fn toggle(&mut self, category: &str) -> bool {
        if let Some(pos) = self.active.iter().position(|c| c == category) {
            self.active.remove(pos);
            false
        } else {
            self.active.push(category.to_string());
            true
        }
    }

    pub fn is_active(&self, category: &str) -> bool {
        self.active.iter().any(|c| c == category)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    // Dishes in any selected category, or every dish when nothing is selected
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a NormalizedDish> {
        if self.active.is_empty() {
            return catalog.dishes.iter().collect();
        }
        catalog
            .dishes
            .iter()
            .filter(|dish| self.is_active(&dish.category))
            .collect()
    }
}
