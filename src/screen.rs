use tracing::{debug, warn};

use crate::{
    cart::{Cart, OrderPayload},
    error::OrderError,
    filter::CategoryFilter,
    model::{Catalog, DishId, MenuInput, NormalizedDish},
    search::SearchState,
};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Categories,
    Search,
}

// User actions emitted by the rendered screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddDish(DishId),
    RemoveDish(DishId),
    ToggleCategory(String),
    EnterSearch,
    ExitSearch,
    SearchInput(String),
    SubmitOrder,
}

// Side effects the event loop has to carry out after an intent
#[derive(Debug)]
pub enum Command {
    None,
    ArmSearch,
    CancelSearch,
    Submit(OrderPayload),
    Refused(OrderError),
}


// Owns all mutable screen state. Render code only reads a MenuView and sends
// back intents; `apply` turns each one into a state change plus a Command
// for the event loop.
#[derive(Debug, Clone, Default)]
pub struct MenuScreen {
    catalog: Catalog,
    cart: Cart,
    categories: CategoryFilter,
    search: SearchState,
    mode: ViewMode,
    submitting: bool,
}

impl MenuScreen {
    pub fn new(catalog: Catalog) -> Self {
        MenuScreen { catalog, ..MenuScreen::default() }
    }

    // Screen entry: whatever arrives (or nothing) becomes the catalog
    pub fn from_input(input: Option<&MenuInput>) -> Self {
        MenuScreen::new(crate::catalog::normalize(input))
    }

    pub fn apply(&mut self, intent: Intent) -> Command {
        debug!(?intent, mode = ?self.mode, "applying intent");
        match intent {
            Intent::AddDish(id) => {
                if self.catalog.dish(&id).is_none() {
                    warn!(dish_id = %id, "ignoring add of a dish that is not on the menu");
                    return Command::None;
                }
                self.cart.add(&id);
                Command::None
            }
            Intent::RemoveDish(id) => {
                self.cart.remove(&id);
                Command::None
            }
            Intent::ToggleCategory(name) => {
                if !self.catalog.categories.contains(&name) {
                    warn!(category = %name, "ignoring toggle of unknown category");
                    return Command::None;
                }
                self.categories.toggle(&name);
                Command::None
            }
            Intent::EnterSearch => {
                self.mode = ViewMode::Search;
                self.search.reset();
                Command::CancelSearch
            }
            Intent::ExitSearch => {
                self.mode = ViewMode::Categories;
                self.search.reset();
                Command::CancelSearch
            }
            Intent::SearchInput(query) => {
                if self.mode != ViewMode::Search {
                    debug!("search input outside search mode dropped");
                    return Command::None;
                }
                self.search.set_query(query);
                Command::ArmSearch
            }
            Intent::SubmitOrder => self.begin_submit(),
        }
    }

    fn begin_submit(&mut self) -> Command {
        if self.submitting {
            return Command::Refused(OrderError::InFlight);
        }
        let payload = self.cart.to_order_payload();
        if payload.is_empty() {
            return Command::Refused(OrderError::EmptyCart);
        }
        self.submitting = true;
        Command::Submit(payload)
    }

    // The in-flight flag clears no matter how the request ended
    pub fn order_settled(&mut self, outcome: &Result<(), OrderError>) {
        self.submitting = false;
        if let Err(err) = outcome {
            warn!(error = %err, "order was not delivered");
        }
    }

    // Debounce deadline passed. Returns true if the visible list changed.
    pub fn search_elapsed(&mut self) -> bool {
        if self.mode != ViewMode::Search {
            return false;
        }
        self.search.evaluate(&self.catalog)
    }

    pub fn visible_dishes(&self) -> Vec<&NormalizedDish> {
        match self.mode {
            ViewMode::Categories => self.categories.apply(&self.catalog),
            ViewMode::Search => self.search.results().iter().collect(),
        }
    }

    pub fn total_price(&self) -> u64 {
        self.cart.total_price(&self.catalog)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.categories
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn view(&self) -> MenuView {
        let total = self.total_price();
        MenuView {
            mode: self.mode,
            categories: self
                .catalog
                .categories
                .iter()
                .map(|name| CategoryChip { name: name.clone(), active: self.categories.is_active(name) })
                .collect(),
            dishes: self
                .visible_dishes()
                .into_iter()
                .map(|dish| DishRow {
                    id: dish.id.clone(),
                    name: dish.name.clone(),
                    price: dish.price,
                    image_url: dish.image_url.clone(),
                    quantity: self.cart.quantity(&dish.id),
                })
                .collect(),
            query: self.search.query().to_string(),
            total,
            submitting: self.submitting,
            can_order: total > 0 && !self.submitting,
        }
    }
}


// Read-only snapshot handed to render code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub mode: ViewMode,
    pub categories: Vec<CategoryChip>,
    pub dishes: Vec<DishRow>,
    pub query: String,
    pub total: u64,
    pub submitting: bool,
    pub can_order: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChip {
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishRow {
    pub id: DishId,
    pub name: String,
    pub price: u64,
    pub image_url: Option<String>,
    pub quantity: u32,
}
