pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod order;
pub mod random;
pub mod render;
pub mod screen;
pub mod search;
pub mod session;

pub use cart::{Cart, OrderPayload};
pub use error::OrderError;
pub use model::{Catalog, DishId, MenuInput, NormalizedDish};
pub use screen::{Intent, MenuScreen, MenuView};
