use rand::{Rng, SeedableRng};

use crate::model::{CategoryGroup, DishId, DishInput, MenuInput, SizeInput};

const BURGERS: [&str; 5] = ["Big Mac", "Cheeseburger", "McFish", "McCrispy", "McWrap"];
const SNACKS: [&str; 3] = ["Fries", "Nuggets", "Salad"];
const DRINKS: [&str; 4] = ["Cola", "Fanta", "Sprite", "Lipton"];


// Random generation of one dish; some dishes get no price or no picture
fn random_dish(rng: &mut impl Rng, id: u64, name: &str, price_range: std::ops::Range<u64>) -> DishInput {
    let price = if rng.gen_bool(0.1) { 0 } else { rng.gen_range(price_range) * 10 };
    let image_url = rng
        .gen_bool(0.7)
        .then(|| format!("https://img.example/dishes/{id}.png"));
    DishInput {
        id: DishId::from(id),
        name: name.to_string(),
        sizes: vec![SizeInput { price, image_url }],
    }
}

// Random generation of a category from a fixed list of names
fn random_category(
    rng: &mut impl Rng,
    next_id: &mut u64,
    name: &str,
    dishes: &[&str],
    price_range: std::ops::Range<u64>,
) -> CategoryGroup {
    let dishes = dishes
        .iter()
        .map(|dish| {
            *next_id += 1;
            random_dish(rng, *next_id, dish, price_range.clone())
        })
        .collect();
    CategoryGroup { name: name.to_string(), dishes }
}

// Generate a demo catalog; the same seed always gives the same menu
pub fn generate_menu(seed: u64) -> MenuInput {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut next_id = 0;
    MenuInput {
        categories: vec![
            random_category(&mut rng, &mut next_id, "Burgers", &BURGERS, 15..45),
            random_category(&mut rng, &mut next_id, "Snacks", &SNACKS, 8..20),
            random_category(&mut rng, &mut next_id, "Drinks", &DRINKS, 5..15),
        ],
    }
}
