use std::collections::HashSet;

use tracing::{debug, warn};

use crate::model::{Catalog, MenuInput, NormalizedDish};


// Flatten the nested category -> dish input into the two projections.
// Absent or empty input is a valid initial state and yields an empty catalog.
pub fn normalize(input: Option<&MenuInput>) -> Catalog {
    let Some(input) = input else {
        debug!("no catalog supplied, starting empty");
        return Catalog::default();
    };

    let mut categories = Vec::with_capacity(input.categories.len());
    let mut seen_categories = HashSet::new();
    let mut seen_ids = HashSet::new();
    let mut dishes = Vec::new();

    for group in &input.categories {
        if seen_categories.insert(group.name.as_str()) {
            categories.push(group.name.clone());
        } else {
            warn!(category = %group.name, "category listed twice, keeping first position");
        }

        for dish in &group.dishes {
            if !seen_ids.insert(dish.id.clone()) {
                warn!(dish_id = %dish.id, name = %dish.name, "duplicate dish id dropped");
                continue;
            }

            let first = dish.sizes.first();
            dishes.push(NormalizedDish {
                id: dish.id.clone(),
                name: dish.name.clone(),
                category: group.name.clone(),
                price: first.map(|s| s.price).unwrap_or(0),
                image_url: first
                    .and_then(|s| s.image_url.clone())
                    .filter(|url| !url.trim().is_empty()),
            });
        }
    }

    debug!(categories = categories.len(), dishes = dishes.len(), "catalog normalized");
    Catalog { categories, dishes }
}

impl Catalog {
    // Parse the inbound JSON document. Malformed input is not an error:
    // it is logged and treated as an empty catalog.
    pub fn from_json(raw: &str) -> Catalog {
        if raw.trim().is_empty() {
            return Catalog::default();
        }
        match serde_json::from_str::<MenuInput>(raw) {
            Ok(input) => normalize(Some(&input)),
            Err(err) => {
                warn!(error = %err, "malformed catalog input, starting empty");
                Catalog::default()
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryGroup, DishId, DishInput, SizeInput};
    use proptest::prelude::*;

    fn dish(id: u64, name: &str, price: u64) -> DishInput {
        DishInput {
            id: DishId::from(id),
            name: name.to_string(),
            sizes: vec![SizeInput { price, image_url: None }],
        }
    }

    #[test]
    fn flattens_in_category_then_dish_order() {
        let input = MenuInput {
            categories: vec![
                CategoryGroup { name: "Main".into(), dishes: vec![dish(1, "Pizza", 500), dish(2, "Pasta", 300)] },
                CategoryGroup { name: "Drinks".into(), dishes: vec![dish(3, "Cola", 100)] },
            ],
        };
        let catalog = normalize(Some(&input));

        assert_eq!(catalog.categories, vec!["Main", "Drinks"]);
        let names: Vec<_> = catalog.dishes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Pizza", "Pasta", "Cola"]);
        assert_eq!(catalog.dishes[2].category, "Drinks");
        assert_eq!(catalog.dish(&DishId::from(2)).map(|d| d.price), Some(300));
    }

    #[test]
    fn only_first_size_counts() {
        let raw = r#"{"categories":[{"name":"Main","dishes":[
            {"id":7,"name":"Soup","sizes":[{"price":250,"imageUrl":"soup.png"},{"price":400}]},
            {"id":8,"name":"Bread","sizes":[]}
        ]}]}"#;
        let catalog = Catalog::from_json(raw);

        let soup = catalog.dish(&DishId::from(7)).unwrap();
        assert_eq!(soup.price, 250);
        assert_eq!(soup.image_url.as_deref(), Some("soup.png"));

        let bread = catalog.dish(&DishId::from(8)).unwrap();
        assert_eq!(bread.price, 0);
        assert_eq!(bread.image_url, None);
    }

    #[test]
    fn blank_image_url_counts_as_missing() {
        let raw = r#"{"categories":[{"name":"Main","dishes":[
            {"id":1,"name":"Pizza","sizes":[{"price":500,"imageUrl":""}]},
            {"id":2,"name":"Pasta","sizes":[{"price":300,"imageUrl":"  "}]}
        ]}]}"#;
        let catalog = Catalog::from_json(raw);
        assert!(catalog.dishes.iter().all(|d| d.image_url.is_none()));
    }

    #[test]
    fn absent_or_malformed_input_is_empty() {
        assert!(normalize(None).is_empty());
        assert!(Catalog::from_json("").is_empty());
        assert!(Catalog::from_json("{}").is_empty());
        assert!(Catalog::from_json("not json").is_empty());
    }

    #[test]
    fn repeated_category_and_id_are_collapsed() {
        let input = MenuInput {
            categories: vec![
                CategoryGroup { name: "Main".into(), dishes: vec![dish(1, "Pizza", 500)] },
                CategoryGroup { name: "Main".into(), dishes: vec![dish(1, "Pizza again", 900), dish(2, "Pasta", 300)] },
            ],
        };
        let catalog = normalize(Some(&input));

        assert_eq!(catalog.categories, vec!["Main"]);
        assert_eq!(catalog.dishes.len(), 2);
        assert_eq!(catalog.dish(&DishId::from(1)).unwrap().name, "Pizza");
    }

    proptest! {
        #[test]
        fn dish_count_is_preserved(sizes in proptest::collection::vec(0usize..6, 0..6)) {
            let mut next_id = 0u64;
            let categories = sizes
                .iter()
                .enumerate()
                .map(|(i, n)| CategoryGroup {
                    name: format!("cat-{i}"),
                    dishes: (0..*n)
                        .map(|_| {
                            next_id += 1;
                            dish(next_id, "dish", next_id * 10)
                        })
                        .collect(),
                })
                .collect();
            let catalog = normalize(Some(&MenuInput { categories }));

            prop_assert_eq!(catalog.dishes.len(), sizes.iter().sum::<usize>());
            prop_assert_eq!(catalog.categories.len(), sizes.len());
        }
    }
}
