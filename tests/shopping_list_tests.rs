use meal_planner::recipe::{Ingredient, Recipe};
use meal_planner::shopping::{distribute, format_quantity, ConsolidatedItem, ShoppingList};
use rstest::rstest;

fn recipe(name: &str, servings: u32, ingredients: Vec<Ingredient>) -> Recipe {
    Recipe::new(name, name, servings, ingredients)
}

fn line(list: &[ConsolidatedItem], food: &str) -> Vec<String> {
    list.iter()
        .filter(|item| item.food == food)
        .map(|item| item.to_string())
        .collect()
}

#[test]
fn test_consolidated_list_is_idempotent() {
    let mut list = ShoppingList::new();
    list.add_recipe(
        &recipe(
            "pasta",
            4,
            vec![
                Ingredient::new("spaghetti", 500.0, Some("g")).with_category("Grains"),
                Ingredient::new("garlic", 3.0, Some("clove")).with_category("Produce"),
                Ingredient::new("salt", "to taste", None),
            ],
        ),
        1.5,
    );

    let first = list.consolidated_list();
    let second = list.consolidated_list();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_clear_resets_state() {
    let mut list = ShoppingList::new();
    list.add_recipe(&recipe("a", 2, vec![Ingredient::new("egg", 2.0, None)]), 1.0);
    list.add_recipe(&recipe("b", 2, vec![Ingredient::new("milk", 1.0, Some("cup"))]), 2.0);

    list.clear();
    assert!(list.consolidated_list().is_empty());

    list.add_recipe(&recipe("c", 2, vec![Ingredient::new("egg", 1.0, None)]), 1.0);
    assert_eq!(line(&list.consolidated_list(), "Egg"), vec!["1 unit Egg"]);
}

#[test]
fn test_additive_consolidation() {
    let mut list = ShoppingList::new();
    list.add_recipe(&recipe("bread", 4, vec![Ingredient::new("flour", 2.0, Some("cups"))]), 1.0);
    list.add_recipe(&recipe("cake", 8, vec![Ingredient::new("Flour", 1.0, Some("cups"))]), 1.0);

    let items = list.consolidated_list();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, "3");
    assert_eq!(items[0].unit, "cups");
    assert_eq!(items[0].food, "Flour");
}

#[test]
fn test_unit_mismatch_preserved() {
    let mut list = ShoppingList::new();
    list.add_recipe(&recipe("a", 4, vec![Ingredient::new("flour", 2.0, Some("cups"))]), 1.0);
    list.add_recipe(&recipe("b", 4, vec![Ingredient::new("flour", 500.0, Some("g"))]), 1.0);

    let mut lines = line(&list.consolidated_list(), "Flour");
    lines.sort();
    assert_eq!(lines, vec!["2 cups Flour", "500 g Flour"]);
}

#[rstest]
#[case(20, vec![2.0, 2.0])]
#[case(5, vec![1.0, 1.0])]
#[case(10, vec![1.0, 1.0])]
#[case(15, vec![1.5, 1.5])]
fn test_distribution_scales_up_only(#[case] target: u32, #[case] expected: Vec<f64>) {
    let recipes = vec![recipe("a", 4, vec![]), recipe("b", 6, vec![])];
    let multipliers = distribute(&recipes, target).unwrap();
    assert_eq!(multipliers, expected);

    let produced: f64 = recipes
        .iter()
        .zip(&multipliers)
        .map(|(r, m)| f64::from(r.servings) * m)
        .sum();
    assert!(produced >= f64::from(target));
}

#[test]
fn test_scaled_quantities_flow_into_list() {
    let recipes = vec![
        recipe("tacos", 4, vec![Ingredient::new("tortilla", 8.0, None).with_category("Bakery")]),
        recipe("chili", 6, vec![Ingredient::new("beans", 2.5, Some("can")).with_category("Pantry")]),
    ];

    let mut list = ShoppingList::new();
    let multipliers = list.rebuild_from(&recipes, 20).unwrap();
    assert_eq!(multipliers, vec![2.0, 2.0]);

    let items = list.consolidated_list();
    assert_eq!(line(&items, "Tortilla"), vec!["16 unit Tortilla"]);
    assert_eq!(line(&items, "Beans"), vec!["5 can Beans"]);
}

#[rstest]
#[case(2.50, "2.5")]
#[case(3.00, "3")]
fn test_quantity_formatting(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(format_quantity(value), expected);
}

#[test]
fn test_sorted_by_category_then_food() {
    let mut list = ShoppingList::new();
    list.add_recipe(
        &recipe(
            "breakfast",
            2,
            vec![
                Ingredient::new("banana", 2.0, None).with_category("Produce"),
                Ingredient::new("yogurt", 1.0, Some("cup")).with_category("Dairy"),
                Ingredient::new("apple", 1.0, None).with_category("Produce"),
                Ingredient::new("milk", 2.0, Some("cup")).with_category("Dairy"),
            ],
        ),
        1.0,
    );

    let order: Vec<(String, String)> = list
        .consolidated_list()
        .into_iter()
        .map(|item| (item.category, item.food))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Dairy".to_string(), "Milk".to_string()),
            ("Dairy".to_string(), "Yogurt".to_string()),
            ("Produce".to_string(), "Apple".to_string()),
            ("Produce".to_string(), "Banana".to_string()),
        ]
    );
}

#[test]
fn test_non_numeric_fallback_keeps_both_amounts() {
    let mut list = ShoppingList::new();
    list.add_recipe(&recipe("soup", 4, vec![Ingredient::new("salt", "to taste", None)]), 2.0);
    list.add_recipe(&recipe("stew", 4, vec![Ingredient::new("salt", 1.0, None)]), 1.0);

    let items = list.consolidated_list();
    assert_eq!(items.len(), 1);
    assert!(items[0].quantity.contains("to taste"));
    assert!(items[0].quantity.contains('1'));
}

#[test]
fn test_missing_unit_and_category_defaults() {
    let mut list = ShoppingList::new();
    list.add_recipe(&recipe("a", 1, vec![Ingredient::new("  Lemon ", 1.0, Some("  "))]), 1.0);

    let items = list.consolidated_list();
    assert_eq!(items[0].unit, "unit");
    assert_eq!(items[0].category, "Other");
    assert_eq!(items[0].food, "Lemon");
}

#[test]
fn test_blank_quantity_does_not_leave_empty_note() {
    let mut list = ShoppingList::new();
    list.add_recipe(&recipe("soup", 4, vec![Ingredient::new("salt", "", None)]), 1.0);
    list.add_recipe(&recipe("stew", 4, vec![Ingredient::new("salt", 1.0, None)]), 1.0);

    assert_eq!(line(&list.consolidated_list(), "Salt"), vec!["1 unit Salt"]);
}
