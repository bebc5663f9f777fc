use platewise_shopping::{
    estimate, BudgetEstimate, Category, Confidence, EstimateMode, EstimatorConfig, PriceBaseline,
    ShoppingListItem,
};
use time::macros::datetime;
use time::OffsetDateTime;

const NOW: OffsetDateTime = datetime!(2024-03-04 08:00 UTC);

fn item(name: &str, quantity: f64, category: Category) -> ShoppingListItem {
    ShoppingListItem {
        name: name.to_string(),
        quantity,
        unit: "pc".to_string(),
        category,
        checked: false,
    }
}

fn category_baseline(category: Category, unit_price: f64) -> PriceBaseline {
    PriceBaseline {
        name: None,
        category,
        mode: EstimateMode::Standard,
        unit_price,
        updated_at: datetime!(2024-01-01 00:00 UTC),
    }
}

fn named_baseline(name: &str, unit_price: f64, updated_at: OffsetDateTime) -> PriceBaseline {
    PriceBaseline {
        name: Some(name.to_string()),
        category: Category::Vegetables,
        mode: EstimateMode::Standard,
        unit_price,
        updated_at,
    }
}

fn run(items: &[ShoppingListItem], baselines: &[PriceBaseline]) -> BudgetEstimate {
    estimate(
        items,
        baselines,
        EstimateMode::Standard,
        &EstimatorConfig::default(),
        NOW,
    )
}

#[test]
fn fully_priced_list_is_high_confidence_and_released() {
    let items: Vec<_> = (0..4)
        .map(|i| item(&format!("veg-{i}"), 1.0, Category::Vegetables))
        .collect();
    let baselines = [category_baseline(Category::Vegetables, 2.5)];

    let result = run(&items, &baselines);
    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(result.missing_item_count, 0);
    assert!(!result.locked);
    assert_eq!(result.visible_total(EstimateMode::Standard), Some(10.0));
    assert_eq!(result.visible_confidence(), Some(Confidence::High));
    assert_eq!(result.visible_missing_count(), Some(0));
    assert_eq!(result.generated_at, NOW);
}

#[test]
fn three_missing_of_ten_is_low_confidence_and_locked() {
    let mut items: Vec<_> = (0..7)
        .map(|i| item(&format!("veg-{i}"), 1.0, Category::Vegetables))
        .collect();
    items.extend((0..3).map(|i| item(&format!("odd-{i}"), 1.0, Category::Other)));
    let baselines = [category_baseline(Category::Vegetables, 1.0)];

    let result = run(&items, &baselines);
    assert_eq!(result.missing_item_count, 3);
    assert_eq!(result.confidence, Confidence::Low);
    assert!(result.locked);

    // Locked withholds everything consumer-facing, raw fields stay for audit.
    assert_eq!(result.visible_total(EstimateMode::Standard), None);
    assert_eq!(result.visible_confidence(), None);
    assert_eq!(result.visible_missing_count(), None);
    assert_eq!(result.totals[&EstimateMode::Standard], 7.0);
}

#[test]
fn one_missing_of_ten_is_medium_and_released() {
    let mut items: Vec<_> = (0..9)
        .map(|i| item(&format!("veg-{i}"), 1.0, Category::Vegetables))
        .collect();
    items.push(item("dragonfruit", 1.0, Category::Other));
    let baselines = [category_baseline(Category::Vegetables, 1.0)];

    let result = run(&items, &baselines);
    assert_eq!(result.confidence, Confidence::Medium);
    assert_eq!(result.missing_item_count, 1);
    assert!(!result.locked, "9 resolved items clear the absolute floor");
    assert_eq!(result.visible_total(EstimateMode::Standard), Some(9.0));
}

#[test]
fn too_few_priced_items_locks_even_at_high_confidence() {
    let items = vec![
        item("onion", 1.0, Category::Vegetables),
        item("carrot", 1.0, Category::Vegetables),
    ];
    let baselines = [category_baseline(Category::Vegetables, 1.0)];

    let result = run(&items, &baselines);
    assert_eq!(result.confidence, Confidence::High);
    assert!(result.locked);
    assert_eq!(result.visible_total(EstimateMode::Standard), None);
}

#[test]
fn empty_list_is_locked() {
    let result = run(&[], &[]);
    assert!(result.locked);
    assert_eq!(result.missing_item_count, 0);
}

#[test]
fn specific_name_baseline_beats_category_baseline() {
    let items = vec![
        item("onion", 2.0, Category::Vegetables),
        item("carrot", 1.0, Category::Vegetables),
        item("leek", 1.0, Category::Vegetables),
    ];
    let baselines = [
        category_baseline(Category::Vegetables, 1.0),
        named_baseline("onion", 3.0, datetime!(2024-02-01 00:00 UTC)),
    ];

    let result = run(&items, &baselines);
    // onion at 3.0 each, carrot and leek at the category price.
    assert_eq!(result.visible_total(EstimateMode::Standard), Some(8.0));
}

#[test]
fn baseline_ties_resolve_to_most_recently_updated() {
    let items = vec![
        item("onion", 1.0, Category::Vegetables),
        item("carrot", 1.0, Category::Vegetables),
        item("leek", 1.0, Category::Vegetables),
    ];
    let baselines = [
        category_baseline(Category::Vegetables, 1.0),
        named_baseline("onion", 2.0, datetime!(2024-02-01 00:00 UTC)),
        named_baseline("onion", 5.0, datetime!(2024-02-15 00:00 UTC)),
    ];

    let result = run(&items, &baselines);
    assert_eq!(result.visible_total(EstimateMode::Standard), Some(7.0));
}

#[test]
fn lock_threshold_is_configurable_per_call() {
    let items = vec![
        item("onion", 1.0, Category::Vegetables),
        item("carrot", 1.0, Category::Vegetables),
    ];
    let baselines = [category_baseline(Category::Vegetables, 1.0)];
    let config = EstimatorConfig {
        min_priced_items: 1,
        ..EstimatorConfig::default()
    };

    let result = estimate(&items, &baselines, EstimateMode::Standard, &config, NOW);
    assert!(!result.locked);
    assert_eq!(result.visible_total(EstimateMode::Standard), Some(2.0));
}

#[test]
fn deterministic_for_identical_inputs() {
    let items = vec![
        item("onion", 1.5, Category::Vegetables),
        item("carrot", 2.0, Category::Vegetables),
        item("leek", 1.0, Category::Vegetables),
    ];
    let baselines = [category_baseline(Category::Vegetables, 1.2)];

    let a = run(&items, &baselines);
    let b = run(&items, &baselines);
    assert_eq!(a, b);
}
