use std::collections::HashMap;

use platewise_mealplan::PlanItem;

use crate::types::{Category, ShoppingListItem};

/// Merge a plan's recipe ingredient lines into a deduplicated shopping list.
///
/// Lines are grouped by normalized (name, unit, category) identity and their
/// quantities summed. The list keeps the insertion order of each identity's
/// first occurrence so repeated exports of the same plan display stably.
///
/// `previous` carries the user's persisted list, if any: an item the user
/// already checked off keeps its checked state when the list is rebuilt.
/// Newly aggregated identities start unchecked.
pub fn aggregate(plan_items: &[PlanItem], previous: &[ShoppingListItem]) -> Vec<ShoppingListItem> {
    let checked: HashMap<(String, String, Category), bool> = previous
        .iter()
        .map(|item| (identity(&item.name, &item.unit, item.category), item.checked))
        .collect();

    let mut items: Vec<ShoppingListItem> = Vec::new();
    let mut index: HashMap<(String, String, Category), usize> = HashMap::new();

    for line in plan_items.iter().flat_map(|item| &item.recipe.ingredients) {
        let category = Category::parse_lenient(&line.category);
        let key = identity(&line.name, &line.unit, category);

        match index.get(&key) {
            Some(&at) => items[at].quantity += line.quantity,
            None => {
                index.insert(key.clone(), items.len());
                items.push(ShoppingListItem {
                    name: key.0.clone(),
                    quantity: line.quantity,
                    unit: key.1.clone(),
                    category,
                    checked: checked.get(&key).copied().unwrap_or(false),
                });
            }
        }
    }

    items
}

fn identity(name: &str, unit: &str, category: Category) -> (String, String, Category) {
    (
        name.trim().to_lowercase(),
        unit.trim().to_lowercase(),
        category,
    )
}
