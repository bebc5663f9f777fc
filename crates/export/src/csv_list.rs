use platewise_shopping::{BudgetEstimate, ShoppingListItem};
use time::format_description::well_known::Rfc3339;

use crate::{RenderError, ESTIMATE_DISCLAIMER};

/// Serialize a shopping list plus its budget estimate to CSV bytes.
///
/// Item rows come first, sorted by the fixed category order and then by name
/// within a category. A metadata block follows; when the estimate is locked
/// the total, confidence and missing-count fields render blank while the
/// locked flag and disclaimer still appear.
pub fn render_shopping_list_csv(
    items: &[ShoppingListItem],
    estimate: &BudgetEstimate,
) -> Result<Vec<u8>, RenderError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(["name", "quantity", "unit", "category", "checked"])?;

    let mut sorted: Vec<&ShoppingListItem> = items.iter().collect();
    sorted.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));

    for item in sorted {
        writer.write_record([
            item.name.as_str(),
            &format_quantity(item.quantity),
            item.unit.as_str(),
            &item.category.to_string(),
            if item.checked { "true" } else { "false" },
        ])?;
    }

    writer.write_record([""])?;

    let total = estimate
        .visible_total(estimate.mode)
        .map(|t| format!("{t:.2}"))
        .unwrap_or_default();
    let confidence = estimate
        .visible_confidence()
        .map(|c| c.to_string())
        .unwrap_or_default();
    let missing = estimate
        .visible_missing_count()
        .map(|n| n.to_string())
        .unwrap_or_default();

    writer.write_record(["estimate_mode", &estimate.mode.to_string()])?;
    writer.write_record(["estimated_total", &total])?;
    writer.write_record(["confidence", &confidence])?;
    writer.write_record(["missing_items", &missing])?;
    writer.write_record(["generated_at", &estimate.generated_at.format(&Rfc3339)?])?;
    writer.write_record(["locked", if estimate.locked { "true" } else { "false" }])?;
    writer.write_record(["disclaimer", ESTIMATE_DISCLAIMER])?;

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()))?;
    Ok(bytes)
}

/// Integers render bare, fractional quantities with up to two decimals and
/// trailing zeros trimmed.
pub(crate) fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{quantity:.0}")
    } else {
        let rendered = format!("{quantity:.2}");
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::format_quantity;

    #[test]
    fn quantity_formatting() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(0.5), "0.5");
        assert_eq!(format_quantity(1.25), "1.25");
        assert_eq!(format_quantity(2.50), "2.5");
        assert_eq!(format_quantity(1.333), "1.33");
    }
}
