use crate::models::{AnalysisResult, ComparisonRow, ComparisonTable};

const NOT_AVAILABLE: &str = "N/A";

/// Merge two error-free analyses into the side-by-side table.
///
/// `None` when either side carries an error: a comparison of one good and
/// one broken result would be fabricated, so the UI shows each side's own
/// error instead.
pub fn assemble(claude: &AnalysisResult, gemini: &AnalysisResult) -> Option<ComparisonTable> {
    if claude.is_error() || gemini.is_error() {
        return None;
    }

    let mut rows = vec![
        ComparisonRow {
            attribute: "Overall Cuisine".to_string(),
            claude: text_or_na(&claude.overall_cuisine_type),
            gemini: text_or_na(&gemini.overall_cuisine_type),
        },
        ComparisonRow {
            attribute: "Overall Cooking Method".to_string(),
            claude: text_or_na(&claude.overall_cooking_method),
            gemini: text_or_na(&gemini.overall_cooking_method),
        },
        ComparisonRow {
            attribute: "Confidence Score".to_string(),
            claude: format_confidence(claude),
            gemini: format_confidence(gemini),
        },
    ];

    // Walk to the longer item list; the shorter side pads with N/A.
    let max_items = claude.food_items.len().max(gemini.food_items.len());
    for i in 0..max_items {
        rows.push(ComparisonRow {
            attribute: format!("Food Item {}", i + 1),
            claude: item_name(claude, i),
            gemini: item_name(gemini, i),
        });
        rows.push(ComparisonRow {
            attribute: format!("Quantity {}", i + 1),
            claude: item_quantity(claude, i),
            gemini: item_quantity(gemini, i),
        });
    }

    Some(ComparisonTable { rows })
}

/// Attribute/value listing for one provider's own column, same row layout
/// as the comparison but single-sided. Callers check `is_error` first.
pub fn side_rows(result: &AnalysisResult) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Overall Cuisine".to_string(), text_or_na(&result.overall_cuisine_type)),
        (
            "Overall Cooking Method".to_string(),
            text_or_na(&result.overall_cooking_method),
        ),
        ("Confidence Score".to_string(), format_confidence(result)),
    ];

    for (i, item) in result.food_items.iter().enumerate() {
        rows.push((format!("Food Item {}", i + 1), text_or_na(&item.item)));
        rows.push((format!("Quantity {}", i + 1), text_or_na(&item.estimated_quantities)));
    }

    rows
}

fn text_or_na(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn format_confidence(result: &AnalysisResult) -> String {
    format!("{:.2}", result.confidence_score.unwrap_or(0.0))
}

fn item_name(result: &AnalysisResult, index: usize) -> String {
    result
        .food_items
        .get(index)
        .map(|item| text_or_na(&item.item))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn item_quantity(result: &AnalysisResult, index: usize) -> String {
    result
        .food_items
        .get(index)
        .map(|item| text_or_na(&item.estimated_quantities))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodItem;

    fn item(name: &str, quantity: &str) -> FoodItem {
        FoodItem {
            item: Some(name.to_string()),
            estimated_quantities: Some(quantity.to_string()),
            cooking_method: Some("baked".to_string()),
            cuisine_type: Some("Italian".to_string()),
        }
    }

    fn result_with_items(items: Vec<FoodItem>) -> AnalysisResult {
        AnalysisResult {
            food_items: items,
            overall_cuisine_type: Some("Italian".to_string()),
            overall_cooking_method: Some("baked".to_string()),
            confidence_score: Some(0.9),
            error: None,
        }
    }

    #[test]
    fn uneven_item_counts_pad_the_short_side() {
        let claude = result_with_items(vec![
            item("pizza", "one slice"),
            item("salad", "one bowl"),
            item("bread", "two pieces"),
        ]);
        let gemini = result_with_items(vec![item("pizza", "two slices")]);

        let table = assemble(&claude, &gemini).unwrap();

        // 3 overall rows + (item, quantity) per index up to max(3, 1).
        assert_eq!(table.rows.len(), 3 + 2 * 3);

        let food_2 = &table.rows[5];
        assert_eq!(food_2.attribute, "Food Item 2");
        assert_eq!(food_2.claude, "salad");
        assert_eq!(food_2.gemini, "N/A");

        let quantity_3 = &table.rows[8];
        assert_eq!(quantity_3.attribute, "Quantity 3");
        assert_eq!(quantity_3.claude, "two pieces");
        assert_eq!(quantity_3.gemini, "N/A");
    }

    #[test]
    fn confidence_is_formatted_to_two_decimals() {
        let claude = result_with_items(vec![]);
        let mut gemini = result_with_items(vec![]);
        gemini.confidence_score = None;

        let table = assemble(&claude, &gemini).unwrap();
        let confidence = &table.rows[2];
        assert_eq!(confidence.attribute, "Confidence Score");
        assert_eq!(confidence.claude, "0.90");
        assert_eq!(confidence.gemini, "0.00"); // absent scores display as zero
    }

    #[test]
    fn error_on_either_side_skips_assembly() {
        let good = result_with_items(vec![item("pizza", "one slice")]);
        let broken = AnalysisResult::failure("API error");

        assert!(assemble(&good, &broken).is_none());
        assert!(assemble(&broken, &good).is_none());
        assert!(assemble(&broken, &broken).is_none());
    }

    #[test]
    fn sparse_results_render_as_defaults_not_errors() {
        let table = assemble(&AnalysisResult::unknown(), &AnalysisResult::unknown()).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].claude, "N/A");
        assert_eq!(table.rows[2].claude, "0.00");
    }

    #[test]
    fn side_rows_match_the_single_column_layout() {
        let result = result_with_items(vec![item("pizza", "one slice"), item("salad", "one bowl")]);
        let rows = side_rows(&result);

        assert_eq!(rows.len(), 3 + 2 * 2);
        assert_eq!(rows[0], ("Overall Cuisine".to_string(), "Italian".to_string()));
        assert_eq!(rows[3], ("Food Item 1".to_string(), "pizza".to_string()));
        assert_eq!(rows[4], ("Quantity 1".to_string(), "one slice".to_string()));
    }
}
