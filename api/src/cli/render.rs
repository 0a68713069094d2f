use std::fmt::Write;

use nutrilens_core::domain::nutrition_view::{NutritionReport, Ring, ResultView};

const BAR_WIDTH: usize = 20;

fn bar(ring: &Ring) -> String {
    let filled = (ring.fraction() * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH.saturating_sub(filled))
    )
}

/// Plain-text rendering of a result view for terminals.
pub fn render_text(view: &ResultView) -> String {
    match view {
        ResultView::Notice { message } => format!("! {message}\n"),
        ResultView::Report(report) => render_report(report),
    }
}

fn render_report(report: &NutritionReport) -> String {
    let mut out = String::new();

    if !report.items.is_empty() {
        let _ = writeln!(out, "Items");
        for item in &report.items {
            let _ = writeln!(out, "  {} ({})", item.name, item.size);
        }
        out.push('\n');
    }

    let calories = &report.calories;
    let _ = writeln!(
        out,
        "Calories {:.0} kcal {} {:.0}% of daily target",
        calories.kcal,
        bar(&calories.daily_share),
        calories.daily_share_percent
    );
    for segment in &calories.breakdown.segments {
        let _ = writeln!(
            out,
            "  {:<8} starts at {:>5.1}°",
            segment.label.title(),
            segment.rotation_degrees()
        );
    }
    out.push('\n');

    for ring in &report.macro_rings {
        let _ = writeln!(
            out,
            "{:<8} {:>6.1} g {}",
            ring.kind.title(),
            ring.grams,
            bar(&ring.ring)
        );
    }
    let _ = writeln!(out, "{:<8} {:>6.1} g", "Fiber", report.fiber_grams);

    for (category, entries) in report.micronutrients.sections() {
        let _ = writeln!(out, "\n{}", category.as_str());
        if entries.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for entry in entries {
            let _ = writeln!(out, "  {:<10} {:<8} {}", entry.nutrient, entry.amount, entry.note);
        }
    }

    if !report.health_notes.is_empty() {
        let _ = writeln!(out, "\nHealth notes");
        for note in &report.health_notes {
            let _ = writeln!(out, "  {note}");
        }
    }

    if !report.healthier_suggestions.is_empty() {
        let _ = writeln!(out, "\nSuggestions");
        for suggestion in &report.healthier_suggestions {
            let _ = writeln!(out, "  {suggestion}");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use nutrilens_core::domain::{
        food_analysis::entities::parse_analysis_result, nutrition_view::RenderOptions,
    };
    use serde_json::json;

    use super::*;

    fn detail(category: &str) -> serde_json::Value {
        json!({ "category": category, "amount": "1 mg", "note": "useful" })
    }

    fn result_json(error: Option<&str>) -> String {
        result_json_with(error, |_| {})
    }

    fn result_json_with(
        error: Option<&str>,
        adjust: impl FnOnce(&mut serde_json::Value),
    ) -> String {
        let mut value = json!({
            "error": error,
            "identifiedFoodItems": ["oatmeal"],
            "estimatedPortionSize": [{ "itemName": "oatmeal", "itemSize": "250 g" }],
            "macros": { "calories": 500, "protein": 30, "carbs": 40, "fats": 20, "fiber": 8 },
            "micronutrients": {
                "Vitamin A": detail("High"), "Vitamin B": detail("Moderate"),
                "Vitamin C": detail("Low"), "Vitamin D": detail("Low"),
                "Vitamin E": detail("Low"), "Vitamin K": detail("Low"),
                "Calcium": detail("Low"), "Iron": detail("Moderate"),
                "Magnesium": detail("Low"), "Sodium": detail("Low"),
                "Potassium": detail("Low"), "Zinc": detail("Low")
            },
            "health_notes": ["🥣 Filling breakfast"],
            "healthier_suggestions": ["🍓 Add berries"]
        });
        adjust(&mut value);
        value.to_string()
    }

    #[test]
    fn test_notice_renders_only_message() {
        let result = parse_analysis_result(&result_json(Some(
            "No food detected. Please upload a clear photo of a meal.",
        )))
        .unwrap();

        let text = render_text(&ResultView::from_result(&result, &RenderOptions::default()));

        assert_eq!(
            text,
            "! No food detected. Please upload a clear photo of a meal.\n"
        );
    }

    #[test]
    fn test_report_lists_sections_high_first() {
        let result = parse_analysis_result(&result_json(None)).unwrap();

        let text = render_text(&ResultView::from_result(&result, &RenderOptions::default()));

        assert!(text.contains("oatmeal (250 g)"));
        assert!(text.contains("Calories 500 kcal"));
        assert!(text.contains("25% of daily target"));
        assert!(text.contains("108.0°"));
        assert!(text.contains("252.0°"));

        let high = text.find("\nHigh\n").unwrap();
        let moderate = text.find("\nModerate\n").unwrap();
        let low = text.find("\nLow\n").unwrap();
        assert!(high < moderate && moderate < low);
        assert!(text.contains("Suggestions"));
    }

    #[test]
    fn test_empty_categories_still_get_a_heading() {
        let raw = result_json_with(None, |value| {
            for detail in value["micronutrients"].as_object_mut().unwrap().values_mut() {
                detail["category"] = "Low".into();
            }
        });
        let result = parse_analysis_result(&raw).unwrap();

        let text = render_text(&ResultView::from_result(&result, &RenderOptions::default()));

        let high = text.find("\nHigh\n  (none)\n").unwrap();
        let moderate = text.find("\nModerate\n  (none)\n").unwrap();
        let low = text.find("\nLow\n").unwrap();
        assert!(high < moderate && moderate < low);
        assert_eq!(text.matches("(none)").count(), 2);
    }

    #[test]
    fn test_bar_is_full_at_hundred() {
        let geometry = Default::default();
        assert_eq!(bar(&Ring::new(100.0, geometry)), format!("[{}]", "#".repeat(20)));
        assert_eq!(bar(&Ring::new(-5.0, geometry)), format!("[{}]", "-".repeat(20)));
    }
}
