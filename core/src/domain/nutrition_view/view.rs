use serde::Serialize;

use crate::domain::food_analysis::entities::{AnalysisResult, Macros};

use super::{
    grouping::{MicronutrientGroups, group_by_category},
    rings::{CalorieScale, MultiRing, Ring, RingGeometry},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MacroKind {
    Protein,
    Carbs,
    Fats,
}

impl MacroKind {
    pub const RINGED: [MacroKind; 3] = [MacroKind::Protein, MacroKind::Carbs, MacroKind::Fats];

    pub fn title(&self) -> &'static str {
        match self {
            MacroKind::Protein => "Protein",
            MacroKind::Carbs => "Carbs",
            MacroKind::Fats => "Fats",
        }
    }

    pub fn grams(&self, macros: &Macros) -> f64 {
        match self {
            MacroKind::Protein => macros.protein,
            MacroKind::Carbs => macros.carbs,
            MacroKind::Fats => macros.fats,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderOptions {
    pub geometry: RingGeometry,
    pub calorie_scale: CalorieScale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortionChip {
    pub name: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroRing {
    pub kind: MacroKind,
    pub grams: f64,
    pub ring: Ring,
}

/// Aggregate calorie indicator.
///
/// The kcal figure is a label. Its ring reflects the explicit daily
/// target; the macro breakdown is laid out around a second ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieSummary {
    pub kcal: f64,
    pub daily_share_percent: f64,
    pub daily_share: Ring,
    pub breakdown: MultiRing<MacroKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionReport {
    pub items: Vec<PortionChip>,
    pub calories: CalorieSummary,
    pub macro_rings: Vec<MacroRing>,
    pub fiber_grams: f64,
    pub micronutrients: MicronutrientGroups,
    pub health_notes: Vec<String>,
    pub healthier_suggestions: Vec<String>,
}

/// What the client shows for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ResultView {
    /// The model reported a domain error; only this text is shown.
    Notice { message: String },
    Report(Box<NutritionReport>),
}

impl ResultView {
    pub fn from_result(result: &AnalysisResult, options: &RenderOptions) -> Self {
        if let Some(message) = result.domain_error() {
            return ResultView::Notice {
                message: message.to_string(),
            };
        }

        let macros = &result.macros;
        let geometry = options.geometry;

        let daily_share_percent = options.calorie_scale.share_percent(macros.calories);
        let calories = CalorieSummary {
            kcal: macros.calories,
            daily_share_percent,
            daily_share: Ring::new(daily_share_percent, geometry),
            breakdown: MultiRing::new(
                MacroKind::RINGED.map(|kind| (kind, kind.grams(macros))),
                geometry,
            ),
        };

        let macro_rings = MacroKind::RINGED
            .iter()
            .map(|kind| {
                let grams = kind.grams(macros);
                MacroRing {
                    kind: *kind,
                    grams,
                    ring: Ring::new(grams, geometry),
                }
            })
            .collect();

        let items = result
            .estimated_portion_size
            .iter()
            .map(|portion| PortionChip {
                name: portion.item_name.clone(),
                size: portion.item_size.clone(),
            })
            .collect();

        ResultView::Report(Box::new(NutritionReport {
            items,
            calories,
            macro_rings,
            fiber_grams: macros.fiber,
            micronutrients: group_by_category(&result.micronutrients),
            health_notes: result.health_notes.clone(),
            healthier_suggestions: result.healthier_suggestions.clone(),
        }))
    }

    pub fn is_notice(&self) -> bool {
        matches!(self, ResultView::Notice { .. })
    }
}
