use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

/// Nutritional breakdown of one photographed meal.
///
/// When `error` is set the model could not analyse the photo (for example
/// no food was visible) and every other field must be ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "required_nullable")]
    pub error: Option<String>,
    #[serde(rename = "identifiedFoodItems")]
    pub identified_food_items: Vec<String>,
    #[serde(rename = "estimatedPortionSize")]
    pub estimated_portion_size: Vec<EstimatedPortion>,
    pub macros: Macros,
    pub micronutrients: Micronutrients,
    pub health_notes: Vec<String>,
    pub healthier_suggestions: Vec<String>,
}

impl AnalysisResult {
    /// The domain-level failure message, if the model reported one.
    pub fn domain_error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EstimatedPortion {
    #[serde(rename = "itemName")]
    pub item_name: String,
    #[serde(rename = "itemSize")]
    pub item_size: String,
}

/// Calories in kcal, everything else in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Low,
    Moderate,
    High,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Low, Category::Moderate, Category::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Low => "Low",
            Category::Moderate => "Moderate",
            Category::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MicronutrientDetail {
    pub category: Category,
    pub amount: String,
    pub note: String,
}

/// The twelve micronutrients every analysis must report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Nutrient {
    #[serde(rename = "Vitamin A")]
    VitaminA,
    #[serde(rename = "Vitamin B")]
    VitaminB,
    #[serde(rename = "Vitamin C")]
    VitaminC,
    #[serde(rename = "Vitamin D")]
    VitaminD,
    #[serde(rename = "Vitamin E")]
    VitaminE,
    #[serde(rename = "Vitamin K")]
    VitaminK,
    Calcium,
    Iron,
    Magnesium,
    Sodium,
    Potassium,
    Zinc,
}

impl Nutrient {
    /// Enumeration order, which is also the wire order of the record.
    pub const ALL: [Nutrient; 12] = [
        Nutrient::VitaminA,
        Nutrient::VitaminB,
        Nutrient::VitaminC,
        Nutrient::VitaminD,
        Nutrient::VitaminE,
        Nutrient::VitaminK,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Magnesium,
        Nutrient::Sodium,
        Nutrient::Potassium,
        Nutrient::Zinc,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::VitaminA => "Vitamin A",
            Nutrient::VitaminB => "Vitamin B",
            Nutrient::VitaminC => "Vitamin C",
            Nutrient::VitaminD => "Vitamin D",
            Nutrient::VitaminE => "Vitamin E",
            Nutrient::VitaminK => "Vitamin K",
            Nutrient::Calcium => "Calcium",
            Nutrient::Iron => "Iron",
            Nutrient::Magnesium => "Magnesium",
            Nutrient::Sodium => "Sodium",
            Nutrient::Potassium => "Potassium",
            Nutrient::Zinc => "Zinc",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Nutrient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed record of all twelve micronutrients. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Micronutrients {
    #[serde(rename = "Vitamin A")]
    pub vitamin_a: MicronutrientDetail,
    #[serde(rename = "Vitamin B")]
    pub vitamin_b: MicronutrientDetail,
    #[serde(rename = "Vitamin C")]
    pub vitamin_c: MicronutrientDetail,
    #[serde(rename = "Vitamin D")]
    pub vitamin_d: MicronutrientDetail,
    #[serde(rename = "Vitamin E")]
    pub vitamin_e: MicronutrientDetail,
    #[serde(rename = "Vitamin K")]
    pub vitamin_k: MicronutrientDetail,
    #[serde(rename = "Calcium")]
    pub calcium: MicronutrientDetail,
    #[serde(rename = "Iron")]
    pub iron: MicronutrientDetail,
    #[serde(rename = "Magnesium")]
    pub magnesium: MicronutrientDetail,
    #[serde(rename = "Sodium")]
    pub sodium: MicronutrientDetail,
    #[serde(rename = "Potassium")]
    pub potassium: MicronutrientDetail,
    #[serde(rename = "Zinc")]
    pub zinc: MicronutrientDetail,
}

impl Micronutrients {
    pub fn get(&self, nutrient: Nutrient) -> &MicronutrientDetail {
        match nutrient {
            Nutrient::VitaminA => &self.vitamin_a,
            Nutrient::VitaminB => &self.vitamin_b,
            Nutrient::VitaminC => &self.vitamin_c,
            Nutrient::VitaminD => &self.vitamin_d,
            Nutrient::VitaminE => &self.vitamin_e,
            Nutrient::VitaminK => &self.vitamin_k,
            Nutrient::Calcium => &self.calcium,
            Nutrient::Iron => &self.iron,
            Nutrient::Magnesium => &self.magnesium,
            Nutrient::Sodium => &self.sodium,
            Nutrient::Potassium => &self.potassium,
            Nutrient::Zinc => &self.zinc,
        }
    }

    /// Entries in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, &MicronutrientDetail)> + '_ {
        Nutrient::ALL.iter().map(move |nutrient| (*nutrient, self.get(*nutrient)))
    }

    /// Rebuilds the record from loose entries. Every nutrient must appear
    /// exactly once.
    pub fn try_from_entries<I>(entries: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (Nutrient, MicronutrientDetail)>,
    {
        let mut slots: [Option<MicronutrientDetail>; 12] = Default::default();

        for (nutrient, detail) in entries {
            let slot = &mut slots[nutrient.index()];
            if slot.is_some() {
                return Err(CoreError::InvalidMicronutrients(format!(
                    "{nutrient} appears more than once"
                )));
            }
            *slot = Some(detail);
        }

        let mut take = |nutrient: Nutrient| {
            slots[nutrient.index()].take().ok_or_else(|| {
                CoreError::InvalidMicronutrients(format!("{nutrient} is missing"))
            })
        };

        Ok(Self {
            vitamin_a: take(Nutrient::VitaminA)?,
            vitamin_b: take(Nutrient::VitaminB)?,
            vitamin_c: take(Nutrient::VitaminC)?,
            vitamin_d: take(Nutrient::VitaminD)?,
            vitamin_e: take(Nutrient::VitaminE)?,
            vitamin_k: take(Nutrient::VitaminK)?,
            calcium: take(Nutrient::Calcium)?,
            iron: take(Nutrient::Iron)?,
            magnesium: take(Nutrient::Magnesium)?,
            sodium: take(Nutrient::Sodium)?,
            potassium: take(Nutrient::Potassium)?,
            zinc: take(Nutrient::Zinc)?,
        })
    }
}

/// Nullable, but the key itself is mandatory.
fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Parses raw model or HTTP text into a validated [`AnalysisResult`].
pub fn parse_analysis_result(raw: &str) -> Result<AnalysisResult, CoreError> {
    serde_json::from_str(raw).map_err(|e| {
        tracing::error!("Analysis result violates contract: {}", e);
        CoreError::InvalidModelOutput(e.to_string())
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{Value, json};

    pub fn micronutrients_json() -> Value {
        json!({
            "Vitamin A": { "category": "High", "amount": "900 mcg", "note": "Supports vision" },
            "Vitamin B": { "category": "Moderate", "amount": "1.2 mg", "note": "Energy metabolism" },
            "Vitamin C": { "category": "High", "amount": "60 mg", "note": "Immune support" },
            "Vitamin D": { "category": "Low", "amount": "1 mcg", "note": "Bone health" },
            "Vitamin E": { "category": "Moderate", "amount": "4 mg", "note": "Antioxidant" },
            "Vitamin K": { "category": "High", "amount": "80 mcg", "note": "Blood clotting" },
            "Calcium": { "category": "Low", "amount": "120 mg", "note": "Strong bones" },
            "Iron": { "category": "Moderate", "amount": "3 mg", "note": "Oxygen transport" },
            "Magnesium": { "category": "Moderate", "amount": "70 mg", "note": "Muscle function" },
            "Sodium": { "category": "Low", "amount": "300 mg", "note": "Fluid balance" },
            "Potassium": { "category": "High", "amount": "700 mg", "note": "Heart health" },
            "Zinc": { "category": "Low", "amount": "1.5 mg", "note": "Wound healing" }
        })
    }

    pub fn analysis_json() -> Value {
        json!({
            "error": null,
            "identifiedFoodItems": ["grilled chicken", "brown rice", "broccoli"],
            "estimatedPortionSize": [
                { "itemName": "grilled chicken", "itemSize": "150 g" },
                { "itemName": "brown rice", "itemSize": "180 g" },
                { "itemName": "broccoli", "itemSize": "90 g" }
            ],
            "macros": { "calories": 620, "protein": 30, "carbs": 40, "fats": 20, "fiber": 7.5 },
            "micronutrients": micronutrients_json(),
            "health_notes": ["💪 Great protein source for recovery"],
            "healthier_suggestions": ["🥗 Add a handful of greens for balance"]
        })
    }

    pub fn analysis_result() -> super::AnalysisResult {
        serde_json::from_value(analysis_json()).expect("fixture satisfies contract")
    }
}
