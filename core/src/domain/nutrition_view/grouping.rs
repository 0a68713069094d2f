use serde::Serialize;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::entities::{Category, MicronutrientDetail, Micronutrients, Nutrient},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NutrientEntry {
    pub nutrient: Nutrient,
    pub amount: String,
    pub note: String,
}

/// Micronutrients bucketed by category. All three buckets always exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MicronutrientGroups {
    pub low: Vec<NutrientEntry>,
    pub moderate: Vec<NutrientEntry>,
    pub high: Vec<NutrientEntry>,
}

impl MicronutrientGroups {
    /// Display order of the sections.
    pub const SECTION_ORDER: [Category; 3] = [Category::High, Category::Moderate, Category::Low];

    pub fn get(&self, category: Category) -> &[NutrientEntry] {
        match category {
            Category::Low => &self.low,
            Category::Moderate => &self.moderate,
            Category::High => &self.high,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<NutrientEntry> {
        match category {
            Category::Low => &mut self.low,
            Category::Moderate => &mut self.moderate,
            Category::High => &mut self.high,
        }
    }

    /// Sections in display order, empty ones included.
    pub fn sections(&self) -> impl Iterator<Item = (Category, &[NutrientEntry])> + '_ {
        Self::SECTION_ORDER
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    pub fn len(&self) -> usize {
        self.low.len() + self.moderate.len() + self.high.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every entry with its category, bucket by bucket in `Low`,
    /// `Moderate`, `High` order.
    pub fn flatten(&self) -> Vec<(Nutrient, MicronutrientDetail)> {
        Category::ALL
            .into_iter()
            .flat_map(|category| {
                self.get(category).iter().map(move |entry| {
                    (
                        entry.nutrient,
                        MicronutrientDetail {
                            category,
                            amount: entry.amount.clone(),
                            note: entry.note.clone(),
                        },
                    )
                })
            })
            .collect()
    }

    /// Inverse of [`group_by_category`]; fails on lost or duplicated entries.
    pub fn into_micronutrients(self) -> Result<Micronutrients, CoreError> {
        Micronutrients::try_from_entries(self.flatten())
    }
}

/// Buckets the record by category in a single pass. Within a bucket,
/// entries keep the record's enumeration order.
pub fn group_by_category(micronutrients: &Micronutrients) -> MicronutrientGroups {
    micronutrients
        .iter()
        .fold(MicronutrientGroups::default(), |mut groups, (nutrient, detail)| {
            groups.bucket_mut(detail.category).push(NutrientEntry {
                nutrient,
                amount: detail.amount.clone(),
                note: detail.note.clone(),
            });
            groups
        })
}
