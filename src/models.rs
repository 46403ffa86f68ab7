use serde::{Deserialize, Serialize};

/// Round to one decimal place, half away from zero.
///
/// This is the crate-wide rounding convention for scaled macros: 0.35 g of
/// carbs at the boundary rounds to 0.4, not 0.3.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Normalized per-100 g nutrition data for one searchable food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// FoodData Central ID
    pub id: u64,
    /// Food description
    pub name: String,
    /// Calories (kcal) per 100 g
    pub calories: f64,
    /// Protein (g) per 100 g
    pub protein: f64,
    /// Carbs (g) per 100 g
    pub carbs: f64,
    /// Fat (g) per 100 g
    pub fat: f64,
}

impl FoodRecord {
    /// Scale this record's macros to a serving size in grams.
    ///
    /// Each macro is `value * serving_size / 100`, rounded to one decimal.
    pub fn scaled(&self, serving_size: f64) -> LogEntry {
        LogEntry {
            id: self.id,
            name: self.name.clone(),
            calories: round1(self.calories * serving_size / 100.0),
            protein: round1(self.protein * serving_size / 100.0),
            carbs: round1(self.carbs * serving_size / 100.0),
            fat: round1(self.fat * serving_size / 100.0),
            serving_size,
        }
    }
}

/// A food scaled to a specific serving size and committed to the log.
///
/// Serialized with camelCase names so the persisted schema is
/// `{id, name, calories, protein, carbs, fat, servingSize}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: u64,
    pub name: String,
    /// Calories (kcal) for this serving
    pub calories: f64,
    /// Protein (g) for this serving
    pub protein: f64,
    /// Carbs (g) for this serving
    pub carbs: f64,
    /// Fat (g) for this serving
    pub fat: f64,
    /// Serving size in grams
    pub serving_size: f64,
}

impl LogEntry {
    /// View this entry as a record for re-editing.
    ///
    /// The macros here are the stored serving-scaled values, not the
    /// original per-100 g baseline, so a subsequent rescale compounds on
    /// top of them. This mirrors the original tracker's edit behavior.
    pub fn as_record(&self) -> FoodRecord {
        FoodRecord {
            id: self.id,
            name: self.name.clone(),
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

/// Aggregate macros summed across the whole log.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Totals {
    pub fn add(&mut self, entry: &LogEntry) {
        self.calories += entry.calories;
        self.protein += entry.protein;
        self.carbs += entry.carbs;
        self.fat += entry.fat;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn egg() -> FoodRecord {
        FoodRecord {
            id: 748967,
            name: "Egg, whole, raw".to_string(),
            calories: 143.0,
            protein: 13.0,
            carbs: 0.7,
            fat: 9.5,
        }
    }

    #[test]
    fn round1_half_rounds_away_from_zero() {
        assert_eq!(round1(0.35), 0.4);
        assert_eq!(round1(0.25), 0.3);
        assert_eq!(round1(4.75), 4.8);
        assert_eq!(round1(0.34), 0.3);
        assert_eq!(round1(2.0), 2.0);
    }

    #[test]
    fn scaled_halves_macros_at_fifty_grams() {
        let entry = egg().scaled(50.0);
        assert_eq!(entry.calories, 71.5);
        assert_eq!(entry.protein, 6.5);
        assert_eq!(entry.carbs, 0.4);
        assert_eq!(entry.fat, 4.8);
        assert_eq!(entry.serving_size, 50.0);
        assert_eq!(entry.name, "Egg, whole, raw");
    }

    #[test]
    fn scaled_at_hundred_grams_is_identity_rounded() {
        let entry = egg().scaled(100.0);
        assert_eq!(entry.calories, 143.0);
        assert_eq!(entry.protein, 13.0);
        assert_eq!(entry.carbs, 0.7);
        assert_eq!(entry.fat, 9.5);
    }

    #[test]
    fn as_record_exposes_stored_scaled_values() {
        let entry = egg().scaled(50.0);
        let record = entry.as_record();
        assert_eq!(record.calories, 71.5);

        // Rescaling from the stored values compounds, matching the
        // original tracker's edit semantics.
        let again = record.scaled(50.0);
        assert_eq!(again.calories, 35.8);
    }

    #[test]
    fn log_entry_serializes_with_camel_case_serving_size() {
        let entry = egg().scaled(50.0);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["servingSize"], 50.0);
        assert_eq!(json["name"], "Egg, whole, raw");
        assert!(json.get("serving_size").is_none());
    }

    #[test]
    fn totals_accumulate_entries() {
        let mut totals = Totals::default();
        totals.add(&egg().scaled(50.0));
        totals.add(&egg().scaled(100.0));
        assert_eq!(totals.calories, 71.5 + 143.0);
        assert_eq!(totals.protein, 6.5 + 13.0);
    }
}
