use std::collections::HashSet;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{DiaryError, DiaryResult};
use crate::models::FoodRecord;

/// Fixed number of results requested per search.
pub const PAGE_SIZE: u32 = 20;

/// Client for the USDA FoodData Central search endpoint.
///
/// The API is unauthenticated beyond an api_key query parameter; a free key
/// is available from <https://fdc.nal.usda.gov/api-key-signup.html> and
/// `DEMO_KEY` works for light use.
pub struct FdcClient {
    http: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<FoodItem>,
}

#[derive(Debug, Deserialize)]
struct FoodItem {
    #[serde(rename = "fdcId")]
    fdc_id: u64,
    description: String,
    #[serde(rename = "foodNutrients", default)]
    food_nutrients: Vec<NutrientTag>,
}

#[derive(Debug, Deserialize)]
struct NutrientTag {
    #[serde(rename = "nutrientName")]
    nutrient_name: String,
    value: Option<f64>,
}

impl FdcClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Search the food database and normalize the results.
    ///
    /// A trim-empty query fails with `EmptyQuery` before any request is
    /// made. An empty result list is a valid outcome, not an error.
    pub async fn search(&self, query: &str) -> DiaryResult<Vec<FoodRecord>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DiaryError::EmptyQuery);
        }

        let url = format!("{}/foods/search", self.base_url);
        debug!(query, "searching FoodData Central");

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("query", query),
                ("pageSize", &PAGE_SIZE.to_string()),
                ("api_key", &self.api_key),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(DiaryError::FetchStatus {
                status: resp.status(),
            });
        }

        let data: SearchResponse = resp.json().await?;
        let records = data.foods.into_iter().map(normalize_food).collect();
        let records = dedup_by_name(records);
        debug!(results = records.len(), "search complete");
        Ok(records)
    }
}

/// Extract the four tracked macros from a food's nutrient tags.
///
/// Tags are matched by exact name; anything else is ignored and a missing
/// tag defaults to 0.
fn normalize_food(food: FoodItem) -> FoodRecord {
    let mut calories = 0.0;
    let mut protein = 0.0;
    let mut carbs = 0.0;
    let mut fat = 0.0;

    for tag in &food.food_nutrients {
        let value = tag.value.unwrap_or(0.0);
        match tag.nutrient_name.as_str() {
            "Energy" => calories = value,
            "Protein" => protein = value,
            "Carbohydrate, by difference" => carbs = value,
            "Total lipid (fat)" => fat = value,
            _ => {}
        }
    }

    FoodRecord {
        id: food.fdc_id,
        name: food.description,
        calories,
        protein,
        carbs,
        fat,
    }
}

/// Drop case-insensitive duplicate names, keeping the first occurrence.
fn dedup_by_name(records: Vec<FoodRecord>) -> Vec<FoodRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.name.to_lowercase()))
        .collect()
}
