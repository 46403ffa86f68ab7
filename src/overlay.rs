use crate::error::{DiaryError, DiaryResult};
use crate::models::{FoodRecord, LogEntry};

/// Serving size preset for a freshly selected food, in grams.
pub const DEFAULT_SERVING: f64 = 100.0;

/// State of the modal interaction surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    Searching,
    Results(Vec<FoodRecord>),
    Selected {
        food: FoodRecord,
        /// Serving size the input is preset to: 100 g for a fresh add,
        /// the entry's current serving size when editing.
        serving_default: f64,
        /// Log index being edited, absent for a fresh add.
        editing: Option<usize>,
    },
}

/// Drives the search → select → commit interaction flow.
///
/// The overlay holds at most one pending food and at most one edit index;
/// commit and cancel both clear the selection.
#[derive(Debug, Default)]
pub struct Overlay {
    state: OverlayState,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// Enter `Searching`. At most one search may be in flight.
    pub fn begin_search(&mut self) -> DiaryResult<()> {
        if matches!(self.state, OverlayState::Searching) {
            return Err(DiaryError::SearchInFlight);
        }
        self.state = OverlayState::Searching;
        Ok(())
    }

    /// Present fetched results. An empty list is a terminal display state,
    /// not an error.
    pub fn show_results(&mut self, foods: Vec<FoodRecord>) {
        self.state = OverlayState::Results(foods);
    }

    pub fn results(&self) -> Option<&[FoodRecord]> {
        match &self.state {
            OverlayState::Results(foods) => Some(foods),
            _ => None,
        }
    }

    /// Pick one of the presented results for a fresh add.
    pub fn select(&mut self, index: usize) -> DiaryResult<&FoodRecord> {
        let OverlayState::Results(foods) = &self.state else {
            return Err(DiaryError::NoSelection);
        };
        if index >= foods.len() {
            return Err(DiaryError::IndexOutOfRange {
                index,
                len: foods.len(),
            });
        }
        let food = foods[index].clone();
        self.state = OverlayState::Selected {
            food,
            serving_default: DEFAULT_SERVING,
            editing: None,
        };
        match &self.state {
            OverlayState::Selected { food, .. } => Ok(food),
            _ => Err(DiaryError::NoSelection),
        }
    }

    /// Jump straight to `Selected`, seeded from an existing log entry.
    ///
    /// The seeded record carries the entry's stored serving-scaled macros
    /// and the serving input is preset to its current serving size.
    pub fn begin_edit(&mut self, entry: &LogEntry, index: usize) {
        self.state = OverlayState::Selected {
            food: entry.as_record(),
            serving_default: entry.serving_size,
            editing: Some(index),
        };
    }

    /// Validate the serving input and scale the held selection.
    ///
    /// Leaves the overlay untouched: on `InvalidServingSize` it stays open
    /// for correction, and on success the caller closes it only after the
    /// log mutation went through.
    pub fn scale_selection(&self, serving_input: &str) -> DiaryResult<(LogEntry, Option<usize>)> {
        let OverlayState::Selected { food, editing, .. } = &self.state else {
            return Err(DiaryError::NoSelection);
        };
        let serving = parse_serving(serving_input)?;
        Ok((food.scaled(serving), *editing))
    }

    /// Close and clear selection and edit state.
    pub fn cancel(&mut self) {
        self.state = OverlayState::Closed;
    }
}

fn parse_serving(input: &str) -> DiaryResult<f64> {
    let trimmed = input.trim();
    let invalid = || DiaryError::InvalidServingSize {
        input: trimmed.to_string(),
    };
    let value: f64 = trimmed.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }
    Ok(value)
}
