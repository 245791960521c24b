use bookdb_core::types::BookRecord;
use std::collections::BTreeSet;

/// Filter criteria a catalog client holds between fetches.
///
/// All three criteria are AND-composed. The price range is inclusive on
/// both ends and kept ordered at every mutation: pushing one bound past
/// the other drags the opposing bound along, so `min <= max` always
/// holds and the range never inverts.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    selected_categories: Vec<String>,
    price_range: (f64, f64),
    min_rating: Option<u8>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_categories: Vec::new(),
            price_range: (0.0, f64::INFINITY),
            min_rating: None,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a category, or deselect it when already selected.
    /// Matching ignores case; selection order is kept.
    pub fn toggle_category(&mut self, name: &str) {
        match self
            .selected_categories
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
        {
            Some(i) => {
                self.selected_categories.remove(i);
            }
            None => self.selected_categories.push(name.to_string()),
        }
    }

    /// Lower price bound. Negative and NaN values floor at 0; a minimum
    /// above the current maximum drags the maximum up.
    pub fn set_price_min(&mut self, min: f64) {
        let min = sanitize_bound(min);
        self.price_range.0 = min;
        if self.price_range.1 < min {
            self.price_range.1 = min;
        }
    }

    /// Upper price bound. A maximum below the current minimum drags the
    /// minimum down.
    pub fn set_price_max(&mut self, max: f64) {
        let max = sanitize_bound(max);
        self.price_range.1 = max;
        if self.price_range.0 > max {
            self.price_range.0 = max;
        }
    }

    /// Minimum rating; the valid domain is 0..=5, higher values clamp.
    /// `None` removes the constraint.
    pub fn set_min_rating(&mut self, rating: Option<u8>) {
        self.min_rating = rating.map(|r| r.min(5));
    }

    /// Drop every criterion at once (the "clear filters" control).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn selected_categories(&self) -> &[String] {
        &self.selected_categories
    }

    pub fn price_range(&self) -> (f64, f64) {
        self.price_range
    }

    pub fn min_rating(&self) -> Option<u8> {
        self.min_rating
    }

    /// True when no criterion would exclude anything.
    pub fn is_neutral(&self) -> bool {
        self.selected_categories.is_empty()
            && self.price_range == (0.0, f64::INFINITY)
            && self.min_rating.is_none()
    }

    /// Whether one record passes every active criterion.
    pub fn matches(&self, record: &BookRecord) -> bool {
        let (min_price, max_price) = self.price_range;
        if record.price < min_price || record.price > max_price {
            return false;
        }
        if !self.selected_categories.is_empty() {
            let any_selected = record.categories.iter().any(|category| {
                self.selected_categories
                    .iter()
                    .any(|selected| selected.eq_ignore_ascii_case(category))
            });
            if !any_selected {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if record.rating < min {
                return false;
            }
        }
        true
    }

    /// Narrow a snapshot: the input minus non-matching records, in
    /// input order. Pure, so re-running it on the same snapshot gives
    /// the same result.
    pub fn apply(&self, snapshot: &[BookRecord]) -> Vec<BookRecord> {
        snapshot
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Distinct categories across a snapshot, sorted lexicographically.
/// Computed from the unfiltered snapshot so the picker keeps offering
/// options the current criteria exclude.
pub fn available_categories(snapshot: &[BookRecord]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    for record in snapshot {
        for category in &record.categories {
            seen.insert(category.clone());
        }
    }
    seen.into_iter().collect()
}

/// Case-insensitive substring filter for the category picker's search
/// box.
pub fn filter_category_options(options: &[String], needle: &str) -> Vec<String> {
    let needle = needle.to_lowercase();
    options
        .iter()
        .filter(|option| option.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

fn sanitize_bound(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}
