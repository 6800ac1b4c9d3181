//! Road-type frequency breakdown over a full trace.

use std::collections::HashMap;

use crate::error::{Result, RouteProgressError};
use crate::segments::AnnotatedPoint;

/// Share of one category in a breakdown.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryShare {
    pub road_type: String,
    /// Number of points with this road type
    pub count: u32,
    /// Share of all points (0-100)
    pub percentage: f64,
}

/// Frequency breakdown, ordered by descending count.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryBreakdown {
    pub total_points: u32,
    pub entries: Vec<CategoryShare>,
}

impl CategoryBreakdown {
    pub fn get(&self, road_type: &str) -> Option<&CategoryShare> {
        self.entries.iter().find(|e| e.road_type == road_type)
    }

    /// Most frequent category.
    pub fn dominant(&self) -> Option<&CategoryShare> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Count each category and compute its percentage of the total.
///
/// Entries are sorted by descending count; ties keep first-seen order.
/// An empty input fails with [`RouteProgressError::EmptyInput`] rather than
/// producing a breakdown with no total.
///
/// # Example
/// ```
/// use route_progress::category_breakdown;
///
/// let breakdown = category_breakdown(["A", "A", "B"]).unwrap();
/// assert_eq!(breakdown.entries[0].road_type, "A");
/// assert_eq!(breakdown.entries[0].count, 2);
/// assert!((breakdown.entries[1].percentage - 33.33).abs() < 0.01);
/// ```
pub fn category_breakdown<'a, I>(categories: I) -> Result<CategoryBreakdown>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, u32)> = Vec::new();
    let mut total: u32 = 0;

    for category in categories {
        total += 1;
        match index.get(category) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(category, counts.len());
                counts.push((category, 1));
            }
        }
    }

    if total == 0 {
        return Err(RouteProgressError::empty("road-type breakdown"));
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let entries = counts
        .into_iter()
        .map(|(road_type, count)| CategoryShare {
            road_type: road_type.to_string(),
            count,
            percentage: 100.0 * count as f64 / total as f64,
        })
        .collect();

    Ok(CategoryBreakdown { total_points: total, entries })
}

/// Road-type breakdown of an annotated trace.
pub fn road_type_breakdown(points: &[AnnotatedPoint]) -> Result<CategoryBreakdown> {
    category_breakdown(points.iter().map(|p| p.road_type.as_str()))
}
