//! Color selection for routes and road types.
//!
//! Every lookup here is total: palette indices wrap around and unknown road
//! types fall back to gray, so any number of routes or segments can be drawn.

use crate::stats::CategoryBreakdown;

/// Colors cycled through for routes, in selection order.
pub const ROUTE_PALETTE: [&str; 5] = ["darkred", "darkblue", "darkgreen", "purple", "orange"];

/// Fallback color for road types without an entry.
pub const DEFAULT_ROAD_COLOR: &str = "#808080";

/// Pick `palette[index % len]`. `None` only when the palette is empty.
pub fn palette_color<'a>(palette: &[&'a str], index: usize) -> Option<&'a str> {
    if palette.is_empty() {
        return None;
    }
    Some(palette[index % palette.len()])
}

/// Color of the route at `index` in the current selection.
pub fn route_color(index: usize) -> &'static str {
    ROUTE_PALETTE[index % ROUTE_PALETTE.len()]
}

/// Color for an OpenStreetMap road class.
pub fn road_type_color(road_type: &str) -> &'static str {
    match road_type {
        "tertiary" => "#FFA500",
        "secondary" => "#4169E1",
        "primary" => "#FF0000",
        "residential" => "#32CD32",
        "motorway" => "#800080",
        "trunk" => "#8B4513",
        "unclassified" => "#808080",
        "footway" => "#FFD700",
        "service" => "#20B2AA",
        "path" => "#DDA0DD",
        "cycleway" => "#00CED1",
        "pedestrian" => "#F08080",
        "living_street" => "#98FB98",
        "track" => "#DEB887",
        _ => DEFAULT_ROAD_COLOR,
    }
}

/// One row of the road-type legend.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegendEntry {
    pub road_type: String,
    pub color: String,
    pub percentage: f64,
}

/// Legend rows in breakdown order (most frequent first).
pub fn legend(breakdown: &CategoryBreakdown) -> Vec<LegendEntry> {
    breakdown
        .entries
        .iter()
        .map(|e| LegendEntry {
            road_type: e.road_type.clone(),
            color: road_type_color(&e.road_type).to_string(),
            percentage: e.percentage,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::category_breakdown;

    #[test]
    fn test_route_color_wraps() {
        assert_eq!(route_color(0), "darkred");
        assert_eq!(route_color(4), "orange");
        assert_eq!(route_color(5), "darkred");
        assert_eq!(route_color(1_000_001), "darkblue");
    }

    #[test]
    fn test_palette_color() {
        let palette = ["red", "blue"];
        assert_eq!(palette_color(&palette, 3), Some("blue"));
        assert_eq!(palette_color(&[], 0), None);
    }

    #[test]
    fn test_road_type_color_fallback() {
        assert_eq!(road_type_color("motorway"), "#800080");
        assert_eq!(road_type_color("living_street"), "#98FB98");
        assert_eq!(road_type_color("bridleway"), DEFAULT_ROAD_COLOR);
    }

    #[test]
    fn test_legend_follows_breakdown() {
        let breakdown = category_breakdown(["primary", "motorway", "motorway", "ferry"]).unwrap();
        let rows = legend(&breakdown);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].road_type, "motorway");
        assert_eq!(rows[0].color, "#800080");
        assert_eq!(rows[0].percentage, 50.0);
        assert_eq!(rows[2].color, DEFAULT_ROAD_COLOR);
    }
}
