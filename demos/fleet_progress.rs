//! Simulated live fleet: advance progress a few times and print each route's
//! tooltip, then segment a road-annotated trace and print its legend.
//!
//! Run with: cargo run --example fleet_progress

use route_progress::{
    group_segments, legend, road_type_breakdown, snapshot_fleet, units, AnnotatedPoint,
    DistanceUnit, GpsPoint, ProgressStore, RoadAttributes, Route, SpeedUnit, TimeUnit,
};

fn main() {
    // Houston -> New Orleans, roughly along I-10
    let corridor = vec![
        GpsPoint::new(29.7604, -95.3698),
        GpsPoint::new(29.8100, -94.9000),
        GpsPoint::new(30.0802, -94.1266),
        GpsPoint::new(30.2266, -93.2174),
        GpsPoint::new(30.2241, -92.0198),
        GpsPoint::new(30.4515, -91.1871),
        GpsPoint::new(29.9511, -90.0715),
    ];

    let routes = vec![
        Route::new("ROUTE_1", corridor.clone(), 563_000.0, 19_800.0).unwrap(),
        Route::new("ROUTE_2", corridor.iter().rev().copied().collect(), 563_000.0, 21_600.0).unwrap(),
        // Bad duration: speed unavailable
        Route::new("ROUTE_3", corridor, 563_000.0, 0.0).unwrap(),
    ];

    let mut store = ProgressStore::default();

    println!("Fleet progress\n");
    for update in 0..3 {
        let snapshots = snapshot_fleet(&routes, &store, SpeedUnit::MILES_PER_HOUR).unwrap();
        println!("Update {}:", update);
        for snap in &snapshots {
            let speed = match snap.metrics.speed() {
                Ok(s) => format!("{:.1} mph", s),
                Err(_) => "speed unavailable".to_string(),
            };
            println!(
                "  {} [{}] {:.0}% | {} driven / {} ahead | {:.1} mi left | {:.1} h left | {}",
                snap.route_id,
                snap.color,
                snap.percent_complete(),
                snap.completed.len(),
                snap.remaining.len(),
                snap.metrics.remaining_distance_in(DistanceUnit::Miles),
                snap.metrics.remaining_time_in(TimeUnit::Hours),
                speed,
            );
        }
        store.tick().unwrap();
    }

    println!("\nRoad types\n");
    let trace: Vec<AnnotatedPoint> = [
        "residential", "residential", "primary", "motorway", "motorway",
        "motorway", "motorway", "trunk", "motorway", "service",
    ]
    .iter()
    .enumerate()
    .map(|(i, t)| {
        AnnotatedPoint::new(GpsPoint::new(29.76 + i as f64 * 0.01, -95.37 + i as f64 * 0.05), *t)
            .with_attributes(RoadAttributes {
                name: Some(format!("Road {}", i)),
                speed_limit: Some("65 mph".to_string()),
                lanes: Some(2),
                surface: Some("asphalt".to_string()),
            })
    })
    .collect();

    for segment in group_segments(&trace) {
        println!(
            "  {:<12} {} points, {:.2} mi, first road: {}",
            segment.road_type,
            segment.len(),
            segment.distance_meters / units::METERS_PER_MILE,
            segment.attributes.name.as_deref().unwrap_or("Unnamed Road"),
        );
    }

    let breakdown = road_type_breakdown(&trace).unwrap();
    println!("\nLegend:");
    for row in legend(&breakdown) {
        println!("  {} {:<12} {:.1}%", row.color, row.road_type, row.percentage);
    }
}
