//! This example builds a small layer of neighboring parcels, loads a theme from JSON and prints the styled outline
//! of every polygon.
//!
//! Run with `RUST_LOG=debug` to see what the layer does with the shared vertices.

use anyhow::Context;
use vectormap::style::StrokeType;
use vectormap::vectormap_types::Coordinate;
use vectormap::{CoordinateList, LineString, Polygon, Theme, VectorLayer, VectorShape};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let theme: Theme =
        serde_json::from_str(include_str!("data/theme.json")).context("invalid theme")?;

    let mut layer = VectorLayer::new("parcels");
    layer.add_object(Polygon::new("land", square(0.0, 0.0)?));
    layer.add_object(Polygon::new("land", square(0.0, 1.0)?));
    layer.add_object(Polygon::new("water", square(1.0, 0.0)?));
    layer.add_object(LineString::new(
        "road",
        CoordinateList::from(vec![
            Coordinate::latlon(0.0, 2.0)?,
            Coordinate::latlon(1.0, 2.0)?,
        ]),
    ));

    log::info!(
        "Layer '{}' has {} shapes and {} vertices",
        layer.name(),
        layer.objects().len(),
        layer.node_map().len()
    );

    layer.update_outlines(&theme);

    for polygon in layer.objects().polygons().iter() {
        println!(
            "{} {} ({:.0} km²)",
            polygon.data().class,
            polygon.data().id,
            polygon.area() / 1e6
        );

        for segment in polygon.outline() {
            let mut path = String::new();
            segment.coordinates.write_kml(&mut path);
            println!(
                "  {} {}: {}",
                segment.color.to_hex(),
                stroke_name(segment.stroke),
                path
            );
        }
    }

    Ok(())
}

fn square(lat: f32, lon: f32) -> anyhow::Result<CoordinateList> {
    Ok(CoordinateList::from(vec![
        Coordinate::latlon(lat, lon)?,
        Coordinate::latlon(lat, lon + 1.0)?,
        Coordinate::latlon(lat + 1.0, lon + 1.0)?,
        Coordinate::latlon(lat + 1.0, lon)?,
    ]))
}

fn stroke_name(stroke: StrokeType) -> &'static str {
    match stroke {
        StrokeType::Solid => "solid",
        StrokeType::Dashed => "dashed",
        StrokeType::Dotted => "dotted",
    }
}
