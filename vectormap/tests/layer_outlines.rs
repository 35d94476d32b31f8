use approx::assert_abs_diff_eq;
use vectormap::style::{BorderPaint, StrokeType};
use vectormap::vectormap_types::{geodesy, Coordinate, LatLonAltBox, LatLonBox, ObjectId};
use vectormap::{Color, CoordinateList, LineString, Polygon, Theme, VectorLayer, VectorObject};

const THEME: &str = r##"{
    "styles": {
        "land": {
            "fill_color": "#FFFFFF",
            "outline_color": "#000000",
            "border_conditions": [
                { "condition": "water", "color": "#0000FF" },
                { "condition": "LineString", "color": "#FF0000", "stroke": "Dashed" },
                { "condition": "None", "color": "#000000" }
            ]
        }
    },
    "default_style": { "fill_color": "#FFFFFF", "outline_color": "#000000" },
    "dateline": { "color": "#AAAAAA", "stroke": "Dotted" }
}"##;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn theme() -> Theme {
    serde_json::from_str(THEME).unwrap()
}

fn ring(points: &[(f32, f32)]) -> CoordinateList {
    CoordinateList::from_coordinates(
        points
            .iter()
            .map(|(lat, lon)| Coordinate::latlon(*lat, *lon).unwrap()),
    )
}

fn square(lat: f32, lon: f32) -> CoordinateList {
    ring(&[
        (lat, lon),
        (lat, lon + 1.0),
        (lat + 1.0, lon + 1.0),
        (lat + 1.0, lon),
    ])
}

fn polygon(layer: &VectorLayer, id: ObjectId) -> &Polygon {
    layer.get(id).and_then(VectorObject::as_polygon).unwrap()
}

fn colors(polygon: &Polygon) -> Vec<Color> {
    polygon.outline().iter().map(|s| s.color).collect()
}

#[test]
fn land_next_to_water() {
    init_logger();

    let mut layer = VectorLayer::new("parcels");
    let land = layer.add_object(Polygon::new("land", square(0.0, 0.0))).unwrap();
    layer.add_object(Polygon::new("water", square(0.0, 1.0))).unwrap();
    layer.update_outlines(&theme());

    let land = polygon(&layer, land);
    assert_eq!(colors(land), vec![Color::BLACK, Color::BLUE, Color::BLACK]);

    // Every vertex of the ring is covered and the segments join end to start.
    let segments = land.outline();
    assert_eq!(segments[0].coordinates.len(), 2);
    assert_eq!(segments[1].coordinates.len(), 2);
    assert_eq!(segments[2].coordinates.len(), 3);
    for pair in segments.windows(2) {
        let end = pair[0].coordinates.last().unwrap();
        let start = pair[1].coordinates.first().unwrap();
        assert!(end.ptr_eq(start));
    }
}

#[test]
fn road_along_the_border() {
    init_logger();

    let mut layer = VectorLayer::new("parcels");
    let land = layer.add_object(Polygon::new("land", square(0.0, 0.0))).unwrap();
    layer
        .add_object(LineString::new("road", ring(&[(1.0, 0.0), (1.0, 1.0)])))
        .unwrap();
    layer.update_outlines(&theme());

    let land = polygon(&layer, land);
    assert_eq!(colors(land), vec![Color::BLACK, Color::RED, Color::BLACK]);
    assert_eq!(land.outline()[1].stroke, StrokeType::Dashed);
}

#[test]
fn outline_update_is_idempotent() {
    init_logger();

    let mut layer = VectorLayer::new("parcels");
    let land = layer.add_object(Polygon::new("land", square(0.0, 0.0))).unwrap();
    layer.add_object(Polygon::new("water", square(0.0, 1.0))).unwrap();
    layer.add_object(Polygon::new("water", square(1.0, 0.0))).unwrap();

    let theme = theme();
    layer.update_outlines(&theme);
    let first = polygon(&layer, land).outline().to_vec();
    layer.update_outlines(&theme);
    let second = polygon(&layer, land).outline().to_vec();

    assert_eq!(first, second);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.coordinates.len(), b.coordinates.len());
        for (ca, cb) in a.coordinates.iter().zip(b.coordinates.iter()) {
            assert!(ca.ptr_eq(cb));
        }
    }
}

#[test]
fn removing_neighbor_restores_plain_outline() {
    init_logger();

    let mut layer = VectorLayer::new("parcels");
    let land = layer.add_object(Polygon::new("land", square(0.0, 0.0))).unwrap();
    let water = layer.add_object(Polygon::new("water", square(0.0, 1.0))).unwrap();
    let theme = theme();

    layer.update_outlines(&theme);
    assert_eq!(polygon(&layer, land).outline().len(), 3);

    layer.remove_object(water).unwrap();
    assert_eq!(layer.node_map().len(), 4);

    layer.update_outlines(&theme);
    assert_eq!(colors(polygon(&layer, land)), vec![Color::BLACK]);
}

#[test]
fn polygon_on_the_dateline() {
    init_logger();

    let mut layer = VectorLayer::new("pacific");
    let land = layer
        .add_object(Polygon::new(
            "land",
            ring(&[(0.0, 179.0), (0.0, 180.0), (1.0, 180.0), (1.0, 179.0)]),
        ))
        .unwrap();
    layer.update_outlines(&theme());

    let land = polygon(&layer, land);
    let paints: Vec<BorderPaint> = land.outline().iter().map(|s| s.paint()).collect();
    assert_eq!(paints.len(), 3);
    assert_eq!(paints[1], BorderPaint::new(Color::GRAY, StrokeType::Dotted));
}

#[test]
fn shared_vertex_update_is_seen_by_all_owners() {
    init_logger();

    let mut layer = VectorLayer::new("parcels");
    let a = layer.add_object(Polygon::new("land", square(0.0, 0.0))).unwrap();
    let b = layer.add_object(Polygon::new("land", square(0.0, 1.0))).unwrap();

    let shared = polygon(&layer, a).ring()[1].clone();
    shared
        .borrow_mut()
        .update(&Coordinate::latlon(0.0, 1.5).unwrap());

    assert_eq!(polygon(&layer, b).ring()[0].borrow().longitude(), 1.5);
}

#[test]
fn geometry_examples() {
    // One degree along the equator.
    let distance = geodesy::distance(
        &Coordinate::new(0.0, 0.0, 0.0).unwrap(),
        &Coordinate::new(0.0, 1.0, 0.0).unwrap(),
    );
    assert_abs_diff_eq!(distance, 111_195.0, epsilon = 1.0);

    let crossing = LatLonBox::new(10.0, -10.0, -170.0, 170.0);
    assert!(crossing.contains(&Coordinate::latlon(0.0, 179.0).unwrap()));
    assert!(crossing.contains(&Coordinate::latlon(0.0, -179.0).unwrap()));
    assert!(!crossing.contains(&Coordinate::latlon(0.0, 0.0).unwrap()));

    let combined = LatLonAltBox::new(10.0, 0.0, 10.0, 0.0, 0.0, 0.0)
        .combine(&LatLonAltBox::new(20.0, 5.0, 5.0, -5.0, 0.0, 0.0));
    assert_eq!(combined, LatLonAltBox::new(20.0, 0.0, 10.0, -5.0, 0.0, 0.0));
}
