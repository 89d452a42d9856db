use chrono::{TimeZone, Utc};
use learner_charts::core::{LinearScale, Padding, PixelRange, ScaleDomain, TimeScale, Viewport, scale};

#[test]
fn scale_maps_domain_endpoints_onto_range_endpoints() {
    let domain = ScaleDomain::new(0.0, 200.0).expect("valid domain");
    let range = PixelRange::new(305.0, 45.0);

    assert!((scale(domain, range, 0.0).expect("min") - 305.0).abs() <= 1e-9);
    assert!((scale(domain, range, 200.0).expect("max") - 45.0).abs() <= 1e-9);
    assert!((scale(domain, range, 100.0).expect("mid") - 175.0).abs() <= 1e-9);
}

#[test]
fn degenerate_domain_maps_to_range_midpoint() {
    let domain = ScaleDomain::new(7.0, 7.0).expect("valid domain");
    let px = scale(domain, PixelRange::new(0.0, 100.0), 7.0).expect("to pixel");
    assert_eq!(px, 50.0);
}

#[test]
fn inverted_domain_is_rejected() {
    assert!(ScaleDomain::new(10.0, 1.0).is_err());
    assert!(LinearScale::new(f64::NAN, 1.0).is_err());
}

#[test]
fn values_outside_the_domain_extrapolate() {
    let scale = LinearScale::new(0.0, 10.0).expect("valid scale");
    let px = scale
        .domain_to_pixel(20.0, PixelRange::new(0.0, 100.0))
        .expect("to pixel");
    assert!((px - 200.0).abs() <= 1e-9);
}

#[test]
fn linear_round_trip_within_tolerance() {
    let scale = LinearScale::new(10.0, 110.0).expect("valid scale");
    let range = PixelRange::new(0.0, 1000.0);

    let original = 42.5;
    let px = scale.domain_to_pixel(original, range).expect("to pixel");
    let recovered = scale.pixel_to_domain(px, range).expect("from pixel");
    assert!((recovered - original).abs() <= 1e-9);
}

#[test]
fn time_scale_places_instants_proportionally() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("start");
    let end = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).single().expect("end");
    let middle = Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).single().expect("middle");

    let scale = TimeScale::new(start, end).expect("valid scale");
    let range = PixelRange::new(45.0, 505.0);
    let px = scale.time_to_pixel(middle, range).expect("to pixel");
    assert!((px - 275.0).abs() <= 1e-9);

    let ticks = scale.evenly_spaced(3).expect("ticks");
    assert_eq!(ticks, vec![start, middle, end]);
}

#[test]
fn viewport_padding_defines_plot_area() {
    let viewport = Viewport::new(550, 350).with_padding(Padding::uniform(45.0));
    let plot = viewport.plot_area().expect("plot area");
    assert_eq!(plot.width, 460.0);
    assert_eq!(plot.height, 260.0);
    assert_eq!(plot.y_range(), PixelRange::new(305.0, 45.0));

    let cramped = Viewport::new(80, 60).with_padding(Padding::uniform(45.0));
    assert!(!cramped.is_valid());
}
