use super::*;

#[test]
fn a4_in_points_and_pixels() {
    let pt = PageGeometry::A4.size_pt();
    assert!((pt.width - 595.2756).abs() < 1e-3);
    assert!((pt.height - 841.8898).abs() < 1e-3);
    assert_eq!(PageGeometry::A4.size_css_px(), (794, 1123));
}

#[test]
fn full_width_image_keeps_aspect_ratio() {
    let a4 = PageGeometry::A4;
    let h = a4.full_width_image_height_pt(1000, 1414);
    assert!((h - a4.size_pt().width * 1.414).abs() < 1e-9);
    assert!((a4.full_width_image_height_pt(1000, 2000) - 2.0 * a4.size_pt().width).abs() < 1e-9);
    assert_eq!(a4.full_width_image_height_pt(0, 10), 0.0);
}

#[test]
fn page_geometry_rejects_degenerate_sizes() {
    assert!(PageGeometry::new(0.0, 297.0).is_err());
    assert!(PageGeometry::new(210.0, f64::NAN).is_err());
    assert!(PageGeometry::new(216.0, 279.0).is_ok());
}

#[test]
fn fixed_clock_and_iso_date() {
    let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    assert_eq!(FixedClock(day).today(), day);
    assert_eq!(iso_date(day), "2024-05-01");
}
