use super::*;
use crate::preview::display::DisplayModel;

fn region() -> Region {
    Region::new(DisplayModel {
        date: Some("May 1, 2024".to_string()),
        reference: Some("Ref: HR/2024/017".to_string()),
        recipient_name: "Jane Doe".to_string(),
        recipient_title: None,
        recipient_address: "12 Harbour Road\nMombasa".to_string(),
        subject: "Q3 Report <draft> & notes".to_string(),
        salutation: "Dear Jane,".to_string(),
        body: "Thank you for the update. ".repeat(40),
        closing: "Yours faithfully,".to_string(),
        signatory: "Management".to_string(),
        show_signature: true,
    })
}

fn service() -> SvgSnapshot {
    SvgSnapshot::new(PageGeometry::A4)
}

fn is_white(px: &image::Rgba<u8>) -> bool {
    px.0 == [255, 255, 255, 255]
}

#[test]
fn snapshot_is_page_size_times_scale() {
    let mut region = region();
    region.style = RegionStyle::NEUTRAL;
    let img = service().snapshot(&region, 0.5).unwrap();
    assert_eq!(img.dimensions(), (397, 562));
}

#[test]
fn snapshot_carries_ink() {
    let mut region = region();
    region.style = RegionStyle::NEUTRAL;
    let img = service().snapshot(&region, 0.5).unwrap();
    assert!(img.pixels().any(|px| px.0[0] < 128 && px.0[3] == 255));
}

#[test]
fn neutral_style_fills_the_page_corner_white() {
    let mut region = region();
    region.style = RegionStyle::NEUTRAL;
    let img = service().snapshot(&region, 0.5).unwrap();
    assert!(is_white(img.get_pixel(0, 0)));
}

#[test]
fn decorated_style_shows_backdrop_at_rounded_corner() {
    let img = service().snapshot(&region(), 0.5).unwrap();
    assert!(!is_white(img.get_pixel(0, 0)));
}

#[test]
fn text_is_xml_escaped() {
    let svg = service().page_svg(&region());
    assert!(svg.contains("Q3 Report &lt;draft&gt; &amp; notes"));
    assert!(!svg.contains("<draft>"));
}

#[test]
fn zoom_transform_is_written_into_the_page_group() {
    let mut region = region();
    region.style.transform = Some(Affine::scale(1.5));
    let svg = service().page_svg(&region);
    assert!(svg.contains(r#"transform="matrix(1.5 0 0 1.5 0 0)""#));
}

#[test]
fn invalid_scale_is_rejected() {
    let err = service().snapshot(&region(), 0.0).unwrap_err();
    assert!(matches!(err, KelsaError::Validation(_)));
    assert!(service().snapshot(&region(), f32::NAN).is_err());
}

#[test]
fn oversized_snapshot_is_rejected() {
    let err = service().snapshot(&region(), 40.0).unwrap_err();
    assert!(err.to_string().contains("too large"));
}

#[test]
fn wrap_breaks_on_word_boundaries_and_keeps_blank_lines() {
    let lines = wrap_text("one two three\n\nfour", 8);
    assert_eq!(lines, vec!["one two", "three", "", "four"]);
}

#[test]
fn wrap_splits_words_longer_than_a_line() {
    let lines = wrap_text("abcdefghij xy", 4);
    assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
}

#[test]
fn tabs_render_as_spaces_and_other_controls_are_dropped() {
    assert_eq!(escape_xml("Ref:\tA\u{7}B"), "Ref:    AB");

    let mut region = region();
    region.display.recipient_address = "Unit 4\tHarbour Road".to_string();
    let svg = service().page_svg(&region);
    assert!(svg.contains("Unit 4    Harbour Road"));
}

#[test]
fn wrap_keeps_tab_indentation_of_a_paragraph() {
    let lines = wrap_text("\tIndented paragraph\nplain", 40);
    assert_eq!(lines, vec!["    Indented paragraph", "plain"]);
}
