use super::*;

fn page_image(width: u32, height: u32) -> RasterImage {
    RasterImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]))
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|w| w == needle.as_bytes())
}

fn find(haystack: &[u8], needle: &str) -> usize {
    haystack
        .windows(needle.len())
        .position(|w| w == needle.as_bytes())
        .unwrap()
}

#[test]
fn pdf_has_header_trailer_and_a4_media_box() {
    let pdf = PdfAssembler::default()
        .assemble(&page_image(794, 1123), PageGeometry::A4)
        .unwrap();
    assert!(pdf.starts_with(b"%PDF-1.4\n"));
    assert!(pdf.ends_with(b"%%EOF\n"));
    assert!(contains(&pdf, "/MediaBox [0 0 595.28 841.89]"));
    assert!(contains(&pdf, "/Width 794 /Height 1123"));
    assert!(contains(&pdf, "/Filter /DCTDecode"));
}

#[test]
fn image_is_drawn_at_full_width_from_the_top() {
    // Half as tall as wide: drawn 297.64pt high, hanging from the top edge.
    let pdf = PdfAssembler::default()
        .assemble(&page_image(200, 100), PageGeometry::A4)
        .unwrap();
    assert!(contains(&pdf, "595.28 0 0 297.64 0 544.25 cm"));
}

#[test]
fn xref_offsets_point_at_objects() {
    let pdf = PdfAssembler::default()
        .assemble(&page_image(40, 56), PageGeometry::A4)
        .unwrap();

    let start = find(&pdf, "startxref\n") + "startxref\n".len();
    let tail = std::str::from_utf8(&pdf[start..]).unwrap();
    let xref_at: usize = tail.lines().next().unwrap().parse().unwrap();
    assert!(pdf[xref_at..].starts_with(b"xref\n0 7\n"));

    let table = std::str::from_utf8(&pdf[xref_at..]).unwrap();
    for (i, line) in table.lines().skip(3).take(6).enumerate() {
        let offset: usize = line[..10].parse().unwrap();
        let header = format!("{} 0 obj\n", i + 1);
        assert!(pdf[offset..].starts_with(header.as_bytes()), "object {}", i + 1);
    }
}

#[test]
fn stream_lengths_match_their_payloads() {
    let assembler = PdfAssembler::new(80).unwrap();
    let img = page_image(64, 64);
    let pdf = assembler.assemble(&img, PageGeometry::A4).unwrap();
    let jpeg = encode_jpeg(&img, 80).unwrap();
    assert!(contains(&pdf, &format!("/Length {} >>", jpeg.len())));
    assert!(jpeg.starts_with(&[0xFF, 0xD8]));
}

#[test]
fn translucent_pixels_are_flattened_onto_white() {
    let img = RasterImage::from_pixel(8, 8, image::Rgba([0, 0, 0, 0]));
    let jpeg = encode_jpeg(&img, 100).unwrap();
    let decoded = image::load_from_memory(&jpeg).unwrap().to_rgb8();
    assert!(decoded.pixels().all(|px| px.0.iter().all(|&c| c > 245)));
}

#[test]
fn quality_and_geometry_are_validated() {
    assert!(PdfAssembler::new(0).is_err());
    assert!(PdfAssembler::new(101).is_err());

    let bad_page = PageGeometry {
        size_mm: crate::foundation::core::Size::new(0.0, 297.0),
    };
    let err = PdfAssembler::default()
        .assemble(&page_image(4, 4), bad_page)
        .unwrap_err();
    assert!(matches!(err, KelsaError::Validation(_)));
}

#[test]
fn numbers_are_trimmed() {
    assert_eq!(num(595.2755), "595.28");
    assert_eq!(num(12.0), "12");
    assert_eq!(num(0.5), "0.5");
    assert_eq!(num(-0.001), "0");
}
