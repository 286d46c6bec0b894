use std::io::Write as _;

use anyhow::Context as _;
use image::codecs::jpeg::JpegEncoder;

use crate::export::snapshot::RasterImage;
use crate::foundation::core::PageGeometry;
use crate::foundation::error::{KelsaError, KelsaResult};

/// Embeds a raster snapshot into a downloadable document.
pub trait DocumentAssembler: Send + Sync {
    fn assemble(&self, image: &RasterImage, page: PageGeometry) -> KelsaResult<Vec<u8>>;
}

/// Single-page PDF 1.4 writer. The snapshot is JPEG-encoded (`DCTDecode`) and drawn from the
/// top-left corner at full page width, keeping its aspect ratio.
#[derive(Clone, Copy, Debug)]
pub struct PdfAssembler {
    jpeg_quality: u8,
}

impl PdfAssembler {
    pub const DEFAULT_QUALITY: u8 = 92;

    pub fn new(jpeg_quality: u8) -> KelsaResult<Self> {
        if !(1..=100).contains(&jpeg_quality) {
            return Err(KelsaError::validation("jpeg quality must be in 1..=100"));
        }
        Ok(Self { jpeg_quality })
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}

impl Default for PdfAssembler {
    fn default() -> Self {
        Self {
            jpeg_quality: Self::DEFAULT_QUALITY,
        }
    }
}

impl DocumentAssembler for PdfAssembler {
    fn assemble(&self, image: &RasterImage, page: PageGeometry) -> KelsaResult<Vec<u8>> {
        page.validate()?;
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(KelsaError::export("cannot assemble an empty snapshot"));
        }

        let jpeg = encode_jpeg(image, self.jpeg_quality)?;
        let page_pt = page.size_pt();
        let draw_h = page.full_width_image_height_pt(width, height);
        let content = format!(
            "q\n{w} 0 0 {h} 0 {y} cm\n/Im0 Do\nQ\n",
            w = num(page_pt.width),
            h = num(draw_h),
            y = num(page_pt.height - draw_h),
        );

        let mut pdf = PdfWriter::new();
        pdf.object(b"<< /Type /Catalog /Pages 2 0 R >>")?;
        pdf.object(b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>")?;
        pdf.object(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /XObject << /Im0 4 0 R >> >> /Contents 5 0 R >>",
                num(page_pt.width),
                num(page_pt.height)
            )
            .as_bytes(),
        )?;
        pdf.stream(
            &format!(
                "<< /Type /XObject /Subtype /Image /Width {width} /Height {height} \
                 /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode /Length {} >>",
                jpeg.len()
            ),
            &jpeg,
        )?;
        pdf.stream(
            &format!("<< /Length {} >>", content.len()),
            content.as_bytes(),
        )?;
        pdf.object(
            format!(
                "<< /Producer (kelsa {}) >>",
                env!("CARGO_PKG_VERSION")
            )
            .as_bytes(),
        )?;

        let bytes = pdf.finish(1, 6)?;
        tracing::debug!(bytes = bytes.len(), jpeg = jpeg.len(), "pdf assembled");
        Ok(bytes)
    }
}

/// Flatten onto white and encode as baseline JPEG.
fn encode_jpeg(image: &RasterImage, quality: u8) -> KelsaResult<Vec<u8>> {
    let mut rgb = image::RgbImage::new(image.width(), image.height());
    for (dst, src) in rgb.pixels_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        let a = u16::from(a);
        let over_white = |c: u8| ((u16::from(c) * a + 255 * (255 - a) + 127) / 255) as u8;
        *dst = image::Rgb([over_white(r), over_white(g), over_white(b)]);
    }

    let mut buf = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
        .context("encode snapshot as jpeg")?;
    Ok(buf)
}

/// PDF real number: at most two decimals, no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Sequential object writer. Objects are numbered from 1 in the order they are written.
struct PdfWriter {
    out: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut out = Vec::with_capacity(64 * 1024);
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            out,
            offsets: Vec::new(),
        }
    }

    fn begin(&mut self) -> KelsaResult<()> {
        self.offsets.push(self.out.len());
        let id = self.offsets.len();
        writeln!(self.out, "{id} 0 obj").context("write pdf object header")?;
        Ok(())
    }

    fn object(&mut self, body: &[u8]) -> KelsaResult<()> {
        self.begin()?;
        self.out.extend_from_slice(body);
        self.out.extend_from_slice(b"\nendobj\n");
        Ok(())
    }

    fn stream(&mut self, dict: &str, data: &[u8]) -> KelsaResult<()> {
        self.begin()?;
        self.out.extend_from_slice(dict.as_bytes());
        self.out.extend_from_slice(b"\nstream\n");
        self.out.extend_from_slice(data);
        self.out.extend_from_slice(b"\nendstream\nendobj\n");
        Ok(())
    }

    fn finish(mut self, root: usize, info: usize) -> KelsaResult<Vec<u8>> {
        let xref_at = self.out.len();
        let count = self.offsets.len() + 1;
        writeln!(self.out, "xref\n0 {count}\n0000000000 65535 f ").context("write pdf xref")?;
        for offset in &self.offsets {
            writeln!(self.out, "{offset:010} 00000 n ").context("write pdf xref")?;
        }
        writeln!(
            self.out,
            "trailer\n<< /Size {count} /Root {root} 0 R /Info {info} 0 R >>\nstartxref\n{xref_at}\n%%EOF"
        )
        .context("write pdf trailer")?;
        Ok(self.out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/assembly.rs"]
mod tests;
