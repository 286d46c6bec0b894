use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::{Affine, PageGeometry};
use crate::foundation::error::{KelsaError, KelsaResult};
use crate::preview::region::{Region, RegionStyle};

/// Straight-alpha RGBA8 raster.
pub type RasterImage = image::RgbaImage;

/// Converts the rendered letter region into a raster image.
pub trait SnapshotService: Send + Sync {
    /// Rasterize `region` at `scale` device pixels per CSS pixel.
    fn snapshot(&self, region: &Region, scale: f32) -> KelsaResult<RasterImage>;
}

const MAX_DIM: u32 = 16_384;

const MARGIN: f64 = 72.0;
const BODY_SIZE: f64 = 15.0;
const LINE_HEIGHT: f64 = 1.6;
/// Average advance of a serif glyph relative to its font size, used for line breaking.
const AVG_GLYPH_ADVANCE: f64 = 0.5;

const INK: &str = "#1f2937";
const NAVY: &str = "#1e3a5f";
const BACKDROP: &str = "#e2e8f0";
const TAB: &str = "    ";

/// Lays the letter out as an SVG page and rasterizes it with `resvg` on a white background.
pub struct SvgSnapshot {
    page: PageGeometry,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgSnapshot {
    /// Snapshot service over system fonts only.
    pub fn new(page: PageGeometry) -> Self {
        Self::with_font_dirs(page, &[])
    }

    /// Snapshot service over system fonts plus every `.ttf`/`.otf`/`.ttc` in `dirs`.
    pub fn with_font_dirs(page: PageGeometry, dirs: &[PathBuf]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font database ready");
        Self {
            page,
            fontdb: Arc::new(db),
        }
    }

    pub fn page(&self) -> PageGeometry {
        self.page
    }

    /// SVG source of the letter page, sized in CSS pixels.
    pub fn page_svg(&self, region: &Region) -> String {
        let (w, h) = self.page.size_css_px();
        let mut svg = SvgPage::new(f64::from(w), f64::from(h));
        svg.begin(&region.style);
        svg.letter(region);
        svg.finish()
    }
}

impl SnapshotService for SvgSnapshot {
    fn snapshot(&self, region: &Region, scale: f32) -> KelsaResult<RasterImage> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(KelsaError::validation("snapshot scale must be finite and > 0"));
        }

        let source = self.page_svg(region);
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&source, &opts).context("parse letter svg")?;

        let size = tree.size();
        let width = to_px(size.width() * scale)?;
        let height = to_px(size.height() * scale)?;
        if width > MAX_DIM || height > MAX_DIM {
            return Err(KelsaError::export(format!(
                "snapshot size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
            )));
        }

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| KelsaError::export("failed to allocate snapshot pixmap"))?;
        pixmap.fill(resvg::tiny_skia::Color::WHITE);

        let sx = (width as f32) / size.width();
        let sy = (height as f32) / size.height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        // Opaque white underlay: premultiplied and straight alpha coincide.
        RasterImage::from_raw(width, height, pixmap.data().to_vec())
            .ok_or_else(|| KelsaError::export("snapshot buffer size mismatch"))
    }
}

fn to_px(v: f32) -> KelsaResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(KelsaError::export("snapshot has invalid width/height"));
    }
    Ok((v.round() as u32).max(1))
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font dir not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(err) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %err, "skipping font file");
        }
    }
}

#[derive(Clone, Copy)]
enum Anchor {
    Start,
    End,
}

#[derive(Clone, Copy)]
enum Weight {
    Normal,
    Bold,
}

/// Incremental writer for the letter page SVG. `y` is the baseline cursor.
struct SvgPage {
    out: String,
    width: f64,
    height: f64,
    y: f64,
}

impl SvgPage {
    fn new(width: f64, height: f64) -> Self {
        Self {
            out: String::with_capacity(8 * 1024),
            width,
            height,
            y: MARGIN,
        }
    }

    fn begin(&mut self, style: &RegionStyle) {
        let (w, h) = (self.width, self.height);
        let _ = write!(
            self.out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Georgia, 'Times New Roman', serif">"#
        );
        if !style.is_neutral() {
            let _ = write!(self.out, r#"<rect width="{w}" height="{h}" fill="{BACKDROP}"/>"#);
        }
        if let Some(shadow) = style.shadow {
            let _ = write!(
                self.out,
                r##"<defs><filter id="page-shadow" x="-10%" y="-10%" width="120%" height="120%"><feDropShadow dx="{}" dy="{}" stdDeviation="{}" flood-color="#000000" flood-opacity="{}"/></filter></defs>"##,
                shadow.offset.x,
                shadow.offset.y,
                shadow.blur / 2.0,
                shadow.opacity.clamp(0.0, 1.0)
            );
        }

        let transform = style.transform.unwrap_or(Affine::IDENTITY);
        let [a, b, c, d, e, f] = transform.as_coeffs();
        let _ = write!(
            self.out,
            r#"<g transform="matrix({a} {b} {c} {d} {e} {f})">"#
        );

        let filter = if style.shadow.is_some() {
            r#" filter="url(#page-shadow)""#
        } else {
            ""
        };
        let _ = write!(
            self.out,
            r##"<rect width="{w}" height="{h}" rx="{r}" ry="{r}" fill="#ffffff"{filter}/>"##,
            r = style.corner_radius.max(0.0)
        );
    }

    fn finish(mut self) -> String {
        self.out.push_str("</g></svg>");
        self.out
    }

    fn letter(&mut self, region: &Region) {
        let d = &region.display;
        let right = self.width - MARGIN;

        // Letterhead.
        self.text(MARGIN, "KELSA", 28.0, Weight::Bold, Anchor::Start, NAVY);
        self.y += 14.0;
        let _ = write!(
            self.out,
            r#"<line x1="{MARGIN}" y1="{y}" x2="{right}" y2="{y}" stroke="{NAVY}" stroke-width="2"/>"#,
            y = self.y
        );
        self.y += 36.0;

        let meta_y = self.y;
        if let Some(reference) = &d.reference {
            self.text(MARGIN, reference, BODY_SIZE, Weight::Normal, Anchor::Start, INK);
        }
        if let Some(date) = &d.date {
            self.y = meta_y;
            self.text(right, date, BODY_SIZE, Weight::Normal, Anchor::End, INK);
        }
        if d.reference.is_some() || d.date.is_some() {
            self.y = meta_y + self.line_step(BODY_SIZE) * 2.0;
        }

        self.line(&d.recipient_name, Weight::Bold);
        if let Some(title) = &d.recipient_title {
            self.line(title, Weight::Normal);
        }
        for line in d.recipient_address.lines() {
            self.line(line, Weight::Normal);
        }
        self.gap();

        self.paragraph(&format!("Subject: {}", d.subject), Weight::Bold);
        self.gap();

        self.line(&d.salutation, Weight::Normal);
        self.gap();
        self.paragraph(&d.body, Weight::Normal);
        self.gap();

        self.line(&d.closing, Weight::Normal);
        if d.show_signature {
            self.signature();
        }
        self.line(&d.signatory, Weight::Bold);

        if self.y > self.height - MARGIN / 2.0 {
            tracing::warn!(
                overflow_px = self.y - (self.height - MARGIN / 2.0),
                "letter content overflows the page and will be clipped"
            );
        }
    }

    fn line_step(&self, size: f64) -> f64 {
        size * LINE_HEIGHT
    }

    fn gap(&mut self) {
        self.y += self.line_step(BODY_SIZE) * 0.6;
    }

    fn line(&mut self, text: &str, weight: Weight) {
        self.text(MARGIN, text, BODY_SIZE, weight, Anchor::Start, INK);
    }

    fn paragraph(&mut self, text: &str, weight: Weight) {
        let max_chars = ((self.width - 2.0 * MARGIN) / (BODY_SIZE * AVG_GLYPH_ADVANCE)) as usize;
        for line in wrap_text(text, max_chars) {
            self.line(&line, weight);
        }
    }

    /// Emit one line at the cursor and advance it.
    fn text(&mut self, x: f64, text: &str, size: f64, weight: Weight, anchor: Anchor, fill: &str) {
        if !text.is_empty() {
            let anchor = match anchor {
                Anchor::Start => "start",
                Anchor::End => "end",
            };
            let weight = match weight {
                Weight::Normal => "normal",
                Weight::Bold => "bold",
            };
            let _ = write!(
                self.out,
                r#"<text x="{x}" y="{y}" font-size="{size}" font-weight="{weight}" text-anchor="{anchor}" fill="{fill}" xml:space="preserve">{}</text>"#,
                escape_xml(text),
                y = self.y
            );
        }
        self.y += self.line_step(size);
    }

    fn signature(&mut self) {
        let x = MARGIN;
        let y = self.y + 12.0;
        let _ = write!(
            self.out,
            r#"<path d="M {x0} {y} c 12 -30 24 -30 30 0 s 18 28 30 0 s 20 -26 34 -4 s 16 18 40 -6" fill="none" stroke="{NAVY}" stroke-width="2" stroke-linecap="round"/>"#,
            x0 = x + 4.0
        );
        self.y += 48.0;
    }
}

/// Greedy word wrap at `max_chars` characters per line. Explicit newlines are kept, blank lines
/// included, and words longer than a line are split. Leading indentation of a paragraph is kept
/// on its first line, tabs expanded.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = leading_indent(paragraph, max_chars / 2);
        let mut current_len = current.len();
        let mut has_words = false;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if has_words {
                    lines.push(std::mem::take(&mut current));
                    has_words = false;
                }
                current.clear();
                current_len = 0;
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            if has_words && current_len + 1 + word.len() > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                has_words = false;
            }
            if !has_words && current_len + word.len() > max_chars {
                current.clear();
                current_len = 0;
            }
            if has_words {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
            has_words = true;
        }
        lines.push(current);
    }
    lines
}

/// Leading spaces and tabs of `paragraph` as spaces, at most `max` of them.
fn leading_indent(paragraph: &str, max: usize) -> String {
    let mut indent = String::new();
    for c in paragraph.chars() {
        match c {
            '\t' => indent.push_str(TAB),
            ' ' => indent.push(' '),
            _ => break,
        }
    }
    indent.truncate(max);
    indent
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str(TAB),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/export/snapshot.rs"]
mod tests;
