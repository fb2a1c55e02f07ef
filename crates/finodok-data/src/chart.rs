//! Closing-price line charts.
//!
//! The chart is laid out as SVG and rasterised to PNG with `resvg`, so no
//! plotting backend or system library is needed.

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{DataError, Result};
use crate::history::PriceHistory;

const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 44.0;
const MARGIN_BOTTOM: f64 = 40.0;
const GRID_LINES: usize = 5;
const LINE_COLOR: &str = "#1f77b4";

/// Renders price histories as PNG line charts
pub struct ChartRenderer {
    width: u32,
    height: u32,
    scale: f32,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer {
    /// Create an 800x400 renderer at 1.2x scale with system fonts loaded
    pub fn new() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();

        if fontdb.is_empty() {
            warn!("No system fonts found, chart text will be omitted");
        }

        Self {
            width: 800,
            height: 400,
            scale: 1.2,
            fontdb: Arc::new(fontdb),
        }
    }

    /// Set the logical chart size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the rasterisation scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Draw the history's closing prices and encode the chart as PNG
    pub fn render_png(&self, history: &PriceHistory, title: &str) -> Result<Vec<u8>> {
        let svg = self.render_svg(history, title)?;
        self.svg_to_png(&svg)
    }

    /// Lay out the chart as an SVG document
    pub fn render_svg(&self, history: &PriceHistory, title: &str) -> Result<String> {
        let (lo, hi) = history.close_range().ok_or(DataError::EmptySeries)?;
        let (lo, hi) = padded_range(lo, hi);

        let width = f64::from(self.width);
        let height = f64::from(self.height);
        let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;
        let y_of = |price: f64| MARGIN_TOP + plot_h * (hi - price) / (hi - lo);

        let points = history.points();
        let step = if points.len() > 1 {
            plot_w / (points.len() - 1) as f64
        } else {
            0.0
        };

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        let _ = write!(svg, r#"<rect width="{}" height="{}" fill="white"/>"#, self.width, self.height);

        for i in 0..=GRID_LINES {
            let price = lo + (hi - lo) * i as f64 / GRID_LINES as f64;
            let y = y_of(price);
            let _ = write!(
                svg,
                r##"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="#b0b0b0" stroke-width="0.5" stroke-dasharray="1,2"/>"##,
                x1 = MARGIN_LEFT,
                x2 = MARGIN_LEFT + plot_w,
                y = y
            );
            let _ = write!(
                svg,
                r#"<text x="{x:.1}" y="{y:.1}" font-family="sans-serif" font-size="11" text-anchor="end">{price:.2}</text>"#,
                x = MARGIN_LEFT - 6.0,
                y = y + 4.0,
                price = price
            );
        }

        let _ = write!(
            svg,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="none" stroke="black" stroke-width="0.8"/>"#,
            x = MARGIN_LEFT,
            y = MARGIN_TOP,
            w = plot_w,
            h = plot_h
        );

        let mut path = String::new();
        for (i, point) in points.iter().enumerate() {
            let x = MARGIN_LEFT + step * i as f64;
            let _ = write!(path, "{}{:.2},{:.2} ", if i == 0 { 'M' } else { 'L' }, x, y_of(point.close));
        }
        let _ = write!(
            svg,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="1.5"/>"#,
            path.trim_end(),
            LINE_COLOR
        );

        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            let label_y = MARGIN_TOP + plot_h + 18.0;
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="11">{}</text>"#,
                MARGIN_LEFT,
                label_y,
                first.date.format("%Y-%m-%d")
            );
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="11" text-anchor="end">{}</text>"#,
                MARGIN_LEFT + plot_w,
                label_y,
                last.date.format("%Y-%m-%d")
            );
        }

        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="26" font-family="sans-serif" font-size="15" text-anchor="middle">{}</text>"#,
            width / 2.0,
            xml_escape(title)
        );
        let _ = write!(
            svg,
            r#"<text transform="translate(16 {:.1}) rotate(-90)" font-family="sans-serif" font-size="12" text-anchor="middle">Price (INR)</text>"#,
            MARGIN_TOP + plot_h / 2.0
        );
        svg.push_str("</svg>");

        debug!(points = points.len(), "laid out price chart");
        Ok(svg)
    }

    fn svg_to_png(&self, svg: &str) -> Result<Vec<u8>> {
        let tree = {
            let mut opts = usvg::Options::default();
            opts.fontdb = self.fontdb.clone();
            usvg::Tree::from_str(svg, &opts)
                .map_err(|e| DataError::Chart(format!("SVG parsing failed: {}", e)))?
        };

        let target_width = (self.width as f32 * self.scale).ceil() as u32;
        let target_height = (self.height as f32 * self.scale).ceil() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(target_width, target_height).ok_or_else(|| {
            DataError::Chart(format!(
                "Failed to create pixmap ({}x{})",
                target_width, target_height
            ))
        })?;

        let transform = tiny_skia::Transform::from_scale(self.scale, self.scale);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| DataError::Chart(format!("PNG encoding failed: {}", e)))
    }
}

/// Widen a price range by 5% each side; a flat series gets a unit band
fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    (lo - span * 0.05, hi + span * 0.05)
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
