//! Sparkline coordinate mapping.
//!
//! Normalizes a numeric series into integer plot coordinates (origin
//! top-left, higher values toward smaller y) and builds SVG path
//! descriptors from them. The mapping is deterministic: identical inputs
//! always produce identical coordinates and path strings.

/// A plotted point in chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

/// Maps a series of samples onto a `width` x `height` plot area.
///
/// An empty series maps to no points (the caller renders a placeholder).
/// A flat series has its span forced to 1 so it draws as a flat line
/// instead of dividing by zero; a single sample plots at x=0.
pub fn map_to_sparkline(values: &[f64], width: f64, height: f64) -> Vec<Point> {
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut span = max - min;
    if span == 0.0 {
        span = 1.0;
    }
    let step = if values.len() > 1 {
        width / (values.len() - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Point {
            x: (i as f64 * step).round() as i64,
            y: (height - ((v - min) / span) * height).round() as i64,
        })
        .collect()
}

/// Builds an SVG path descriptor: a move-to followed by line-to segments
/// in sample order. Empty input yields an empty string.
pub fn svg_path(points: &[Point]) -> String {
    let mut iter = points.iter();
    let first = match iter.next() {
        Some(p) => p,
        None => return String::new(),
    };
    let mut d = format!("M{},{}", first.x, first.y);
    for p in iter {
        d.push_str(&format!(" L{},{}", p.x, p.y));
    }
    d
}

/// Wraps mapped points in a minimal standalone SVG document.
pub fn svg_document(points: &[Point], width: u32, height: u32, stroke: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" preserveAspectRatio=\"none\"><path d=\"{}\" stroke=\"{}\" stroke-width=\"2.5\" fill=\"none\"/></svg>",
        width,
        height,
        svg_path(points),
        stroke
    )
}
