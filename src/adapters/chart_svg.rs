//! Inline SVG charts for the HTML dashboard.
//!
//! Both charts plot one point per trade, x = trade number starting at 1, and
//! always include the zero line in the y range so the area fill reaches it.

use std::fmt::Write;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 300.0;
const PADDING: f64 = 48.0;

const POSITIVE_COLOR: &str = "#16a34a";
const NEGATIVE_COLOR: &str = "#dc2626";
const DRAWDOWN_FILL: &str = "rgba(239,68,68,0.3)";

struct Frame {
    min: f64,
    max: f64,
    count: usize,
}

impl Frame {
    fn new(values: &[f64]) -> Self {
        let min = values.iter().copied().fold(0.0_f64, f64::min);
        let max = values.iter().copied().fold(0.0_f64, f64::max);
        Frame {
            min,
            max,
            count: values.len(),
        }
    }

    fn x(&self, index: usize) -> f64 {
        let plot_width = WIDTH - 2.0 * PADDING;
        if self.count > 1 {
            PADDING + index as f64 * plot_width / (self.count - 1) as f64
        } else {
            PADDING + plot_width / 2.0
        }
    }

    fn y(&self, value: f64) -> f64 {
        let plot_height = HEIGHT - 2.0 * PADDING;
        let range = self.max - self.min;
        if range > 0.0 {
            HEIGHT - PADDING - (value - self.min) * plot_height / range
        } else {
            HEIGHT - PADDING
        }
    }

    fn points(&self, values: &[f64]) -> Vec<(f64, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (self.x(i), self.y(v)))
            .collect()
    }
}

fn join_points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn area_points(frame: &Frame, points: &[(f64, f64)]) -> String {
    let zero = frame.y(0.0);
    let mut area = points.to_vec();
    if let (Some(&(first_x, _)), Some(&(last_x, _))) = (points.first(), points.last()) {
        area.push((last_x, zero));
        area.push((first_x, zero));
    }
    join_points(&area)
}

fn open_svg(out: &mut String, frame: &Frame, y_title: &str) {
    let zero = frame.y(0.0);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH:.0} {HEIGHT:.0}" width="100%" preserveAspectRatio="xMidYMid meet">"#
    );
    let _ = write!(
        out,
        r##"<line x1="{PADDING:.1}" y1="{zero:.1}" x2="{x2:.1}" y2="{zero:.1}" stroke="#9ca3af" stroke-dasharray="4 4"/>"##,
        x2 = WIDTH - PADDING,
    );
    let _ = write!(
        out,
        r##"<line x1="{PADDING:.1}" y1="{PADDING:.1}" x2="{PADDING:.1}" y2="{bottom:.1}" stroke="#6b7280"/>"##,
        bottom = HEIGHT - PADDING,
    );
    let _ = write!(
        out,
        r##"<text x="{x:.1}" y="{y:.1}" font-size="12" text-anchor="middle" fill="#374151">Trade #</text>"##,
        x = WIDTH / 2.0,
        y = HEIGHT - 8.0,
    );
    let _ = write!(
        out,
        r##"<text x="12" y="{y:.1}" font-size="12" text-anchor="middle" fill="#374151" transform="rotate(-90 12 {y:.1})">{y_title}</text>"##,
        y = HEIGHT / 2.0,
    );
    let _ = write!(
        out,
        r##"<text x="{x:.1}" y="{y:.1}" font-size="10" text-anchor="end" fill="#6b7280">{max:.2}</text>"##,
        x = PADDING - 4.0,
        y = frame.y(frame.max) + 4.0,
        max = frame.max,
    );
    let _ = write!(
        out,
        r##"<text x="{x:.1}" y="{y:.1}" font-size="10" text-anchor="end" fill="#6b7280">{min:.2}</text>"##,
        x = PADDING - 4.0,
        y = frame.y(frame.min) + 4.0,
        min = frame.min,
    );
    let _ = write!(
        out,
        r##"<text x="{x:.1}" y="{y:.1}" font-size="10" text-anchor="middle" fill="#6b7280">1</text>"##,
        x = frame.x(0),
        y = HEIGHT - PADDING + 14.0,
    );
    if frame.count > 1 {
        let _ = write!(
            out,
            r##"<text x="{x:.1}" y="{y:.1}" font-size="10" text-anchor="middle" fill="#6b7280">{n}</text>"##,
            x = frame.x(frame.count - 1),
            y = HEIGHT - PADDING + 14.0,
            n = frame.count,
        );
    }
}

/// Equity curve of cumulative PnL with markers, filled to zero. Green when
/// `positive`, red otherwise. Empty input renders nothing.
pub fn generate_equity_svg(cumulative_pnl: &[f64], positive: bool) -> String {
    if cumulative_pnl.is_empty() {
        return String::new();
    }

    let color = if positive {
        POSITIVE_COLOR
    } else {
        NEGATIVE_COLOR
    };
    let frame = Frame::new(cumulative_pnl);
    let points = frame.points(cumulative_pnl);

    let mut out = String::new();
    open_svg(&mut out, &frame, "PnL");
    let _ = write!(
        out,
        r#"<polygon points="{}" fill="{color}" fill-opacity="0.2" stroke="none"/>"#,
        area_points(&frame, &points),
    );
    let _ = write!(
        out,
        r#"<polyline points="{}" fill="none" stroke="{color}" stroke-width="2"/>"#,
        join_points(&points),
    );
    for (x, y) in &points {
        let _ = write!(out, r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{color}"/>"#);
    }
    out.push_str("</svg>");
    out
}

/// Drawdown from the running peak, drawn as a red area hanging from zero.
pub fn generate_drawdown_svg(drawdown: &[f64]) -> String {
    if drawdown.is_empty() {
        return String::new();
    }

    let frame = Frame::new(drawdown);
    let points = frame.points(drawdown);

    let mut out = String::new();
    open_svg(&mut out, &frame, "Drawdown");
    let _ = write!(
        out,
        r#"<polygon points="{}" fill="{DRAWDOWN_FILL}" stroke="{NEGATIVE_COLOR}" stroke-width="1.5"/>"#,
        area_points(&frame, &points),
    );
    out.push_str("</svg>");
    out
}
