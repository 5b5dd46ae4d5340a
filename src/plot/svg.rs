//! SVG bar-chart renderer for out-degree histograms.
//!
//! Produces a self-contained SVG document: one bar per observed degree
//! value, positioned on a 0..=max_degree axis, with the axis labels and
//! title of the histogram contract ("Out degree" / "# count").

use std::io::{self, Write};

use super::Histogram;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

const BAR_FILL: &str = "#4878cf";
const AXIS_STROKE: &str = "#333333";

/// Renders the histogram as an SVG document into the writer.
///
/// An empty histogram still renders a titled, axed chart with no bars.
///
/// # Errors
///
/// Propagates any error from the underlying writer.
pub fn render_svg<W: Write>(hist: &Histogram, writer: &mut W) -> io::Result<()> {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let x_axis_y = MARGIN_TOP + plot_h;

    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    )?;
    writeln!(
        writer,
        r#"  <rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#
    )?;
    writeln!(
        writer,
        r#"  <text x="{x}" y="24" text-anchor="middle" font-family="sans-serif" font-size="18">Out-degree histogram</text>"#,
        x = WIDTH / 2.0
    )?;

    // axes
    writeln!(
        writer,
        r#"  <line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{x_axis_y}" stroke="{AXIS_STROKE}"/>"#
    )?;
    writeln!(
        writer,
        r#"  <line x1="{MARGIN_LEFT}" y1="{x_axis_y}" x2="{x2}" y2="{x_axis_y}" stroke="{AXIS_STROKE}"/>"#,
        x2 = MARGIN_LEFT + plot_w
    )?;

    // axis titles
    writeln!(
        writer,
        r#"  <text x="{x}" y="{y}" text-anchor="middle" font-family="sans-serif" font-size="14">Out degree</text>"#,
        x = MARGIN_LEFT + plot_w / 2.0,
        y = HEIGHT - 10.0
    )?;
    writeln!(
        writer,
        r#"  <text x="18" y="{y}" text-anchor="middle" font-family="sans-serif" font-size="14" transform="rotate(-90 18 {y})"># count</text>"#,
        y = MARGIN_TOP + plot_h / 2.0
    )?;

    if !hist.is_empty() {
        let slots = hist.max_degree().unwrap_or(0) + 1;
        let max_count = hist.max_count();
        let slot_w = plot_w / slots as f64;

        for (&degree, &count) in hist.counts() {
            let bar_h = plot_h * count as f64 / max_count as f64;
            let x = MARGIN_LEFT + slot_w * degree as f64 + slot_w * 0.1;
            let y = x_axis_y - bar_h;
            writeln!(
                writer,
                r#"  <rect class="bar" x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{BAR_FILL}"/>"#,
                w = slot_w * 0.8,
                h = bar_h
            )?;
        }

        write_x_ticks(writer, slots, slot_w, x_axis_y)?;
        write_y_ticks(writer, max_count, plot_h, x_axis_y)?;
    }

    writeln!(writer, "</svg>")
}

/// Renders the histogram into a string.
///
/// # Errors
///
/// Fails only if the renderer itself fails; writing to a `Vec` cannot.
pub fn render_svg_to_string(hist: &Histogram) -> io::Result<String> {
    let mut buffer = Vec::new();
    render_svg(hist, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_x_ticks<W: Write>(
    writer: &mut W,
    slots: usize,
    slot_w: f64,
    x_axis_y: f64,
) -> io::Result<()> {
    // label every slot while they fit, then thin out
    let step = slots.div_ceil(16);
    for degree in (0..slots).step_by(step) {
        let x = MARGIN_LEFT + slot_w * (degree as f64 + 0.5);
        writeln!(
            writer,
            r#"  <text x="{x:.1}" y="{y}" text-anchor="middle" font-family="sans-serif" font-size="12">{degree}</text>"#,
            y = x_axis_y + 18.0
        )?;
    }
    Ok(())
}

fn write_y_ticks<W: Write>(
    writer: &mut W,
    max_count: usize,
    plot_h: f64,
    x_axis_y: f64,
) -> io::Result<()> {
    let divisions = max_count.min(4);
    for i in 0..=divisions {
        let value = max_count * i / divisions;
        let y = x_axis_y - plot_h * value as f64 / max_count as f64;
        writeln!(
            writer,
            r#"  <text x="{x}" y="{y:.1}" text-anchor="end" font-family="sans-serif" font-size="12">{value}</text>"#,
            x = MARGIN_LEFT - 8.0
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_bar_per_observed_degree() {
        let hist = Histogram::from_degrees(vec![0, 0, 1, 3, 3, 3]);
        let svg = render_svg_to_string(&hist).unwrap();
        let bars = svg.matches(r#"<rect class="bar""#).count();
        assert_eq!(bars, hist.counts().len());
    }

    #[test]
    fn test_empty_histogram_renders_frame_only() {
        let hist = Histogram::from_degrees(Vec::new());
        let svg = render_svg_to_string(&hist).unwrap();
        assert!(svg.contains("Out-degree histogram"));
        assert!(!svg.contains(r#"<rect class="bar""#));
    }

    #[test]
    fn test_axis_labels_present() {
        let hist = Histogram::from_degrees(vec![2, 2]);
        let svg = render_svg_to_string(&hist).unwrap();
        assert!(svg.contains("Out degree"));
        assert!(svg.contains("# count"));
    }

    #[test]
    fn test_tallest_bar_spans_plot_height() {
        let hist = Histogram::from_degrees(vec![0, 1, 1]);
        let svg = render_svg_to_string(&hist).unwrap();
        // the degree-1 bar has the max count, so its height is the full plot area
        let full_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        assert!(svg.contains(&format!(r#"height="{full_height:.1}""#)));
    }
}
