use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::api::Timeline;

// Dashboard chart palette.
const LINE_COLOR: &str = "rgba(75, 192, 192, 1)";
const FILL_COLOR: &str = "rgba(75, 192, 192, 0.2)";
const AXIS_COLOR: &str = "#9aa0a6";
const LABEL_FONT: &str = "11px sans-serif";
const SERIES_LABEL: &str = "Generations";
const MAX_X_LABELS: usize = 6;

pub(crate) const PADDING: f64 = 32.0;

/// Renderable prefix of the timeline. Labels and data are meant to pair up;
/// a mismatched payload is clamped to the shorter run.
pub(crate) fn series_len(timeline: &Timeline) -> usize {
    timeline.labels.len().min(timeline.data.len())
}

/// Scales a series into canvas coordinates, leaving `PADDING` on every side.
/// A single point sits centered; an all-zero series sits on the baseline.
pub(crate) fn plot_points(data: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
    let max = data.iter().copied().fold(0.0_f64, f64::max);
    let max = if max > 0.0 { max } else { 1.0 };

    let inner_width = (width - 2.0 * PADDING).max(1.0);
    let inner_height = (height - 2.0 * PADDING).max(1.0);
    let step = if data.len() > 1 {
        inner_width / (data.len() - 1) as f64
    } else {
        0.0
    };

    data.iter()
        .enumerate()
        .map(|(idx, value)| {
            let x = if data.len() > 1 {
                PADDING + step * idx as f64
            } else {
                width / 2.0
            };
            let clamped = value.clamp(0.0, max);
            let y = height - PADDING - (clamped / max) * inner_height;
            (x, y)
        })
        .collect()
}

/// Indices of the x labels to draw so at most `max_labels` appear, always
/// keeping the first and last bucket.
pub(crate) fn label_indices(len: usize, max_labels: usize) -> Vec<usize> {
    if len == 0 || max_labels == 0 {
        return Vec::new();
    }
    if len <= max_labels {
        return (0..len).collect();
    }
    if max_labels == 1 {
        return vec![0];
    }

    let step = (len - 1) as f64 / (max_labels - 1) as f64;
    let mut indices: Vec<usize> = (0..max_labels)
        .map(|slot| (slot as f64 * step).round() as usize)
        .collect();
    indices.dedup();
    indices
}

pub fn draw_timeline(canvas: &HtmlCanvasElement, timeline: &Timeline) {
    let Some(ctx) = context_2d(canvas) else {
        log::warn!("canvas 2d context unavailable; skipping chart");
        return;
    };

    let width = f64::from(canvas.width());
    let height = f64::from(canvas.height());
    ctx.clear_rect(0.0, 0.0, width, height);

    let len = series_len(timeline);
    if len != timeline.labels.len() || len != timeline.data.len() {
        log::warn!(
            "timeline labels/data lengths differ ({} vs {}); clamping to {len}",
            timeline.labels.len(),
            timeline.data.len()
        );
    }
    let data = &timeline.data[..len];
    let labels = &timeline.labels[..len];

    draw_axes(&ctx, width, height);

    ctx.set_fill_style_str(AXIS_COLOR);
    ctx.set_font(LABEL_FONT);
    let _ = ctx.fill_text(SERIES_LABEL, PADDING, PADDING / 2.0);

    if data.is_empty() {
        let _ = ctx.fill_text("No generations yet", PADDING, height / 2.0);
        return;
    }

    let points = plot_points(data, width, height);

    // Area under the series first, then the line over it.
    ctx.set_fill_style_str(FILL_COLOR);
    ctx.begin_path();
    ctx.move_to(points[0].0, height - PADDING);
    for (x, y) in &points {
        ctx.line_to(*x, *y);
    }
    ctx.line_to(points[points.len() - 1].0, height - PADDING);
    ctx.close_path();
    ctx.fill();

    ctx.set_stroke_style_str(LINE_COLOR);
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(points[0].0, points[0].1);
    for (x, y) in points.iter().skip(1) {
        ctx.line_to(*x, *y);
    }
    ctx.stroke();

    ctx.set_fill_style_str(AXIS_COLOR);
    ctx.set_font(LABEL_FONT);
    let max = data.iter().copied().fold(0.0_f64, f64::max);
    let _ = ctx.fill_text(&format!("{max:.0}"), 4.0, PADDING);
    for idx in label_indices(labels.len(), MAX_X_LABELS) {
        let (x, _) = points[idx];
        let _ = ctx.fill_text(&labels[idx], x - 14.0, height - PADDING / 3.0);
    }
}

fn draw_axes(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.set_stroke_style_str(AXIS_COLOR);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(PADDING, PADDING / 2.0);
    ctx.line_to(PADDING, height - PADDING);
    ctx.line_to(width - PADDING / 2.0, height - PADDING);
    ctx.stroke();
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

#[cfg(test)]
mod tests {
    use super::{label_indices, plot_points, series_len, PADDING};
    use crate::api::Timeline;

    #[test]
    fn mismatched_timeline_clamps_to_shorter_run() {
        let timeline = Timeline {
            labels: vec!["a".into(), "b".into(), "c".into()],
            data: vec![1.0, 2.0],
        };
        assert_eq!(series_len(&timeline), 2);
    }

    #[test]
    fn points_span_the_padded_width_in_order() {
        let points = plot_points(&[1.0, 2.0, 3.0], 640.0, 320.0);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].0, PADDING);
        assert_eq!(points[2].0, 640.0 - PADDING);
        assert!(points[0].0 < points[1].0 && points[1].0 < points[2].0);
        // Larger values sit higher on the canvas (smaller y).
        assert!(points[2].1 < points[1].1 && points[1].1 < points[0].1);
    }

    #[test]
    fn maximum_value_touches_the_top_padding() {
        let points = plot_points(&[0.0, 4.0], 640.0, 320.0);
        assert_eq!(points[1].1, PADDING);
        assert_eq!(points[0].1, 320.0 - PADDING);
    }

    #[test]
    fn single_point_is_centered() {
        let points = plot_points(&[5.0], 640.0, 320.0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].0, 320.0);
    }

    #[test]
    fn all_zero_series_stays_on_the_baseline() {
        let points = plot_points(&[0.0, 0.0], 640.0, 320.0);
        assert!(points.iter().all(|(_, y)| *y == 320.0 - PADDING));
    }

    #[test]
    fn label_thinning_keeps_first_and_last() {
        assert_eq!(label_indices(3, 6), vec![0, 1, 2]);
        assert_eq!(label_indices(10, 3), vec![0, 5, 9]);
        assert!(label_indices(0, 6).is_empty());
    }
}
