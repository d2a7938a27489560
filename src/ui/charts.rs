use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{
    Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2,
};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

use crate::analytics::charts::{CategoryCount, ChartSeries, RatingShare};
use crate::color::{ColorMap, SERIES_COLOR};
use crate::format::thousands;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Chart row (line | bar | pie)
// ---------------------------------------------------------------------------

/// Headline figures and the three charts side by side.
pub fn chart_row(ui: &mut Ui, charts: &ChartSeries, colors: &ColorMap, currency: &str) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label(format!(
            "Total investment: {} {currency}",
            thousands(charts.total_investment as f64)
        ));
        ui.separator();
        ui.label(format!(
            "Average rating: {:.1} {}",
            charts.mean_rating,
            charts.star_glyphs()
        ));
        ui.separator();
        ui.label(format!(
            "Average investment: {:.2} {currency}",
            charts.mean_investment
        ));
    });
    ui.add_space(8.0);

    ui.columns(3, |cols| {
        state_line(&mut cols[0], &charts.by_state);
        business_type_bar(&mut cols[1], &charts.by_business_type);
        rating_pie(&mut cols[2], &charts.rating_share, colors);
    });
}

/// Category name for an integer axis position, blank between categories.
fn category_label(labels: &[String], mark: GridMark) -> String {
    let pos = mark.value.round();
    if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
        return String::new();
    }
    labels.get(pos as usize).cloned().unwrap_or_default()
}

fn labels(counts: &[CategoryCount]) -> Vec<String> {
    counts.iter().map(|c| c.category.clone()).collect()
}

// ---------------------------------------------------------------------------
// Line chart: records per state
// ---------------------------------------------------------------------------

fn state_line(ui: &mut Ui, counts: &[CategoryCount]) {
    ui.strong("Investment by Region");

    let points: Vec<[f64; 2]> = counts
        .iter()
        .enumerate()
        .map(|(i, c)| [i as f64, c.count as f64])
        .collect();
    let names = labels(counts);

    Plot::new("state_line")
        .height(CHART_HEIGHT)
        .show_grid([true, false])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_label("State")
        .y_axis_label("Investment")
        .x_axis_formatter(move |mark, _range| category_label(&names, mark))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .color(SERIES_COLOR)
                    .width(2.0)
                    .name("Investment"),
            );
            plot_ui.points(Points::new(points).color(SERIES_COLOR).radius(3.0));
        });
}

// ---------------------------------------------------------------------------
// Horizontal bar chart: records per business type
// ---------------------------------------------------------------------------

fn business_type_bar(ui: &mut Ui, counts: &[CategoryCount]) {
    ui.strong("Investment by Business Type");

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.count as f64)
                .name(&c.category)
                .fill(SERIES_COLOR)
        })
        .collect();
    let names = labels(counts);

    Plot::new("business_type_bar")
        .height(CHART_HEIGHT)
        .show_grid([false, true])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_label("Investment")
        .y_axis_formatter(move |mark, _range| category_label(&names, mark))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .horizontal()
                    .color(SERIES_COLOR)
                    .name("Investment"),
            );
        });
}

// ---------------------------------------------------------------------------
// Pie chart: rating share per state
// ---------------------------------------------------------------------------

/// Largest angle drawn as one polygon; keeps every piece convex.
const MAX_PIECE: f32 = FRAC_PI_2;

fn rating_pie(ui: &mut Ui, shares: &[RatingShare], colors: &ColorMap) {
    ui.strong("Regions Rating");

    let size = ui.available_width().min(CHART_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = size * 0.45;

    let mut start = -FRAC_PI_2;
    let mut hovered: Option<&RatingShare> = None;
    for share in shares.iter().filter(|s| s.percent > 0.0) {
        let sweep = share.percent as f32 / 100.0 * TAU;
        let color = colors.color_for(&share.state);

        for piece in slice_pieces(center, radius, start, sweep) {
            painter.add(Shape::convex_polygon(piece, color, Stroke::NONE));
        }

        let mid = start + sweep / 2.0;
        if sweep > 0.3 {
            painter.text(
                center + Vec2::angled(mid) * radius * 0.62,
                Align2::CENTER_CENTER,
                format!("{}\n{:.1}%", share.state, share.percent),
                FontId::proportional(11.0),
                Color32::WHITE,
            );
        }

        if let Some(pointer) = response.hover_pos() {
            let offset = pointer - center;
            let angle = (offset.y.atan2(offset.x) - start).rem_euclid(TAU);
            if offset.length() <= radius && angle < sweep {
                hovered = Some(share);
            }
        }

        start += sweep;
    }

    if let Some(share) = hovered {
        response.on_hover_text(format!(
            "{}: {} ({:.1}%)",
            share.state, share.rating, share.percent
        ));
    }

    ui.label(RichText::new("Regions").strong());
    for share in shares {
        ui.horizontal(|ui: &mut Ui| {
            let (swatch, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
            ui.painter()
                .rect_filled(swatch, 2.0, colors.color_for(&share.state));
            ui.label(&share.state);
        });
    }
}

/// Split one slice into convex fans of at most [`MAX_PIECE`] radians.
fn slice_pieces(center: Pos2, radius: f32, start: f32, sweep: f32) -> Vec<Vec<Pos2>> {
    let n_pieces = (sweep / MAX_PIECE).ceil().max(1.0) as usize;
    let piece_sweep = sweep / n_pieces as f32;
    (0..n_pieces)
        .map(|p| {
            let from = start + p as f32 * piece_sweep;
            let steps = ((piece_sweep / 0.05).ceil() as usize).max(1);
            let mut points = Vec::with_capacity(steps + 2);
            points.push(center);
            for s in 0..=steps {
                let a = from + piece_sweep * s as f32 / steps as f32;
                points.push(center + Vec2::angled(a) * radius);
            }
            points
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_circle_splits_into_quarters() {
        let pieces = slice_pieces(Pos2::ZERO, 10.0, 0.0, TAU);
        assert_eq!(pieces.len(), 4);
        assert!(pieces.iter().all(|p| p[0] == Pos2::ZERO && p.len() >= 3));
    }

    #[test]
    fn thin_slice_is_one_piece() {
        assert_eq!(slice_pieces(Pos2::ZERO, 10.0, 0.0, 0.01).len(), 1);
    }

    #[test]
    fn labels_only_on_whole_positions() {
        let names = vec!["Arusha".to_string(), "Mbeya".to_string()];
        let mark = |value| GridMark {
            value,
            step_size: 0.5,
        };
        assert_eq!(category_label(&names, mark(1.0)), "Mbeya");
        assert_eq!(category_label(&names, mark(0.5)), "");
        assert_eq!(category_label(&names, mark(-1.0)), "");
        assert_eq!(category_label(&names, mark(5.0)), "");
    }
}
