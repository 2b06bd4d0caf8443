use std::f64::consts::{FRAC_PI_2, TAU};

use super::{Axis, BarChartSpec, Orientation, PieChartSpec};

pub const VIEW_WIDTH: f64 = 400.0;
pub const VIEW_HEIGHT: f64 = 256.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarRect {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Anchor for the category label.
    pub label_x: f64,
    pub label_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    /// Position along the value axis in view coordinates.
    pub position: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarGeometry {
    pub plot: PlotArea,
    pub bars: Vec<BarRect>,
    pub ticks: Vec<Tick>,
}

pub fn value_bounds(axis: &Axis, values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let min = axis.min;
    let mut max = axis.max;
    if axis.auto_extend {
        for value in values {
            if value.is_finite() && value > max {
                max = value;
            }
        }
    }
    if max <= min {
        max = min + 1.0;
    }
    (min, max)
}

pub fn tick_values(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let step = (max - min) / count as f64;
    (0..=count).map(|i| min + step * i as f64).collect()
}

pub fn layout_bars(spec: &BarChartSpec) -> BarGeometry {
    let points = &spec.series.points;
    let (min, max) = value_bounds(&spec.value_axis, points.iter().map(|p| p.value));
    let span = max - min;
    let legend_room = if spec.legend { 20.0 } else { 0.0 };

    let plot = match spec.orientation {
        Orientation::Vertical => PlotArea {
            x: 44.0,
            y: 10.0,
            width: VIEW_WIDTH - 44.0 - 20.0,
            height: VIEW_HEIGHT - 10.0 - 30.0 - legend_room,
        },
        Orientation::Horizontal => PlotArea {
            x: spec.category_width,
            y: 5.0,
            width: VIEW_WIDTH - spec.category_width - 20.0,
            height: VIEW_HEIGHT - 5.0 - 25.0 - legend_room,
        },
    };

    let slots = points.len().max(1) as f64;
    let mut bars = Vec::with_capacity(points.len());

    for (index, point) in points.iter().enumerate() {
        let ratio = ((point.value - min) / span).clamp(0.0, 1.0);
        let bar = match spec.orientation {
            Orientation::Vertical => {
                let slot = plot.width / slots;
                let width = slot * 0.7;
                let height = plot.height * ratio;
                let x = plot.x + slot * index as f64 + (slot - width) / 2.0;
                BarRect {
                    label: point.label.clone(),
                    value: point.value,
                    x,
                    y: plot.bottom() - height,
                    width,
                    height,
                    label_x: x + width / 2.0,
                    label_y: plot.bottom() + 14.0,
                }
            }
            Orientation::Horizontal => {
                let slot = plot.height / slots;
                let height = slot * 0.7;
                let width = plot.width * ratio;
                let y = plot.y + slot * index as f64 + (slot - height) / 2.0;
                BarRect {
                    label: point.label.clone(),
                    value: point.value,
                    x: plot.x,
                    y,
                    width,
                    height,
                    label_x: plot.x - 6.0,
                    label_y: y + height / 2.0,
                }
            }
        };
        bars.push(bar);
    }

    let ticks = tick_values(min, max, spec.value_axis.ticks)
        .into_iter()
        .map(|value| {
            let ratio = (value - min) / span;
            let position = match spec.orientation {
                Orientation::Vertical => plot.bottom() - plot.height * ratio,
                Orientation::Horizontal => plot.x + plot.width * ratio,
            };
            Tick { value, position }
        })
        .collect();

    BarGeometry { plot, bars, ticks }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Share of the total in percent.
    pub percent: f64,
    pub path: String,
    pub label_x: f64,
    pub label_y: f64,
}

/// Slices start at 12 o'clock and run clockwise.
pub fn layout_pie(spec: &PieChartSpec, cx: f64, cy: f64, radius: f64) -> Vec<PieSlice> {
    let total: f64 = spec
        .slices
        .iter()
        .map(|slice| slice.value.max(0.0))
        .sum();

    let mut start = -FRAC_PI_2;
    let mut slices = Vec::with_capacity(spec.slices.len());

    for slice in &spec.slices {
        let value = slice.value.max(0.0);
        let fraction = if total > 0.0 { value / total } else { 0.0 };
        let sweep = fraction * TAU;
        let end = start + sweep;
        let middle = start + sweep / 2.0;
        let label_radius = radius * 1.15;

        slices.push(PieSlice {
            label: slice.label.clone(),
            value: slice.value,
            percent: fraction * 100.0,
            path: sector_path(cx, cy, radius, start, end),
            label_x: cx + label_radius * middle.cos(),
            label_y: cy + label_radius * middle.sin(),
        });

        start = end;
    }

    slices
}

fn sector_path(cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> String {
    let sweep = end - start;
    if sweep <= 0.0 {
        return String::new();
    }
    if sweep >= TAU - 1e-9 {
        return full_circle_path(cx, cy, radius);
    }
    let (x0, y0) = polar(cx, cy, radius, start);
    let (x1, y1) = polar(cx, cy, radius, end);
    let large_arc = if sweep > std::f64::consts::PI { 1 } else { 0 };
    format!(
        "M {cx:.3} {cy:.3} L {x0:.3} {y0:.3} A {radius:.3} {radius:.3} 0 {large_arc} 1 {x1:.3} {y1:.3} Z"
    )
}

fn full_circle_path(cx: f64, cy: f64, radius: f64) -> String {
    let top = cy - radius;
    let bottom = cy + radius;
    format!(
        "M {cx:.3} {top:.3} A {radius:.3} {radius:.3} 0 1 1 {cx:.3} {bottom:.3} A {radius:.3} {radius:.3} 0 1 1 {cx:.3} {top:.3} Z"
    )
}

fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

/// Stroke path for a ring segment covering `value` percent, or `None` when empty.
pub fn radial_arc_path(value: f64, cx: f64, cy: f64, radius: f64) -> Option<String> {
    let fraction = (value / 100.0).clamp(0.0, 1.0);
    if fraction <= 0.0 {
        return None;
    }
    if fraction >= 1.0 {
        let top = cy - radius;
        let bottom = cy + radius;
        return Some(format!(
            "M {cx:.3} {top:.3} A {radius:.3} {radius:.3} 0 1 1 {cx:.3} {bottom:.3} A {radius:.3} {radius:.3} 0 1 1 {cx:.3} {top:.3}"
        ));
    }
    let start = -FRAC_PI_2;
    let end = start + fraction * TAU;
    let (x0, y0) = polar(cx, cy, radius, start);
    let (x1, y1) = polar(cx, cy, radius, end);
    let large_arc = if fraction > 0.5 { 1 } else { 0 };
    Some(format!(
        "M {x0:.3} {y0:.3} A {radius:.3} {radius:.3} 0 {large_arc} 1 {x1:.3} {y1:.3}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{DataPoint, Series};

    fn points(values: &[(&str, f64)]) -> Vec<DataPoint> {
        values
            .iter()
            .map(|(label, value)| DataPoint::new(*label, *value))
            .collect()
    }

    #[test]
    fn pie_percentages_sum_to_hundred() {
        let spec = PieChartSpec::builder(points(&[("Legitimate", 553_574.0), ("Fraud", 2_145.0)]))
            .build();
        let slices = layout_pie(&spec, 100.0, 100.0, 80.0);
        let total: f64 = slices.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", slices[0].percent), "99.61");
        assert_eq!(format!("{:.2}", slices[1].percent), "0.39");
        assert!(slices.iter().all(|s| s.path.starts_with('M')));
    }

    #[test]
    fn pie_with_no_data_has_empty_slices() {
        let spec = PieChartSpec::builder(points(&[("a", 0.0), ("b", 0.0)])).build();
        let slices = layout_pie(&spec, 0.0, 0.0, 10.0);
        assert!(slices.iter().all(|s| s.percent == 0.0 && s.path.is_empty()));
    }

    #[test]
    fn single_slice_draws_full_circle() {
        let spec = PieChartSpec::builder(points(&[("only", 5.0)])).build();
        let slices = layout_pie(&spec, 50.0, 50.0, 10.0);
        assert_eq!(slices[0].percent, 100.0);
        assert_eq!(slices[0].path.matches(" A ").count(), 2);
    }

    #[test]
    fn vertical_bars_scale_against_fixed_axis() {
        let spec = BarChartSpec::builder(Series::new(
            "AUC",
            "#8884d8",
            points(&[("a", 0.5), ("b", 1.0)]),
        ))
        .value_axis(Axis::numeric(0.0, 1.0))
        .build();
        let geometry = layout_bars(&spec);
        let [half, full] = [&geometry.bars[0], &geometry.bars[1]];
        assert!((full.height - geometry.plot.height).abs() < 1e-9);
        assert!((half.height * 2.0 - full.height).abs() < 1e-9);
        assert!((full.y - geometry.plot.y).abs() < 1e-9);
        assert_eq!(geometry.ticks.len(), 6);
    }

    #[test]
    fn horizontal_axis_extends_to_fit_large_values() {
        let spec = BarChartSpec::builder(Series::new(
            "Importance",
            "#3B82F6",
            points(&[("amt", 0.6), ("hour", 0.15)]),
        ))
        .horizontal()
        .value_axis(Axis::numeric(0.0, 0.3).extend_to_fit())
        .build();
        let geometry = layout_bars(&spec);
        assert!((geometry.bars[0].width - geometry.plot.width).abs() < 1e-9);
        assert!((geometry.bars[1].width * 4.0 - geometry.plot.width).abs() < 1e-9);
        assert!(geometry.bars[0].y < geometry.bars[1].y);
    }

    #[test]
    fn values_above_fixed_axis_are_clamped() {
        let axis = Axis::numeric(0.0, 0.3);
        assert_eq!(value_bounds(&axis, [0.9]), (0.0, 0.3));
        assert_eq!(value_bounds(&Axis::auto(), std::iter::empty()), (0.0, 1.0));
    }

    #[test]
    fn radial_arc_covers_requested_share() {
        assert_eq!(radial_arc_path(0.0, 60.0, 60.0, 50.0), None);
        let quarter = radial_arc_path(25.0, 60.0, 60.0, 50.0).unwrap();
        assert!(quarter.starts_with("M 60.000 10.000"));
        assert!(quarter.ends_with("110.000 60.000"));
        let most = radial_arc_path(82.0, 60.0, 60.0, 50.0).unwrap();
        assert!(most.contains(" 0 1 1 "));
        let full = radial_arc_path(100.0, 60.0, 60.0, 50.0).unwrap();
        assert_eq!(full.matches(" A ").count(), 2);
    }

    #[test]
    fn ticks_are_evenly_spaced() {
        assert_eq!(tick_values(0.0, 1.0, 4), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(tick_values(0.0, 1.0, 0).is_empty());
    }
}
