use dioxus::prelude::*;

use crate::charts::layout::{
    layout_bars, layout_pie, radial_arc_path, BarRect, PieSlice, Tick, VIEW_HEIGHT, VIEW_WIDTH,
};
use crate::charts::{BarChartSpec, Orientation, PieChartSpec, RadialGaugeSpec, ValueFormat};
use crate::ui::format::format_count;

const VIEW_BOX: &str = "0 0 400 256";
const GRID_STROKE: &str = "#E5E7EB";
const AXIS_TEXT: &str = "#6B7280";

#[component]
pub fn BarChart(spec: BarChartSpec) -> Element {
    let geometry = layout_bars(&spec);
    let plot = geometry.plot;
    let color = spec.series.color.clone();
    let tooltip = spec.tooltip;
    let horizontal = spec.orientation == Orientation::Horizontal;
    let tick_format = ValueFormat::Fixed(tick_decimals(&geometry.ticks));
    let mut hovered = use_signal(|| None::<Tooltip>);
    let tips: Vec<Tooltip> = geometry
        .bars
        .iter()
        .map(|bar| Tooltip::for_bar(bar, tooltip))
        .collect();
    let overlay = hovered.read().clone();

    rsx! {
        div { class: "relative flex h-full w-full flex-col",
            svg {
                class: "w-full flex-1",
                view_box: VIEW_BOX,
                if spec.grid {
                    for tick in geometry.ticks.iter() {
                        if horizontal {
                            line {
                                x1: tick.position,
                                x2: tick.position,
                                y1: plot.y,
                                y2: plot.bottom(),
                                stroke: GRID_STROKE,
                                stroke_dasharray: "3 3",
                            }
                        } else {
                            line {
                                x1: plot.x,
                                x2: plot.right(),
                                y1: tick.position,
                                y2: tick.position,
                                stroke: GRID_STROKE,
                                stroke_dasharray: "3 3",
                            }
                        }
                    }
                }
                for tick in geometry.ticks.iter() {
                    if horizontal {
                        text {
                            x: tick.position,
                            y: plot.bottom() + 14.0,
                            text_anchor: "middle",
                            font_size: "10",
                            fill: AXIS_TEXT,
                            {tick_format.format(tick.value)}
                        }
                    } else {
                        text {
                            x: plot.x - 6.0,
                            y: tick.position + 3.0,
                            text_anchor: "end",
                            font_size: "10",
                            fill: AXIS_TEXT,
                            {tick_format.format(tick.value)}
                        }
                    }
                }
                for (bar, tip) in geometry.bars.iter().zip(tips.into_iter()) {
                    g { key: "{bar.label}",
                        rect {
                            x: bar.x,
                            y: bar.y,
                            width: bar.width,
                            height: bar.height,
                            fill: "{color}",
                            onmouseenter: move |_| hovered.set(Some(tip.clone())),
                            onmouseleave: move |_| hovered.set(None),
                        }
                        text {
                            x: bar.label_x,
                            y: bar.label_y,
                            text_anchor: if horizontal { "end" } else { "middle" },
                            dominant_baseline: if horizontal { "middle" } else { "auto" },
                            font_size: "10",
                            fill: AXIS_TEXT,
                            "{bar.label}"
                        }
                    }
                }
                line {
                    x1: plot.x,
                    x2: if horizontal { plot.right() } else { plot.x },
                    y1: if horizontal { plot.bottom() } else { plot.y },
                    y2: plot.bottom(),
                    stroke: AXIS_TEXT,
                }
                line {
                    x1: plot.x,
                    x2: if horizontal { plot.x } else { plot.right() },
                    y1: if horizontal { plot.y } else { plot.bottom() },
                    y2: plot.bottom(),
                    stroke: AXIS_TEXT,
                }
            }
            {overlay.map(render_tooltip)}
            if spec.legend {
                div { class: "flex items-center justify-center gap-2 text-xs text-gray-600",
                    span {
                        class: "inline-block h-3 w-3",
                        style: "background-color: {color}",
                    }
                    span { "{spec.series.name}" }
                }
            }
        }
    }
}

fn tick_decimals(ticks: &[Tick]) -> usize {
    let step = match ticks {
        [first, second, ..] => (second.value - first.value).abs(),
        _ => return 0,
    };
    if step >= 1.0 {
        0
    } else if step >= 0.1 {
        1
    } else {
        2
    }
}

#[component]
pub fn PieChart(spec: PieChartSpec) -> Element {
    let cx = VIEW_WIDTH / 2.0;
    let cy = VIEW_HEIGHT / 2.0;
    let slices = layout_pie(&spec, cx, cy, 80.0);
    let decimals = spec.label_decimals;
    let legend: Vec<(String, String)> = slices
        .iter()
        .enumerate()
        .map(|(index, slice)| (slice.label.clone(), spec.color_for(index).to_string()))
        .collect();
    let mut hovered = use_signal(|| None::<Tooltip>);
    let tips: Vec<Tooltip> = slices.iter().map(Tooltip::for_slice).collect();
    let overlay = hovered.read().clone();

    rsx! {
        div { class: "relative flex h-full w-full flex-col",
            svg { class: "w-full flex-1", view_box: VIEW_BOX,
                for ((index, slice), tip) in slices.iter().enumerate().zip(tips.into_iter()) {
                    g { key: "{slice.label}",
                        path {
                            d: "{slice.path}",
                            fill: spec.color_for(index).to_string(),
                            stroke: "#FFFFFF",
                            onmouseenter: move |_| hovered.set(Some(tip.clone())),
                            onmouseleave: move |_| hovered.set(None),
                        }
                        text {
                            x: slice.label_x,
                            y: slice.label_y,
                            text_anchor: if slice.label_x >= cx { "start" } else { "end" },
                            font_size: "11",
                            fill: spec.color_for(index).to_string(),
                            {format!("{}: {:.decimals$}%", slice.label, slice.percent)}
                        }
                    }
                }
            }
            {overlay.map(render_tooltip)}
            if spec.legend {
                div { class: "flex items-center justify-center gap-4 text-xs text-gray-600",
                    for (label, color) in legend.iter() {
                        span { key: "{label}", class: "flex items-center gap-1",
                            span {
                                class: "inline-block h-3 w-3",
                                style: "background-color: {color}",
                            }
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

/// Hover label anchored in view-box percentages so it tracks the scaled SVG.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub left: f64,
    pub top: f64,
}

impl Tooltip {
    pub fn for_bar(bar: &BarRect, format: ValueFormat) -> Self {
        Self {
            text: format!("{}: {}", bar.label, format.format(bar.value)),
            left: percent_of(bar.x + bar.width / 2.0, VIEW_WIDTH),
            top: percent_of(bar.y, VIEW_HEIGHT),
        }
    }

    pub fn for_slice(slice: &PieSlice) -> Self {
        Self {
            text: format!(
                "{}: {}",
                slice.label,
                format_count(slice.value.max(0.0) as u64)
            ),
            left: percent_of(slice.label_x, VIEW_WIDTH),
            top: percent_of(slice.label_y, VIEW_HEIGHT),
        }
    }

    pub fn style(&self) -> String {
        format!(
            "left: {:.2}%; top: {:.2}%; transform: translate(-50%, -110%);",
            self.left, self.top
        )
    }
}

fn percent_of(value: f64, extent: f64) -> f64 {
    (value / extent * 100.0).clamp(0.0, 100.0)
}

fn render_tooltip(tip: Tooltip) -> Element {
    let style = tip.style();
    rsx! {
        div {
            class: "pointer-events-none absolute z-10 whitespace-nowrap rounded border border-gray-200 bg-white px-2 py-1 text-xs text-gray-700 shadow",
            style: "{style}",
            "{tip.text}"
        }
    }
}

#[component]
pub fn RadialGauge(spec: RadialGaugeSpec) -> Element {
    let size = 120.0;
    let center = size / 2.0;
    let stroke = center * (1.0 - spec.inner_ratio);
    let radius = center - stroke / 2.0;
    let arc = radial_arc_path(spec.value, center, center, radius);

    rsx! {
        svg { class: "h-full w-full", view_box: "0 0 120 120",
            circle {
                cx: center,
                cy: center,
                r: radius,
                fill: "none",
                stroke: "{spec.track_color}",
                stroke_width: stroke,
            }
            if let Some(arc) = arc {
                path {
                    d: "{arc}",
                    fill: "none",
                    stroke: "{spec.color}",
                    stroke_width: stroke,
                    stroke_linecap: "round",
                }
            }
        }
    }
}
