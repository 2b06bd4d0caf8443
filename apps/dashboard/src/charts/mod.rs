//! Typed chart descriptors.
//!
//! A chart is assembled from layers (axes, one series, legend) through a builder and
//! handed to the SVG components in `ui::chart`. Geometry lives in [`layout`].

pub mod layout;

#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Categories along x, bars grow upwards.
    Vertical,
    /// Categories along y, bars grow to the right.
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueFormat {
    Fixed(usize),
    /// Multiplies by 100 and appends `%`.
    Percent(usize),
}

impl ValueFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Fixed(decimals) => format!("{value:.decimals$}"),
            Self::Percent(decimals) => format!("{:.decimals$}%", value * 100.0),
        }
    }
}

/// Value axis. The lower bound is fixed; the upper bound grows to fit the data when
/// `auto_extend` is set.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub auto_extend: bool,
    pub ticks: usize,
}

impl Axis {
    pub fn numeric(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            auto_extend: false,
            ticks: 5,
        }
    }

    /// Zero-based axis that follows the data.
    pub fn auto() -> Self {
        Self::numeric(0.0, 0.0).extend_to_fit()
    }

    pub fn extend_to_fit(mut self) -> Self {
        self.auto_extend = true;
        self
    }

    pub fn with_ticks(mut self, ticks: usize) -> Self {
        self.ticks = ticks;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub points: Vec<DataPoint>,
}

impl Series {
    pub fn new(name: impl Into<String>, color: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            points,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarChartSpec {
    pub orientation: Orientation,
    pub value_axis: Axis,
    pub series: Series,
    pub legend: bool,
    pub grid: bool,
    pub tooltip: ValueFormat,
    pub category_width: f64,
}

impl BarChartSpec {
    pub fn builder(series: Series) -> BarChartBuilder {
        BarChartBuilder {
            spec: BarChartSpec {
                orientation: Orientation::Vertical,
                value_axis: Axis::auto(),
                series,
                legend: false,
                grid: true,
                tooltip: ValueFormat::Fixed(4),
                category_width: 60.0,
            },
        }
    }
}

pub struct BarChartBuilder {
    spec: BarChartSpec,
}

impl BarChartBuilder {
    pub fn horizontal(mut self) -> Self {
        self.spec.orientation = Orientation::Horizontal;
        self
    }

    pub fn value_axis(mut self, axis: Axis) -> Self {
        self.spec.value_axis = axis;
        self
    }

    pub fn legend(mut self) -> Self {
        self.spec.legend = true;
        self
    }

    pub fn tooltip(mut self, format: ValueFormat) -> Self {
        self.spec.tooltip = format;
        self
    }

    /// Room reserved for category labels on a horizontal chart.
    pub fn category_width(mut self, width: f64) -> Self {
        self.spec.category_width = width;
        self
    }

    pub fn build(self) -> BarChartSpec {
        self.spec
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieChartSpec {
    pub slices: Vec<DataPoint>,
    pub colors: Vec<String>,
    pub legend: bool,
    pub label_decimals: usize,
}

impl PieChartSpec {
    pub fn builder(slices: Vec<DataPoint>) -> PieChartBuilder {
        PieChartBuilder {
            spec: PieChartSpec {
                slices,
                colors: vec!["#8884d8".to_string()],
                legend: false,
                label_decimals: 2,
            },
        }
    }

    pub fn color_for(&self, index: usize) -> &str {
        self.colors
            .get(index % self.colors.len().max(1))
            .map(String::as_str)
            .unwrap_or("#8884d8")
    }
}

pub struct PieChartBuilder {
    spec: PieChartSpec,
}

impl PieChartBuilder {
    pub fn colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn legend(mut self) -> Self {
        self.spec.legend = true;
        self
    }

    pub fn build(self) -> PieChartSpec {
        self.spec
    }
}

/// Single-value ring filled clockwise from 12 o'clock.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGaugeSpec {
    /// Fill level in `[0, 100]`.
    pub value: f64,
    pub color: String,
    pub track_color: String,
    pub inner_ratio: f64,
}

impl RadialGaugeSpec {
    pub fn new(value: f64, color: impl Into<String>) -> Self {
        Self {
            value: value.clamp(0.0, 100.0),
            color: color.into(),
            track_color: "#E5E7EB".to_string(),
            inner_ratio: 0.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_composes_layers() {
        let spec = BarChartSpec::builder(Series::new("Importance", "#82ca9d", Vec::new()))
            .horizontal()
            .value_axis(Axis::numeric(0.0, 0.3))
            .legend()
            .build();
        assert_eq!(spec.orientation, Orientation::Horizontal);
        assert!(spec.legend);
        assert_eq!(spec.value_axis, Axis::numeric(0.0, 0.3));
        assert!(Axis::auto().auto_extend);
    }

    #[test]
    fn value_formats() {
        assert_eq!(ValueFormat::Fixed(4).format(0.5), "0.5000");
        assert_eq!(ValueFormat::Percent(1).format(0.123), "12.3%");
    }

    #[test]
    fn pie_colors_cycle() {
        let spec = PieChartSpec::builder(Vec::new())
            .colors(["#0088FE", "#FF8042"])
            .build();
        assert_eq!(spec.color_for(0), "#0088FE");
        assert_eq!(spec.color_for(3), "#FF8042");
    }

    #[test]
    fn gauge_value_is_clamped() {
        assert_eq!(RadialGaugeSpec::new(140.0, "#EF4444").value, 100.0);
        assert_eq!(RadialGaugeSpec::new(-3.0, "#EF4444").value, 0.0);
    }
}
