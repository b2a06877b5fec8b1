use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use std::fs;
use std::path::PathBuf;

use super::resolve_child;
use sprouttrack_core::{
    apply_range_filter, enrich, map_to_sparkline, series, svg_document, RangeWindow, SeriesKind,
    Store,
};

#[derive(Clone, Copy, ValueEnum)]
pub enum ChartMetric {
    Weight,
    Height,
    Head,
}

impl ChartMetric {
    fn kind(self) -> SeriesKind {
        match self {
            ChartMetric::Weight => SeriesKind::Weight,
            ChartMetric::Height => SeriesKind::Height,
            ChartMetric::Head => SeriesKind::Head,
        }
    }

    fn stroke(self) -> &'static str {
        match self {
            ChartMetric::Weight => "#fb923c",
            ChartMetric::Height => "#60a5fa",
            ChartMetric::Head => "#f59e0b",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ChartMetric::Weight => "weight",
            ChartMetric::Height => "height",
            ChartMetric::Head => "head circumference",
        }
    }
}

#[derive(Args)]
pub struct ChartCommand {
    /// Metric to chart
    #[arg(value_enum)]
    pub metric: ChartMetric,

    /// Plot width in SVG units
    #[arg(long, default_value_t = 300)]
    pub width: u32,

    /// Plot height in SVG units
    #[arg(long, default_value_t = 100)]
    pub height: u32,

    /// Time window
    #[arg(long, short, default_value = "all")]
    pub range: RangeWindow,

    /// Child id or name (default: selected child)
    #[arg(long)]
    pub child: Option<String>,

    /// Write the SVG to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl ChartCommand {
    pub fn run(&self, store: &Store, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
        let doc = store.state();
        let child = resolve_child(doc, self.child.as_deref())?;

        let rows = apply_range_filter(enrich(child), self.range, today);
        let values = series(&rows, self.metric.kind());
        if values.is_empty() {
            println!("No {} data for {} in this range.", self.metric.label(), child.name);
            return Ok(());
        }

        let points = map_to_sparkline(&values, f64::from(self.width), f64::from(self.height));
        let svg = svg_document(&points, self.width, self.height, self.metric.stroke());

        match &self.output {
            Some(path) => {
                fs::write(path, &svg)?;
                println!(
                    "Wrote {} chart ({} point(s)) to {}",
                    self.metric.label(),
                    points.len(),
                    path.display()
                );
            }
            None => println!("{}", svg),
        }
        Ok(())
    }
}
