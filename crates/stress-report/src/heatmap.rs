//! Text P&L heatmap.
//!
//! Positions by stress level, shaded on a scale symmetric around zero:
//! losses red, gains green.

use colored::Colorize;
use serde::Serialize;
use std::fmt;
use stress_engine::ScenarioResults;

/// Position x stress-level P&L matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PnlHeatmap {
    /// Title (scenario name).
    pub title: String,
    /// Row labels, `{underlying}-{position_id}`.
    pub rows: Vec<String>,
    /// Column labels.
    pub columns: Vec<String>,
    /// P&L values, one vector per row.
    pub values: Vec<Vec<f64>>,
    /// Largest absolute P&L; the color scale spans `[-scale, scale]`.
    pub scale: f64,
}

impl PnlHeatmap {
    /// Builds the heatmap from position rows (aggregates are excluded).
    #[must_use]
    pub fn from_results(results: &ScenarioResults) -> Self {
        let rows = results
            .positions
            .iter()
            .map(|p| format!("{}-{}", p.underlying, p.position_id))
            .collect();
        let values: Vec<Vec<f64>> = results.positions.iter().map(|p| p.pnl.clone()).collect();
        let scale = values
            .iter()
            .flatten()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));

        Self {
            title: results.scenario_name.clone(),
            rows,
            columns: results.labels().into_iter().map(str::to_string).collect(),
            values,
            scale,
        }
    }

    /// Position of `value` on the color scale, in `[-1, 1]`.
    #[must_use]
    pub fn intensity(&self, value: f64) -> f64 {
        if self.scale > 0.0 {
            (value / self.scale).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }

    fn paint(&self, cell: &str, value: f64) -> String {
        let t = self.intensity(value);
        if t <= -0.5 {
            cell.red().bold().to_string()
        } else if t < 0.0 {
            cell.red().to_string()
        } else if t == 0.0 {
            cell.yellow().to_string()
        } else if t < 0.5 {
            cell.green().to_string()
        } else {
            cell.green().bold().to_string()
        }
    }

    /// Renders the heatmap with values rounded to whole units.
    ///
    /// With `color` false the output is plain text.
    #[must_use]
    pub fn render(&self, color: bool) -> String {
        self.display(color).to_string()
    }

    /// A [`fmt::Display`] view of the heatmap, colored or plain.
    #[must_use]
    pub fn display(&self, color: bool) -> HeatmapDisplay<'_> {
        HeatmapDisplay { heatmap: self, color }
    }

    fn write_grid(&self, f: &mut fmt::Formatter<'_>, color: bool) -> fmt::Result {
        let label_width = self.rows.iter().map(String::len).max().unwrap_or(0).max(8);
        let cell_width = self
            .values
            .iter()
            .flatten()
            .map(|v| format!("{v:.0}").len())
            .chain(self.columns.iter().map(String::len))
            .max()
            .unwrap_or(0)
            + 2;

        if color {
            writeln!(f, "{}", self.title.bold())?;
        } else {
            writeln!(f, "{}", self.title)?;
        }
        write!(f, "{:<label_width$}", "position")?;
        for column in &self.columns {
            write!(f, "{column:>cell_width$}")?;
        }
        writeln!(f)?;

        for (label, row) in self.rows.iter().zip(&self.values) {
            write!(f, "{label:<label_width$}")?;
            for &value in row {
                let cell = format!("{value:>cell_width$.0}");
                if color {
                    write!(f, "{}", self.paint(&cell, value))?;
                } else {
                    f.write_str(&cell)?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "scale: ±{:.0}", self.scale)
    }
}

/// Display adapter returned by [`PnlHeatmap::display`].
#[derive(Debug, Clone, Copy)]
pub struct HeatmapDisplay<'a> {
    heatmap: &'a PnlHeatmap,
    color: bool,
}

impl fmt::Display for HeatmapDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.heatmap.write_grid(f, self.color)
    }
}
