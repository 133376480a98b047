//! Tabular stress results.
//!
//! One row per position followed by one row per aggregate. Aggregate rows
//! use `AGG_{key}` as position id and `AGGREGATE` as instrument type, with
//! quantity and base value left blank.

use serde::{Deserialize, Serialize};
use std::io::Write;
use stress_engine::ScenarioResults;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

use crate::error::ReportResult;

/// Instrument type shown on aggregate rows.
pub const AGGREGATE_TYPE: &str = "AGGREGATE";

/// Leading (non P&L) column names.
pub const META_COLUMNS: [&str; 6] = [
    "scenario",
    "underlying",
    "position_id",
    "instrument_type",
    "quantity",
    "base_value",
];

/// One row of a [`ResultsTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsRow {
    /// Scenario name.
    pub scenario: String,
    /// Underlying symbol or aggregation key.
    pub underlying: String,
    /// Position id, or `AGG_{key}` for aggregates.
    pub position_id: String,
    /// Instrument kind, or `AGGREGATE`.
    pub instrument_type: String,
    /// Quantity (blank for aggregates).
    pub quantity: Option<f64>,
    /// Base value (blank for aggregates).
    pub base_value: Option<f64>,
    /// P&L per column.
    pub pnl: Vec<f64>,
}

impl ResultsRow {
    /// Returns true for aggregate rows.
    #[must_use]
    pub fn is_aggregate(&self) -> bool {
        self.instrument_type == AGGREGATE_TYPE
    }
}

/// Flattened results of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsTable {
    /// Scenario name.
    pub scenario: String,
    /// P&L column labels.
    pub columns: Vec<String>,
    /// Position rows then aggregate rows.
    pub rows: Vec<ResultsRow>,
}

impl ResultsTable {
    /// Flattens scenario results.
    #[must_use]
    pub fn from_results(results: &ScenarioResults) -> Self {
        let scenario = results.scenario_name.clone();
        let positions = results.positions.iter().map(|p| ResultsRow {
            scenario: scenario.clone(),
            underlying: p.underlying.clone(),
            position_id: p.position_id.clone(),
            instrument_type: p.instrument_type.to_string(),
            quantity: Some(p.quantity),
            base_value: Some(p.base_value),
            pnl: p.pnl.clone(),
        });
        let aggregates = results.aggregates.iter().map(|a| ResultsRow {
            scenario: scenario.clone(),
            underlying: a.key.clone(),
            position_id: format!("AGG_{}", a.key),
            instrument_type: AGGREGATE_TYPE.to_string(),
            quantity: None,
            base_value: None,
            pnl: a.pnl.clone(),
        });

        Self {
            scenario: scenario.clone(),
            columns: results.labels().into_iter().map(str::to_string).collect(),
            rows: positions.chain(aggregates).collect(),
        }
    }

    /// Position rows only.
    pub fn position_rows(&self) -> impl Iterator<Item = &ResultsRow> {
        self.rows.iter().filter(|r| !r.is_aggregate())
    }

    /// Aggregate rows only.
    pub fn aggregate_rows(&self) -> impl Iterator<Item = &ResultsRow> {
        self.rows.iter().filter(|r| r.is_aggregate())
    }

    /// Header: metadata columns then P&L labels.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        META_COLUMNS
            .iter()
            .map(|s| (*s).to_string())
            .chain(self.columns.iter().cloned())
            .collect()
    }

    fn records(&self, precision: Option<usize>) -> impl Iterator<Item = Vec<String>> + '_ {
        let num = move |v: f64| match precision {
            Some(p) => format!("{v:.p$}"),
            None => v.to_string(),
        };
        self.rows.iter().map(move |row| {
            let mut record = vec![
                row.scenario.clone(),
                row.underlying.clone(),
                row.position_id.clone(),
                row.instrument_type.clone(),
                row.quantity.map(|q| q.to_string()).unwrap_or_default(),
                row.base_value.map(num).unwrap_or_default(),
            ];
            record.extend(row.pnl.iter().map(|&v| num(v)));
            record
        })
    }

    /// Renders a text table with P&L rounded to cents.
    #[must_use]
    pub fn to_table_string(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.header());
        for record in self.records(Some(2)) {
            builder.push_record(record);
        }

        builder
            .build()
            .with(Style::rounded())
            .with(Modify::new(Columns::new(4..)).with(Alignment::right()))
            .to_string()
    }

    /// Writes the table as CSV at full precision.
    pub fn write_csv<W: Write>(&self, writer: W) -> ReportResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.header())?;
        for record in self.records(None) {
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Renders the table as CSV.
    pub fn to_csv_string(&self) -> ReportResult<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Renders the table as pretty-printed JSON.
    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
