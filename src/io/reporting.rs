// src/io/reporting.rs

use crate::error::Result;
use crate::model::pipeline::Pipeline;
use crate::simulation::engine::PeriodLog;
use crate::strategy::policy_table::PolicyTable;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Flat CSV form of a [`PeriodLog`]; pipelines become `a|b|c` strings.
#[derive(Debug, Serialize)]
struct LogRow {
    period: usize,
    starting_inventory: String,
    order: u32,
    post_order: String,
    demand: u32,
    post_demand: i64,
    post_delivery: String,
    period_cost: f64,
}

fn label(pipeline: Option<&Pipeline>) -> String {
    pipeline.map(Pipeline::label).unwrap_or_default()
}

impl From<&PeriodLog> for LogRow {
    fn from(entry: &PeriodLog) -> Self {
        Self {
            period: entry.period,
            starting_inventory: entry.starting_inventory.label(),
            order: entry.order,
            post_order: label(entry.post_order.as_ref()),
            demand: entry.demand,
            post_demand: entry.post_demand,
            post_delivery: label(entry.post_delivery.as_ref()),
            period_cost: entry.period_cost,
        }
    }
}

/// Writes a simulation event log as CSV to any writer.
pub fn write_log_to<W: Write>(writer: W, data: &[PeriodLog]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for entry in data {
        wtr.serialize(LogRow::from(entry))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the simulation history to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/run_1.csv").
/// * `data` - The event log of a finished simulation run.
pub fn write_simulation_log<P: AsRef<Path>>(file_path: P, data: &[PeriodLog]) -> Result<()> {
    let file_path = file_path.as_ref();
    write_log_to(std::fs::File::create(file_path)?, data)?;
    info!(rows = data.len(), path = %file_path.display(), "exported simulation log");
    Ok(())
}

/// Writes every `(period, state, order_quantity, expected_cost)` record as CSV.
pub fn write_policy_to<W: Write>(writer: W, table: &PolicyTable) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in table.iter() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_policy_table<P: AsRef<Path>>(file_path: P, table: &PolicyTable) -> Result<()> {
    let file_path = file_path.as_ref();
    write_policy_to(std::fs::File::create(file_path)?, table)?;
    info!(rows = table.len(), path = %file_path.display(), "exported policy table");
    Ok(())
}
