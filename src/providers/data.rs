//! CLI cost data provider
//!
//! Reads cost records as CSV rows from stdin. Rows have no header and a
//! variable number of fields:
//!
//! `timestamp,resource_id,period,value[,currency[,category]]`
//!
//! The timestamp is either Unix seconds or RFC 3339.

use std::io::Read;

use chrono::{DateTime, TimeZone, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use super::{CliParameters, CostDataProvider};
use crate::error::{WranglerError, WranglerResult};
use crate::models::{CostRecord, Currency, Period};
use crate::models::record::NO_BASELINE;

/// Minimum number of fields in a row
const MIN_FIELDS: usize = 4;

/// Reads cost records from stdin
#[derive(Debug, Clone, Copy, Default)]
pub struct CliCostDataProvider;

impl CostDataProvider for CliCostDataProvider {
    fn name(&self) -> &'static str {
        "cli"
    }

    fn get_data(&self, params: &CliParameters) -> WranglerResult<Vec<CostRecord>> {
        if params.disable_stdin {
            debug!("Reading from stdin disabled");
            return Ok(Vec::new());
        }

        info!("Reading data from stdin...");
        read_records(std::io::stdin().lock())
    }
}

/// Parse cost records from CSV input
///
/// Malformed CSV rows are skipped with a warning; a row that reads but does
/// not parse aborts with its row number. Failing to read the input at all
/// is a data provider error.
pub fn read_records<R: Read>(reader: R) -> WranglerResult<Vec<CostRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row_number = idx + 1;
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => {
                return Err(WranglerError::DataProvider {
                    provider: "cli",
                    message: e.to_string(),
                });
            }
            Err(e) => {
                warn!(row = row_number, error = %e, "Unable to read CSV row");
                continue;
            }
        };

        debug!(row = row_number, raw = ?row, "Raw data");
        let record = parse_row(&row).map_err(|message| WranglerError::RecordParse {
            row: row_number,
            message,
        })?;
        debug!(row = row_number, record = ?record, "Row parsed successfully");
        records.push(record);
    }

    Ok(records)
}

/// Parse a single CSV row
fn parse_row(row: &StringRecord) -> Result<CostRecord, String> {
    if row.len() < MIN_FIELDS {
        return Err("insufficient number of fields".to_string());
    }

    let timestamp = parse_timestamp(&row[0])?;

    let period = if row[2].is_empty() {
        None
    } else {
        match row[2].parse::<Period>() {
            Ok(period) => Some(period),
            Err(e) => {
                warn!(resource_id = &row[1], "{}, record has no charge period", e);
                None
            }
        }
    };

    let value: f64 = row[3]
        .parse()
        .map_err(|_| format!("invalid value: {}", &row[3]))?;

    let currency = row.get(4).and_then(Currency::parse);
    let category = row.get(5).unwrap_or_default().to_string();

    Ok(CostRecord {
        resource_id: row[1].to_string(),
        timestamp,
        period,
        value,
        currency,
        baseline: NO_BASELINE,
        category,
    })
}

/// Parse a Unix timestamp in seconds, falling back to RFC 3339
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(secs) = s.parse::<i64>() {
        return Utc
            .timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| format!("timestamp out of range: {}", s));
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp '{}': {}", s, e))
}
