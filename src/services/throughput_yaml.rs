use std::io::{self, Write};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::throughput::Throughput;

#[derive(Error, Debug)]
pub enum ThroughputYamlError {
    #[error("failed to parse throughput yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Serialize, Deserialize)]
struct ThroughputRecord {
    date: NaiveDate,
    completed_issues: f64,
}

pub fn serialize_throughput_to_yaml<W: Write>(
    writer: &mut W,
    data: &[Throughput],
) -> io::Result<()> {
    let records: Vec<ThroughputRecord> = data
        .iter()
        .map(|t| ThroughputRecord {
            date: t.date,
            completed_issues: t.completed_issues,
        })
        .collect();

    let yaml = serde_yaml::to_string(&records).map_err(io::Error::other)?;
    writer.write_all(yaml.as_bytes())
}

pub fn deserialize_throughput_from_yaml_str(
    input: &str,
) -> Result<Vec<Throughput>, ThroughputYamlError> {
    let records: Vec<ThroughputRecord> = serde_yaml::from_str(input)?;
    Ok(records
        .into_iter()
        .map(|record| Throughput {
            date: record.date,
            completed_issues: record.completed_issues,
        })
        .collect())
}
