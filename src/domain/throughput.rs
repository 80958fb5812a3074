use chrono::NaiveDate;

/// Completed work items for the period starting at `date`.
#[derive(Debug, Clone, PartialEq)]
pub struct Throughput {
    pub date: NaiveDate,
    pub completed_issues: f64,
}
