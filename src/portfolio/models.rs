use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What makes two holdings the same line in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Display name only; instruments sharing a name are merged.
    #[default]
    Name,
    /// Name, type and currency together.
    Instrument,
}

/// Treatment of holdings whose name is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnnamedHoldings {
    /// Counted in the total value but left out of the summaries.
    #[default]
    Exclude,
    /// Collected into one extra summary.
    Unclassified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingOptions {
    pub group_by: GroupBy,
    pub unnamed: UnnamedHoldings,
    /// Name of the summary that collects unnamed holdings.
    pub unclassified_label: String,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            group_by: GroupBy::default(),
            unnamed: UnnamedHoldings::default(),
            unclassified_label: "Unclassified".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub grouping: GroupingOptions,
    /// Fail on undefined averages/shares instead of reporting them as null.
    pub strict: bool,
    /// Round reported values (not shares) to this many decimals.
    pub decimals: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingSummary {
    pub name: String,
    pub volume: Decimal,
    pub value: Decimal,
    /// `value / volume`. None when the volume is zero.
    pub price: Option<Decimal>,
    /// Percentage of the total value, two decimals. None when the total is zero.
    pub share: Option<Decimal>,
    /// Volume-weighted average cost. None when the volume is zero.
    pub gav: Option<Decimal>,
    #[serde(rename = "type")]
    pub kind: String,
    /// Only set when grouping by instrument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub date: DateTime<Utc>,
    pub total_value: Decimal,
    /// The requested accounts, exactly as given.
    pub accounts: Vec<String>,
    /// Ordered by share, largest first.
    pub holding_summaries: Vec<HoldingSummary>,
}
