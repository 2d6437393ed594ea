use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::format::round_share;
use crate::models::Holding;

use super::{AggregateError, GroupBy, GroupingOptions, HoldingSummary, UnnamedHoldings};

/// Holdings whose account is in `accounts`, in ledger order.
pub fn filter_by_accounts<'a>(holdings: &'a [Holding], accounts: &[String]) -> Vec<&'a Holding> {
    let wanted: HashSet<&str> = accounts.iter().map(String::as_str).collect();
    holdings
        .iter()
        .filter(|h| wanted.contains(h.account_number.as_str()))
        .collect()
}

/// Sum of `value` over every holding, named or not.
pub fn total_value(holdings: &[&Holding]) -> Result<Decimal, AggregateError> {
    holdings.iter().try_fold(Decimal::ZERO, |total, h| {
        total
            .checked_add(h.value)
            .ok_or_else(|| AggregateError::Overflow {
                name: "total value".to_string(),
            })
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey<'a> {
    /// None for the unclassified bucket.
    name: Option<&'a str>,
    kind: Option<&'a str>,
    currency: Option<&'a str>,
}

/// Running totals for holdings that share a report line.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingGroup {
    pub name: String,
    /// Type of the first holding added.
    pub kind: String,
    pub currency: Option<String>,
    pub volume: Decimal,
    pub value: Decimal,
    /// Σ avg × volume.
    pub cost: Decimal,
}

impl HoldingGroup {
    fn open(name: String, first: &Holding, currency: Option<String>) -> Self {
        Self {
            name,
            kind: first.kind.clone(),
            currency,
            volume: Decimal::ZERO,
            value: Decimal::ZERO,
            cost: Decimal::ZERO,
        }
    }

    fn add(&mut self, holding: &Holding) -> Result<(), AggregateError> {
        let volume = self.volume.checked_add(holding.volume);
        let value = self.value.checked_add(holding.value);
        let cost = holding
            .cost_basis()
            .and_then(|basis| self.cost.checked_add(basis));

        match (volume, value, cost) {
            (Some(volume), Some(value), Some(cost)) => {
                self.volume = volume;
                self.value = value;
                self.cost = cost;
                Ok(())
            }
            _ => Err(AggregateError::Overflow {
                name: self.name.clone(),
            }),
        }
    }

    /// Volume-weighted average cost: Σ(avg × volume) / Σvolume.
    pub fn gav(&self) -> Result<Decimal, AggregateError> {
        self.per_unit(self.cost)
    }

    /// Implied unit price: value / volume.
    pub fn price(&self) -> Result<Decimal, AggregateError> {
        self.per_unit(self.value)
    }

    fn per_unit(&self, amount: Decimal) -> Result<Decimal, AggregateError> {
        if self.volume.is_zero() {
            return Err(AggregateError::ZeroGroupVolume {
                name: self.name.clone(),
            });
        }
        amount
            .checked_div(self.volume)
            .ok_or_else(|| AggregateError::Overflow {
                name: self.name.clone(),
            })
    }
}

/// Partition holdings into groups, in order of first appearance.
///
/// Unnamed holdings are skipped unless `options.unnamed` asks for an
/// unclassified bucket.
pub fn group_holdings(
    holdings: &[&Holding],
    options: &GroupingOptions,
) -> Result<Vec<HoldingGroup>, AggregateError> {
    let mut index: HashMap<GroupKey<'_>, usize> = HashMap::new();
    let mut groups: Vec<HoldingGroup> = Vec::new();

    for holding in holdings {
        let name = if holding.has_name() {
            Some(holding.name.as_str())
        } else {
            match options.unnamed {
                UnnamedHoldings::Exclude => continue,
                UnnamedHoldings::Unclassified => None,
            }
        };

        let key = match options.group_by {
            GroupBy::Name => GroupKey {
                name,
                kind: None,
                currency: None,
            },
            GroupBy::Instrument => GroupKey {
                name,
                kind: Some(holding.kind.as_str()),
                currency: Some(holding.currency.as_str()),
            },
        };

        let slot = *index.entry(key).or_insert_with(|| {
            let label = name.map_or_else(|| options.unclassified_label.clone(), str::to_string);
            let currency = match options.group_by {
                GroupBy::Name => None,
                GroupBy::Instrument => Some(holding.currency.clone()),
            };
            groups.push(HoldingGroup::open(label, holding, currency));
            groups.len() - 1
        });
        groups[slot].add(holding)?;
    }

    Ok(groups)
}

/// `100 × value / total`, rounded to two decimals half away from zero.
pub fn share_of(value: Decimal, total: Decimal) -> Result<Decimal, AggregateError> {
    if total.is_zero() {
        return Err(AggregateError::ZeroTotalValue);
    }
    let overflow = || AggregateError::Overflow {
        name: "share".to_string(),
    };
    let raw = value
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(total))
        .ok_or_else(overflow)?;
    Ok(round_share(raw))
}

/// Stable sort, largest share first. Summaries without a share go last.
pub fn sort_by_share(summaries: &mut [HoldingSummary]) {
    summaries.sort_by(|a, b| b.share.cmp(&a.share));
}
