use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::format::round_value;
use crate::models::Holding;

use super::{
    filter_by_accounts, group_holdings, share_of, sort_by_share, total_value, AggregateError,
    HoldingGroup, HoldingSummary, Portfolio, ReportOptions,
};

/// Builds a [`Portfolio`] report from decoded ledger rows.
pub struct PortfolioReporter {
    clock: Arc<dyn Clock>,
    options: ReportOptions,
}

impl PortfolioReporter {
    pub fn new(clock: Arc<dyn Clock>, options: ReportOptions) -> Self {
        Self { clock, options }
    }

    /// Summarize the holdings of `accounts`.
    ///
    /// An empty selection produces an empty report with a zero total. With
    /// `strict` unset, figures that are undefined for the input (average cost
    /// and price of a zero-volume group, shares of a zero total) are reported
    /// as `None`; otherwise the first one aborts the report.
    pub fn report(
        &self,
        holdings: &[Holding],
        accounts: &[String],
    ) -> Result<Portfolio, AggregateError> {
        let selected = filter_by_accounts(holdings, accounts);
        let total = total_value(&selected)?;
        let groups = group_holdings(&selected, &self.options.grouping)?;
        debug!(
            rows = holdings.len(),
            selected = selected.len(),
            groups = groups.len(),
            "aggregating holdings"
        );

        let shares_defined = !total.is_zero();
        if !shares_defined && !groups.is_empty() {
            if self.options.strict {
                return Err(AggregateError::ZeroTotalValue);
            }
            warn!(
                groups = groups.len(),
                "total portfolio value is zero; reporting shares as null"
            );
        }

        let mut summaries = groups
            .iter()
            .map(|group| self.summarize(group, total, shares_defined))
            .collect::<Result<Vec<_>, _>>()?;
        sort_by_share(&mut summaries);

        Ok(Portfolio {
            date: self.clock.now(),
            total_value: round_value(total, self.options.decimals),
            accounts: accounts.to_vec(),
            holding_summaries: summaries,
        })
    }

    fn summarize(
        &self,
        group: &HoldingGroup,
        total: Decimal,
        shares_defined: bool,
    ) -> Result<HoldingSummary, AggregateError> {
        let decimals = self.options.decimals;
        let share = if shares_defined {
            Some(share_of(group.value, total)?)
        } else {
            None
        };

        Ok(HoldingSummary {
            name: group.name.clone(),
            volume: round_value(group.volume, decimals),
            value: round_value(group.value, decimals),
            price: self.tolerate(group.price())?.map(|p| round_value(p, decimals)),
            share,
            gav: self.tolerate(group.gav())?.map(|g| round_value(g, decimals)),
            kind: group.kind.clone(),
            currency: group.currency.clone(),
        })
    }

    /// Downgrade a degenerate-group error to `None` unless running strict.
    fn tolerate(
        &self,
        result: Result<Decimal, AggregateError>,
    ) -> Result<Option<Decimal>, AggregateError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err @ AggregateError::ZeroGroupVolume { .. }) if !self.options.strict => {
                warn!(error = %err, "reporting undefined per-unit figure as null");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
