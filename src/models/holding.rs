use rust_decimal::Decimal;

/// One ledger row: a position held within a single account.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub account_number: String,
    /// Display name; holdings are grouped by it. May be empty.
    pub name: String,
    /// Units held.
    pub volume: Decimal,
    /// Current market value, in the ledger's single implicit currency.
    pub value: Decimal,
    /// Average acquisition cost per unit.
    pub avg: Decimal,
    pub isin: String,
    pub currency: String,
    /// Category such as asset class.
    pub kind: String,
}

impl Holding {
    pub fn new(
        account_number: impl Into<String>,
        name: impl Into<String>,
        volume: Decimal,
        value: Decimal,
        avg: Decimal,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            name: name.into(),
            volume,
            value,
            avg,
            isin: String::new(),
            currency: String::new(),
            kind: String::new(),
        }
    }

    pub fn with_isin(mut self, isin: impl Into<String>) -> Self {
        self.isin = isin.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Whether the holding can be assigned to a named group.
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// `avg * volume`, the acquisition cost of the whole position.
    /// None if the product does not fit in a `Decimal`.
    pub fn cost_basis(&self) -> Option<Decimal> {
        self.avg.checked_mul(self.volume)
    }
}
