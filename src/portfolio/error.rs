/// Inputs for which a derived figure is undefined.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AggregateError {
    /// The filtered holdings are worth nothing in total, so no share can be
    /// computed for the summaries that do exist.
    #[error("total portfolio value is zero; shares are undefined")]
    ZeroTotalValue,

    /// A group's volumes cancel out, so neither its average cost nor its
    /// price is defined.
    #[error("holding {name:?} has a total volume of zero")]
    ZeroGroupVolume { name: String },

    #[error("arithmetic overflow while summarizing {name:?}")]
    Overflow { name: String },
}
