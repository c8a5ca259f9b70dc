//! Fiat exchange rate entries.

use serde::{Deserialize, Serialize};

/// One currency entry from the fiat-rate provider.
///
/// Values are kept in the textual form the provider used, since they are
/// only ever displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiatRate {
    /// Provider key, e.g. `usd` or `sekkeh`
    pub symbol: String,
    /// Rate in Toman
    pub value: String,
    /// Change since the previous day
    pub change: String,
    /// Provider-formatted date of the rate
    pub date: String,
}
