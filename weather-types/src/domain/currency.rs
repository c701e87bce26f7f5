//! Currencies and the fixed set of pairs the forecast covers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Currencies known to the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    JPY,
    USD,
    EUR,
}

impl Currency {
    /// Returns the ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::JPY => "JPY",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Returns the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::JPY => "¥",
            Currency::USD => "$",
            Currency::EUR => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "JPY" => Ok(Currency::JPY),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            _ => Err(format!("Unknown currency: {}", s)),
        }
    }
}

/// A base/quote pair. Rates are quote units received per one base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    /// Every pair is quoted against the euro.
    pub const QUOTE: Currency = Currency::EUR;

    pub const JPY_EUR: CurrencyPair = CurrencyPair::against_quote(Currency::JPY);
    pub const USD_EUR: CurrencyPair = CurrencyPair::against_quote(Currency::USD);

    pub const fn against_quote(base: Currency) -> Self {
        Self {
            base,
            quote: Self::QUOTE,
        }
    }

    /// The pairs a refresh cycle covers, in display order.
    pub fn supported() -> [CurrencyPair; 2] {
        [Self::JPY_EUR, Self::USD_EUR]
    }

    /// Identifier prefix used by renderers (`jpy`, `usd`).
    pub fn id(&self) -> String {
        self.base.code().to_lowercase()
    }

    /// Whether end users expect this pair as base units per quote unit.
    ///
    /// The yen is conventionally read as "yen per euro", the reverse of the
    /// provider's quoting direction.
    pub fn is_inverted_display(&self) -> bool {
        self.base == Currency::JPY
    }

    /// Unit suffix matching the displayed direction of the rate.
    pub fn unit_suffix(&self) -> String {
        if self.is_inverted_display() {
            format!("{}/{}", self.base.symbol(), self.quote.symbol())
        } else {
            format!("{}/{}", self.quote.symbol(), self.base.symbol())
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
