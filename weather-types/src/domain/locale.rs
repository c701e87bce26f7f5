//! Display languages and their fixed labels.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::currency::{Currency, CurrencyPair};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Ja => "ja",
            Locale::En => "en",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Locale::Ja => "為替天気予報",
            Locale::En => "Exchange Rate Forecast",
        }
    }

    /// Shown instead of a percentage when the average is zero.
    pub fn not_available(&self) -> &'static str {
        match self {
            Locale::Ja => "データなし",
            Locale::En => "N/A",
        }
    }

    pub fn updated_label(&self) -> &'static str {
        match self {
            Locale::Ja => "最終更新",
            Locale::En => "Last updated",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Locale::Ja => "為替レートを取得できませんでした。しばらくしてから再読み込みしてください。",
            Locale::En => "Could not load exchange rates. Please reload in a moment.",
        }
    }

    pub fn pair_label(&self, pair: CurrencyPair) -> String {
        match self {
            Locale::Ja => {
                let name = match pair.base {
                    Currency::JPY => "日本円",
                    Currency::USD => "米ドル",
                    Currency::EUR => "ユーロ",
                };
                format!("{} → ユーロ", name)
            }
            Locale::En => format!("{} → {}", pair.base, pair.quote),
        }
    }

    /// Renders a "last updated" instant in the locale's usual format.
    pub fn format_timestamp<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            Locale::Ja => at.format("%Y年%m月%d日 %H:%M:%S").to_string(),
            Locale::En => at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ja" | "ja-jp" => Ok(Locale::Ja),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            _ => Err(format!("Unsupported locale: {}", s)),
        }
    }
}
