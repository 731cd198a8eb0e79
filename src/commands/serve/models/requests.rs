use serde::Deserialize;

/// Optional `?currency=` on coin and history endpoints
#[derive(Debug, Default, Deserialize)]
pub struct CurrencyQuery {
    pub currency: Option<String>,
}

impl CurrencyQuery {
    /// Requested currency, or `fallback` when the parameter is missing or blank
    pub fn currency_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.currency
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(fallback)
    }

    /// Requested currency when present and non-blank
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref().filter(|c| !c.trim().is_empty())
    }
}
