use serde::Serialize;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Bad,
    Average,
    Good,
    Excellent,
}

/// Localization token explaining a verdict. Two keys share the `Average` tier.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum DescriptionKey {
    #[serde(rename = "verdictDescription.tooLow")]
    TooLow,
    #[serde(rename = "verdictDescription.safeLow")]
    SafeLow,
    #[serde(rename = "verdictDescription.standard")]
    Standard,
    #[serde(rename = "verdictDescription.profitable")]
    Profitable,
    #[serde(rename = "verdictDescription.highProfit")]
    HighProfit,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    pub verdict: Verdict,
    pub description_key: DescriptionKey,
}

#[derive(Debug, Error, PartialEq)]
pub enum BenchmarkError {
    #[error("benchmark thresholds must be finite numbers")]
    NonFinite,
    #[error("benchmark thresholds must be non-decreasing (bad <= average <= good <= excellent)")]
    Unordered,
}

/// Yield thresholds in percent, ordered `bad <= average <= good <= excellent`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct YieldBenchmarks {
    pub bad: f64,
    pub average: f64,
    pub good: f64,
    pub excellent: f64,
}

impl YieldBenchmarks {
    pub const fn new(bad: f64, average: f64, good: f64, excellent: f64) -> Self {
        Self {
            bad,
            average,
            good,
            excellent,
        }
    }

    pub fn try_new(
        bad: f64,
        average: f64,
        good: f64,
        excellent: f64,
    ) -> Result<Self, BenchmarkError> {
        let benchmarks = Self::new(bad, average, good, excellent);
        if !benchmarks.thresholds().iter().all(|v| v.is_finite()) {
            return Err(BenchmarkError::NonFinite);
        }
        if !benchmarks.is_ordered() {
            return Err(BenchmarkError::Unordered);
        }
        Ok(benchmarks)
    }

    pub fn thresholds(&self) -> [f64; 4] {
        [self.bad, self.average, self.good, self.excellent]
    }

    pub fn is_ordered(&self) -> bool {
        self.thresholds().windows(2).all(|pair| pair[0] <= pair[1])
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
    Ar,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryConfig {
    pub code: &'static str,
    pub name: &'static str,
    pub currency: &'static str,
    pub currency_symbol: &'static str,
    pub default_language: Language,
    pub benchmarks: YieldBenchmarks,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Price,
    MonthlyRent,
    YieldPercent,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Price => "price",
            Field::MonthlyRent => "monthlyRent",
            Field::YieldPercent => "yieldPercent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub field: Field,
    pub raw: String,
}

impl Edit {
    pub fn new(field: Field, raw: impl Into<String>) -> Self {
        Self {
            field,
            raw: raw.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorView {
    pub price: String,
    pub monthly_rent: String,
    pub yield_percent: String,
    pub numeric_price: f64,
    pub numeric_rent: f64,
    pub numeric_yield: f64,
    pub annual_revenue: f64,
    pub last_edited: Option<Field>,
    pub country: &'static str,
    pub currency_symbol: &'static str,
    pub benchmark: BenchmarkResult,
}
