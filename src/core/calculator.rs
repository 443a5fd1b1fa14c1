use tracing::trace;

use super::benchmarks::classify;
use super::countries;
use super::financial::{annual_rent, monthly_rent, yield_percent};
use super::input::{format_fixed, parse_or_zero};
use super::types::{BenchmarkResult, CalculatorView, CountryConfig, Edit, Field, YieldBenchmarks};

pub const DEFAULT_PRICE: &str = "400000";
pub const DEFAULT_MONTHLY_RENT: &str = "1667";
pub const DEFAULT_YIELD_PERCENT: &str = "5.00";

const YIELD_DECIMALS: usize = 2;
const RENT_DECIMALS: usize = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInput {
    text: String,
    value: f64,
}

impl FieldInput {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let value = parse_or_zero(&text);
        Self { text, value }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    fn derived(value: f64, decimals: usize) -> Self {
        // overflow and underflow of a finite input count as zero, like unparsable text
        let value = if value.is_finite() { value } else { 0.0 };
        Self::from_text(format_fixed(value, decimals))
    }
}

/// Three mutually derived fields kept consistent across single-field edits.
///
/// Price is never recomputed. Price and rent edits rewrite the yield; yield
/// edits rewrite the rent.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    price: FieldInput,
    monthly_rent: FieldInput,
    yield_percent: FieldInput,
    last_edited: Option<Field>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE, DEFAULT_MONTHLY_RENT, DEFAULT_YIELD_PERCENT)
    }
}

impl Calculator {
    pub fn new(price: &str, monthly_rent: &str, yield_percent: &str) -> Self {
        Self {
            price: FieldInput::from_text(price),
            monthly_rent: FieldInput::from_text(monthly_rent),
            yield_percent: FieldInput::from_text(yield_percent),
            last_edited: None,
        }
    }

    pub fn price(&self) -> &FieldInput {
        &self.price
    }

    pub fn monthly_rent(&self) -> &FieldInput {
        &self.monthly_rent
    }

    pub fn yield_percent(&self) -> &FieldInput {
        &self.yield_percent
    }

    pub fn last_edited(&self) -> Option<Field> {
        self.last_edited
    }

    pub fn apply(&mut self, edit: &Edit) {
        match edit.field {
            Field::Price => self.edit_price(&edit.raw),
            Field::MonthlyRent => self.edit_monthly_rent(&edit.raw),
            Field::YieldPercent => self.edit_yield(&edit.raw),
        }
    }

    pub fn edit_price(&mut self, raw: &str) {
        self.price = FieldInput::from_text(raw);
        self.last_edited = Some(Field::Price);
        self.recompute_yield();
    }

    pub fn edit_monthly_rent(&mut self, raw: &str) {
        self.monthly_rent = FieldInput::from_text(raw);
        self.last_edited = Some(Field::MonthlyRent);
        self.recompute_yield();
    }

    pub fn edit_yield(&mut self, raw: &str) {
        self.yield_percent = FieldInput::from_text(raw);
        self.last_edited = Some(Field::YieldPercent);
        self.recompute_monthly_rent();
    }

    pub fn annual_revenue(&self) -> f64 {
        self.monthly_rent.value * 12.0
    }

    pub fn benchmark(&self, benchmarks: &YieldBenchmarks) -> BenchmarkResult {
        classify(self.yield_percent.value, benchmarks)
    }

    pub fn benchmark_for_country(&self, country_code: &str) -> BenchmarkResult {
        self.benchmark(&countries::lookup(country_code).benchmarks)
    }

    pub fn view(&self, country: &'static CountryConfig) -> CalculatorView {
        self.view_with_benchmarks(country, &country.benchmarks)
    }

    /// Snapshot for rendering, classified against `benchmarks` rather than
    /// the country's own table.
    pub fn view_with_benchmarks(
        &self,
        country: &'static CountryConfig,
        benchmarks: &YieldBenchmarks,
    ) -> CalculatorView {
        CalculatorView {
            price: self.price.text.clone(),
            monthly_rent: self.monthly_rent.text.clone(),
            yield_percent: self.yield_percent.text.clone(),
            numeric_price: self.price.value,
            numeric_rent: self.monthly_rent.value,
            numeric_yield: self.yield_percent.value,
            annual_revenue: self.annual_revenue(),
            last_edited: self.last_edited,
            country: country.code,
            currency_symbol: country.currency_symbol,
            benchmark: self.benchmark(benchmarks),
        }
    }

    fn recompute_yield(&mut self) {
        let y = yield_percent(self.price.value, self.monthly_rent.value);
        self.yield_percent = FieldInput::derived(y, YIELD_DECIMALS);
        trace!(
            price = self.price.value,
            rent = self.monthly_rent.value,
            yield_text = %self.yield_percent.text,
            "recomputed yield"
        );
    }

    fn recompute_monthly_rent(&mut self) {
        let annual = annual_rent(self.price.value, self.yield_percent.value);
        self.monthly_rent = FieldInput::derived(monthly_rent(annual), RENT_DECIMALS);
        trace!(
            price = self.price.value,
            yield_percent = self.yield_percent.value,
            rent_text = %self.monthly_rent.text,
            "recomputed monthly rent"
        );
    }
}
