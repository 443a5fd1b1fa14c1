mod benchmarks;
mod calculator;
pub mod countries;
mod financial;
pub mod input;
mod types;

pub use benchmarks::{classify, verdict_for_country};
pub use calculator::{
    Calculator, DEFAULT_MONTHLY_RENT, DEFAULT_PRICE, DEFAULT_YIELD_PERCENT, FieldInput,
};
pub use financial::{annual_rent, monthly_rent, yield_percent};
pub use types::{
    BenchmarkError, BenchmarkResult, CalculatorView, CountryConfig, DescriptionKey, Edit, Field,
    Language, Verdict, YieldBenchmarks,
};
