use super::countries;
use super::types::{BenchmarkResult, DescriptionKey, Verdict, YieldBenchmarks};

/// Tiered threshold comparison, first match wins.
///
/// Below `average` and below `good` both report [`Verdict::Average`] with
/// different description keys. `excellent` is exclusive, so a yield sitting
/// exactly on it is still `Good`.
pub fn classify(yield_percent: f64, benchmarks: &YieldBenchmarks) -> BenchmarkResult {
    let (verdict, description_key) = if yield_percent < benchmarks.bad {
        (Verdict::Bad, DescriptionKey::TooLow)
    } else if yield_percent < benchmarks.average {
        (Verdict::Average, DescriptionKey::SafeLow)
    } else if yield_percent < benchmarks.good {
        (Verdict::Average, DescriptionKey::Standard)
    } else if yield_percent <= benchmarks.excellent {
        (Verdict::Good, DescriptionKey::Profitable)
    } else {
        (Verdict::Excellent, DescriptionKey::HighProfit)
    };

    BenchmarkResult {
        verdict,
        description_key,
    }
}

pub fn verdict_for_country(yield_percent: f64, country_code: &str) -> BenchmarkResult {
    classify(yield_percent, &countries::lookup(country_code).benchmarks)
}
