const MONTHS_PER_YEAR: f64 = 12.0;

/// Annual rent implied by a purchase price and a gross yield in percent.
pub fn annual_rent(price: f64, yield_percent: f64) -> f64 {
    price * (yield_percent / 100.0)
}

pub fn monthly_rent(annual_rent: f64) -> f64 {
    annual_rent / MONTHS_PER_YEAR
}

/// Gross yield in percent. A zero price yields 0 instead of dividing by zero.
pub fn yield_percent(price: f64, monthly_rent: f64) -> f64 {
    if price == 0.0 {
        return 0.0;
    }
    let annual = monthly_rent * MONTHS_PER_YEAR;
    (annual / price) * 100.0
}
