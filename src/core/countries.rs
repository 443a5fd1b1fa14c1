use super::types::{CountryConfig, Language, YieldBenchmarks};

pub const DEFAULT_COUNTRY: &str = "MA";

pub static COUNTRIES: [CountryConfig; 5] = [
    CountryConfig {
        code: "MA",
        name: "Morocco",
        currency: "MAD",
        currency_symbol: "MAD",
        default_language: Language::Fr,
        benchmarks: YieldBenchmarks::new(4.0, 6.0, 7.0, 7.0),
    },
    CountryConfig {
        code: "FR",
        name: "France",
        currency: "EUR",
        currency_symbol: "€",
        default_language: Language::Fr,
        benchmarks: YieldBenchmarks::new(3.0, 5.0, 6.0, 6.0),
    },
    CountryConfig {
        code: "US",
        name: "United States",
        currency: "USD",
        currency_symbol: "$",
        default_language: Language::En,
        benchmarks: YieldBenchmarks::new(5.0, 7.0, 10.0, 10.0),
    },
    CountryConfig {
        code: "GB",
        name: "United Kingdom",
        currency: "GBP",
        currency_symbol: "£",
        default_language: Language::En,
        benchmarks: YieldBenchmarks::new(4.0, 6.0, 8.0, 8.0),
    },
    CountryConfig {
        code: "AE",
        name: "United Arab Emirates",
        currency: "AED",
        currency_symbol: "AED",
        default_language: Language::Ar,
        benchmarks: YieldBenchmarks::new(5.0, 7.0, 9.0, 9.0),
    },
];

pub fn find(code: &str) -> Option<&'static CountryConfig> {
    let code = code.trim();
    COUNTRIES
        .iter()
        .find(|country| country.code.eq_ignore_ascii_case(code))
}

/// Like [`find`], but unknown codes resolve to the baseline country.
pub fn lookup(code: &str) -> &'static CountryConfig {
    find(code).unwrap_or_else(default_country)
}

pub fn default_country() -> &'static CountryConfig {
    &COUNTRIES[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_country_is_morocco() {
        assert_eq!(default_country().code, DEFAULT_COUNTRY);
        assert_eq!(default_country().name, "Morocco");
    }

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        assert_eq!(lookup(" gb ").code, "GB");
        assert_eq!(lookup("fr").currency_symbol, "€");
    }

    #[test]
    fn unknown_codes_fall_back_to_default() {
        assert_eq!(lookup("ZZ").code, "MA");
        assert_eq!(lookup("").code, "MA");
        assert!(find("ZZ").is_none());
    }

    #[test]
    fn catalogue_benchmarks_are_ordered_and_codes_unique() {
        for (i, country) in COUNTRIES.iter().enumerate() {
            assert!(country.benchmarks.is_ordered(), "{} unordered", country.code);
            assert!(
                COUNTRIES[i + 1..].iter().all(|other| other.code != country.code),
                "duplicate code {}",
                country.code
            );
        }
    }
}
