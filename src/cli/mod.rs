use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::api;
use crate::core::{
    BenchmarkError, Calculator, CalculatorView, DEFAULT_PRICE, DescriptionKey, Edit, Field,
    Verdict, YieldBenchmarks, countries,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid edit {0:?}: expected <price|rent|yield>=<text>")]
    InvalidEdit(String),
    #[error("invalid benchmarks {0:?}: expected bad,average,good,excellent")]
    BenchmarkFormat(String),
    #[error(transparent)]
    Benchmark(#[from] BenchmarkError),
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "rental-yield",
    about = "Gross rental yield calculator with country benchmarks and lead capture"
)]
pub struct Cli {
    #[arg(long, short, global = true, help = "Enable debug logging")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the missing figure and the verdict for one property
    Quote(QuoteArgs),
    /// Replay field edits in order, printing the state after each one
    Edit(EditArgs),
    /// List supported countries and their yield benchmarks
    Countries,
    /// Serve the country catalogue and lead capture API
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct QuoteArgs {
    #[arg(long, default_value = DEFAULT_PRICE, help = "Purchase price")]
    pub price: String,
    #[arg(long, conflicts_with = "yield_percent", help = "Monthly rent")]
    pub rent: Option<String>,
    #[arg(
        long = "yield",
        id = "yield_percent",
        help = "Target gross yield in percent, e.g. 5.5"
    )]
    pub yield_percent: Option<String>,
    #[command(flatten)]
    pub market: MarketArgs,
    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    #[arg(
        value_parser = parse_edit,
        required = true,
        help = "Edits such as price=450000 rent=2100 yield=6.5"
    )]
    pub edits: Vec<Edit>,
    #[command(flatten)]
    pub market: MarketArgs,
    #[arg(long, help = "Print each state as a JSON line")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MarketArgs {
    #[arg(
        long,
        default_value = countries::DEFAULT_COUNTRY,
        help = "Country code; unknown codes use the default country"
    )]
    pub country: String,
    #[arg(
        long,
        value_parser = parse_benchmarks,
        help = "Override thresholds as bad,average,good,excellent"
    )]
    pub benchmarks: Option<YieldBenchmarks>,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "RENTAL_YIELD_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(long, env = "RENTAL_YIELD_PORT", default_value_t = 8080)]
    pub port: u16,
}

pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("rental_yield=debug,info")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Quote(args) => {
            let view = run_quote(&args);
            print_view(&view, args.json)
        }
        Command::Edit(args) => {
            for view in run_edits(&args) {
                print_view(&view, args.json)?;
                if !args.json {
                    println!();
                }
            }
            Ok(())
        }
        Command::Countries => {
            print!("{}", render_countries());
            Ok(())
        }
        Command::Serve(args) => {
            let addr = SocketAddr::new(args.host, args.port);
            info!(%addr, "starting server");
            api::run_http_server(addr).await?;
            Ok(())
        }
    }
}

fn run_quote(args: &QuoteArgs) -> CalculatorView {
    let mut calc = Calculator::default();
    calc.edit_price(&args.price);
    if let Some(rent) = &args.rent {
        calc.edit_monthly_rent(rent);
    }
    if let Some(yield_percent) = &args.yield_percent {
        calc.edit_yield(yield_percent);
    }
    args.market.view(&calc)
}

fn run_edits(args: &EditArgs) -> Vec<CalculatorView> {
    let mut calc = Calculator::default();
    args.edits
        .iter()
        .map(|edit| {
            debug!(field = edit.field.as_str(), raw = %edit.raw, "applying edit");
            calc.apply(edit);
            args.market.view(&calc)
        })
        .collect()
}

impl MarketArgs {
    fn view(&self, calc: &Calculator) -> CalculatorView {
        let country = countries::lookup(&self.country);
        if countries::find(&self.country).is_none() {
            debug!(requested = %self.country, fallback = country.code, "unknown country");
        }
        match &self.benchmarks {
            Some(benchmarks) => calc.view_with_benchmarks(country, benchmarks),
            None => calc.view(country),
        }
    }
}

fn print_view(view: &CalculatorView, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string(view)?);
    } else {
        print!("{}", render_view(view));
    }
    Ok(())
}

fn parse_edit(raw: &str) -> Result<Edit, CliError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidEdit(raw.to_string()))?;
    let field = match key.trim().to_ascii_lowercase().as_str() {
        "price" => Field::Price,
        "rent" | "monthlyrent" | "monthly-rent" => Field::MonthlyRent,
        "yield" | "yieldpercent" | "yield-percent" => Field::YieldPercent,
        _ => return Err(CliError::InvalidEdit(raw.to_string())),
    };
    Ok(Edit::new(field, value))
}

fn parse_benchmarks(raw: &str) -> Result<YieldBenchmarks, CliError> {
    let values = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| CliError::BenchmarkFormat(raw.to_string()))?;
    let [bad, average, good, excellent] = values[..] else {
        return Err(CliError::BenchmarkFormat(raw.to_string()));
    };
    Ok(YieldBenchmarks::try_new(bad, average, good, excellent)?)
}

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Bad => "Bad",
        Verdict::Average => "Average",
        Verdict::Good => "Good",
        Verdict::Excellent => "Excellent",
    }
}

fn description_text(key: DescriptionKey) -> &'static str {
    match key {
        DescriptionKey::TooLow => "Yield is too low for this market.",
        DescriptionKey::SafeLow => "Safe but low return.",
        DescriptionKey::Standard => "Standard return for this market.",
        DescriptionKey::Profitable => "Profitable investment.",
        DescriptionKey::HighProfit => "High profit potential.",
    }
}

pub fn render_view(view: &CalculatorView) -> String {
    let symbol = view.currency_symbol;
    let mut out = String::new();
    let _ = writeln!(out, "Country:        {}", view.country);
    let _ = writeln!(out, "Purchase price: {} {symbol}", view.price);
    let _ = writeln!(out, "Monthly rent:   {} {symbol}", view.monthly_rent);
    let _ = writeln!(out, "Gross yield:    {}%", view.yield_percent);
    let _ = writeln!(out, "Annual revenue: {} {symbol}", view.annual_revenue);
    let _ = writeln!(
        out,
        "Verdict:        {} ({})",
        verdict_label(view.benchmark.verdict),
        description_text(view.benchmark.description_key)
    );
    out
}

pub fn render_countries() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<22} {:<6} {:>5} {:>8} {:>6} {:>10}",
        "CODE", "NAME", "CCY", "BAD", "AVERAGE", "GOOD", "EXCELLENT"
    );
    for country in &countries::COUNTRIES {
        let b = &country.benchmarks;
        let _ = writeln!(
            out,
            "{:<4} {:<22} {:<6} {:>5} {:>8} {:>6} {:>10}",
            country.code, country.name, country.currency, b.bad, b.average, b.good, b.excellent
        );
    }
    out
}
