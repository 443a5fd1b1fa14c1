use clap::Parser;
use rental_yield::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    cli::init_logging(args.verbose);

    if let Err(e) = cli::run(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
