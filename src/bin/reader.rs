//! Reader service: shows the rows of `data_table`.

use clap::Parser;
use data_app::lifecycle::startup::{self, CliArgs};
use data_app::ServiceKind;

#[derive(Parser)]
#[command(name = "reader", version, about = "Serve the rows of data_table as HTML and JSON")]
struct Cli {
    #[command(flatten)]
    args: CliArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    startup::run(ServiceKind::Reader, Cli::parse().args).await
}
