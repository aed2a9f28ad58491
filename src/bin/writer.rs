//! Writer service: form-driven inserts into `data_table`.

use clap::Parser;
use data_app::lifecycle::startup::{self, CliArgs};
use data_app::ServiceKind;

#[derive(Parser)]
#[command(name = "writer", version, about = "Insert rows into data_table from a web form")]
struct Cli {
    #[command(flatten)]
    args: CliArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    startup::run(ServiceKind::Writer, Cli::parse().args).await
}
