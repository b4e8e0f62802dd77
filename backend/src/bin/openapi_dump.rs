//! Print the OpenAPI document as JSON.

use clap::Parser;
use daybook::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the service OpenAPI document")]
struct Cli {
    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), serde_json::Error> {
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();
    let rendered = if cli.pretty {
        doc.to_pretty_json()?
    } else {
        doc.to_json()?
    };
    println!("{rendered}");
    Ok(())
}
