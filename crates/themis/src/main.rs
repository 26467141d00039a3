//! Themis - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `themis serve` | Build the index if needed, then serve the HTTP API |
//! | `themis index [--force]` | Build (or rebuild) the collection |
//! | `themis cluster` | Cluster every configured code |
//! | `themis search <query>` | Print the best chunks as JSON |
//! | `themis providers` | List registered providers |

// Force-link themis-providers so the linkme registrations are included
extern crate themis_providers;

use clap::Parser;
use themis::cli::{Cli, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run(cli).await?;
    Ok(())
}
