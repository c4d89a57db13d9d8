// One-off setup for the resources `client-admin` expects: the clients
// table and the statements bucket.

use anyhow::Context;
use clap::{Parser, Subcommand};
use client_admin::api::table::Capacity;
use client_admin::api::AwsContext;
use client_admin::config::{self, Settings};
use client_admin::logging;

/// Create the clients table or the statements bucket.
#[derive(Parser, Debug)]
#[command(name = "client-admin-provision", version, about)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the table keyed by the numeric `ClientID`.
    Table {
        #[arg(long, default_value_t = Capacity::default().read_units)]
        read_capacity: i64,
        #[arg(long, default_value_t = Capacity::default().write_units)]
        write_capacity: i64,
    },
    /// Create the statements bucket in the configured region.
    Bucket,
}

fn main() -> anyhow::Result<()> {
    config::load_env_files();
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = cli.settings;
    let aws = AwsContext::load(&settings).context("Failed to start the async runtime")?;

    match cli.command {
        Command::Table {
            read_capacity,
            write_capacity,
        } => {
            let name = settings.require_table()?;
            let capacity = Capacity {
                read_units: read_capacity,
                write_units: write_capacity,
            };
            let status = aws
                .table(&settings)
                .create(capacity)
                .with_context(|| format!("Failed to create table {name}"))?;
            println!("Table status: {}", status.as_deref().unwrap_or("UNKNOWN"));
            println!("{name} table created.");
        }
        Command::Bucket => {
            let name = settings.require_bucket()?;
            aws.bucket(name, &settings)
                .create(aws.region())
                .with_context(|| format!("Failed to create bucket {name}"))?;
            println!("Bucket {name} created.");
        }
    }
    Ok(())
}
