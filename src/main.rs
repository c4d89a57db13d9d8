// Entrypoint for the interactive admin tool.
// - Keeps `main` small: resolve settings, connect to AWS once and hand the
//   table and bucket to the menu loop.

use anyhow::Context;
use clap::Parser;
use client_admin::api::AwsContext;
use client_admin::config::{self, Settings};
use client_admin::logging;
use client_admin::ui::{main_menu, Session, TerminalConsole};

/// Manage client records and client statements.
#[derive(Parser, Debug)]
#[command(name = "client-admin", version, about)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    /// Log SDK calls at debug level to stderr.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    config::load_env_files();
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = cli.settings;
    settings.require_table()?;
    let bucket_name = settings.require_bucket()?;

    let aws = AwsContext::load(&settings).context("Failed to start the async runtime")?;
    let table = aws.table(&settings);
    let bucket = aws.bucket(bucket_name, &settings);

    let mut console = TerminalConsole::new();
    let mut session = Session::new(&mut console, &table, &bucket);

    // Blocks until the operator chooses "Exit".
    main_menu(&mut session)?;
    Ok(())
}
