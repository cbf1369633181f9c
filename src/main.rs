//! sql-runner - run a file of SQL statements and report results and timings.

use sql_runner::cli::Cli;
use sql_runner::db;
use sql_runner::driver::Driver;
use sql_runner::error::Result;
use sql_runner::logging;
use sql_runner::report::ReportPrinter;
use sql_runner::statement::load_script;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_stderr_logging();

    if let Err(e) = run().await {
        logging::report_fatal(&e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let config = cli.to_config()?;

    info!("Loading script from: {}", config.script_path.display());
    let statements = load_script(&config.script_path)?;

    info!("Connecting to {}", config.connection.display_string());
    let mut client = db::connect(&config.connection).await?;

    let printer = ReportPrinter::new(std::io::stdout(), config.format);
    let mut driver = Driver::new(client.as_mut(), printer);
    // On error the client is dropped, which closes the connection.
    driver.run(&statements).await?;

    client.close().await
}
