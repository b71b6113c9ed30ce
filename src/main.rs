use calendar_console::config::ConsoleConfig;
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ConsoleConfig::from_env()?;

    calendar_console::start_console(config).await?;

    Ok(())
}
