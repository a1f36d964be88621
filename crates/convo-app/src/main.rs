use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use convo::logging::init_logging;
use convo::prompt::Prompter;
use convo::{run_repl_mode, setup_from_cli, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let app_config = setup_from_cli(&cli)?;

    let result = match &cli.command {
        None | Some(Commands::Chat) => return run_repl_mode(&app_config).await,
        Some(Commands::Conversations { command }) => {
            let prompter = Prompter::new(app_config.assume_yes)?;
            command.execute(&app_config, &prompter).await?
        }
        Some(Commands::Models { command }) => command.execute(&app_config).await?,
        Some(Commands::Completions { .. }) => return Ok(()),
    };

    println!("{}", result);
    Ok(())
}
