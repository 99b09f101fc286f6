use clap::{CommandFactory, Parser};
use pathfinder::config::{CliConfig, Config, ConfigSources, MailOverrides};
use pathfinder::reporting::logging;
use pathfinder::ui::{Cli, Commands, cli_to_config};
use pathfinder::{HttpProber, PathfinderError, Runner, SmtpMailer};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Without a subcommand there is nothing to check
    let Some(ref command) = cli.command else {
        let mut app = Cli::command();
        if let Err(e) = app.print_help() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!();
        std::process::exit(0);
    };

    logging::init_logger(cli.verbose, cli.quiet);

    match run_pathfinder_logic(&cli, command).await {
        Ok(()) => std::process::exit(0),
        Err(PathfinderError::Validation(err)) => {
            // Show the row unprettified so odd values survive
            println!("ValidationError. {err}\n");
            println!("Input row:\n {}", err.row);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main check-and-notify logic extracted from main() for testing
pub async fn run_pathfinder_logic(cli: &Cli, command: &Commands) -> Result<(), PathfinderError> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    let raw_rows = command.load_rows()?;
    logging::log_rows_loaded(&command.source_name(), raw_rows.len());

    let subject = command.mail_args().resolve_subject(config.default_subject());

    let prober = HttpProber::from_config(&config)?;
    let mailer = SmtpMailer::new(config, MailOverrides::default());
    let today = chrono::Local::now().date_naive();

    let mut stdout = std::io::stdout().lock();
    Runner::new(&prober, &mailer)
        .run(&raw_rows, subject.as_deref(), today, &mut stdout)
        .await?;

    Ok(())
}

/// Load layered configuration and merge CLI overrides on top
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, PathfinderError> {
    let sources = ConfigSources::resolve(cli_config.config_dir.as_deref(), !cli_config.no_user_config);
    let mut config = Config::load(&sources).inspect_err(|e| {
        logging::log_error("Could not load configuration", Some(e));
    })?;

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;

    logging::log_config_info(&config, &sources.paths());
    Ok(config)
}
