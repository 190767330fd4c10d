use anyhow::Context;
use clap::Parser;
use domain_connect::config::cli::{CliConfig, Command};
use domain_connect::utils::{logger, validation::Validate};
use domain_connect::{DomainConnect, DomainConnectConfig, DomainConnectError, ErrorCategory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate() {
        tracing::error!("Argument validation failed: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(exit_code(&e));
    }

    let config = match &cli.config {
        Some(path) => DomainConnectConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => DomainConnectConfig::default(),
    };

    let client = DomainConnect::from_config(cli.domain.clone(), &config)
        .context("initializing Domain Connect client")?;

    if let Err(e) = run(&client, &cli.command).await {
        tracing::error!("{} (Category: {:?})", e, e.category());
        eprintln!("error: {}", e);
        eprintln!("hint: {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

async fn run(client: &DomainConnect, command: &Command) -> Result<(), DomainConnectError> {
    match command {
        Command::Provider => match client.provider_host().await? {
            Some(host) => println!("{}", host),
            None => println!("{} has no Domain Connect provider", client.domain()),
        },
        Command::Settings => {
            let settings = client.provider_settings().await?;
            let json = serde_json::to_string_pretty(settings.as_ref())
                .map_err(|e| DomainConnectError::invalid_response(client.domain(), e))?;
            println!("{}", json);
        }
        Command::Query(args) => {
            match client
                .query_support_template(&args.provider_id, &args.service_id)
                .await?
            {
                Some(support) => println!(
                    "{}/{} supported (version {})",
                    args.provider_id, args.service_id, support.version
                ),
                None => println!("{}/{} not supported", args.provider_id, args.service_id),
            }
        }
        Command::ApplyUrl(args) => {
            let properties = args.properties();
            let url = client
                .apply_template_sync_url(
                    &args.template.provider_id,
                    &args.template.service_id,
                    Some(&properties),
                )
                .await?;
            println!("{}", url);
        }
    }
    Ok(())
}

fn exit_code(e: &DomainConnectError) -> i32 {
    match e.category() {
        ErrorCategory::NotSupported => 2,
        ErrorCategory::Transport => 3,
        ErrorCategory::Protocol => 4,
        ErrorCategory::Usage | ErrorCategory::Configuration => 64,
    }
}
