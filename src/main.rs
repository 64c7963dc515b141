use clap::Parser;
use soup_issues::cli::{Cli, Commands, FetchArgs, TranslateArgs};
use soup_issues::csv_processor::{file_exists, get_file_size, CsvWriteOptions};
use soup_issues::github::{write_issues_csv, FetchRequest, GithubClient};
use soup_issues::progress::ConsoleProgress;
use soup_issues::translation::{translate_file, AnthropicClient};
use soup_issues::utils::config::ANTHROPIC_API_KEY_VAR;
use soup_issues::utils::{FetchConfig, Result, SoupIssuesError, TranslateConfig};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("soup_issues=info".parse().expect("invalid filter directive")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch(args) => run_fetch(args).await,
        Commands::Translate(args) => run_translate(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run_fetch(args: FetchArgs) -> Result<()> {
    let config = FetchConfig {
        token: args.token,
        request: FetchRequest {
            soup_id: args.soup_id,
            project_id: args.project_id,
            owner: args.owner,
            repo: args.repo,
            wanted_n: args.count,
            labels: args.labels,
            version: args.version_filter,
        },
        output: args.out,
        write: CsvWriteOptions {
            include_bom: args.bom,
            newline: args.newline.into(),
        },
    };

    println!("soup-issues fetch");
    println!("  repository: {}/{}", config.request.owner, config.request.repo);
    println!("  requested:  {}", config.request.wanted_n);

    let client = GithubClient::new(&config.token);
    let response = client.fetch_issues(&config.request).await?;

    println!("Query: {}", response.query);
    println!(
        "Matched {} issues, exporting {}",
        response.count,
        response.items.len()
    );

    write_issues_csv(&config.output, &response.items, None, config.write).await?;
    println!("Wrote {}", config.output);
    Ok(())
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let api_key = std::env::var(ANTHROPIC_API_KEY_VAR)
        .ok()
        .filter(|key| !key.is_empty())
        .ok_or(SoupIssuesError::MissingApiKey(ANTHROPIC_API_KEY_VAR))?;

    let config = TranslateConfig {
        input: args.input,
        output: args.out,
        concurrency: args.concurrency,
        model: args.model,
        temperature: args.temp,
        api_key,
        write: CsvWriteOptions {
            include_bom: args.bom,
            newline: args.newline.into(),
        },
    };

    println!("soup-issues translate");
    println!("  input:       {}", config.input);
    println!("  output:      {}", config.output);
    println!("  model:       {}", config.model);
    println!("  temperature: {}", config.temperature);
    println!("  concurrency: {}", config.concurrency);

    if !file_exists(&config.input) {
        return Err(SoupIssuesError::FileNotFound(config.input.clone()));
    }
    let size = get_file_size(&config.input).await?;
    println!("Input file: {} bytes", size);

    let api = Arc::new(AnthropicClient::new(
        &config.api_key,
        &config.model,
        config.temperature,
    ));
    let progress = Arc::new(ConsoleProgress::new());

    let rows = translate_file(&config, api, progress).await?;

    println!("Translated {} rows", rows);
    println!("  {} -> {}", config.input, config.output);
    Ok(())
}
