use anyhow::{Context, Result};
use clap::Parser;
use issue_summoner::{cli, config, models, remote, reporter, scanner};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Scan(args) => scan_command(args)?,
    }

    Ok(())
}

fn scan_command(args: cli::ScanArgs) -> Result<()> {
    if args.verbose {
        eprintln!("Issue Summoner - scanning for actionable comments...");
        eprintln!("Scanning: {}", args.path.display());
    }

    // Load configuration
    let mut config =
        config::load_config(args.config.as_deref()).context("Failed to load configuration")?;

    if let Some(tag) = args.tag {
        config.annotation = tag;
    }

    if args.verbose {
        eprintln!("Using annotation: {}", config.annotation);
    }

    // Patterns and syntax table are fixed before the walk starts
    let registry = config::build_registry(&config);
    let patterns = config::build_ignore_set(&config, &args.path, args.gitignore_path.as_deref())
        .context("Failed to compile ignore patterns")?;

    if args.verbose {
        for pattern in patterns.iter() {
            eprintln!("Ignore pattern: {}", pattern);
        }
    }

    let tags = scanner::scan_directory(&args.path, &config.annotation, &patterns, &registry)
        .context("Failed to scan directory")?;

    if args.verbose {
        eprintln!("Found {} tags", tags.len());
    }

    let repository = remote::discover_origin(&args.path).unwrap_or_else(|err| {
        if args.verbose {
            eprintln!("Skipping repository detection: {:#}", err);
        }
        None
    });

    if args.verbose {
        match repository {
            Some(ref repo) => eprintln!("Repository: {}", repo),
            None => eprintln!("No origin remote found"),
        }
    }

    let report = models::TagReport::new(tags, &config.annotation, args.path.clone())
        .with_repository(repository);

    reporter::generate_report(&report, args.format, args.output.as_deref())
        .context("Failed to generate report")?;

    Ok(())
}
