use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use busfactor::cli::{Cli, Commands};
use busfactor::report;

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,busfactor=info",
        1 => "info,busfactor=debug",
        2 => "debug,busfactor=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let result = match cli.command {
        Commands::Keys {
            analysis,
            json,
            top,
        } => report::run_keys(&analysis.target(), &analysis.sources(), json, top),
        Commands::Graph { analysis } => report::run_graph(&analysis.target(), &analysis.sources()),
        Commands::Shares {
            analysis,
            json,
            top,
        } => report::run_shares(&analysis.target(), &analysis.sources(), json, top),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "bf", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
