use crate::demo::{run_analyze, run_demo, AnalyzeArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use coverage_gap::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Coverage Gap Analyzer",
    about = "Detect missing insurance coverage from policy documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Analyze a single policy document and print the report
    Analyze(AnalyzeArgs),
    /// Run the bundled sample policies through the analysis pipeline
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["coverage-gap-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn analyze_requires_a_policy_path() {
        assert!(Cli::try_parse_from(["coverage-gap-api", "analyze"]).is_err());

        let cli = Cli::try_parse_from([
            "coverage-gap-api",
            "analyze",
            "--policy",
            "policy.json",
            "--json",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Analyze(args)) => {
                assert!(args.json);
                assert!(!args.narrate);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
