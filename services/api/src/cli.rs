use crate::demo::{run_assess, run_batch, run_demo, AssessArgs, BatchArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_risk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Risk Assessor",
    about = "Score loan applicants from the command line or over HTTP",
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
    /// Assess a single applicant described by flags
    Assess(AssessArgs),
    /// Assess every applicant in a CSV export
    Batch(BatchArgs),
    /// Walk through assessments of built-in sample applicants
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
        Command::Assess(args) => run_assess(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["loan-risk-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn assess_flags_are_lenient_strings() {
        let cli = Cli::try_parse_from([
            "loan-risk-api",
            "assess",
            "--income",
            "$85,000",
            "--employment",
            "full-time",
            "--seed",
            "9",
            "--json",
        ])
        .expect("parses");

        let Some(Command::Assess(args)) = cli.command else {
            panic!("expected assess command");
        };
        assert_eq!(args.income.as_deref(), Some("$85,000"));
        assert_eq!(args.seed, Some(9));
        assert!(args.json);
    }

    #[test]
    fn batch_requires_a_path() {
        assert!(Cli::try_parse_from(["loan-risk-api", "batch"]).is_err());
    }
}
