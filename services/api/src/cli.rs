use crate::demo::{run_assess, run_batch, run_demo, AssessArgs, BatchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_score::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SME Credit Scoring",
    about = "Score small and medium businesses and price their loans",
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
    /// Score companies from the command line
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
    /// Score the reference company and compare a sample company with the bureau
    Demo,
}

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Assess one company and optionally price a loan for it
    Assess(AssessArgs),
    /// Score every row of a CSV export
    Batch(BatchArgs),
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
        Command::Score {
            command: ScoreCommand::Assess(args),
        } => run_assess(args),
        Command::Score {
            command: ScoreCommand::Batch(args),
        } => run_batch(args),
        Command::Demo => run_demo(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["credit-score-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn assess_requires_every_indicator() {
        let result =
            Cli::try_parse_from(["credit-score-api", "score", "assess", "--total-debt", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn loan_flags_must_come_together() {
        let result = Cli::try_parse_from([
            "credit-score-api",
            "score",
            "assess",
            "--company-age-years",
            "3.5",
            "--personal-credit-score",
            "750",
            "--total-debt",
            "100000",
            "--annual-revenue",
            "500000",
            "--average-daily-balance",
            "15000",
            "--average-monthly-revenue",
            "41667",
            "--cash-stress-days",
            "2",
            "--largest-client-revenue",
            "80000",
            "--period-total-revenue",
            "300000",
            "--external-bureau-score",
            "800",
            "--term-months",
            "12",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn batch_takes_an_input_path() {
        let cli = Cli::try_parse_from(["credit-score-api", "score", "batch", "--input", "a.csv"])
            .expect("parses");
        assert!(matches!(
            cli.command,
            Some(Command::Score {
                command: ScoreCommand::Batch(_)
            })
        ));
    }
}
