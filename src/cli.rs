//! CLI argument parsing for the tms-worker binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tms-worker", about = "TMS transport reorder worker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the worker server (default if no subcommand given)
    Serve,
    /// Plan a reorder on a transport JSON snapshot and print the segment payload
    Plan {
        /// Transport JSON file (as returned by the transport API)
        #[arg(long)]
        input: PathBuf,
        /// Mean group index
        #[arg(long, default_value_t = 0)]
        group: usize,
        /// Current position of the activity
        #[arg(long)]
        from: usize,
        /// Target position (omit for a cancelled drag)
        #[arg(long)]
        to: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_command_defaults_to_none() {
        let cli = Cli::parse_from(["tms-worker"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_serve_command_parses() {
        let cli = Cli::parse_from(["tms-worker", "serve"]);
        assert!(matches!(cli.command, Some(Command::Serve)));
    }

    #[test]
    fn test_cli_plan_command_parses() {
        let cli = Cli::parse_from([
            "tms-worker", "plan", "--input", "transport.json", "--group", "1", "--from", "2", "--to", "0",
        ]);
        match cli.command {
            Some(Command::Plan { input, group, from, to }) => {
                assert_eq!(input, PathBuf::from("transport.json"));
                assert_eq!(group, 1);
                assert_eq!(from, 2);
                assert_eq!(to, Some(0));
            }
            _ => panic!("expected plan command"),
        }
    }

    #[test]
    fn test_cli_plan_without_target_is_cancelled() {
        let cli = Cli::parse_from(["tms-worker", "plan", "--input", "t.json", "--from", "1"]);
        assert!(matches!(cli.command, Some(Command::Plan { group: 0, to: None, .. })));
    }
}
