use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;
mod planfile;

#[derive(Parser)]
#[command(name = "macroplan-cli", version, about = "Macroplan CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Day plan inspection and redistribution
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Replay a scripted day and print redistribution snapshots
    Simulate {
        /// Scenario JSON file
        file: PathBuf,
    },
    /// Run the nudge coordinator against a plan file, printing nudges
    Watch {
        /// Plan JSON file
        file: PathBuf,
        /// Stop after this many seconds (runs until interrupted otherwise)
        #[arg(long)]
        for_secs: Option<u64>,
        /// Auto-dismiss a visible nudge after this many seconds
        #[arg(long, default_value_t = 10)]
        dismiss_after: u64,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Simulate { file } => commands::simulate::run(&file),
        Commands::Watch {
            file,
            for_secs,
            dismiss_after,
        } => commands::watch::run(&file, for_secs, dismiss_after),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "macroplan-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
