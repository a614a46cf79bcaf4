use anyhow::Result;
use bit_merge::areas::workspace::Workspace;
use bit_merge::commands::merge_file::MergeFileOptions;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BIT_MERGE_LOG";

#[derive(Parser)]
#[command(
    name = "bit-merge",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Line diffs and three-way file merges",
    long_about = "The diff and merge engine of bit, exposed as standalone commands. \
    It computes minimal line diffs with Myers' algorithm \
    and merges files three ways, leaving conflict markers where both sides changed.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = ColorChoice::Auto,
        help = "When to colour the output"
    )]
    color: ColorChoice,
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Log more (-v for debug, -vv for trace)"
    )]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "diff",
        about = "Show the line differences between two files",
        long_about = "This command prints a unified diff of two files, \
        with three lines of context around each change. Identical files print nothing."
    )]
    Diff {
        #[arg(index = 1, help = "The original file")]
        old: PathBuf,
        #[arg(index = 2, help = "The modified file")]
        new: PathBuf,
    },
    #[command(
        name = "merge-file",
        about = "Run a three-way merge on a file",
        long_about = "This command incorporates the changes that lead from <base> to <other> into <current>. \
        Lines changed on both sides are wrapped in conflict markers. \
        The exit status is 0 for a clean merge and 1 when conflicts remain."
    )]
    MergeFile {
        #[arg(short = 'p', long, help = "Write the result to stdout instead of <current>")]
        stdout: bool,
        #[arg(
            short = 'L',
            value_name = "LABEL",
            action = ArgAction::Append,
            help = "Label for current, base and other, in that order"
        )]
        labels: Vec<String>,
        #[arg(index = 1, help = "The file to merge into")]
        current: PathBuf,
        #[arg(index = 2, help = "The common ancestor of both files")]
        base: PathBuf,
        #[arg(index = 3, help = "The file whose changes are merged in")]
        other: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_color(choice: ColorChoice) {
    let enabled = match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    };
    colored::control::set_override(enabled);
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    init_color(cli.color);

    let pwd = std::env::current_dir()?;
    let workspace = Workspace::new(pwd, Box::new(std::io::stdout()));

    match &cli.command {
        Commands::Diff { old, new } => {
            workspace.diff(old, new)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::MergeFile {
            stdout,
            labels,
            current,
            base,
            other,
        } => {
            let options = MergeFileOptions {
                stdout: *stdout,
                labels: labels.clone(),
            };
            let conflicts = workspace.merge_file(current, base, other, &options)?;

            workspace.writer().flush()?;
            if conflicts > 0 {
                Ok(ExitCode::from(1))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
