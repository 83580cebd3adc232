use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use rcslog::LogFormat;
use rcslog::areas::console::Console;
use rcslog::areas::repository::RcsRepository;
use rcslog::artifacts::core::PagerWriter;
use rcslog::commands::porcelain::changes::ChangesOptions;
use rcslog::commands::porcelain::log::LogOptions;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rcslog",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Read CVS/RCS history reports",
    long_about = "Parses the output of rlog / cvs log and co -p and rebuilds the revision \
    history of each file: branches, tags, chronological links and dead revisions. \
    Reports are read from a file or from standard input.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(long, global = true, help = "Never page output, even on a terminal")]
    no_pager: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "log",
        about = "Show the revision history of every file of an rlog report",
        long_about = "This command prints the history of each file in an rlog report. \
        With a filter, only the tagged revision or branch and its ancestors are shown."
    )]
    Log {
        #[arg(index = 1, help = "The rlog output to read (default: standard input)")]
        input: Option<PathBuf>,
        #[arg(
            short = 'r',
            long,
            help = "Tag name, branch number or revision number to show"
        )]
        filter: Option<String>,
        #[arg(long, value_enum, default_value_t = LogFormat::Medium, help = "Output layout")]
        format: LogFormat,
    },
    #[command(
        name = "changes",
        about = "List every commit of an rlog report in commit order",
        long_about = "This command lists one line per committed revision: date, file, \
        previous revision, new revision, author, line counts and summary."
    )]
    Changes {
        #[arg(index = 1, help = "The rlog output to read (default: standard input)")]
        input: Option<PathBuf>,
        #[arg(long, help = "Only list commits made after this revision")]
        since: Option<String>,
    },
    #[command(
        name = "ls",
        about = "List a directory of a CVS repository",
        long_about = "This command lists the RCS files and subdirectories of a repository \
        directory. Removed files kept in the Attic are flagged."
    )]
    Ls {
        #[arg(index = 1, help = "The repository root")]
        root: PathBuf,
        #[arg(index = 2, help = "Directory inside the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "files",
        about = "List every file of a CVS repository",
        long_about = "This command recursively lists all files of a repository, \
        including removed ones and excluding CVSROOT."
    )]
    Files {
        #[arg(index = 1, help = "The repository root")]
        root: PathBuf,
        #[arg(short, long, help = "Show the modification time of each RCS file")]
        long: bool,
    },
    #[command(
        name = "co-header",
        about = "Parse the banner of a checkout to standard output",
        long_about = "This command reads the stderr output of co -p and prints the RCS file \
        and the revision that was checked out."
    )]
    CoHeader {
        #[arg(index = 1, help = "The co output to read (default: standard input)")]
        input: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn open_input(input: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let stdout_is_terminal = io::stdout().is_terminal();
    if !stdout_is_terminal {
        colored::control::set_override(false);
    }

    let pager = (stdout_is_terminal && !cli.no_pager).then(Pager::new);
    let console = match &pager {
        Some(pager) => Console::new(Box::new(PagerWriter::new(pager.clone()))),
        None => Console::new(Box::new(io::stdout())),
    };

    let outcome = match &cli.command {
        Commands::Log {
            input,
            filter,
            format,
        } => {
            let opts = LogOptions {
                filter: filter.clone(),
                format: *format,
            };
            console.log(open_input(input.as_deref())?, &opts)
        }
        Commands::Changes { input, since } => {
            let opts = ChangesOptions {
                since: since.clone(),
            };
            console.changes(open_input(input.as_deref())?, &opts)
        }
        Commands::Ls { root, path } => {
            let repository = RcsRepository::open(root)
                .with_context(|| format!("failed to open repository {}", root.display()))?;
            console.ls(&repository, path.as_deref().unwrap_or(Path::new("")))
        }
        Commands::Files { root, long } => {
            let repository = RcsRepository::open(root)
                .with_context(|| format!("failed to open repository {}", root.display()))?;
            console.files(&repository, *long)
        }
        Commands::CoHeader { input } => console.co_header(open_input(input.as_deref())?),
    };

    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    outcome
}
