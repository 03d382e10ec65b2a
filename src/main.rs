use anyhow::Result;
use clap::{Parser, Subcommand};
use grit::areas::repository::Repository;
use grit::artifacts::core::EngineError;

#[derive(Parser)]
#[command(
    name = "grit",
    version = "0.1.0",
    about = "A single-user, local version-control engine",
    long_about = "Tracks snapshots of a flat working directory: stage files, \
    commit them, branch, and merge, all inside a .grit directory with no \
    network surface.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new engine directory")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "commit", about = "Commit the staged snapshot")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Unstage a file or mark it for removal")]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the current branch's history")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "List commit ids by exact message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes and workspace drift")]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore files",
        long_about = "Three forms: 'checkout <branch>' switches branches, \
        'checkout -- <file>' restores a file from the head commit, and \
        'checkout <commit id> -- <file>' restores it from an arbitrary commit."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name, or commit id when a file follows")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "File to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current head")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch to a commit")]
    Reset {
        #[arg(index = 1, help = "Commit id, possibly abbreviated")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current one")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => Ok(()),
        // recoverable refusals print their single line and exit cleanly
        Err(err) => match err.downcast::<EngineError>() {
            Ok(engine_error) => {
                println!("{engine_error}");
                Ok(())
            }
            Err(err) => Err(err),
        },
    }
}

fn run(cli: &Cli) -> Result<()> {
    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(file),
        Commands::Commit { message } => repository.commit(message),
        Commands::Rm { file } => repository.rm(file),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(message),
        Commands::Status => repository.status(),
        Commands::Checkout { target, file } => match (target, file) {
            (Some(commit), Some(file)) => repository.checkout_commit_file(commit, file),
            (Some(branch), None) => repository.checkout_branch(branch),
            (None, Some(file)) => repository.checkout_file(file),
            (None, None) => Err(EngineError::IncorrectOperands.into()),
        },
        Commands::Branch { name } => repository.branch(name),
        Commands::RmBranch { name } => repository.rm_branch(name),
        Commands::Reset { commit } => repository.reset(commit),
        Commands::Merge { branch } => repository.merge(branch),
    }
}
