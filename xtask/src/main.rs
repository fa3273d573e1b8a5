use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for carquest")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Run the terrain benchmark in release mode
    Bench,
    /// Scripted drive through the CLI
    Demo {
        #[arg(long, default_value = "42")]
        seed: u64,
        #[arg(long, default_value = "600")]
        ticks: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            run_fmt()?;
            run_clippy()?;
            run_tests()?;
            run_doc()?;
        }
        Commands::Fmt => run_fmt()?,
        Commands::Clippy => run_clippy()?,
        Commands::Test => run_tests()?,
        Commands::Doc => run_doc()?,
        Commands::Bench => run_bench()?,
        Commands::Demo { seed, ticks } => run_demo(seed, ticks)?,
    }

    Ok(())
}

fn cargo(label: &str, args: &[&str]) -> Result<()> {
    println!("==> Running cargo {label}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {label} failed");
    }
    Ok(())
}

fn run_fmt() -> Result<()> {
    cargo("fmt --check", &["fmt", "--all", "--", "--check"])
}

fn run_clippy() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn run_tests() -> Result<()> {
    cargo("test", &["test", "--workspace"])
}

fn run_doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}

fn run_bench() -> Result<()> {
    cargo(
        "bench",
        &["bench", "-p", "carquest-terrain", "--bench", "bench_terrain"],
    )
}

fn run_demo(seed: u64, ticks: u64) -> Result<()> {
    let seed = seed.to_string();
    let ticks = ticks.to_string();
    cargo(
        "run (demo)",
        &[
            "run",
            "-p",
            "carquest-cli",
            "--",
            "--seed",
            &seed,
            "drive",
            "--ticks",
            &ticks,
            "--throttle",
            "--steer",
            "left",
        ],
    )
}
