use std::process::{exit, Command, ExitStatus};

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the gradpict workspace",
    long_about = "A unified CLI for provisioning the gradpict AWS resources\n\
                  and running CI checks in the workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the S3 bucket, DynamoDB table and SNS topic
    Provision(ProvisionArgs),
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

/// Overrides forwarded to the `provision` binary as environment variables.
#[derive(Args)]
struct ProvisionArgs {
    /// Bucket to create
    #[arg(long, env = "AWS_STORAGE_BUCKET_NAME")]
    bucket: String,
    /// Region for the bucket
    #[arg(long, env = "AWS_S3_REGION_NAME")]
    region: Option<String>,
    /// Table to create
    #[arg(long, env = "DYNAMODB_TABLE_NAME")]
    table: Option<String>,
    /// Build profile used for the binary
    #[arg(value_enum, long, default_value_t = BuildProfile::Debug)]
    profile: BuildProfile,
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Lint,
    /// Workspace tests
    Test,
    /// Lint and test
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str], envs: &[(&str, &str)]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .envs(envs.iter().copied())
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    run_cargo_with_env(args, &[]);
}

fn run_cargo_with_env(args: &[&str], envs: &[(&str, &str)]) {
    let status = cargo(args, envs);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn provision(args: &ProvisionArgs) {
    step("Provision AWS resources");

    let mut cargo_args = vec!["run", "-p", "gradpict_aws", "--bin", "provision"];
    if let Some(flag) = args.profile.as_cargo_flag() {
        cargo_args.push(flag);
    }

    let mut envs = vec![("AWS_STORAGE_BUCKET_NAME", args.bucket.as_str())];
    if let Some(region) = &args.region {
        envs.push(("AWS_S3_REGION_NAME", region.as_str()));
    }
    if let Some(table) = &args.table {
        envs.push(("DYNAMODB_TABLE_NAME", table.as_str()));
    }
    run_cargo_with_env(&cargo_args, &envs);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_lint() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);
}

fn ci_test() {
    step("Test gradpict_core");
    run_cargo(&["test", "-p", "gradpict_core"]);

    step("Test gradpict_aws");
    run_cargo(&["test", "-p", "gradpict_aws"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Provision(args) => provision(&args),
        Commands::Ci { job } => {
            match job {
                CiJob::Lint => ci_lint(),
                CiJob::Test => ci_test(),
                CiJob::Check => {
                    ci_lint();
                    ci_test();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
