use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "account_automation_lambda";
const LAMBDA_BINARIES: [&str; 3] = [
    "limit_increase_lambda",
    "az_alignment_lambda",
    "enable_support_lambda",
];

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the account automation workspace",
    long_about = "A unified CLI for CI checks and Lambda packaging in the\n\
                  account automation workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build and package the Lambda handlers as `bootstrap` zip artifacts
    LambdaPackage {
        /// Compilation target triple for Lambda binaries
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for binaries
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory that receives one zip per handler
        #[arg(long, default_value = "dist", env = "LAMBDA_DIST_DIR")]
        dist_dir: String,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Lint,
    /// Workspace tests
    Test,
    /// Run lint + test
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

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

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn package_lambdas(target: &str, profile: BuildProfile, dist_dir: &Path) {
    preflight_lambda_target(target);

    step("Build account automation handlers");

    let mut cargo_args = vec!["build", "-p", LAMBDA_PACKAGE, "--target", target];
    for binary in LAMBDA_BINARIES {
        cargo_args.push("--bin");
        cargo_args.push(binary);
    }
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    run_cargo(&cargo_args);

    let target_dir = Path::new("target").join(target).join(profile.dir_name());
    let missing = missing_handler_binaries(&target_dir, target);
    if !missing.is_empty() {
        panic!(
            "lambda-package built {LAMBDA_PACKAGE} but these handler binaries are missing under '{}': {}",
            target_dir.display(),
            missing.join(", ")
        );
    }

    step("Zip handlers as bootstrap artifacts");
    fs::create_dir_all(dist_dir).expect("failed to create lambda dist directory");

    for binary in LAMBDA_BINARIES {
        let zip_path = dist_dir.join(format!("{binary}.zip"));
        write_bootstrap_zip(&target_dir.join(handler_file_name(binary, target)), &zip_path);
        eprintln!("- {binary} -> {}", zip_path.display());
    }
}

/// Fails fast when the handler target triple is not installed, before any build work.
fn preflight_lambda_target(target: &str) {
    let output = match Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    {
        Ok(output) => output,
        Err(error) => {
            eprintln!("warning: rustup unavailable ({error}); building account automation handlers for {target} without a target check");
            return;
        }
    };

    if !output.status.success() {
        panic!(
            "lambda-package could not list installed targets for the account automation handlers: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    if let Some(hint) = missing_target_hint(&String::from_utf8_lossy(&output.stdout), target) {
        panic!("{hint}");
    }
}

fn missing_target_hint(installed: &str, target: &str) -> Option<String> {
    if installed.lines().any(|line| line.trim() == target) {
        return None;
    }
    Some(format!(
        "lambda-package needs the `{target}` target to build {}; run `rustup target add {target}` first",
        LAMBDA_BINARIES.join(", ")
    ))
}

fn handler_file_name(binary: &str, target: &str) -> String {
    if target.contains("windows") {
        format!("{binary}.exe")
    } else {
        binary.to_string()
    }
}

fn missing_handler_binaries(target_dir: &Path, target: &str) -> Vec<&'static str> {
    LAMBDA_BINARIES
        .into_iter()
        .filter(|binary| !target_dir.join(handler_file_name(binary, target)).is_file())
        .collect()
}

/// Writes the handler binary as the executable `bootstrap` entry read by the
/// `provided.al2023` runtime.
fn write_bootstrap_zip(binary_path: &Path, zip_path: &Path) {
    let binary = fs::read(binary_path).expect("failed to read handler binary");
    let file = fs::File::create(zip_path).expect("failed to create handler zip");
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .expect("failed to add bootstrap entry");
    zip.write_all(&binary)
        .expect("failed to write bootstrap entry");
    zip.finish().expect("failed to finish handler zip");
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
    step("Test account_automation_core");
    run_cargo(&["test", "-p", "account_automation_core"]);

    step("Test account_automation_lambda");
    run_cargo(&["test", "-p", LAMBDA_PACKAGE]);

    step("Test xtask");
    run_cargo(&["test", "-p", "xtask"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
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
        Commands::LambdaPackage {
            target,
            profile,
            dist_dir,
        } => {
            package_lambdas(&target, profile, Path::new(&dist_dir));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installed_target_needs_no_hint() {
        let installed = "aarch64-unknown-linux-gnu\nx86_64-unknown-linux-gnu\n";
        assert_eq!(missing_target_hint(installed, "x86_64-unknown-linux-gnu"), None);
    }

    #[test]
    fn missing_target_hint_names_handlers_and_fix() {
        let hint = missing_target_hint("x86_64-unknown-linux-gnu\n", "aarch64-unknown-linux-gnu")
            .expect("target is missing");
        assert!(hint.contains("rustup target add aarch64-unknown-linux-gnu"));
        for binary in LAMBDA_BINARIES {
            assert!(hint.contains(binary));
        }
    }

    #[test]
    fn handler_file_name_adds_exe_only_on_windows() {
        assert_eq!(
            handler_file_name("limit_increase_lambda", "x86_64-pc-windows-msvc"),
            "limit_increase_lambda.exe"
        );
        assert_eq!(
            handler_file_name("limit_increase_lambda", "aarch64-unknown-linux-gnu"),
            "limit_increase_lambda"
        );
    }

    #[test]
    fn empty_target_dir_reports_every_handler_missing() {
        let dir = std::env::temp_dir().join(format!("xtask-missing-{}", std::process::id()));
        assert_eq!(
            missing_handler_binaries(&dir, "x86_64-unknown-linux-gnu"),
            LAMBDA_BINARIES.to_vec()
        );
    }
}
