//! Development automation tasks for the Bookings workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! This is a CLI tool for developers, so `println!` and `eprintln!` are
//! used for user-facing output rather than structured logging.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};
use std::{env, fs};

use anyhow::{anyhow, Context};

/// Where ts-rs writes the domain bindings.
const BINDINGS_DIR: &str = "crates/domain/bindings";

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        Some("ci") => run_ci(),
        Some("fmt") => run_fmt(),
        Some("clippy") => run_clippy(),
        Some("test") => run_test(),
        Some("deny") => run_deny(),
        Some("audit") => run_audit(),
        Some("codegen") => run_codegen(env::args().nth(2).map(PathBuf::from)),
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown task: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow!("Unknown task"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Bookings Development Tasks");
    println!();
    println!("USAGE:");
    println!("    cargo xtask <TASK>");
    println!();
    println!("TASKS:");
    println!("    ci              Run all CI checks (fmt, clippy, test, deny, audit)");
    println!("    fmt             Check Rust code formatting");
    println!("    clippy          Run Clippy lints");
    println!("    test            Run all tests");
    println!("    codegen [DIR]   Generate TypeScript types for the API contracts");
    println!("                    and optionally copy them into DIR");
    println!("    deny            Check dependencies with cargo-deny");
    println!("    audit           Audit dependencies for security vulnerabilities");
    println!("    help            Show this help message");
}

/// Run all CI checks in sequence
fn run_ci() -> anyhow::Result<()> {
    println!("==> Running CI checks...\n");

    println!("==> Step 1/5: Checking Rust format...");
    run_fmt()?;

    println!("\n==> Step 2/5: Running Clippy...");
    run_clippy()?;

    println!("\n==> Step 3/5: Running tests...");
    run_test()?;

    println!("\n==> Step 4/5: Checking dependencies...");
    run_deny()?;

    println!("\n==> Step 5/5: Auditing dependencies...");
    run_audit()?;

    println!("\n✓ All CI checks passed!");
    Ok(())
}

fn run_fmt() -> anyhow::Result<()> {
    let status = Command::new("cargo").args(["fmt", "--all", "--", "--check"]).status()?;

    if !status.success() {
        anyhow::bail!("Format check failed. Run 'cargo fmt --all' to fix.");
    }

    Ok(())
}

fn run_clippy() -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(["clippy", "--workspace", "--all-targets", "--all-features", "--", "-D", "warnings"])
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("Clippy run failed. See output above."))
    }
}

fn run_test() -> anyhow::Result<()> {
    let status = Command::new("cargo").args(["test", "--workspace", "--all-features"]).status()?;

    if !status.success() {
        anyhow::bail!("Tests failed");
    }

    Ok(())
}

/// Fails with install instructions when a cargo subcommand is missing.
fn require_cargo_tool(tool: &str) -> anyhow::Result<()> {
    let check_installed = Command::new("cargo").args([tool, "--version"]).output();

    if !check_installed.as_ref().is_ok_and(|o| o.status.success()) {
        eprintln!("cargo-{tool} is not installed.");
        eprintln!("Install it with: cargo install cargo-{tool}");
        anyhow::bail!("cargo-{tool} not found");
    }

    Ok(())
}

fn run_deny() -> anyhow::Result<()> {
    require_cargo_tool("deny")?;

    let status = Command::new("cargo").args(["deny", "check"]).status()?;

    if !status.success() {
        anyhow::bail!("cargo-deny found issues");
    }

    Ok(())
}

fn run_audit() -> anyhow::Result<()> {
    require_cargo_tool("audit")?;

    let status = Command::new("cargo").args(["audit"]).status()?;

    if !status.success() {
        anyhow::bail!("cargo-audit found vulnerabilities");
    }

    Ok(())
}

/// Generate TypeScript bindings for the domain contracts.
fn run_codegen(target: Option<PathBuf>) -> anyhow::Result<()> {
    println!("==> Generating TypeScript types from Rust...\n");

    println!("Step 1/2: Running ts-gen tests to export bindings...");
    let status = Command::new("cargo")
        .args(["test", "-p", "bookings-domain", "--features", "ts-gen", "--lib"])
        .status()
        .context("Failed to run cargo test")?;

    if !status.success() {
        anyhow::bail!("TypeScript generation tests failed");
    }

    let bindings_dir = PathBuf::from(BINDINGS_DIR);
    if !bindings_dir.exists() {
        anyhow::bail!(
            "Bindings directory not found at {}. TypeScript generation may have failed.",
            bindings_dir.display()
        );
    }

    let output_dir = match target {
        Some(dest) => {
            println!("\nStep 2/2: Copying bindings to {}...", dest.display());
            sync_bindings(&bindings_dir, &dest)?;
            dest
        }
        None => {
            println!("\nStep 2/2: Indexing bindings in place...");
            bindings_dir
        }
    };

    generate_index_ts(&output_dir)?;

    println!("\n✓ TypeScript type generation complete!");
    println!("  Generated files: {}", output_dir.display());

    Ok(())
}

fn is_ts_file(path: &Path) -> bool {
    path.extension().and_then(std::ffi::OsStr::to_str) == Some("ts")
}

fn sync_bindings(src: &Path, dest: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    let entries = fs::read_dir(src).context("Failed to read bindings directory")?;

    let mut synced = 0;
    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if !is_ts_file(&path) {
            continue;
        }

        let file_name = path.file_name().ok_or_else(|| anyhow!("Invalid file name"))?;
        let dest_path = dest.join(file_name);

        fs::copy(&path, &dest_path).with_context(|| {
            format!("Failed to copy {} to {}", path.display(), dest_path.display())
        })?;

        synced += 1;
    }

    println!("  Synced {synced} files");
    Ok(())
}

/// Write an index.ts re-exporting every generated type.
fn generate_index_ts(types_dir: &Path) -> anyhow::Result<()> {
    let index_path = types_dir.join("index.ts");

    let entries = fs::read_dir(types_dir).context("Failed to read types directory")?;

    let mut type_names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|path| is_ts_file(path))
        .filter_map(|path| path.file_stem()?.to_str().map(str::to_owned))
        .filter(|stem| stem != "index")
        .collect();

    type_names.sort();

    let mut content = String::from(
        "// Auto-generated types from the Rust API contracts\n\
         // Generated by ts-rs via: cargo xtask codegen\n\
         // DO NOT EDIT MANUALLY - changes will be overwritten\n\n",
    );

    for type_name in &type_names {
        let _ = writeln!(content, "export type {{ {type_name} }} from './{type_name}';");
    }

    fs::write(&index_path, content)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    println!("  Generated index.ts with {} exports", type_names.len());

    Ok(())
}
