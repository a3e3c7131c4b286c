//! Build automation tasks for the portal
//!
//! Usage:
//!   cargo xtask build-web         # Build WASM and assemble dist/web
//!   cargo xtask package-native    # Release binary plus sample config in dist/native/<platform>

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const CRATE_NAME: &str = "poly-portal";
const MQ_JS_BUNDLE: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for poly-portal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build WASM for web deployment
    BuildWeb {
        /// Mark as dev build (prefixes the page title)
        #[arg(long)]
        dev: bool,
    },
    /// Build a native release for one platform
    PackageNative {
        /// Target platform: windows, macos, linux (default: host)
        #[arg(long)]
        platform: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb { dev } => build_web(dev),
        Commands::PackageNative { platform } => package_native(platform),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live one level below the project root")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Download a file from URL to destination
fn download_file(url: &str, dest: &Path) -> Result<()> {
    println!("Downloading {}...", url);
    run_cmd(Command::new("curl").args(["-L", "-o"]).arg(dest).arg(url))
}

/// Remove `dir` if present and recreate it empty
fn fresh_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir).with_context(|| format!("Failed to clean {}", dir.display()))?;
    }
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(())
}

/// Build WASM and assemble dist/web
fn build_web(dev: bool) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/web");

    println!("Building WASM...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--target", "wasm32-unknown-unknown", "-p", CRATE_NAME]),
    )?;

    fresh_dir(&dist)?;

    println!("Copying files to dist/web...");
    let wasm = format!("{}.wasm", CRATE_NAME);
    std::fs::copy(root.join("target/wasm32-unknown-unknown/release").join(&wasm), dist.join(&wasm))
        .context("WASM binary missing after build")?;

    // Page and the storage plugin; the plugin must load after the bundle
    let web = root.join("web");
    for file in ["index.html", "portal_storage.js"] {
        std::fs::copy(web.join(file), dist.join(file)).with_context(|| format!("Failed to copy web/{}", file))?;
    }

    download_file(MQ_JS_BUNDLE, &dist.join("mq_js_bundle.js"))?;

    if dev {
        println!("Applying DEV build modifications...");
        let index_path = dist.join("index.html");
        let index = std::fs::read_to_string(&index_path)?;
        let index = index.replace("<title>", "<title>[DEV] ");
        std::fs::write(&index_path, index)?;
    }

    println!("Web build complete: dist/web/");
    Ok(())
}

/// Build a native release into dist/native/<platform>
fn package_native(platform: Option<String>) -> Result<()> {
    let root = project_root()?;
    let platform = platform.unwrap_or_else(|| {
        if cfg!(target_os = "windows") {
            "windows".to_string()
        } else if cfg!(target_os = "macos") {
            "macos".to_string()
        } else {
            "linux".to_string()
        }
    });

    let dist = root.join(format!("dist/native/{}", platform));

    println!("Building native release for {}...", platform);
    fresh_dir(&dist)?;

    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "-p", CRATE_NAME]),
    )?;

    let binary_name = if platform == "windows" {
        format!("{}.exe", CRATE_NAME)
    } else {
        CRATE_NAME.to_string()
    };
    std::fs::copy(root.join("target/release").join(&binary_name), dist.join(&binary_name))
        .context("Release binary missing after build")?;

    // Optional config travels with the binary
    let config = root.join("portal.example.ron");
    if config.exists() {
        std::fs::copy(&config, dist.join("portal.example.ron"))?;
    }

    println!("Native build complete: dist/native/{}/", platform);
    Ok(())
}
