//! CLI wrapper for the mpl-idl-gen library

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use mpl_idl_gen::{
    GenerationConfig, GenerationSettings, Invoker, ShankGenerator, paths, settings,
};

#[derive(Parser, Debug)]
#[command(name = "idl-gen")]
#[command(about = "Generate the mpl-project-name IDL with shank")]
struct Args {
    /// Repository root, or any directory inside it; relative paths in the
    /// settings resolve against the enclosing workspace root
    #[arg(long, env = "MPL_IDL_REPO_ROOT")]
    repo_root: Option<PathBuf>,
    /// Settings file (defaults to <repo-root>/configs/shank.toml if present)
    #[arg(short, long, env = "MPL_IDL_CONFIG")]
    config: Option<PathBuf>,
    /// Override the program ID written into the IDL
    #[arg(short, long)]
    program_id: Option<String>,
    /// Override the IDL base file name
    #[arg(long)]
    idl_name: Option<String>,
    /// Keep a previously generated IDL in place until shank overwrites it
    #[arg(long)]
    keep_existing_idl: bool,
    /// Use the installed shank binary as is, without a version check
    #[arg(long)]
    skip_install: bool,
    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let repo_root = resolve_repo_root(args.repo_root.as_deref())?;
    debug!("Repository root: {}", repo_root.display());

    let config = build_config(&args, &repo_root)?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let generator = ShankGenerator::new().skip_install(args.skip_install);
    Invoker::new(config, generator).run()?;
    Ok(())
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Widen `--repo-root` to its enclosing workspace, or keep it (made absolute)
/// when no workspace encloses it.
fn resolve_repo_root(repo_root: Option<&Path>) -> Result<PathBuf> {
    let Some(path) = repo_root else {
        return Ok(paths::default_repo_root());
    };
    let path = paths::absolute(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    Ok(paths::find_workspace_root(&path).unwrap_or(path))
}

fn build_config(args: &Args, repo_root: &Path) -> Result<GenerationConfig> {
    let mut settings = match &args.config {
        Some(path) => GenerationSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => GenerationSettings::load_or_default(&repo_root.join(settings::DEFAULT_SETTINGS_PATH))
            .context("Failed to load default settings")?,
    };

    if let Some(program_id) = &args.program_id {
        settings.program_id.clone_from(program_id);
    }
    if let Some(idl_name) = &args.idl_name {
        settings.idl_name.clone_from(idl_name);
    }
    if args.keep_existing_idl {
        settings.remove_existing_idl = false;
    }

    Ok(GenerationConfig::from_settings(repo_root, settings))
}
