//! `resdir`: inspect resource roots, their manifests and decoded contents.

mod args;
mod commands;
mod config;
mod error;

use clap::Parser;
use resdir_resources::{Charset, ResourceError, ResourceRoots, Resources, path};

use args::{Cli, Command};
use config::ProjectConfig;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    let env = env_logger::Env::default().default_filter_or(cli.default_filter());
    env_logger::Builder::from_env(env).init();

    if let Err(e) = run(cli) {
        eprintln!("resdir: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    let root = cli.root.as_deref();
    let load = || config::load_or_default(&cli.config);

    match &cli.command {
        Command::Index { dir, output, check } => {
            commands::index(dir, output.as_deref(), *check, &mut out)
        }
        Command::Ls { path } => {
            let (_, roots) = load()?;
            let (resources, path) = select(&roots, root, path.as_deref().unwrap_or_default())?;
            commands::ls(resources, &path, &mut out)
        }
        Command::Tree { path } => {
            let (_, roots) = load()?;
            let (resources, path) = select(&roots, root, path.as_deref().unwrap_or_default())?;
            commands::tree(resources, &path, &mut out)
        }
        Command::Cat { path, charset } => {
            let (config, roots) = load()?;
            let charset = match charset {
                Some(name) => name.parse::<Charset>()?,
                None => default_charset(&config, &roots, root, path),
            };
            let (resources, path) = select(&roots, root, path)?;
            commands::cat(resources, &path, charset, &mut out)
        }
        Command::Find { ext } => {
            let (_, roots) = load()?;
            let (resources, _) = select(&roots, root, "")?;
            commands::find(resources, ext, &mut out)
        }
    }
}

/// Pick the resources a path refers to: the `--root` override when given,
/// otherwise routed by the path's first segment.
fn select<'r>(
    roots: &'r ResourceRoots,
    root: Option<&str>,
    raw_path: &str,
) -> Result<(&'r Resources, String), CliError> {
    let Some(name) = root else {
        return Ok(roots.resolve(raw_path)?);
    };

    let resources = roots
        .root(name)
        .ok_or_else(|| ResourceError::NoSuchRoot(name.to_owned()))?;
    Ok((resources, path::normalize_or_root(raw_path)?))
}

/// Charset configured for the root `raw_path` routes to.
fn default_charset(
    config: &ProjectConfig,
    roots: &ResourceRoots,
    root: Option<&str>,
    raw_path: &str,
) -> Charset {
    let routed = root.or_else(|| {
        let first = raw_path.trim_start_matches('/').split('/').next()?;
        roots.root(first).map(|_| first)
    });
    config
        .root_config(routed)
        .map(|root| root.charset())
        .unwrap_or_default()
}
