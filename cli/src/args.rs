//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect resource directories and their manifests.
#[derive(Parser, Debug)]
#[command(
    name = "resdir",
    about = "Resource manifest and virtual directory tool",
    long_about = "Inspect resource roots through their manifests.\n\n\
        Roots are configured in resdir.toml; without one, ./resources is used.\n\
        \n\
        EXAMPLES:\n\
          # Write __resources__.json for a directory\n\
          resdir index ./assets\n\
        \n\
          # Fail in CI when the index is stale\n\
          resdir index ./assets --check\n\
        \n\
          # Print a Latin-1 file from the \"assets\" root\n\
          resdir cat assets/legacy.txt --charset ISO-8859-1",
    version
)]
pub struct Cli {
    /// Project configuration file.
    #[arg(long, default_value = "resdir.toml", global = true)]
    pub config: PathBuf,

    /// Resource root to use instead of routing by the first path segment.
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk a directory and write its serialized manifest.
    Index {
        dir: PathBuf,
        /// Where to write the index (default: DIR/__resources__.json).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Compare with the existing index instead of writing it.
        #[arg(long)]
        check: bool,
    },
    /// List the immediate children of a directory.
    Ls {
        path: Option<String>,
    },
    /// Print the subtree under a directory.
    Tree {
        path: Option<String>,
    },
    /// Read a file and print it decoded.
    Cat {
        path: String,
        /// Charset name, e.g. UTF-8, UTF-16LE, ISO-8859-1, US-ASCII.
        #[arg(long)]
        charset: Option<String>,
    },
    /// List files with the given extension.
    Find {
        #[arg(long)]
        ext: String,
    },
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_cat_with_global_flags() {
        let cli = Cli::parse_from([
            "resdir", "--root", "assets", "cat", "a.txt", "--charset", "latin1", "-v",
        ]);
        assert_eq!(cli.root.as_deref(), Some("assets"));
        assert_eq!(cli.default_filter(), "debug");
        assert_eq!(cli.config, PathBuf::from("resdir.toml"));
        match cli.command {
            Command::Cat { path, charset } => {
                assert_eq!(path, "a.txt");
                assert_eq!(charset.as_deref(), Some("latin1"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn ls_defaults_to_root() {
        let cli = Cli::parse_from(["resdir", "ls"]);
        assert_eq!(cli.default_filter(), "info");
        assert!(matches!(cli.command, Command::Ls { path: None }));
    }

    #[test]
    fn index_flags() {
        let cli = Cli::parse_from(["resdir", "index", "./assets", "--check"]);
        match cli.command {
            Command::Index { dir, output, check } => {
                assert_eq!(dir, PathBuf::from("./assets"));
                assert!(output.is_none());
                assert!(check);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
