use std::path::Path;

use resdir_resources::{
    Charset, DiscoveryChain, FileSystemSource, IndexDiscovery, MANIFEST_FILENAME, ResourceRoots,
    Resources, WalkDiscovery,
};
use serde::Deserialize;

use crate::error::CliError;

/// Top-level configuration loaded from `resdir.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub project: ProjectInfo,
    #[serde(default, rename = "root")]
    pub roots: Vec<RootConfig>,
}

/// General project information.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: "Untitled".into(),
        }
    }
}

/// A single resource root definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RootConfig {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub default: bool,
    /// Index file name relative to the root.
    #[serde(default = "default_index")]
    pub index: String,
    /// Discovery steps in order: `"walk"` and/or `"index"`.
    #[serde(default = "default_discovery")]
    pub discovery: Vec<String>,
    /// Charset used by `cat` when none is given on the command line.
    pub charset: Option<String>,
}

fn default_index() -> String {
    MANIFEST_FILENAME.into()
}

fn default_discovery() -> Vec<String> {
    vec!["walk".into(), "index".into()]
}

impl RootConfig {
    /// Root config for `path` with default settings.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            default: false,
            index: default_index(),
            discovery: default_discovery(),
            charset: None,
        }
    }

    /// Build the discovery chain from the configured step names.
    ///
    /// Unknown names are skipped with a warning.
    pub fn discovery_chain(&self) -> DiscoveryChain {
        let mut chain = DiscoveryChain::new();
        for step in &self.discovery {
            match step.as_str() {
                "walk" => chain.push(WalkDiscovery),
                "index" => chain.push(IndexDiscovery::new(self.index.clone())),
                other => log::warn!(
                    "Unknown discovery step \"{}\" for root \"{}\"",
                    other,
                    self.name
                ),
            }
        }
        chain
    }

    /// The configured charset, falling back to UTF-8.
    pub fn charset(&self) -> Charset {
        match self.charset.as_deref().map(str::parse::<Charset>) {
            Some(Ok(charset)) => charset,
            Some(Err(e)) => {
                log::warn!("{e} for root \"{}\"; using UTF-8", self.name);
                Charset::Utf8
            }
            None => Charset::Utf8,
        }
    }
}

impl ProjectConfig {
    /// The config for the root named `name`, or the default root when `None`.
    pub fn root_config(&self, name: Option<&str>) -> Option<&RootConfig> {
        match name {
            Some(name) => self.roots.iter().find(|r| r.name == name),
            None => self.roots.iter().find(|r| r.default),
        }
    }
}

/// Load a project config from a TOML file.
pub fn load_project(path: &Path) -> Result<ProjectConfig, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_owned(),
        source,
    })?;
    parse_project(&content).map_err(|source| CliError::ConfigParse {
        path: path.to_owned(),
        source,
    })
}

fn parse_project(content: &str) -> Result<ProjectConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Build the resource roots from a project config.
///
/// Sets the default root if one is marked with `default = true`.
pub fn build_roots(config: &ProjectConfig) -> ResourceRoots {
    let mut roots = ResourceRoots::new();

    for root in &config.roots {
        log::info!("Resource root: \"{}\" -> {:?}", root.name, root.path);
        let source = FileSystemSource::new(&root.path);
        roots.mount(
            &root.name,
            Resources::with_discovery(source, root.discovery_chain()),
        );
    }

    if let Some(default_root) = config.roots.iter().find(|r| r.default) {
        roots.set_default(&default_root.name);
    }

    roots
}

/// Load project config, falling back to a default if the file doesn't exist.
///
/// A config file that exists but cannot be read or parsed is an error.
pub fn load_or_default(path: &Path) -> Result<(ProjectConfig, ResourceRoots), CliError> {
    let config = match load_project(path) {
        Ok(config) => {
            log::info!(
                "Loaded project: {} ({} roots)",
                config.project.name,
                config.roots.len()
            );
            config
        }
        Err(CliError::ConfigRead { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            log::warn!("No project file at {}, using defaults", path.display());
            default_config()
        }
        Err(e) => return Err(e),
    };

    let roots = build_roots(&config);
    Ok((config, roots))
}

fn default_config() -> ProjectConfig {
    let mut root = RootConfig::new("resources", "./resources");
    root.default = true;
    ProjectConfig {
        project: ProjectInfo::default(),
        roots: vec![root],
    }
}
