//! Subcommand implementations.
//!
//! Each command writes its report to the given writer so it can be tested
//! without capturing stdout.

use std::io::Write;
use std::path::Path;

use resdir_resources::{
    Charset, FileSystemSource, MANIFEST_FILENAME, Manifest, ResourceDirectory, ResourceEntry,
    ResourceError, ResourceSource, Resources, path,
};

use crate::error::CliError;

/// Walk `dir` and write its serialized manifest, or with `check` compare it
/// against the index already on disk.
pub fn index(
    dir: &Path,
    output: Option<&Path>,
    check: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let output = output.map_or_else(|| dir.join(MANIFEST_FILENAME), Path::to_path_buf);
    // The index never lists itself, wherever it is written.
    let own_entry = output
        .strip_prefix(dir)
        .ok()
        .and_then(path::from_relative_path);

    let paths = FileSystemSource::new(dir).discover()?;
    let manifest = Manifest::from_paths(
        paths
            .into_iter()
            .filter(|p| own_entry.as_deref() != Some(p.as_str())),
    );
    let json = manifest.to_json();

    if check {
        let current = match std::fs::read_to_string(&output) {
            Ok(current) => current,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CliError::StaleIndex(output));
            }
            Err(source) => {
                return Err(CliError::ReadIndex {
                    path: output,
                    source,
                });
            }
        };
        if Manifest::parse(&current).all_files() != manifest.all_files() {
            return Err(CliError::StaleIndex(output));
        }
        writeln!(out, "{} is up to date ({} files)", output.display(), manifest.len())?;
        return Ok(());
    }

    std::fs::write(&output, json).map_err(|source| CliError::WriteIndex {
        path: output.clone(),
        source,
    })?;
    log::info!("Indexed {} files under {}", manifest.len(), dir.display());
    writeln!(out, "wrote {} files to {}", manifest.len(), output.display())?;
    Ok(())
}

/// List the immediate children of `path`, directories suffixed with `/`.
pub fn ls(resources: &Resources, path: &str, out: &mut impl Write) -> Result<(), CliError> {
    match lookup(resources, path)? {
        ResourceEntry::File(file) => writeln!(out, "{}", file.name())?,
        ResourceEntry::Directory(dir) => {
            for entry in dir.list() {
                write_name(&entry, out)?;
            }
        }
    }
    Ok(())
}

/// Print the subtree under `path`, two spaces of indent per level.
pub fn tree(resources: &Resources, path: &str, out: &mut impl Write) -> Result<(), CliError> {
    let dir = lookup(resources, path)?
        .into_directory()
        .ok_or_else(|| CliError::NotADirectory(path.to_owned()))?;

    if dir.is_root() {
        writeln!(out, ".")?;
    } else {
        writeln!(out, "{}/", dir.path())?;
    }
    write_tree(&dir, 1, out)
}

fn write_tree(
    dir: &ResourceDirectory<'_>,
    depth: usize,
    out: &mut impl Write,
) -> Result<(), CliError> {
    for entry in dir.list() {
        write!(out, "{:indent$}", "", indent = depth * 2)?;
        write_name(&entry, out)?;
        if let ResourceEntry::Directory(child) = entry {
            write_tree(&child, depth + 1, out)?;
        }
    }
    Ok(())
}

/// Read `path` and write it decoded with `charset`.
pub fn cat(
    resources: &Resources,
    path: &str,
    charset: Charset,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let text = resources.read_text_with(path, charset)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

/// Print every file whose extension is `ext`, in discovery order.
pub fn find(resources: &Resources, ext: &str, out: &mut impl Write) -> Result<(), CliError> {
    let ext = ext.trim_start_matches('.');
    for file in resources.find_by_extension(ext) {
        writeln!(out, "{}", file.path())?;
    }
    Ok(())
}

fn lookup<'r>(resources: &'r Resources, path: &str) -> Result<ResourceEntry<'r>, CliError> {
    resources
        .get(path)
        .ok_or_else(|| ResourceError::NotFound(path.to_owned()).into())
}

fn write_name(entry: &ResourceEntry<'_>, out: &mut impl Write) -> std::io::Result<()> {
    match entry {
        ResourceEntry::File(file) => writeln!(out, "{}", file.name()),
        ResourceEntry::Directory(dir) => writeln!(out, "{}/", dir.name()),
    }
}
