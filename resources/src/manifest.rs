use std::collections::{BTreeSet, HashSet};

use crate::entry::{ResourceDirectory, ResourceEntry, ResourceFile};
use crate::path;

/// Reserved name of the serialized index at the resource root.
pub const MANIFEST_FILENAME: &str = "__resources__.json";

/// Immutable index of every resource file under one root.
///
/// Only files are stored. Directories are implicit: every proper
/// `/`-prefix of a file path is a directory, and so is the root (`""`).
/// All lookups are exact string comparisons.
///
/// An entry that is also a directory of another entry (`"a"` next to
/// `"a/b.txt"`) is dropped at construction, so a path is never both a
/// file and a directory.
///
/// # Example
///
/// ```
/// use resdir_resources::Manifest;
///
/// let manifest = Manifest::from_paths(["a/b.txt", "c.txt"]);
/// let entries = manifest.list("");
/// let names: Vec<&str> = entries.iter().map(|e| e.name()).collect();
/// assert_eq!(names, ["a", "c.txt"]);
/// assert!(manifest.is_directory("a"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    files: Vec<String>,
    file_set: HashSet<String>,
    directory_set: HashSet<String>,
}

impl Manifest {
    /// Create a manifest with no files. The root is still a directory.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a manifest from file paths.
    ///
    /// Duplicates collapse onto their first occurrence, empty paths and the
    /// reserved [`MANIFEST_FILENAME`] are skipped. Never fails.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files = Vec::new();
        let mut file_set = HashSet::new();

        for path in paths {
            let path = path.into();
            if path.is_empty() || path == MANIFEST_FILENAME {
                continue;
            }
            if file_set.insert(path.clone()) {
                files.push(path);
            }
        }

        let directory_set: HashSet<String> = files
            .iter()
            .flat_map(|file| path::ancestors(file))
            .map(str::to_owned)
            .collect();

        if files.iter().any(|file| directory_set.contains(file)) {
            files.retain(|file| {
                let shadowed = directory_set.contains(file);
                if shadowed {
                    log::warn!("resource {file:?} is also a directory; dropping the file entry");
                }
                !shadowed
            });
            file_set.retain(|file| !directory_set.contains(file));
        }

        log::debug!(
            "manifest built: {} files, {} directories",
            files.len(),
            directory_set.len()
        );

        Self {
            files,
            file_set,
            directory_set,
        }
    }

    /// Parse the serialized index format (a JSON array of strings).
    ///
    /// Malformed input degrades to fewer entries, or none, rather than
    /// failing. See [`parse_index`].
    pub fn parse(json: &str) -> Self {
        Self::from_paths(parse_index(json))
    }

    /// Serialize to the index format read by [`Manifest::parse`].
    pub fn to_json(&self) -> String {
        let mut out = String::from("[");
        for (i, file) in self.files.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push('"');
            escape_into(&mut out, file);
            out.push('"');
        }
        out.push(']');
        out
    }

    /// Whether `path` is exactly one of the known files.
    pub fn is_file(&self, path: &str) -> bool {
        self.file_set.contains(path)
    }

    /// Whether `path` is the root or a prefix directory of some file.
    pub fn is_directory(&self, path: &str) -> bool {
        path.is_empty() || self.directory_set.contains(path)
    }

    /// Whether `path` is a known file or directory.
    pub fn contains(&self, path: &str) -> bool {
        self.is_directory(path) || self.is_file(path)
    }

    /// All file paths in the order they were supplied.
    pub fn all_files(&self) -> &[String] {
        &self.files
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the manifest holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The root directory.
    pub fn root(&self) -> ResourceDirectory<'_> {
        ResourceDirectory::new(String::new(), self)
    }

    /// Resolve `path` to an entry, or `None` if it is neither a file nor a
    /// directory. The empty path is the root.
    pub fn get(&self, path: &str) -> Option<ResourceEntry<'_>> {
        if self.is_directory(path) {
            Some(ResourceEntry::Directory(ResourceDirectory::new(
                path.to_owned(),
                self,
            )))
        } else if self.is_file(path) {
            Some(ResourceEntry::File(ResourceFile::new(path)))
        } else {
            None
        }
    }

    /// Immediate children of the directory at `path`, sorted by name.
    ///
    /// Children are derived from the flat file list alone: every file under
    /// `path/` contributes the first segment after the prefix. Returns an
    /// empty list for files and unknown paths.
    pub fn list(&self, path: &str) -> Vec<ResourceEntry<'_>> {
        let prefix = path::child_prefix(path);
        let mut children = BTreeSet::new();

        for file in &self.files {
            if let Some(rest) = file.strip_prefix(prefix.as_str()) {
                // Extract the immediate child name (first segment)
                let child = match rest.find('/') {
                    Some(pos) => &rest[..pos],
                    None => rest,
                };
                if !child.is_empty() {
                    children.insert(child);
                }
            }
        }

        children
            .into_iter()
            .map(|child| {
                let child_path = format!("{prefix}{child}");
                if self.is_file(&child_path) {
                    ResourceEntry::File(ResourceFile::new(child_path))
                } else {
                    ResourceEntry::Directory(ResourceDirectory::new(child_path, self))
                }
            })
            .collect()
    }

    /// Every entry below `path`, depth-first with children in name order.
    pub fn walk(&self, path: &str) -> Vec<ResourceEntry<'_>> {
        let mut entries = Vec::new();
        self.walk_into(path, &mut entries);
        entries
    }

    fn walk_into<'m>(&'m self, path: &str, entries: &mut Vec<ResourceEntry<'m>>) {
        for entry in self.list(path) {
            let subdir = entry.as_directory().map(|dir| dir.path().to_owned());
            entries.push(entry);
            if let Some(subdir) = subdir {
                self.walk_into(&subdir, entries);
            }
        }
    }

    /// Files matching `predicate`, in index order.
    pub fn find<P>(&self, mut predicate: P) -> Vec<ResourceFile>
    where
        P: FnMut(&ResourceFile) -> bool,
    {
        self.files
            .iter()
            .map(ResourceFile::new)
            .filter(|file| predicate(file))
            .collect()
    }

    /// Files whose name ends in `.extension`, in index order.
    pub fn find_by_extension(&self, extension: &str) -> Vec<ResourceFile> {
        let suffix = format!(".{extension}");
        self.find(|file| file.path().ends_with(&suffix))
    }
}

/// Parse the serialized index into its path strings.
///
/// Deliberately minimal, not general JSON:
/// - empty or whitespace-only input and `[]` mean no files;
/// - input not wrapped in `[` ... `]` is treated as empty;
/// - elements are split on commas outside string literals, and any element
///   not enclosed in double quotes is dropped;
/// - `\"`, `\\`, `\/`, `\n`, `\r`, `\t` and valid `\uXXXX` escapes are
///   decoded; other escapes are kept as written;
/// - elements that are empty after unescaping are dropped.
pub fn parse_index(json: &str) -> Vec<String> {
    let trimmed = json.trim();
    let Some(body) = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return Vec::new();
    };

    split_elements(body)
        .into_iter()
        .filter_map(|element| {
            let inner = element.trim().strip_prefix('"')?.strip_suffix('"')?;
            Some(unescape(inner))
        })
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Split an array body on commas that sit outside string literals.
fn split_elements(body: &str) -> Vec<&str> {
    let mut elements = Vec::new();
    let mut start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (pos, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            ',' if !in_string => {
                elements.push(&body[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    elements.push(&body[start..]);
    elements
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match decode_unicode_escape(&hex) {
                    Some(decoded) => {
                        out.push(decoded);
                        chars.nth(3);
                    }
                    None => out.push_str("\\u"),
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn decode_unicode_escape(hex: &str) -> Option<char> {
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if u32::from(c) < 0x20 => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn names(entries: &[ResourceEntry<'_>]) -> Vec<String> {
        entries.iter().map(|e| e.name().to_owned()).collect()
    }

    fn as_set(paths: &[String]) -> HashSet<&str> {
        paths.iter().map(String::as_str).collect()
    }

    #[test]
    fn all_files_keeps_distinct_entries_in_order() {
        let manifest = Manifest::from_paths(["c.txt", "a/b.txt", "c.txt", "", MANIFEST_FILENAME]);
        assert_eq!(manifest.all_files(), ["c.txt", "a/b.txt"]);
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn reserved_name_only_excluded_at_root() {
        let nested = format!("sub/{MANIFEST_FILENAME}");
        let manifest = Manifest::from_paths([nested.as_str(), MANIFEST_FILENAME]);
        assert_eq!(manifest.all_files(), [nested.clone()]);
    }

    #[test]
    fn files_are_not_directories() {
        let manifest = Manifest::from_paths(["a/b/c.txt", "a/d.txt", "e.txt"]);
        for file in manifest.all_files() {
            assert!(manifest.is_file(file));
            assert!(!manifest.is_directory(file));
        }
    }

    #[test]
    fn every_prefix_is_a_directory() {
        let manifest = Manifest::from_paths(["a/b/c/d.txt"]);
        assert!(manifest.is_directory(""));
        assert!(manifest.is_directory("a"));
        assert!(manifest.is_directory("a/b"));
        assert!(manifest.is_directory("a/b/c"));
        assert!(!manifest.is_directory("a/b/c/d.txt"));
        assert!(!manifest.is_directory("a/"));
        assert!(!manifest.is_directory("b"));
    }

    #[test]
    fn lookup_is_exact() {
        let manifest = Manifest::from_paths(["Docs/Readme.md"]);
        assert!(!manifest.is_file("docs/readme.md"));
        assert!(!manifest.is_file("./Docs/Readme.md"));
        assert!(!manifest.is_file("/Docs/Readme.md"));
        assert!(manifest.get("Docs/../Docs").is_none());
    }

    #[test]
    fn list_root_mixes_files_and_directories() {
        let manifest = Manifest::from_paths(["a/b.txt", "c.txt"]);
        let entries = manifest.list("");
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_directory());
        assert_eq!(entries[0].name(), "a");
        assert!(entries[1].is_file());
        assert_eq!(entries[1].name(), "c.txt");
    }

    #[test]
    fn list_subdirectory() {
        let manifest = Manifest::from_paths(["a/b.txt", "c.txt"]);
        let entries = manifest.list("a");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_file());
        assert_eq!(entries[0].path(), "a/b.txt");
        assert_eq!(entries[0].name(), "b.txt");
    }

    #[test]
    fn list_sorts_and_deduplicates() {
        let manifest = Manifest::from_paths(["z.txt", "m/2.txt", "b/x", "m/1.txt", "b/y/z"]);
        assert_eq!(names(&manifest.list("")), ["b", "m", "z.txt"]);
        assert_eq!(names(&manifest.list("b")), ["x", "y"]);
        assert!(manifest.list("b")[1].is_directory());
    }

    #[test]
    fn list_does_not_match_sibling_prefixes() {
        let manifest = Manifest::from_paths(["ab/c.txt", "a/d.txt"]);
        assert_eq!(names(&manifest.list("a")), ["d.txt"]);
    }

    #[test]
    fn list_of_file_or_unknown_is_empty() {
        let manifest = Manifest::from_paths(["a/b.txt"]);
        assert!(manifest.list("a/b.txt").is_empty());
        assert!(manifest.list("nope").is_empty());
    }

    #[test]
    fn empty_manifest_has_empty_root() {
        let manifest = Manifest::empty();
        assert!(manifest.is_empty());
        assert!(manifest.list("").is_empty());
        let root = manifest.get("").unwrap();
        assert!(root.is_directory());
        assert_eq!(root.path(), "");
        assert_eq!(root.name(), "");
    }

    #[test]
    fn get_resolves_each_kind() {
        let manifest = Manifest::from_paths(["a/b.txt", "c.txt"]);
        assert!(manifest.get("nonexistent").is_none());
        assert!(manifest.get("a").unwrap().is_directory());
        assert!(manifest.get("a/b.txt").unwrap().is_file());
        assert!(manifest.get("").unwrap().is_directory());
    }

    #[test]
    fn conflicting_file_is_dropped_in_favor_of_directory() {
        let manifest = Manifest::from_paths(["a", "a/b.txt", "c.txt"]);
        assert_eq!(manifest.all_files(), ["a/b.txt", "c.txt"]);
        assert!(!manifest.is_file("a"));
        assert!(manifest.is_directory("a"));
        assert!(manifest.get("a").unwrap().is_directory());
        assert!(manifest.list("")[0].is_directory());
    }

    #[test]
    fn walk_is_depth_first_in_name_order() {
        let manifest = Manifest::from_paths(["b.txt", "a/y.txt", "a/x/z.txt"]);
        let entries = manifest.walk("");
        let paths: Vec<&str> = entries.iter().map(|e| e.path()).collect();
        assert_eq!(paths, ["a", "a/x", "a/x/z.txt", "a/y.txt", "b.txt"]);
        let below: Vec<String> = manifest
            .walk("a/x")
            .iter()
            .map(|e| e.path().to_owned())
            .collect();
        assert_eq!(below, ["a/x/z.txt"]);
    }

    #[test]
    fn find_by_extension_matches_suffix() {
        let manifest = Manifest::from_paths(["302.json", "a/302.json", "a/b.txt", "json"]);
        let found: Vec<String> = manifest
            .find_by_extension("json")
            .iter()
            .map(|f| f.path().to_owned())
            .collect();
        assert_eq!(found, ["302.json", "a/302.json"]);
        assert!(manifest.find_by_extension("xyz123").is_empty());
    }

    #[test]
    fn find_with_predicate() {
        let manifest = Manifest::from_paths(["a/b.txt", "a/c.txt", "d.txt"]);
        let found = manifest.find(|f| f.path().starts_with("a/"));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name(), "b.txt");
    }

    #[test]
    fn parse_simple_array() {
        let manifest = Manifest::parse(r#"["a/b.txt","c.txt"]"#);
        assert_eq!(manifest.all_files(), ["a/b.txt", "c.txt"]);
    }

    #[test]
    fn parse_tolerates_whitespace() {
        let manifest = Manifest::parse("  [\n  \"a.txt\" ,\n  \"b.txt\"\n]\n");
        assert_eq!(manifest.all_files(), ["a.txt", "b.txt"]);
    }

    #[test]
    fn parse_empty_forms() {
        assert!(Manifest::parse("").is_empty());
        assert!(Manifest::parse("   \n").is_empty());
        assert!(Manifest::parse("[]").is_empty());
        assert!(Manifest::parse("[  ]").is_empty());
    }

    #[test]
    fn parse_rejects_non_arrays() {
        assert!(Manifest::parse(r#"{"a": "b"}"#).is_empty());
        assert!(Manifest::parse(r#""a.txt""#).is_empty());
        assert!(Manifest::parse(r#"["a.txt""#).is_empty());
    }

    #[test]
    fn parse_drops_unquoted_and_empty_elements() {
        let manifest = Manifest::parse(r#"["a.txt", 42, b.txt, "", "c.txt"]"#);
        assert_eq!(manifest.all_files(), ["a.txt", "c.txt"]);
    }

    #[test]
    fn parse_unescapes() {
        let paths = parse_index(
            r#"["q\"uote", "back\\slash", "sl\/ash", "tab\there", "nl\nx", "cr\rx"]"#,
        );
        assert_eq!(
            paths,
            ["q\"uote", "back\\slash", "sl/ash", "tab\there", "nl\nx", "cr\rx"]
        );
    }

    #[test]
    fn parse_unicode_and_unknown_escapes() {
        let paths = parse_index(r#"["caf\u00e9", "odd\q", "bad\u12", "trail\"]"#);
        assert_eq!(paths, ["café", "odd\\q", "bad\\u12", "trail\\"]);
    }

    #[test]
    fn parse_keeps_commas_inside_strings() {
        let paths = parse_index(r#"["a,b.txt","c.txt"]"#);
        assert_eq!(paths, ["a,b.txt", "c.txt"]);
    }

    #[test]
    fn to_json_format() {
        let manifest = Manifest::from_paths(["a/b.txt", "c.txt"]);
        assert_eq!(manifest.to_json(), r#"["a/b.txt","c.txt"]"#);
        assert_eq!(Manifest::empty().to_json(), "[]");
    }

    #[test]
    fn json_round_trip() {
        let manifest = Manifest::from_paths([
            "plain.txt",
            "dir/with space.txt",
            "dir/q\"uote.txt",
            "dir/back\\slash.txt",
            "dir/comma,name.txt",
            "ünï/cödé.txt",
            "ctrl/\u{1}.bin",
        ]);
        let parsed = Manifest::parse(&manifest.to_json());
        assert_eq!(as_set(parsed.all_files()), as_set(manifest.all_files()));
    }
}
