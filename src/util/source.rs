//! Resolving input entries to files.
//!
//! An entry is either a literal path or a glob. Literal paths must exist. Globs are split into a
//! wildcard-free base directory and a gitignore-style pattern that is matched against every file
//! under it.

/// What to do when a glob matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EmptyGlob {
    Allow,
    Deny,
}

impl EmptyGlob {
    pub(crate) fn allowed(allow: bool) -> Self {
        if allow {
            Self::Allow
        } else {
            Self::Deny
        }
    }
}

/// The files a list of entries currently resolves to.
///
/// Its modification time covers the resolved files, the directories containing them, the
/// directory each entry is expanded from (or its nearest existing ancestor, so that a removed
/// package still counts as a change), and the config the entries came from.
pub(crate) struct Sources<'a> {
    base: PathBuf,
    entries: &'a [String],
    empty_glob: EmptyGlob,
    config_modified: Modified,
}

impl<'a> Sources<'a> {
    pub(crate) fn new(config: &Config, entries: &'a [String], allow_empty_globs: bool) -> Self {
        Self {
            base: config.vendor_dir(),
            entries,
            empty_glob: EmptyGlob::allowed(allow_empty_globs),
            config_modified: config.modified(),
        }
    }
}

impl Asset for Sources<'_> {
    type Output = anyhow::Result<Vec<PathBuf>>;

    fn modified(&self) -> Modified {
        let files = match self.generate() {
            Ok(files) => files,
            // Let `generate` report it.
            Err(_) => return Modified::At(SystemTime::now()),
        };
        let dirs = files.iter().filter_map(|file| file.parent());
        let inputs = Modified::latest(files.iter().map(PathBuf::as_path).chain(dirs));
        let bases = self.entries.iter().filter_map(|entry| {
            let (dir, _) = split(&self.base, entry);
            dir.ancestors()
                .take_while(|dir| dir.starts_with(&self.base))
                .find(|dir| dir.is_dir())
                .or_else(|| self.base.parent())
                .map(Path::to_owned)
        });
        Ord::max(Ord::max(inputs, Modified::latest(bases)), self.config_modified)
    }
    fn generate(&self) -> Self::Output {
        resolve_all(&self.base, self.entries, self.empty_glob)
    }
}

/// Resolve every entry relative to `base`, keeping entry order.
pub(crate) fn resolve_all<S: AsRef<str>>(
    base: &Path,
    entries: &[S],
    empty_glob: EmptyGlob,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in entries {
        files.extend(resolve(base, entry.as_ref(), empty_glob)?);
    }
    Ok(files)
}

pub(crate) fn resolve(
    base: &Path,
    entry: &str,
    empty_glob: EmptyGlob,
) -> anyhow::Result<Vec<PathBuf>> {
    let missing = || BuildError::MissingFile {
        pattern: entry.to_owned(),
    };

    let (dir, pattern) = split(base, entry);
    if pattern.is_empty() {
        if !dir.is_file() {
            return Err(missing().into());
        }
        return Ok(vec![dir]);
    }

    let files = glob(&dir, &pattern.join("/"))
        .with_context(|| format!("failed to expand `{entry}`"))?;

    if files.is_empty() {
        match empty_glob {
            EmptyGlob::Allow => log::debug!("`{entry}` matched no files, skipping"),
            EmptyGlob::Deny => return Err(missing().into()),
        }
    }

    Ok(files)
}

/// Split an entry into its wildcard-free prefix, joined onto `base`, and the remaining components.
fn split<'e>(base: &Path, entry: &'e str) -> (PathBuf, Vec<&'e str>) {
    let mut components = entry.split('/').filter(|c| !c.is_empty() && *c != ".").peekable();
    let mut dir = base.to_owned();
    while let Some(component) = components.next_if(|c| !is_glob(c)) {
        dir.push(component);
    }
    (dir, components.collect())
}

fn is_glob(component: &str) -> bool {
    component.contains(['*', '?', '[', '{'])
}

fn glob(dir: &Path, pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut builder = GitignoreBuilder::new(dir);
    builder
        .add_line(None, &format!("/{pattern}"))
        .with_context(|| format!("invalid glob `{pattern}`"))?;
    let matcher = builder
        .build()
        .with_context(|| format!("invalid glob `{pattern}`"))?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(dir).with_context(|| {
            format!(
                "failed to strip prefix {} from {}",
                dir.display(),
                entry.path().display()
            )
        })?;
        if matcher.matched(relative, false).is_ignore() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    fn tree(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, file).unwrap();
        }
        dir
    }

    fn names(base: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(base).unwrap().to_str().unwrap().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn literal() {
        let dir = tree(&["jquery/dist/jquery.js"]);
        let files = resolve(dir.path(), "jquery/dist/jquery.js", EmptyGlob::Deny).unwrap();
        assert_eq!(names(dir.path(), &files), ["jquery/dist/jquery.js"]);
    }

    #[test]
    fn missing_literal_fails_even_when_empty_globs_are_allowed() {
        let dir = tree(&[]);
        let e = resolve(dir.path(), "bootstrap/dist/css/bootstrap.css", EmptyGlob::Allow)
            .unwrap_err();
        assert!(error::find(&e).is_some_and(BuildError::is_missing_file));
    }

    #[test]
    fn star_stays_in_one_directory() {
        let dir = tree(&[
            "fa/fonts/b.woff",
            "fa/fonts/a.woff",
            "fa/fonts/a.ttf",
            "fa/fonts/old/c.woff",
        ]);
        let files = resolve(dir.path(), "fa/fonts/*.woff", EmptyGlob::Deny).unwrap();
        assert_eq!(names(dir.path(), &files), ["fa/fonts/a.woff", "fa/fonts/b.woff"]);
    }

    #[test]
    fn double_star_recurses() {
        let dir = tree(&["fa/fonts/a.woff", "fa/fonts/old/c.woff", "fa/css/x.css"]);
        let files = resolve(dir.path(), "fa/**/*.woff", EmptyGlob::Deny).unwrap();
        assert_eq!(names(dir.path(), &files), ["fa/fonts/a.woff", "fa/fonts/old/c.woff"]);
    }

    #[test]
    fn empty_glob_policy() {
        let dir = tree(&["fa/fonts/a.ttf"]);

        let files = resolve(dir.path(), "fa/fonts/*.woff2", EmptyGlob::Allow).unwrap();
        assert!(files.is_empty());
        let files = resolve(dir.path(), "nothing/here/*", EmptyGlob::Allow).unwrap();
        assert!(files.is_empty());

        let e = resolve(dir.path(), "fa/fonts/*.woff2", EmptyGlob::Deny).unwrap_err();
        assert!(error::find(&e).is_some_and(BuildError::is_missing_file));
    }

    #[test]
    fn entry_order_is_kept() {
        let dir = tree(&["z/z.css", "a/a.css"]);
        let files = resolve_all(dir.path(), &["z/*.css", "a/a.css", "z/z.css"], EmptyGlob::Deny)
            .unwrap();
        assert_eq!(names(dir.path(), &files), ["z/z.css", "a/a.css", "z/z.css"]);
    }

    #[test]
    fn split_at_first_wildcard() {
        let base = Path::new("vendor");
        assert_eq!(
            split(base, "fa/./fonts/*.woff"),
            (base.join("fa/fonts"), vec!["*.woff"])
        );
        assert_eq!(
            split(base, "fa/**/x/*.ttf"),
            (base.join("fa"), vec!["**", "x", "*.ttf"])
        );
        assert_eq!(split(base, "jquery/jquery.js"), (base.join("jquery/jquery.js"), vec![]));
    }

    #[test]
    fn sources_follow_config() {
        let dir = tree(&["node_modules/a/a.css"]);
        let config = Config {
            root: dir.path().to_owned(),
            ..Config::default()
        };
        let entries = ["a/a.css".to_owned(), "a/*.missing".to_owned()];

        let sources = Sources::new(&config, &entries, true);
        assert!(sources.modified() > Modified::Never);
        let files = sources.generate().unwrap();
        assert_eq!(files, [dir.path().join("node_modules/a/a.css")]);

        let sources = Sources::new(&config, &entries, false);
        assert!(sources.generate().is_err());
    }

    use super::resolve;
    use super::resolve_all;
    use super::split;
    use super::EmptyGlob;
    use super::Sources;
    use crate::config::Config;
    use crate::util::asset::Asset;
    use crate::util::asset::Modified;
    use crate::util::error;
    use crate::util::error::BuildError;
    use std::fs;
    use std::path::Path;
    use std::path::PathBuf;
    use tempfile::TempDir;
}

use crate::config::Config;
use crate::util::asset::Asset;
use crate::util::asset::Modified;
use crate::util::error::BuildError;
use anyhow::Context as _;
use ignore::gitignore::GitignoreBuilder;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use walkdir::WalkDir;
