pub(crate) fn asset(config: &Config) -> impl Asset<Output = anyhow::Result<()>> + '_ {
    let fonts = &config.fonts;
    let out_dir = config.out_dir(&fonts.dir);

    Sources::new(config, &fonts.inputs, fonts.allow_empty_globs).map(
        move |files| -> anyhow::Result<()> {
            let files = files.context("failed to resolve font sources")?;
            for (name, src) in by_name(files) {
                let dest = out_dir.join(name);
                let copy = CopyFile {
                    src,
                    dest: dest.clone(),
                    config_modified: config.modified(),
                };
                asset::incremental(copy, vec![dest], config.force).generate()?;
            }
            Ok(())
        },
    )
}

/// Pair every file with its output name; of two files with the same name, the later one wins.
///
/// Names keep the position of their first occurrence.
fn by_name(files: Vec<PathBuf>) -> Vec<(OsString, PathBuf)> {
    let mut positions = HashMap::<OsString, usize>::new();
    let mut named = Vec::<(OsString, PathBuf)>::new();

    for file in files {
        let Some(name) = file.file_name().map(OsStr::to_owned) else {
            continue;
        };
        match positions.get(&name).copied() {
            Some(i) => {
                let existing = &mut named[i].1;
                if *existing != file {
                    log::warn!(
                        "{} replaces {} in the output",
                        file.display(),
                        existing.display()
                    );
                    *existing = file;
                }
            }
            None => {
                positions.insert(name.clone(), named.len());
                named.push((name, file));
            }
        }
    }

    named
}

struct CopyFile {
    src: PathBuf,
    dest: PathBuf,
    config_modified: Modified,
}

impl Asset for CopyFile {
    type Output = anyhow::Result<()>;

    fn modified(&self) -> Modified {
        Ord::max(
            Modified::path(&self.src).unwrap_or(Modified::Never),
            self.config_modified,
        )
    }
    fn generate(&self) -> Self::Output {
        make_parents(&self.dest)?;
        fs::copy(&self.src, &self.dest)
            .map_err(|source| BuildError::Write {
                path: self.dest.clone(),
                source,
            })
            .with_context(|| format!("failed to copy {}", self.src.display()))?;
        log::info!("copied {} to {}", self.src.display(), self.dest.display());
        Ok(())
    }
}


use crate::config::Config;
use crate::util::asset;
use crate::util::asset::Asset;
use crate::util::asset::Modified;
use crate::util::error::BuildError;
use crate::util::make_parents;
use crate::util::source::Sources;
use anyhow::Context as _;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
