/// A named in-memory artifact on its way to the destination directory.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Buffer {
    pub(crate) name: String,
    pub(crate) contents: Vec<u8>,
}

impl Buffer {
    /// Join the files' bytes in order, with nothing in between.
    pub(crate) fn concat<P: AsRef<Path>>(name: &str, files: &[P]) -> anyhow::Result<Self> {
        let mut contents = Vec::new();
        for file in files {
            let file = file.as_ref();
            let mut bytes = fs::read(file)
                .with_context(|| format!("failed to read file `{}`", file.display()))?;
            contents.append(&mut bytes);
        }
        Ok(Self {
            name: name.to_owned(),
            contents,
        })
    }

    /// Give the buffer a name with `.{suffix}` before its extension: `vendor.js` becomes
    /// `vendor.min.js`.
    pub(crate) fn renamed(self, suffix: &str) -> Self {
        Self {
            name: suffixed(&self.name, suffix),
            ..self
        }
    }

    pub(crate) fn write_to(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let path = dir.join(&self.name);
        write_file(&path, &self.contents)?;
        log::info!("successfully emitted {}", path.display());
        Ok(path)
    }
}

pub(crate) fn suffixed(name: &str, suffix: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => format!("{stem}.{suffix}.{extension}"),
        _ => format!("{name}.{suffix}"),
    }
}


use crate::util::write_file;
use anyhow::Context as _;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
