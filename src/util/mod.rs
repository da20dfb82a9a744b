//! This module contains many small independent components.

pub(crate) mod asset;
pub(crate) mod concat;
pub(crate) mod minify;
pub(crate) mod source;

pub(crate) fn log_errors<T>(res: anyhow::Result<T>) {
    if let Err(e) = res {
        log::error!("{e:?}");
    }
}

pub(crate) fn write_file<P: AsRef<Path>, D: AsRef<[u8]>>(path: P, data: D) -> anyhow::Result<()> {
    let path = path.as_ref();
    make_parents(path)?;
    fs::write(path, data).map_err(|source| BuildError::Write {
        path: path.to_owned(),
        source,
    })?;

    Ok(())
}

pub(crate) fn make_parents<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent).map_err(|source| BuildError::Write {
            path: parent.to_owned(),
            source,
        })?;
    }
    Ok(())
}

/// Remove an output left behind by an earlier run.
pub(crate) fn remove_stale<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => {
            log::info!("removed stale {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(BuildError::Write {
            path: path.to_owned(),
            source,
        }
        .into()),
    }
}

pub(crate) mod error {
    /// The failures the build distinguishes between.
    ///
    /// Everything else is reported through plain `anyhow` context.
    #[derive(Debug)]
    pub(crate) enum BuildError {
        /// An input entry resolved to no files.
        MissingFile { pattern: String },
        /// A destination directory or file could not be written.
        Write { path: PathBuf, source: io::Error },
        /// The minifier rejected its input.
        Minify { message: String },
    }

    #[cfg(test)]
    impl BuildError {
        pub(crate) fn is_missing_file(&self) -> bool {
            matches!(self, Self::MissingFile { .. })
        }

        pub(crate) fn is_write(&self) -> bool {
            matches!(self, Self::Write { .. })
        }

        pub(crate) fn is_minify(&self) -> bool {
            matches!(self, Self::Minify { .. })
        }
    }

    impl Display for BuildError {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            match self {
                Self::MissingFile { pattern } => write!(f, "`{pattern}` did not match any file"),
                Self::Write { path, .. } => write!(f, "couldn't write to `{}`", path.display()),
                Self::Minify { message } => write!(f, "failed to minify: {message}"),
            }
        }
    }

    impl Error for BuildError {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            match self {
                Self::Write { source, .. } => Some(source),
                Self::MissingFile { .. } | Self::Minify { .. } => None,
            }
        }
    }

    /// Find the `BuildError` somewhere in an error's chain.
    #[cfg(test)]
    pub(crate) fn find(error: &anyhow::Error) -> Option<&BuildError> {
        error.chain().find_map(|e| e.downcast_ref::<BuildError>())
    }


    use std::error::Error;
    use std::fmt;
    use std::fmt::Display;
    use std::fmt::Formatter;
    use std::io;
    use std::path::PathBuf;
}


use self::error::BuildError;
use std::fs;
use std::io;
use std::path::Path;
