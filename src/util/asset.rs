//! Makefile-like system.

pub(crate) trait Asset {
    type Output;

    /// Get the latest time at which anything [`Self::generate`] depends on was modified.
    ///
    /// This can be used to avoid calling `generate` again, since that may be expensive.
    fn modified(&self) -> Modified;

    /// Generate the asset's value.
    fn generate(&self) -> Self::Output;

    fn map<O, F: Fn(Self::Output) -> O>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
    {
        Map::new(self, f)
    }

    /// Skip generating the asset when all of the paths it writes are newer than its inputs.
    ///
    /// A missing output always forces generation.
    fn modifies_paths<I>(self, paths: I) -> ModifiesPaths<Self>
    where
        Self: Asset<Output = anyhow::Result<()>> + Sized,
        I: IntoIterator<Item = PathBuf>,
    {
        ModifiesPaths::new(self, paths.into_iter().collect())
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub(crate) enum Modified {
    Never,
    At(SystemTime),
}

impl Modified {
    pub(crate) fn path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .symlink_metadata()
            .and_then(|meta| meta.modified())
            .map(Self::At)
            .ok()
    }

    /// The latest modification time of a set of paths; missing ones are ignored.
    pub(crate) fn latest<I>(paths: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        paths
            .into_iter()
            .filter_map(Self::path)
            .max()
            .unwrap_or(Self::Never)
    }
}

pub(crate) struct Map<A, F> {
    asset: A,
    f: F,
}
impl<A, F> Map<A, F> {
    fn new(asset: A, f: F) -> Self {
        Self { asset, f }
    }
}
impl<A: Asset, F: Fn(A::Output) -> O, O> Asset for Map<A, F> {
    type Output = O;

    fn modified(&self) -> Modified {
        self.asset.modified()
    }
    fn generate(&self) -> Self::Output {
        (self.f)(self.asset.generate())
    }
}

static EXE_MODIFIED: Lazy<Modified> = Lazy::new(|| {
    env::current_exe()
        .ok()
        .and_then(Modified::path)
        .unwrap_or_else(|| Modified::At(SystemTime::now()))
});

pub(crate) struct ModifiesPaths<A> {
    asset: A,
    paths: Vec<PathBuf>,
}
impl<A> ModifiesPaths<A> {
    fn new(asset: A, paths: Vec<PathBuf>) -> Self {
        Self { asset, paths }
    }
}
impl<A> Asset for ModifiesPaths<A>
where
    A: Asset<Output = anyhow::Result<()>>,
{
    type Output = anyhow::Result<()>;

    /// The oldest of the outputs, or `Never` if one of them doesn't exist.
    fn modified(&self) -> Modified {
        let mut oldest = None;
        for path in &self.paths {
            let Some(modified) = Modified::path(path) else {
                return Modified::Never;
            };
            oldest = Some(Option::map_or(oldest, modified, |o| Ord::min(o, modified)));
        }
        oldest.unwrap_or(Modified::Never)
    }
    fn generate(&self) -> Self::Output {
        let output_modified = self.modified();
        if self.asset.modified() >= output_modified || *EXE_MODIFIED >= output_modified {
            return self.asset.generate();
        }
        for path in &self.paths {
            log::debug!("{} is up to date", path.display());
        }
        Ok(())
    }
}

impl<A: Asset + ?Sized> Asset for Box<A> {
    type Output = A::Output;

    fn modified(&self) -> Modified {
        (**self).modified()
    }
    fn generate(&self) -> Self::Output {
        (**self).generate()
    }
}

/// Box an asset, wrapping it in an up-to-date check unless `force` is set.
pub(crate) fn incremental<'a, A>(
    asset: A,
    outputs: Vec<PathBuf>,
    force: bool,
) -> Box<dyn Asset<Output = anyhow::Result<()>> + 'a>
where
    A: Asset<Output = anyhow::Result<()>> + 'a,
{
    if force {
        Box::new(asset)
    } else {
        Box::new(asset.modifies_paths(outputs))
    }
}


use once_cell::sync::Lazy;
use std::env;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
