//! Named tasks and the order they run in.

type Action<'a> = Box<dyn Asset<Output = anyhow::Result<()>> + 'a>;

enum Kind<'a> {
    Action(Action<'a>),
    /// Runs the named tasks one after another, stopping at the first failure.
    Sequence(Vec<&'static str>),
}

struct Task<'a> {
    description: &'static str,
    kind: Kind<'a>,
}

/// A set of tasks owned by one build.
///
/// Sequences can only refer to tasks that were registered before them, so the graph never has
/// cycles.
#[derive(Default)]
pub(crate) struct TaskGraph<'a> {
    tasks: BTreeMap<&'static str, Task<'a>>,
}

impl<'a> TaskGraph<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn action<A>(
        &mut self,
        name: &'static str,
        description: &'static str,
        action: A,
    ) -> anyhow::Result<()>
    where
        A: Asset<Output = anyhow::Result<()>> + 'a,
    {
        self.insert(name, description, Kind::Action(Box::new(action)))
    }

    pub(crate) fn sequence(
        &mut self,
        name: &'static str,
        description: &'static str,
        tasks: &[&'static str],
    ) -> anyhow::Result<()> {
        for task in tasks {
            ensure!(
                self.tasks.contains_key(task),
                "sequence `{name}` refers to unknown task `{task}`"
            );
        }
        self.insert(name, description, Kind::Sequence(tasks.to_vec()))
    }

    fn insert(
        &mut self,
        name: &'static str,
        description: &'static str,
        kind: Kind<'a>,
    ) -> anyhow::Result<()> {
        ensure!(!self.tasks.contains_key(name), "task `{name}` is already registered");
        self.tasks.insert(name, Task { description, kind });
        Ok(())
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Task names with their descriptions, sorted by name.
    pub(crate) fn names(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.tasks
            .iter()
            .map(|(&name, task)| (name, task.description))
    }

    pub(crate) fn run(&self, name: &str) -> anyhow::Result<()> {
        let Some(task) = self.tasks.get(name) else {
            bail!("no task named `{name}`");
        };

        let start = Instant::now();
        match &task.kind {
            Kind::Action(action) => {
                log::info!("running `{name}`");
                action
                    .generate()
                    .with_context(|| format!("task `{name}` failed"))?;
            }
            Kind::Sequence(tasks) => {
                for task in tasks {
                    self.run(task)
                        .with_context(|| format!("task `{name}` failed"))?;
                }
            }
        }
        log::info!("finished `{name}` in {:?}", start.elapsed());

        Ok(())
    }
}


use crate::util::asset::Asset;
use anyhow::bail;
use anyhow::ensure;
use anyhow::Context as _;
use std::collections::BTreeMap;
use std::time::Instant;
