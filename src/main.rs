#![warn(
    noop_method_call,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    clippy::pedantic
)]
#![allow(
    clippy::match_bool,
    clippy::single_component_path_imports, // https://github.com/rust-lang/rust-clippy/issues/7923
    clippy::too_many_lines,
    clippy::items_after_statements,
)]

use ::{
    anyhow::Context as _,
    crossbeam::channel,
    fn_error_context::context,
    notify::Watcher,
    std::{
        path::PathBuf,
        time::{Duration, Instant},
    },
};

mod config;
mod css;
mod fonts;
mod js;
mod task;

mod util;
use self::{config::Config, task::TaskGraph, util::log_errors};

/// Bundles vendor CSS and JavaScript and copies vendor fonts into the asset directory.
#[derive(clap::Parser)]
struct Args {
    /// Tasks to run, in order.
    #[clap(default_value = "build")]
    tasks: Vec<String>,

    /// Project root; every configured path is relative to it.
    #[clap(long, default_value = ".")]
    root: PathBuf,

    /// Configuration file [default: <ROOT>/vendor-assets.toml, if it exists].
    #[clap(long)]
    config: Option<PathBuf>,

    /// Regenerate outputs even when they are up to date.
    #[clap(long)]
    force: bool,

    /// Whether to watch the vendor directory for changes.
    #[clap(long)]
    watch: bool,

    /// List the available tasks and exit.
    #[clap(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args: Args = clap::Parser::parse();

    let config = load_config(&args)?;
    {
        let graph = graph(&config)?;

        if args.list {
            for (name, description) in graph.names() {
                println!("{name:<8}{description}");
            }
            return Ok(());
        }

        for name in &args.tasks {
            anyhow::ensure!(graph.contains(name), "no task named `{name}`");
        }

        let res = run(&graph, &args.tasks);
        if !args.watch {
            return res;
        }
        log_errors(res);
    }

    watch(&args, &config)
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::load(&args.root, args.config.as_deref())?;
    config.force = args.force;
    Ok(config)
}

/// Build the task graph for a configuration.
#[context("failed to build task graph")]
fn graph(config: &Config) -> anyhow::Result<TaskGraph<'_>> {
    let mut graph = TaskGraph::new();
    graph.action("css", "concatenate vendor CSS", css::asset(config))?;
    graph.action("fonts", "copy vendor fonts", fonts::asset(config))?;
    graph.action("js", "concatenate and minify vendor JS", js::asset(config))?;
    graph.sequence("build", "css, then fonts, then js", &["css", "fonts", "js"])?;
    Ok(graph)
}

fn run(graph: &TaskGraph<'_>, tasks: &[String]) -> anyhow::Result<()> {
    for name in tasks {
        graph.run(name)?;
    }
    Ok(())
}

fn watch(args: &Args, config: &Config) -> anyhow::Result<()> {
    let (sender, receiver) = channel::bounded(1);

    let mut watcher = notify::recommended_watcher(move |event_res| {
        let event: notify::Event = match event_res {
            Ok(event) => event,
            Err(e) => {
                log::error!("error watching: {}", e);
                return;
            }
        };
        if !matches!(event.kind, notify::event::EventKind::Access(_)) {
            let _ = sender.try_send(());
        }
    })
    .context("failed to create file watcher")?;

    let vendor_dir = config.vendor_dir();
    watcher
        .watch(&vendor_dir, notify::RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch `{}`", vendor_dir.display()))?;
    if let Some(path) = &config.path {
        watcher
            .watch(path, notify::RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch `{}`", path.display()))?;
    }

    log::info!("now watching for changes");

    loop {
        let _ = receiver.recv();
        // debounce
        let debounce_deadline = Instant::now() + Duration::from_millis(10);
        while receiver.recv_deadline(debounce_deadline).is_ok() {}

        log::info!("rebuilding");
        // The config may have changed too.
        log_errors(load_config(args).and_then(|config| {
            let graph = graph(&config)?;
            run(&graph, &args.tasks)
        }));
    }
}
