const MIN_SUFFIX: &str = "min";

pub(crate) fn asset(config: &Config) -> Box<dyn Asset<Output = anyhow::Result<()>> + '_> {
    let bundle = &config.js;
    let out_dir = config.out_dir(&bundle.dir);
    let outputs = vec![
        out_dir.join(&bundle.output),
        out_dir.join(suffixed(&bundle.output, MIN_SUFFIX)),
    ];

    let task = Sources::new(config, &bundle.inputs, bundle.allow_empty_globs)
        .map(move |files| -> anyhow::Result<()> {
            let files = files.context("failed to resolve JS sources")?;

            // The unminified bundle is kept around for debugging.
            let buffer = Buffer::concat(&bundle.output, &files)?;
            buffer.write_to(&out_dir)?;

            let mut buffer = buffer.renamed(MIN_SUFFIX);
            match minify::js(&buffer.contents) {
                Ok(minified) => {
                    buffer.contents = minified.into_bytes();
                    buffer.write_to(&out_dir)?;
                }
                Err(e) => {
                    let e = anyhow::Error::from(e).context(format!("not emitting {}", buffer.name));
                    log::error!("{e:?}");
                    remove_stale(out_dir.join(&buffer.name))?;
                }
            }

            Ok(())
        });

    asset::incremental(task, outputs, config.force)
}


use crate::config::Config;
use crate::util::asset;
use crate::util::asset::Asset;
use crate::util::concat::suffixed;
use crate::util::concat::Buffer;
use crate::util::minify;
use crate::util::remove_stale;
use crate::util::source::Sources;
use anyhow::Context as _;
