pub(crate) fn asset(config: &Config) -> Box<dyn Asset<Output = anyhow::Result<()>> + '_> {
    let bundle = &config.css;
    let out_dir = config.out_dir(&bundle.dir);
    let output = out_dir.join(&bundle.output);

    let task = Sources::new(config, &bundle.inputs, bundle.allow_empty_globs)
        .map(move |files| -> anyhow::Result<()> {
            let files = files.context("failed to resolve CSS sources")?;
            Buffer::concat(&bundle.output, &files)?.write_to(&out_dir)?;
            Ok(())
        });

    asset::incremental(task, vec![output], config.force)
}

#[cfg(test)]
mod tests {
    #[test]
    fn concatenates_in_order() {
        let dir = TempDir::new().unwrap();
        let vendor = dir.path().join("node_modules");
        fs::create_dir_all(vendor.join("lib")).unwrap();
        fs::write(vendor.join("lib/a.css"), "A{}").unwrap();
        fs::write(vendor.join("lib/b.css"), "B{}").unwrap();

        let mut config = config(dir.path(), &["lib/b.css", "lib/a.css", "optional/*.css"]);
        asset(&config).generate().unwrap();
        let output = dir.path().join("assets/css/vendor.css");
        assert_eq!(fs::read_to_string(&output).unwrap(), "B{}A{}");

        config.css.inputs = vec!["lib/a.css".to_owned(), "lib/b.css".to_owned()];
        asset(&config).generate().unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "A{}B{}");

        asset(&config).generate().unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "A{}B{}");
    }

    #[test]
    fn rebuild_drops_inputs_that_went_away() {
        let dir = TempDir::new().unwrap();
        let vendor = dir.path().join("node_modules");
        let optional = vendor.join("opt/css/x.standalone.css");
        fs::create_dir_all(vendor.join("lib")).unwrap();
        fs::create_dir_all(optional.parent().unwrap()).unwrap();
        fs::write(vendor.join("lib/a.css"), "A{}").unwrap();
        fs::write(&optional, "X{}").unwrap();

        let mut config = config(dir.path(), &["lib/a.css", "opt/css/*.standalone.css"]);
        config.force = false;
        let output = dir.path().join("assets/css/vendor.css");

        asset(&config).generate().unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "A{}X{}");

        fs::remove_file(&optional).unwrap();
        asset(&config).generate().unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "A{}");

        fs::write(&optional, "X{}").unwrap();
        asset(&config).generate().unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "A{}X{}");

        fs::remove_dir_all(vendor.join("opt")).unwrap();
        asset(&config).generate().unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "A{}");
    }

    #[test]
    fn missing_literal_fails() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path(), &["bootstrap/dist/css/bootstrap.css"]);
        let e = asset(&config).generate().unwrap_err();
        assert!(error::find(&e).is_some_and(BuildError::is_missing_file));
        assert!(!dir.path().join("assets/css/vendor.css").exists());
    }

    #[test]
    fn unwritable_destination() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("assets"), "").unwrap();
        let config = config(dir.path(), &["optional/*.css"]);
        let e = asset(&config).generate().unwrap_err();
        assert!(error::find(&e).is_some_and(BuildError::is_write));
    }

    fn config(root: &Path, inputs: &[&str]) -> Config {
        let mut config = Config {
            root: root.to_owned(),
            force: true,
            ..Config::default()
        };
        config.css.inputs = inputs.iter().map(|&s| s.to_owned()).collect();
        config
    }

    use super::asset;
    use crate::config::Config;
    use crate::util::asset::Asset as _;
    use crate::util::error;
    use crate::util::error::BuildError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
}

use crate::config::Config;
use crate::util::asset;
use crate::util::asset::Asset;
use crate::util::concat::Buffer;
use crate::util::source::Sources;
use anyhow::Context as _;
