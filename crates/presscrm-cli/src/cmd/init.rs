use anyhow::Context;
use chrono::Utc;
use presscrm_core::{config::Config, io, paths, sample};
use std::path::Path;

pub fn run(root: &Path, company: Option<&str>) -> anyhow::Result<()> {
    let company = company.map(str::to_string).unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "presscrm".to_string())
    });

    println!("Initializing presscrm in: {}", root.display());

    let cfg = Config::new(&company);
    let yaml = serde_yaml::to_string(&cfg)?;
    report(
        paths::CONFIG_FILE,
        io::write_if_missing(&paths::config_path(root), yaml.as_bytes())
            .context("failed to write config.yaml")?,
    );

    let data = sample::dataset(Utc::now());
    let yaml = serde_yaml::to_string(&data)?;
    report(
        paths::DATA_FILE,
        io::write_if_missing(&paths::data_path(root), yaml.as_bytes())
            .context("failed to write data.yaml")?,
    );

    println!("Next: presscrm --as u2 lead list");
    Ok(())
}

fn report(path: &str, written: bool) {
    if written {
        println!("  created: {path}");
    } else {
        println!("  exists:  {path}");
    }
}
