use std::path::{Path, PathBuf};

pub const PRESSCRM_DIR: &str = ".presscrm";
pub const CONFIG_FILE: &str = ".presscrm/config.yaml";
pub const DATA_FILE: &str = ".presscrm/data.yaml";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn data_path(root: &Path) -> PathBuf {
    root.join(DATA_FILE)
}

pub fn is_initialized(root: &Path) -> bool {
    root.join(PRESSCRM_DIR).is_dir()
}
