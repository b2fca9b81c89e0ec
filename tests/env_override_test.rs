//! `ENVEDIT_*` environment overrides
//!
//! Kept in its own test binary: it mutates the process environment, which the
//! other config tests read.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use envedit::config::Settings;

#[test]
fn given_env_vars_and_config_file_when_load_then_env_wins() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("envedit.toml");
    fs::write(
        &path,
        r#"
user_store = "/srv/file/user.toml"
system_store = "/srv/file/system.toml"
"#,
    )
    .unwrap();

    std::env::set_var("ENVEDIT_SYSTEM_STORE", "/srv/env/system.toml");
    std::env::remove_var("ENVEDIT_USER_STORE");
    let settings = Settings::load(Some(&path));
    std::env::remove_var("ENVEDIT_SYSTEM_STORE");

    let settings = settings.expect("load settings");
    assert_eq!(settings.system_store, PathBuf::from("/srv/env/system.toml"));
    assert_eq!(settings.user_store, PathBuf::from("/srv/file/user.toml"));
}
