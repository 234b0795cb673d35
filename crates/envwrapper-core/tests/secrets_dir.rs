//! End-to-end reads against a real secrets directory and the process environment
//!
//! Every test uses its own variable names because the process environment is
//! shared between test threads.

use std::env;
use std::fs;
use std::sync::Arc;

use envwrapper_core::{EnvWrapper, MemoryEnv, ValueSource, WrapperConfig};
use tempfile::TempDir;

fn secrets_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn dir_arg(dir: &TempDir) -> String {
    dir.path().to_str().unwrap().to_string()
}

#[test]
fn secret_file_overrides_environment() {
    let dir = secrets_dir(&[("ENV_EWT_OVERRIDE_TOKEN", "from-file\n")]);
    env::set_var("EWT_OVERRIDE_TOKEN", "from-env");

    let wrapper = EnvWrapper::new(&dir_arg(&dir));
    assert_eq!(wrapper.get_string("ewt_override_token"), "from-file");

    env::remove_var("EWT_OVERRIDE_TOKEN");
}

#[test]
fn directory_argument_is_normalised() {
    let dir = secrets_dir(&[("ENV_EWT_NORMALISED", "ok")]);
    let padded = format!("  {}//  ", dir_arg(&dir));

    let wrapper = EnvWrapper::new(&padded);
    assert_eq!(wrapper.secrets_dir(), dir.path());
    assert_eq!(wrapper.get_string("EWT_NORMALISED"), "ok");
}

#[test]
fn qualifying_files_only() {
    let dir = secrets_dir(&[
        ("ENV_EWT_KEEP", "  kept  "),
        ("ENV_EWT_ZERO", ""),
        ("EWT_NO_PREFIX", "x"),
    ]);
    fs::create_dir(dir.path().join("ENV_EWT_SUBDIR")).unwrap();
    fs::write(dir.path().join("ENV_EWT_SUBDIR").join("ENV_EWT_INNER"), "x").unwrap();

    let wrapper = EnvWrapper::new(&dir_arg(&dir));
    assert_eq!(wrapper.secret_keys(), vec!["EWT_KEEP"]);
    assert_eq!(wrapper.get_string("ewt_keep"), "kept");
}

#[test]
fn empty_secret_falls_through_to_environment() {
    let dir = secrets_dir(&[("ENV_EWT_BLANK_SECRET", "   \n")]);
    env::set_var("EWT_BLANK_SECRET", "env-value");

    let wrapper = EnvWrapper::new(&dir_arg(&dir));
    assert_eq!(wrapper.get_string("EWT_BLANK_SECRET"), "env-value");

    env::remove_var("EWT_BLANK_SECRET");
}

#[test]
fn nonexistent_directory_never_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("not-here");
    env::set_var("EWT_MISSING_DIR_VALUE", "still works");

    let wrapper = EnvWrapper::new(missing.to_str().unwrap());
    assert!(wrapper.secret_keys().is_empty());
    assert_eq!(wrapper.get_string("EWT_MISSING_DIR_VALUE"), "still works");
    assert_eq!(wrapper.get_string_with_default("EWT_MISSING_DIR_ABSENT", "d"), "d");

    env::remove_var("EWT_MISSING_DIR_VALUE");
}

#[test]
fn environment_reads_are_not_cached() {
    let dir = secrets_dir(&[]);
    let wrapper = EnvWrapper::new(&dir_arg(&dir));

    env::set_var("EWT_LIVE_VALUE", "now");
    assert_eq!(wrapper.get_string_with_default("EWT_LIVE_VALUE", "gone"), "now");

    env::remove_var("EWT_LIVE_VALUE");
    assert_eq!(wrapper.get_string_with_default("EWT_LIVE_VALUE", "gone"), "gone");
}

#[test]
fn typed_reads_from_process_environment() {
    let dir = secrets_dir(&[("ENV_EWT_TYPED_PORT", "9443\n")]);
    env::set_var("EWT_TYPED_FLAG", "false");
    env::set_var("EWT_TYPED_COUNT", "abc");
    env::set_var("EWT_TYPED_LIST", " a, b ,,c ");

    let wrapper = EnvWrapper::new(&dir_arg(&dir));
    assert!(wrapper.get_bool_with_default("EWT_TYPED_UNSET", true));
    assert!(!wrapper.get_bool_with_default("EWT_TYPED_FLAG", true));
    assert_eq!(wrapper.get_int_with_default("EWT_TYPED_COUNT", 7), 7);
    assert_eq!(wrapper.get_int("EWT_TYPED_PORT"), 9443);
    assert_eq!(
        wrapper.get_string_array_separated_by("EWT_TYPED_LIST", ","),
        vec!["a", "b", "c"]
    );

    env::remove_var("EWT_TYPED_FLAG");
    env::remove_var("EWT_TYPED_COUNT");
    env::remove_var("EWT_TYPED_LIST");
}

#[test]
fn config_default_dir_with_injected_env() {
    let dir = secrets_dir(&[("ENV_EWT_CFG", "from-config-dir")]);
    let config = WrapperConfig::default().with_default_secrets_dir(dir_arg(&dir));

    let wrapper = EnvWrapper::builder()
        .config(config)
        .env(Arc::new(MemoryEnv::new()))
        .build();

    let resolved = wrapper.resolve("ewt_cfg", "");
    assert_eq!(resolved.value, "from-config-dir");
    assert_eq!(resolved.source, ValueSource::Secret);
}

#[cfg(unix)]
#[test]
fn symlinked_secret_is_read() {
    let dir = secrets_dir(&[]);
    let target = dir.path().join("..data_token");
    fs::write(&target, "linked\n").unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("ENV_EWT_LINKED")).unwrap();

    let wrapper = EnvWrapper::builder()
        .secrets_dir(dir_arg(&dir))
        .env(Arc::new(MemoryEnv::new()))
        .build();
    assert_eq!(wrapper.get_string("EWT_LINKED"), "linked");
}

#[cfg(unix)]
#[test]
fn non_utf8_name_and_content_are_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = secrets_dir(&[("ENV_EWT_OK", "ok")]);
    fs::write(dir.path().join(OsStr::from_bytes(b"ENV_\xff")), "bad name").unwrap();
    fs::write(dir.path().join("ENV_EWT_BIN"), [0xff, 0xfe, 0x00]).unwrap();

    let wrapper = EnvWrapper::builder()
        .secrets_dir(dir_arg(&dir))
        .env(Arc::new(MemoryEnv::new()))
        .build();
    assert_eq!(wrapper.secret_keys(), vec!["EWT_OK"]);
    assert_eq!(wrapper.get_string_with_default("EWT_BIN", "fallback"), "fallback");
}
