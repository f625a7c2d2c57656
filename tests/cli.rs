use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "QR_CODE_DIR",
    "QR_CODE_NAME",
    "FILL_COLOR",
    "BACK_COLOR",
    "QR_ERROR_CORRECTION",
    "QR_MODULE_SIZE",
    "URLQR_LOG_LEVEL",
    "URLQR_LOG_FILE",
    "URLQR_LOG_ROTATION",
];

fn urlqr(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("urlqr").expect("binary built");
    cmd.current_dir(cwd)
        .env("XDG_CONFIG_HOME", cwd.join("xdg"))
        .env("URLQR_LOG_COLOR", "off");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn default_url_lands_in_default_directory() {
    let tmp = TempDir::new().unwrap();

    urlqr(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("qr_codes"));

    assert!(tmp.path().join("qr_codes").join("qr_code.png").is_file());
}

#[test]
fn custom_url_and_name() {
    let tmp = TempDir::new().unwrap();

    urlqr(tmp.path())
        .args(["--url", "https://github.com/custom", "--name", "custom", "--verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://github.com/custom"))
        .stdout(predicate::str::contains("Verified"));

    let path = tmp.path().join("qr_codes").join("custom.png");
    let decoded = urlqr::QrDecoder::new().decode_file(&path).unwrap();
    assert_eq!(decoded, "https://github.com/custom");
}

#[test]
fn env_overrides_directory_and_colors() {
    let tmp = TempDir::new().unwrap();

    urlqr(tmp.path())
        .env("QR_CODE_DIR", "custom_qr")
        .env("FILL_COLOR", "blue")
        .env("BACK_COLOR", "yellow")
        .assert()
        .success();

    let path = tmp.path().join("custom_qr").join("qr_code.png");
    let image = image::open(&path).unwrap().to_rgb8();
    assert_eq!(*image.get_pixel(0, 0), image::Rgb([255, 255, 0]));
    assert!(!tmp.path().join("qr_codes").exists());
}

#[test]
fn invalid_url_is_logged_and_writes_nothing() {
    let tmp = TempDir::new().unwrap();

    urlqr(tmp.path())
        .args(["--url", "not_a_valid_url"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid URL provided: not_a_valid_url"));

    assert!(!tmp.path().join("qr_codes").join("qr_code.png").exists());
}

#[test]
fn directory_failure_exits_with_one() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("blocker"), b"not a directory").unwrap();

    urlqr(tmp.path())
        .env("QR_CODE_DIR", "blocker/qr")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to create directory"));
}

#[test]
fn json_output() {
    let tmp = TempDir::new().unwrap();

    let output = urlqr(tmp.path())
        .args(["--url", "http://example.com", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["url"], "http://example.com");
    assert!(value["path"].as_str().unwrap().ends_with("qr_code.png"));
    assert_eq!(value["verified"], false);
}

#[test]
fn config_file_is_discovered_in_cwd() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("urlqr.toml"),
        "[output]\ndirectory = \"from_file\"\nname = \"filed\"\n",
    )
    .unwrap();

    urlqr(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Using configuration file"))
        .stderr(predicate::str::contains("urlqr.toml"));
    assert!(tmp.path().join("from_file").join("filed.png").is_file());
}

#[test]
fn oversized_module_size_is_rejected_without_panicking() {
    let tmp = TempDir::new().unwrap();

    for value in ["4294967295", "100000", "abc"] {
        urlqr(tmp.path())
            .env("QR_MODULE_SIZE", value)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("panicked").not())
            .stderr(predicate::str::contains("Configuration error"));
    }
    assert!(!tmp.path().join("qr_codes").exists());
}

#[test]
fn oversized_module_size_in_config_file_is_rejected() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("urlqr.toml"), "[render]\nmodule_size = 4294967295\n").unwrap();

    urlqr(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn unknown_log_rotation_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();

    urlqr(tmp.path())
        .env("URLQR_LOG_ROTATION", "weekly")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown log rotation"));
}

#[test]
fn log_file_receives_save_message() {
    let tmp = TempDir::new().unwrap();

    urlqr(tmp.path())
        .env("URLQR_LOG_FILE", "logs/urlqr.log")
        .assert()
        .success();

    let contents = std::fs::read_to_string(tmp.path().join("logs").join("urlqr.log")).unwrap();
    assert!(contents.contains("QR code saved to"));
}

#[test]
fn unknown_color_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();

    urlqr(tmp.path())
        .env("FILL_COLOR", "not-a-color")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown color"));
}
