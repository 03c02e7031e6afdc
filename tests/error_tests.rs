//! Error handling integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn dream_synth(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dream-synth").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("ENVIRONMENT")
        .env_remove("DREAM_SYNTH_LOCALE")
        .env_remove("GROQ_API_KEY")
        .env_remove("CLIPDROP_API_KEY")
        .env_remove("MISTRAL_API_KEY");
    cmd
}

fn write_dream_audio(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("dream.wav");
    std::fs::write(&path, b"RIFF\x24\x00\x00\x00WAVEfmt ").unwrap();
    path
}

#[test]
fn unsupported_audio_format_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    dream_synth(dir.path())
        .args(["run", "notes.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("notes.txt"));
}

#[test]
fn missing_audio_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    dream_synth(dir.path())
        .args(["run"])
        .arg(dir.path().join("missing.mp3"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.mp3"));
}

#[test]
fn production_flag_without_keys_fails() {
    let dir = tempfile::tempdir().unwrap();
    let audio = write_dream_audio(dir.path());

    dream_synth(dir.path())
        .args(["--production", "run"])
        .arg(&audio)
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Groq API key is not configured in production"));
}

#[test]
fn production_environment_without_keys_fails() {
    let dir = tempfile::tempdir().unwrap();

    dream_synth(dir.path())
        .env("ENVIRONMENT", "production")
        .arg("session")
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not configured in production"));
}

#[test]
fn production_reports_the_first_missing_provider() {
    let dir = tempfile::tempdir().unwrap();

    dream_synth(dir.path())
        .env("GROQ_API_KEY", "test-groq")
        .args(["--production", "session"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Clipdrop API key is not configured in production"));
}

#[test]
fn development_without_key_and_empty_answer_aborts() {
    let dir = tempfile::tempdir().unwrap();

    dream_synth(dir.path())
        .arg("session")
        .write_stdin("\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GROQ_API_KEY"))
        .stderr(predicate::str::contains("No Groq API key provided"));
}

#[test]
fn secrets_file_satisfies_production() {
    let dir = tempfile::tempdir().unwrap();
    let secrets = dir.path().join("secrets.toml");
    std::fs::write(
        &secrets,
        "groq = \"g\"\nclipdrop = \"c\"\nmistral = \"m\"\n",
    )
    .unwrap();

    dream_synth(dir.path())
        .args(["config", "set", "secrets_path"])
        .arg(&secrets)
        .assert()
        .success();

    dream_synth(dir.path())
        .args(["--production", "session"])
        .write_stdin("quit\n")
        .assert()
        .success();
}

#[test]
fn config_get_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    dream_synth(dir.path())
        .args(["config", "get", "api_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    dream_synth(dir.path())
        .args(["config", "set", "theme", "dark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_rejects_unsupported_locale() {
    let dir = tempfile::tempdir().unwrap();
    dream_synth(dir.path())
        .args(["config", "set", "locale", "de"])
        .assert()
        .failure();
}

#[test]
fn config_set_rejects_bad_duration() {
    let dir = tempfile::tempdir().unwrap();
    dream_synth(dir.path())
        .args(["config", "set", "request_timeout", "forever"])
        .assert()
        .failure();
}

#[test]
fn config_init_twice_fails() {
    let dir = tempfile::tempdir().unwrap();
    dream_synth(dir.path())
        .args(["config", "init"])
        .assert()
        .success();

    dream_synth(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn invalid_locale_flag() {
    let dir = tempfile::tempdir().unwrap();
    dream_synth(dir.path())
        .args(["--locale", "de", "session"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn development_keys_can_be_piped_in() {
    let dir = tempfile::tempdir().unwrap();

    dream_synth(dir.path())
        .arg("session")
        .write_stdin("groq-key\nclipdrop-key\nmistral-key\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("MISTRAL_API_KEY"));
}
