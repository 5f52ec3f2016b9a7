use assert_cmd::Command;
use predicates::prelude::*;

/// The binary with its config directory pointed at an empty temp dir.
fn steno_format(config_home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("steno-format").unwrap();
    cmd.env("STENO_FORMAT_CONFIG_DIR", config_home.path())
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_translations_are_printed_as_instructions() {
    let dir = tempfile::tempdir().unwrap();
    steno_format(&dir)
        .write_stdin(concat!(
            "{\"strokes\": [\"TEFT\"], \"english\": \"test\"}\n",
            "{\"strokes\": [\"-G\"], \"english\": \"{^ing}\"}\n",
            "*\n",
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains("string \" test\""))
        .stdout(predicate::str::contains("string \"ing\""))
        .stdout(predicate::str::contains("backspace 3"));
}

#[test]
fn test_key_combination_is_expanded() {
    let dir = tempfile::tempdir().unwrap();
    steno_format(&dir)
        .write_stdin("{\"strokes\": [\"KPA\"], \"english\": \"{#shift(a)}\"}\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("combo shift(a) => +shift +a -a -shift"));
}

#[test]
fn test_reset_and_malformed_lines() {
    let dir = tempfile::tempdir().unwrap();
    steno_format(&dir)
        .write_stdin(concat!(
            "not json\n",
            "{\"strokes\": [\"1\"]}\n",
            "!reset\n",
            "{\"strokes\": [\"9\"]}\n",
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains("string \" 1\""))
        .stdout(predicate::str::contains("string \" 9\""))
        .stdout(predicate::str::contains("not json").not());
}

#[test]
fn test_settings_file_is_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.toml");
    std::fs::write(
        &settings,
        "[formatter]\nstart_capitalized = true\nstart_attached = true\n",
    )
    .unwrap();

    steno_format(&dir)
        .write_stdin("{\"strokes\": [\"HEL\"], \"english\": \"hello\"}\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("string \"Hello\""));
}
