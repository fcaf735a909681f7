use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

fn asmdeps() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_asmdeps"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_target_prints_one_line_and_writes_nothing() {
    let dir = tempfile::TempDir::new().unwrap();

    let output = asmdeps()
        .args(["-o", "missing.dll"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Could not load target module.\n"
    );
    assert!(!dir.path().join("Results.xml").exists());
}

#[test]
fn prompted_path_is_stripped_of_line_endings() {
    let dir = tempfile::TempDir::new().unwrap();

    let mut child = asmdeps()
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"missing.dll\r\n\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Enter path to target module:\nCould not load target module.\nPress Enter to exit.\n"
    );
}

#[test]
fn output_flag_writes_utf16_results_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let bin = dir.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    let target = bin.join("app");
    fs::copy(std::env::current_exe().unwrap(), &target).unwrap();

    let output = asmdeps()
        .arg(&target)
        .arg("-o")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(" assemblies\n"));

    let bytes = fs::read(dir.path().join("Results.xml")).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
    let units: Vec<u16> = bytes[2..]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let document = String::from_utf16(&units).unwrap();
    assert!(document.starts_with(r#"<?xml version="1.0" encoding="utf-16"?>"#));
    assert!(document.contains("<Assemblies>"));
    assert!(document.ends_with("</Assemblies>"));
}
