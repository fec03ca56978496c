use std::fs;
use std::process::{Command, Output};

use temp_dir::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_posting-index"))
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("Could not run posting-index")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_build_serialize_top_k() {
    let dir = TempDir::new().expect("Could not create temporary directory");
    let documents = dir.path().join("documents.txt");
    let text = dir.path().join("index.txt");
    let binary = dir.path().join("index.dat");
    fs::write(&documents, "1 2\n1\n1\n").unwrap();

    let output = run(&["build", documents.to_str().unwrap(), "2"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "2\n2\n1 0 1 2\n2 0\n");
    fs::write(&text, &output.stdout).unwrap();

    let output = run(&["serialize", text.to_str().unwrap(), binary.to_str().unwrap()]);
    assert!(output.status.success());

    for extra in [None, Some("--stream")] {
        let mut args = vec!["top-k", binary.to_str().unwrap(), "1"];
        args.extend(extra);
        let output = run(&args);
        assert!(output.status.success());
        assert_eq!(stdout(&output), "1: 3\n");
    }

    let output = run(&["dump", binary.to_str().unwrap()]);
    assert_eq!(stdout(&output), "2\n2\n1 0 1 2\n2 0\n");

    let output = run(&["documents", binary.to_str().unwrap()]);
    assert_eq!(stdout(&output), "1 2\n1\n1\n");
}

#[test]
fn test_exit_codes() {
    let dir = TempDir::new().expect("Could not create temporary directory");
    let documents = dir.path().join("documents.txt");
    let binary = dir.path().join("index.dat");
    fs::write(&documents, "1 5\n").unwrap();

    // Missing arguments
    assert_eq!(run(&["top-k"]).status.code(), Some(2));

    // Malformed term
    let output = run(&["build", documents.to_str().unwrap(), "3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("document 0"));

    let output = run(&[
        "build",
        documents.to_str().unwrap(),
        "--format",
        "binary",
        "--output",
        binary.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    // k = 0
    assert_eq!(run(&["top-k", binary.to_str().unwrap(), "0"]).status.code(), Some(2));

    // Truncated artifact
    let data = fs::read(&binary).unwrap();
    fs::write(&binary, &data[..data.len() - 1]).unwrap();
    let output = run(&["top-k", binary.to_str().unwrap(), "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("truncated"));
}

#[test]
fn test_stats() {
    let dir = TempDir::new().expect("Could not create temporary directory");
    let documents = dir.path().join("documents.txt");
    let binary = dir.path().join("index.dat");
    fs::write(&documents, "1 2\n1\n1\n").unwrap();

    let output = run(&[
        "build",
        documents.to_str().unwrap(),
        "-f",
        "binary",
        "-o",
        binary.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let output = run(&["stats", binary.to_str().unwrap()]);
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["universe_size"], 2);
    assert_eq!(stats["num_lists"], 2);
    assert_eq!(stats["total_entries"], 4);
    assert_eq!(stats["min_list_size"], 1);
    assert_eq!(stats["max_list_size"], 3);
    assert_eq!(stats["documents"], 3);
    assert_eq!(stats["bytes"], 40);
}

#[test]
fn test_remap() {
    let dir = TempDir::new().expect("Could not create temporary directory");
    let input = dir.path().join("lists.txt");
    fs::write(&input, "10: x y\n11: y z x\n").unwrap();

    let output = run(&["remap", input.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "10: 0 1\n11: 1 2 0\n");
}

#[test]
fn test_sorted_serialize_and_documents() {
    let dir = TempDir::new().expect("Could not create temporary directory");
    let text = dir.path().join("index.txt");
    let binary = dir.path().join("index.dat");
    fs::write(&text, "2\n1\n1 2 0\n").unwrap();

    let output = run(&["serialize", text.to_str().unwrap(), binary.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let output = run(&[
        "serialize",
        "--sort",
        text.to_str().unwrap(),
        binary.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let output = run(&["documents", "--num-documents", "4", binary.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1\n\n1\n\n");

    let output = run(&["documents", "--num-documents", "2", binary.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}
