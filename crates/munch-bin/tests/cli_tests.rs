use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

use pretty_assertions::assert_eq;

// one scratch directory per test so parallel tests never share files
fn scratch(test: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("munch-cli-{}-{}", std::process::id(), test));
    fs::create_dir_all(&dir).expect("create scratch dir");
    for (name, contents) in files {
        fs::write(dir.join(name), contents).expect("write scratch file");
    }
    dir
}

fn munch(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_munch"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run munch")
}

#[test]
fn prints_tokens_and_reports_lexical_errors() {
    let dir = scratch(
        "tokens",
        &[
            ("grammar.txt", "KEYWORD -> if\nDELIMITER -> ;\nOPERATOR -> =\nOPERATOR -> ==\n"),
            ("source.txt", "if;\n#==\n"),
        ],
    );
    let output = munch(&[dir.join("grammar.txt").as_os_str(), dir.join("source.txt").as_os_str()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "1\tKEYWORD\tif\n1\tDELIMITER\t;\n2\tOPERATOR\t==\n"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2, column 1"), "stderr was: {stderr}");
}

#[test]
fn dump_table_goes_to_stderr() {
    let dir = scratch("dump", &[("grammar.txt", "DELIMITER -> ;\n"), ("source.txt", ";\n")]);
    let output = munch(&[
        dir.join("grammar.txt").as_os_str(),
        dir.join("source.txt").as_os_str(),
        "--dump-table".as_ref(),
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\tDELIMITER\t;\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("state 1 [accept, DELIMITER]"), "stderr was: {stderr}");
}

#[test]
fn first_declared_flag_changes_winner() {
    let dir = scratch(
        "tie-break",
        &[("grammar.txt", "IDENTIFIER -> if\nKEYWORD -> if\n"), ("source.txt", "if\n")],
    );
    let output = munch(&[
        dir.join("grammar.txt").as_os_str(),
        dir.join("source.txt").as_os_str(),
        "--tie-break".as_ref(),
        "first-declared".as_ref(),
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\tIDENTIFIER\tif\n");
}

#[test]
fn missing_file_fails() {
    let dir = scratch("missing", &[("grammar.txt", "KEYWORD -> if\n")]);
    let output = munch(&[dir.join("grammar.txt").as_os_str(), dir.join("absent.txt").as_os_str()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot read source file"), "stderr was: {stderr}");
}

#[test]
fn missing_grammar_is_reported_before_source() {
    let dir = scratch("missing-grammar", &[]);
    let output = munch(&[dir.join("no-grammar.txt").as_os_str(), dir.join("no-source.txt").as_os_str()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot read grammar file"), "stderr was: {stderr}");
    assert!(!stderr.contains("cannot read source file"), "stderr was: {stderr}");
}

#[test]
fn invalid_utf8_becomes_lexical_errors() {
    let dir = scratch("invalid-utf8", &[]);
    // the grammar's second line has no arrow and is dropped
    fs::write(dir.join("grammar.txt"), b"DELIMITER -> ;\n\xff\n").expect("write grammar");
    fs::write(dir.join("source.txt"), b"\xe9;\n").expect("write source");
    let output = munch(&[dir.join("grammar.txt").as_os_str(), dir.join("source.txt").as_os_str()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\tDELIMITER\t;\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 1, column 1"), "stderr was: {stderr}");
}

#[test]
fn dot_goes_to_stderr() {
    let dir = scratch("dot", &[("grammar.txt", "DELIMITER -> ;\n"), ("source.txt", ";\n")]);
    let output = munch(&[
        dir.join("grammar.txt").as_os_str(),
        dir.join("source.txt").as_os_str(),
        "--dot".as_ref(),
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\tDELIMITER\t;\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("digraph"), "stderr was: {stderr}");
}

#[test]
fn wrong_argument_count_fails() {
    let output = munch(&["only-one.txt".as_ref()]);
    assert_eq!(output.status.code(), Some(1));
}
