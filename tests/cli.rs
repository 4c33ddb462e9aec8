use assert_cmd::Command;
use std::path::{Path, PathBuf};

fn copy_fixture(dir: &Path, file: &str) -> PathBuf {
    let src = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(file);
    let dst = dir.join(file);
    std::fs::copy(src, &dst).unwrap();
    dst
}

#[test]
fn test_version_flag() {
    for flag in ["-v", "--version"] {
        let mut cmd = Command::cargo_bin("struct2seq").unwrap();
        cmd.arg(flag).assert().success().stdout("0.9.0\n");
    }
}

#[test]
fn test_missing_arguments() {
    let mut cmd = Command::cargo_bin("struct2seq").unwrap();
    cmd.assert().failure();
}

#[test]
fn test_single_pdb() {
    let dir = tempfile::tempdir().unwrap();
    let input = copy_fixture(dir.path(), "test.pdb");

    let mut cmd = Command::cargo_bin("struct2seq").unwrap();
    cmd.arg(&input).assert().success().stdout("").stderr("");

    let description =
        "| synthetic tetrapeptide for sequence extraction | homo sapiens | Resolution 2.00 A";
    let chains = std::fs::read_to_string(dir.path().join("test_chains.fasta")).unwrap();
    let peptides = std::fs::read_to_string(dir.path().join("test_peptides.fasta")).unwrap();
    assert_eq!(chains, format!(">test.0_A {description}\nACDE\n"));
    assert_eq!(peptides, format!(">test.0_A.0 {description}\nACDE\n"));
}

#[test]
fn test_batch_with_unsupported_file() {
    let dir = tempfile::tempdir().unwrap();
    let bad = copy_fixture(dir.path(), "not_a_structure.txt");
    let broken = copy_fixture(dir.path(), "broken.pdb");
    let cif = copy_fixture(dir.path(), "test_cif.cif");

    let output = Command::cargo_bin("struct2seq")
        .unwrap()
        .arg(&bad)
        .arg(&broken)
        .arg(&cif)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stderr).unwrap(),
        format!(
            "ERROR: File {} is not a proper/supported protein structure file.\n",
            bad.display()
        )
    );

    assert!(!dir.path().join("not_a_structure_chains.fasta").exists());
    assert!(!dir.path().join("not_a_structure_peptides.fasta").exists());

    let peptides = std::fs::read_to_string(dir.path().join("broken_peptides.fasta")).unwrap();
    let ids: Vec<&str> = peptides
        .lines()
        .filter_map(|l| l.strip_prefix('>'))
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(ids, vec!["broken.0_A.0", "broken.0_A.1", "broken.0_B.0"]);

    let chains = std::fs::read_to_string(dir.path().join("broken_chains.fasta")).unwrap();
    assert!(chains.contains(">broken.0_A | broken chain |  | Resolution -1.00 A\nACDE\n"));

    let cif_chains = std::fs::read_to_string(dir.path().join("test_cif_chains.fasta")).unwrap();
    assert_eq!(
        cif_chains,
        ">test_cif.0_A | Synthetic tetrapeptide | Homo sapiens | Resolution 1.50 A\nACDE\n"
    );
}

#[test]
fn test_write_failure_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let first = copy_fixture(dir.path(), "test.pdb");
    let second = copy_fixture(dir.path(), "nmr.pdb");
    let blocked = dir.path().join("test_chains.fasta");
    std::fs::create_dir(&blocked).unwrap();

    let output = Command::cargo_bin("struct2seq")
        .unwrap()
        .arg(&first)
        .arg(&second)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains(&format!("ERROR: Failed to write '{}'", blocked.display())),
        "Unexpected stderr: {stderr}"
    );
    assert!(!dir.path().join("nmr_chains.fasta").exists());
    assert!(!dir.path().join("nmr_peptides.fasta").exists());
}

#[test]
fn test_pdb_without_element_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = copy_fixture(dir.path(), "no_element.pdb");

    Command::cargo_bin("struct2seq")
        .unwrap()
        .arg(&input)
        .assert()
        .success();

    let chains = std::fs::read_to_string(dir.path().join("no_element_chains.fasta")).unwrap();
    assert!(chains.starts_with(">no_element.0_A | synthetic tetrapeptide"));
    assert!(chains.ends_with("\nACDE\n"));
}

#[test]
fn test_output_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let input = copy_fixture(dir.path(), "nmr.pdb");
    let outputs = ["nmr_chains.fasta", "nmr_peptides.fasta"];

    Command::cargo_bin("struct2seq")
        .unwrap()
        .arg(&input)
        .assert()
        .success();
    let first: Vec<Vec<u8>> = outputs
        .iter()
        .map(|f| std::fs::read(dir.path().join(f)).unwrap())
        .collect();

    Command::cargo_bin("struct2seq")
        .unwrap()
        .arg(&input)
        .assert()
        .success();
    let second: Vec<Vec<u8>> = outputs
        .iter()
        .map(|f| std::fs::read(dir.path().join(f)).unwrap())
        .collect();

    assert_eq!(first, second);
}
