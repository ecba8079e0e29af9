//! Integration tests for the lcdb-test-data CLI

use std::process::Command;

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lcdb-test-data"));
    // Keep the developer's own settings out of the tests
    for var in [
        "LCDB_CONDA",
        "LCDB_PYTHON",
        "LCDB_CHANNELS",
        "LCDB_RUNNER",
        "LCDB_COLOR",
        "LCDB_MANIFEST",
        "LCDB_SNAKEFILE",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_version() {
    let output = cli()
        .arg("--version")
        .output()
        .expect("Failed to execute lcdb-test-data");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lcdb-test-data"));
}

#[test]
fn test_cli_help() {
    let output = cli()
        .arg("--help")
        .output()
        .expect("Failed to execute lcdb-test-data");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FASTA, FASTQ, BAM, GTF"));
    assert!(stdout.contains("Extra arguments are sent to Snakemake"));
    assert!(stdout.contains("DATA_DIR"));
}

#[test]
fn test_missing_data_dir() {
    let output = cli()
        .output()
        .expect("Failed to execute lcdb-test-data");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DATA_DIR"));
}

#[test]
fn test_missing_config_file_exits_1() {
    let scratch = tempfile::tempdir().unwrap();
    let output = cli()
        .arg("--config")
        .arg(scratch.path().join("absent.toml"))
        .arg(scratch.path().join("data"))
        .output()
        .expect("Failed to execute lcdb-test-data");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Configuration error").count(), 1, "{stderr}");
    assert!(stderr.contains("Error: Configuration error"));
    assert!(!scratch.path().join("data").exists());
}

#[test]
fn test_unreachable_conda_exits_1() {
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("data");
    let output = cli()
        .env("LCDB_CONDA", scratch.path().join("no-such-conda"))
        .env("LCDB_COLOR", "never")
        .arg(&target)
        .arg("-n")
        .output()
        .expect("Failed to execute lcdb-test-data");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Creating"));
    assert_eq!(stderr.matches("failed to spawn").count(), 1, "{stderr}");
    assert_eq!(stderr.matches("CMDS: ").count(), 1, "{stderr}");

    // Directory and manifest are left behind, the environment is not marked
    assert!(target.join("requirements.txt").is_file());
    assert!(target.join(".conda-env").is_dir());
    assert!(!target.join("Snakefile").exists());
}

#[cfg(unix)]
#[test]
fn test_conda_stderr_reaches_stdout_and_failure_prints_once() {
    use std::os::unix::fs::PermissionsExt;

    let scratch = tempfile::tempdir().unwrap();
    let conda = scratch.path().join("fake-conda");
    std::fs::write(
        &conda,
        "#!/bin/sh\necho 'Collecting package metadata' >&2\necho 'Solving environment'\necho 'PackagesNotFoundError' >&2\nexit 4\n",
    )
    .unwrap();
    std::fs::set_permissions(&conda, std::fs::Permissions::from_mode(0o755)).unwrap();

    let output = cli()
        .env("LCDB_CONDA", &conda)
        .env("LCDB_COLOR", "never")
        .arg(scratch.path().join("data"))
        .output()
        .expect("Failed to execute lcdb-test-data");

    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "Collecting package metadata",
            "Solving environment",
            "PackagesNotFoundError"
        ]
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("exited with status 4").count(), 1, "{stderr}");
    assert_eq!(stderr.matches("CMDS: ").count(), 1, "{stderr}");
    assert!(!stderr.contains("PackagesNotFoundError"));
}
