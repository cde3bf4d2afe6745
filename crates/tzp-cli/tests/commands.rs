//! # Subcommand Tests
//!
//! Drives the subcommand handlers against the repository's sample catalog
//! in a temporary directory and checks files and exit codes.

use std::path::PathBuf;

use tzp_cli::config::Config;
use tzp_cli::generate::{run_generate, GenerateArgs};
use tzp_cli::inspect::{run_inspect, InspectArgs};
use tzp_cli::verify::{run_verify, VerifyArgs};

fn sample_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/catalog.yaml")
}

fn generate_args(out: PathBuf) -> GenerateArgs {
    GenerateArgs {
        catalog: Some(sample_catalog()),
        out: Some(out),
        ..GenerateArgs::default()
    }
}

#[test]
fn generate_then_check() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/table.bin");
    let args = generate_args(out.clone());

    assert_eq!(run_generate(&args, &Config::default()).unwrap(), 0);
    let first = std::fs::read(&out).unwrap();
    assert!(!first.is_empty());

    let check = GenerateArgs {
        check: true,
        no_parallel: true,
        ..args.clone()
    };
    assert_eq!(run_generate(&check, &Config::default()).unwrap(), 0);

    // A narrower selection no longer matches the file.
    let narrower = GenerateArgs {
        locales: Some("en*".to_string()),
        ..check
    };
    assert_eq!(run_generate(&narrower, &Config::default()).unwrap(), 1);
    assert_eq!(std::fs::read(&out).unwrap(), first, "check never writes");
}

#[test]
fn check_without_table_fails() {
    let dir = tempfile::tempdir().unwrap();
    let args = GenerateArgs {
        check: true,
        ..generate_args(dir.path().join("missing.bin"))
    };
    assert_eq!(run_generate(&args, &Config::default()).unwrap(), 1);
}

#[test]
fn comments_file_written() {
    let dir = tempfile::tempdir().unwrap();
    let comments = dir.path().join("table.txt");
    let args = GenerateArgs {
        comments: Some(comments.clone()),
        zones: Some("UTC".to_string()),
        ..generate_args(dir.path().join("table.bin"))
    };
    assert_eq!(run_generate(&args, &Config::default()).unwrap(), 0);
    let text = std::fs::read_to_string(&comments).unwrap();
    assert!(text.starts_with("// Timezone ids: 1, locales: 8\n// UTC\n"), "{text}");
}

#[test]
fn generate_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("tzp.yaml");
    std::fs::write(
        &config_path,
        format!(
            "catalog: {}\nlocales: 'fr*'\nout: build/table.bin\nparallel: false\n",
            sample_catalog().display()
        ),
    )
    .unwrap();
    let config = Config::load(&config_path).unwrap();

    assert_eq!(run_generate(&GenerateArgs::default(), &config).unwrap(), 0);
    assert!(dir.path().join("build/table.bin").exists());

    let verify = VerifyArgs {
        table: dir.path().join("build/table.bin"),
        ..VerifyArgs::default()
    };
    assert_eq!(run_verify(&verify, &config).unwrap(), 0);
}

#[test]
fn verify_detects_other_selection() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("table.bin");
    let args = GenerateArgs {
        zones: Some("Europe/*".to_string()),
        ..generate_args(out.clone())
    };
    assert_eq!(run_generate(&args, &Config::default()).unwrap(), 0);

    let verify = VerifyArgs {
        table: out,
        catalog: Some(sample_catalog()),
        zones: Some("Europe/*,UTC".to_string()),
        locales: None,
    };
    assert_eq!(run_verify(&verify, &Config::default()).unwrap(), 1);
}

#[test]
fn inspect_generated_table() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("table.bin");
    assert_eq!(run_generate(&generate_args(out.clone()), &Config::default()).unwrap(), 0);

    for json in [false, true] {
        let args = InspectArgs {
            table: out.clone(),
            json,
        };
        assert_eq!(run_inspect(&args).unwrap(), 0);
    }
}

#[test]
fn inspect_rejects_truncated_table() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("table.bin");
    assert_eq!(run_generate(&generate_args(out.clone()), &Config::default()).unwrap(), 0);
    let bytes = std::fs::read(&out).unwrap();
    std::fs::write(&out, &bytes[..bytes.len() / 2]).unwrap();

    let err = run_inspect(&InspectArgs { table: out, json: false }).unwrap_err();
    assert!(format!("{err:#}").contains("unexpected end of data"), "{err:#}");
}

#[test]
fn unknown_filter_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = GenerateArgs {
        locales: Some("xx*".to_string()),
        ..generate_args(dir.path().join("table.bin"))
    };
    let err = run_generate(&args, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("\"xx*\""), "{err}");
}
