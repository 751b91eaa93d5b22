use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run trustctl with the trust dir pinned inside the temp dir.
fn trustctl(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("trustctl");
    cmd.env("HOME", dir.path())
        .args(["--trust-dir", dir.path().join("trust").to_str().unwrap()]);
    cmd
}

/// Write a certificate PEM with the given validity window and return
/// its path.
fn write_cert(dir: &assert_fs::TempDir, name: &str, not_before: &str, not_after: &str) -> String {
    // pem's HeaderMap::add rejects values containing ':', which every
    // RFC 3339 timestamp does, so splice the header lines in manually.
    let block = pem::Pem::new("PUBLIC KEY CERTIFICATE", b"delegate key material".to_vec());
    let body = pem::encode(&block);
    let (begin, rest) = body.split_once("\r\n").unwrap();
    let content =
        format!("{begin}\r\nNot-Before: {not_before}\r\nNot-After: {not_after}\r\n\r\n{rest}");

    let child = dir.child(name);
    child.write_str(&content).unwrap();
    child.path().to_str().unwrap().to_string()
}

fn write_valid_cert(dir: &assert_fs::TempDir) -> String {
    write_cert(dir, "delegate.pem", "2020-01-01T00:00:00Z", "2099-01-01T00:00:00Z")
}

#[test]
fn add_with_too_few_arguments_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    trustctl(&dir)
        .args(["delegation", "add", "my-gun", "cert.pem", "targets/releases"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must specify the Global Unique Name"));
}

#[test]
fn add_with_missing_certificate_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    trustctl(&dir)
        .args([
            "delegation",
            "add",
            "my-gun",
            "/no/such/cert.pem",
            "targets/releases",
            "release/*",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Certificate file not found"));
}

#[test]
fn add_with_garbage_certificate_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    let cert = dir.child("garbage.pem");
    cert.write_str("this is not a pem block").unwrap();

    trustctl(&dir)
        .args([
            "delegation",
            "add",
            "my-gun",
            cert.path().to_str().unwrap(),
            "targets/releases",
            "release/*",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to parse"));
}

#[test]
fn add_with_far_expired_certificate_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    // Valid from year 1 for a single day.
    let cert = write_cert(
        &dir,
        "expired.pem",
        "0001-01-01T00:00:00Z",
        "0001-01-02T00:00:00Z",
    );

    trustctl(&dir)
        .args([
            "delegation",
            "add",
            "my-gun",
            &cert,
            "targets/releases",
            "release/*",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside its validity window"));
}

#[test]
fn add_with_role_outside_namespace_fails_and_stages_nothing() {
    let dir = assert_fs::TempDir::new().unwrap();
    let cert = write_valid_cert(&dir);

    trustctl(&dir)
        .args(["delegation", "add", "my-gun", &cert, "releases", "release/*"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid delegation role name"));

    // Validation failed before the mutator ran, so no changelist entry
    // may exist.
    let changelist = dir.path().join("trust").join("my-gun").join("changelist");
    assert!(
        !changelist.exists() || std::fs::read_dir(&changelist).unwrap().next().is_none(),
        "invalid request must not stage a change"
    );
}

#[test]
fn add_stages_a_delegation_for_next_publish() {
    let dir = assert_fs::TempDir::new().unwrap();
    let cert = write_valid_cert(&dir);

    trustctl(&dir)
        .args([
            "delegation",
            "add",
            "my-gun",
            &cert,
            "targets/releases",
            "release/*",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("staged for next publish"))
        .stdout(predicate::str::contains("targets/releases"));

    let entry = dir
        .path()
        .join("trust")
        .join("my-gun")
        .join("changelist")
        .join("000000.json");
    let change: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(entry).unwrap()).unwrap();
    assert_eq!(change["action"], "add");
    assert_eq!(change["role"], "targets/releases");
    assert_eq!(change["threshold"], 1);
    assert_eq!(change["paths"][0], "release/*");
    assert_eq!(change["key_ids"].as_array().unwrap().len(), 1);
    assert_eq!(change["key_ids"][0].as_str().unwrap().len(), 64);
}

#[test]
fn remove_with_wrong_arity_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    trustctl(&dir)
        .args(["delegation", "remove", "my-gun", "abc123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must specify the Global Unique Name"));
}

#[test]
fn remove_with_invalid_role_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    trustctl(&dir)
        .args(["delegation", "remove", "my-gun", "abc123", "INVALID_ROLE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid delegation role name"));
}

#[test]
fn remove_of_a_staged_role_requires_publish_first() {
    let dir = assert_fs::TempDir::new().unwrap();
    let cert = write_valid_cert(&dir);

    trustctl(&dir)
        .args([
            "delegation",
            "add",
            "my-gun",
            &cert,
            "targets/releases",
            "release/*",
        ])
        .assert()
        .success();

    trustctl(&dir)
        .args([
            "delegation",
            "remove",
            "my-gun",
            "abc123",
            "targets/releases",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already staged"));
}

#[test]
fn remove_of_unknown_role_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    trustctl(&dir)
        .args([
            "delegation",
            "remove",
            "my-gun",
            "abc123",
            "targets/ghost",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no delegation role"));
}
