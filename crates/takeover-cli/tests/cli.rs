//! Binary-level tests for `cnamecheck`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cnamecheck() -> Command {
    let mut cmd = Command::cargo_bin("cnamecheck").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("CNAMECHECK_CONFIG");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn missing_arguments_is_a_usage_error() {
    cnamecheck()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_patterns_argument_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let subs = write(dir.path(), "subs.txt", "a.example.com\n");

    cnamecheck().arg(&subs).assert().failure().code(2);
}

#[test]
fn unreadable_subdomain_file_names_the_file() {
    let dir = TempDir::new().unwrap();
    let patterns = write(dir.path(), "patterns.txt", "amazonaws.com\n");
    let config = write(dir.path(), "config.toml", "");

    cnamecheck()
        .arg(dir.path().join("no-such-subdomains.txt"))
        .arg(&patterns)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no-such-subdomains.txt"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let subs = write(dir.path(), "subs.txt", "a.example.com\n");
    let patterns = write(dir.path(), "patterns.txt", "amazonaws.com\n");
    let config = write(dir.path(), "config.toml", "resolver = \"nslookup\"\n");

    cnamecheck()
        .arg(&subs)
        .arg(&patterns)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn zero_timeout_flag_is_rejected() {
    let dir = TempDir::new().unwrap();
    let subs = write(dir.path(), "subs.txt", "a.example.com\n");
    let patterns = write(dir.path(), "patterns.txt", "amazonaws.com\n");
    let config = write(dir.path(), "config.toml", "");

    cnamecheck()
        .arg(&subs)
        .arg(&patterns)
        .arg("--config")
        .arg(&config)
        .args(["-t", "0"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("timeout must be at least 1 second"));
}

#[test]
fn empty_subdomain_list_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let subs = write(dir.path(), "subs.txt", "\n   \n");
    let patterns = write(dir.path(), "patterns.txt", "amazonaws.com\n");
    let config = write(dir.path(), "config.toml", "");

    cnamecheck()
        .arg(&subs)
        .arg(&patterns)
        .args(["--config"])
        .arg(&config)
        .args(["-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[cfg(unix)]
mod with_fake_dig {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    const FAKE_DIG: &str = r#"#!/bin/sh
for last; do :; done
case "$last" in
  shop.example.com)
    printf ';; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 1\n'
    printf 'shop.example.com.\t300\tIN\tCNAME\tshop-example.myshopify.com.\n'
    ;;
  www.example.com)
    printf ';; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 2\n'
    printf 'www.example.com.\t300\tIN\tCNAME\tedge.safe-cdn.net.\n'
    ;;
  gone.example.com)
    printf ';; ->>HEADER<<- opcode: QUERY, status: NXDOMAIN, id: 3\n'
    ;;
  broken.example.com)
    printf ';; connection timed out; no servers could be reached\n'
    exit 9
    ;;
  *)
    printf ';; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 4\n'
    ;;
esac
"#;

    fn setup(subdomains: &str) -> (TempDir, std::path::PathBuf, std::path::PathBuf, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let dig = write(dir.path(), "fake-dig", FAKE_DIG);
        fs::set_permissions(&dig, fs::Permissions::from_mode(0o755)).unwrap();

        let config = write(
            dir.path(),
            "config.toml",
            &format!("resolver = \"dig\"\ndig_path = \"{}\"\n", dig.display()),
        );
        let subs = write(dir.path(), "subs.txt", subdomains);
        let patterns = write(dir.path(), "patterns.txt", "myshopify.com\namazonaws.com\n");
        (dir, config, subs, patterns)
    }

    #[test]
    fn scan_reports_and_writes_filtered_file() {
        let (dir, config, subs, patterns) =
            setup("shop.example.com\nwww.example.com\n\ngone.example.com\nplain.example.com\n");
        let results = dir.path().join("vulnerable.txt");

        cnamecheck()
            .arg(&subs)
            .arg(&patterns)
            .arg(&results)
            .arg("--config")
            .arg(&config)
            .args(["-o", "plain", "-c", "1"])
            .assert()
            .success()
            .stdout(
                "Subdomain: shop.example.com, CNAME: shop-example.myshopify.com., Vulnerable: Yes\n\
                 Subdomain: www.example.com, CNAME: edge.safe-cdn.net., Vulnerable: No\n\
                 Subdomain: gone.example.com, CNAME: NXDOMAIN, Vulnerable: No\n\
                 Subdomain: plain.example.com, CNAME: No CNAME record, Vulnerable: No\n",
            );

        let filtered = fs::read_to_string(&results).unwrap();
        assert_eq!(
            filtered,
            "Subdomain: shop.example.com, CNAME: shop-example.myshopify.com., Vulnerable: Yes\n"
        );
    }

    #[test]
    fn failed_query_aborts_by_default() {
        let (_dir, config, subs, patterns) = setup("shop.example.com\nbroken.example.com\n");

        cnamecheck()
            .arg(&subs)
            .arg(&patterns)
            .arg("--config")
            .arg(&config)
            .args(["-o", "plain"])
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("broken.example.com"));
    }

    #[test]
    fn keep_going_records_failed_query() {
        let (_dir, config, subs, patterns) = setup("shop.example.com\nbroken.example.com\n");

        cnamecheck()
            .arg(&subs)
            .arg(&patterns)
            .arg("--config")
            .arg(&config)
            .args(["-o", "json", "--keep-going"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"QUERY_ERROR\""))
            .stdout(predicate::str::contains("\"vulnerable\": 1"));
    }
}
