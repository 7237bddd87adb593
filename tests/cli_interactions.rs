//! End-to-end CLI tests
//!
//! Every test runs the binary inside a temporary working directory with a
//! stub ping script standing in for the system utility, so no real network
//! probing takes place.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const STUB_PING: &str = r#"#!/bin/sh
# invoked as: <stub> -c <count> -- <host>
[ "$3" = "--" ] || exit 64
echo "$4 $2" >> "$(dirname "$0")/calls"
case "$4" in
  host1) avg=5.000 ;;
  host2) avg=1.000 ;;
  host3) avg=3.000 ;;
  down.example) echo "1 packets transmitted, 0 received, 100% packet loss"; exit 1 ;;
  bogus.example) echo "ping: bogus.example: Name or service not known" >&2; exit 2 ;;
  -*) echo "option-looking host reached the stub as an operand"; exit 1 ;;
  *) exit 68 ;;
esac
echo "PING $4 56(84) bytes of data."
echo "rtt min/avg/max/mdev = 0.500/$avg/9.000/0.100 ms"
"#;

const ENV_VARS: &[&str] = &[
    "VPN_LIST_URL",
    "VPN_LIST_SELECTOR",
    "VPN_CACHE_FILE",
    "CACHE_MAX_AGE_DAYS",
    "PING_COUNT",
    "PING_COMMAND",
    "PING_JOBS",
    "FETCH_TIMEOUT_SECONDS",
    "ENABLE_COLOR",
];

/// Temporary working directory with a stub ping and a cache file
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(hosts: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();
        let stub = dir.path().join("fake-ping");
        fs::write(&stub, STUB_PING).unwrap();
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

        let workspace = Self { dir };
        if !hosts.is_empty() {
            let mut content = hosts.join("\n");
            content.push('\n');
            fs::write(workspace.cache_file(), content).unwrap();
        }
        workspace
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn cache_file(&self) -> PathBuf {
        self.path().join("vpn-urls")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("vlr").unwrap();
        cmd.current_dir(self.path())
            .arg("--ping-command")
            .arg(self.path().join("fake-ping"))
            .arg("--no-color");
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// `(host, count)` pairs the stub was invoked with
    fn calls(&self) -> Vec<(String, String)> {
        fs::read_to_string(self.path().join("calls"))
            .unwrap_or_default()
            .lines()
            .filter_map(|line| {
                let mut parts = line.split(' ');
                Some((parts.next()?.to_string(), parts.next()?.to_string()))
            })
            .collect()
    }

    fn saved_reports(&self) -> Vec<PathBuf> {
        fs::read_dir(self.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().starts_with("ping-results_"))
                    .unwrap_or(false)
            })
            .collect()
    }
}

#[test]
fn test_ranks_servers_by_latency() {
    let ws = Workspace::new(&["host1", "host2", "host3"]);

    ws.command()
        .arg("4")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Ping statistics - number of trials per server: 4",
        ))
        .stdout(predicate::str::is_match(
            r"server {19}avg latency \(ms\)\nhost2 {20}1\.000\nhost3 {20}3\.000\nhost1 {20}5\.000\n",
        ).unwrap())
        .stdout(predicate::str::contains("pinging host1"));

    assert_eq!(ws.calls().len(), 3);
    assert!(ws.calls().iter().all(|(_, count)| count == "4"));
    assert!(ws.saved_reports().is_empty());
}

#[test]
fn test_failures_follow_successes_in_probe_order() {
    let ws = Workspace::new(&["bogus.example", "host3", "down.example", "weird.example"]);

    ws.command()
        .arg("1")
        .arg("--no-save")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            concat!(
                r"host3 {20}3\.000\n",
                r"bogus\.example {12}name could not be resolved\n",
                r"down\.example {13}server did not respond\n",
                r"weird\.example {12}unknown error \(exit code 68\)\n",
            ),
        ).unwrap());
}

#[test]
fn test_one_line_per_distinct_host() {
    let ws = Workspace::new(&["host1", "", "host2", "host1", "host3"]);

    let output = ws.command().arg("--no-save").arg("--quiet").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("host1 ").count(), 1);
    assert_eq!(stdout.matches("host2 ").count(), 1);
    assert_eq!(stdout.matches("host3 ").count(), 1);
    assert!(!stdout.contains("pinging"));
    assert_eq!(ws.calls().len(), 3);
}

#[test]
fn test_non_integer_count_falls_back_to_default() {
    let ws = Workspace::new(&["host2"]);

    ws.command()
        .arg("abc")
        .arg("--no-save")
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning: invalid trial count 'abc'"))
        .stdout(predicate::str::contains("number of trials per server: 10"));

    let ws_default = Workspace::new(&["host2"]);
    ws_default.command().arg("--no-save").assert().success();

    assert_eq!(ws.calls(), ws_default.calls());
    assert_eq!(ws.calls(), vec![("host2".to_string(), "10".to_string())]);
}

#[test]
fn test_confirmed_save_writes_report_file() {
    let ws = Workspace::new(&["host1", "host2"]);

    let output = ws.command().arg("2").write_stdin("y\n").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("would you like to save these results as a text file? Default = no"));
    assert!(stdout.contains("(y/n):"));

    let reports = ws.saved_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(
        fs::read_to_string(&reports[0]).unwrap(),
        "Ping statistics - number of trials per server: 2\n\
         server                   avg latency (ms)\n\
         host2                    1.000\n\
         host1                    5.000\n"
    );
}

#[test]
fn test_anything_but_y_declines() {
    let ws = Workspace::new(&["host1"]);
    ws.command().write_stdin("yes\n").assert().success();
    ws.command().write_stdin("Y\n").assert().success();
    ws.command().assert().success();
    assert!(ws.saved_reports().is_empty());
}

#[test]
fn test_parallel_jobs_produce_same_report() {
    let hosts = ["host1", "down.example", "host2", "host3"];
    let sequential = Workspace::new(&hosts);
    let parallel = Workspace::new(&hosts);

    let seq_out = sequential.command().args(["3", "--quiet", "--no-save"]).output().unwrap();
    let par_out = parallel
        .command()
        .args(["3", "--quiet", "--no-save", "--jobs", "4"])
        .output()
        .unwrap();

    assert!(seq_out.status.success());
    assert!(par_out.status.success());
    assert_eq!(seq_out.stdout, par_out.stdout);
}

#[test]
fn test_option_looking_hostname_is_passed_as_operand() {
    let ws = Workspace::new(&["-s65000", "host2"]);

    ws.command()
        .args(["2", "--no-save", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("host2                    1.000"))
        .stdout(predicate::str::contains("-s65000                  server did not respond"));

    assert_eq!(
        ws.calls(),
        vec![
            ("-s65000".to_string(), "2".to_string()),
            ("host2".to_string(), "2".to_string()),
        ]
    );
}

#[test]
fn test_env_help_lists_variables_without_probing() {
    let ws = Workspace::new(&["host1"]);

    ws.command()
        .arg("--env-help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Supported Environment Variables:"))
        .stdout(predicate::str::contains("VPN_CACHE_FILE"))
        .stdout(predicate::str::contains("PING_JOBS"))
        .stdout(predicate::str::contains("Ping statistics").not());

    assert!(ws.calls().is_empty());
}

#[test]
fn test_missing_ping_utility_is_fatal() {
    let ws = Workspace::new(&["host1"]);

    let mut cmd = Command::cargo_bin("vlr").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.current_dir(ws.path())
        .args(["--no-color", "--no-save", "--ping-command", "/nonexistent/ping-binary"])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("[PROBE]"));
}

#[test]
fn test_stale_cache_with_unreachable_listing_is_fatal() {
    let ws = Workspace::new(&[]);

    ws.command()
        .args(["--no-save", "--source-url", "http://127.0.0.1:9/ovpn/", "--timeout", "5"])
        .assert()
        .failure()
        .code(2);

    assert!(!ws.cache_file().exists());
}

#[test]
fn test_env_file_configures_cache_path() {
    let ws = Workspace::new(&[]);
    fs::write(ws.path().join("servers.txt"), "host3\n").unwrap();
    fs::write(ws.path().join(".env"), "VPN_CACHE_FILE=servers.txt\nPING_COUNT=2\n").unwrap();

    ws.command()
        .arg("--no-save")
        .assert()
        .success()
        .stdout(predicate::str::contains("number of trials per server: 2"));

    assert_eq!(ws.calls(), vec![("host3".to_string(), "2".to_string())]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_cache_is_fetched_from_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ovpn/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <span class="mr-2">host3</span>
                <span class="mr-2">host1</span>
                <span class="ml-2">ignored</span>
            </body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let ws = Workspace::new(&[]);
    let url = format!("{}/ovpn/", server.uri());
    let mut cmd = ws.command();
    cmd.args(["1", "--no-save", "--source-url", url.as_str()]);

    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(ws.cache_file()).unwrap(), "host3\nhost1\n");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("host3                    3.000\nhost1                    5.000"));
}
