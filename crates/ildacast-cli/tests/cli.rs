use std::net::UdpSocket;
use std::path::{Path, PathBuf};
use std::time::Duration;

use assert_cmd::Command;
use ildacast_core::{Command as IwpCommand, Format, IldaWriter, PointRecord, Rgb, parse_datagram};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ildacast"))
}

fn write_show(dir: &Path, name: &str, frames: usize) -> PathBuf {
    let records: Vec<PointRecord> = [(-500, -500), (500, -500), (500, 500), (-500, 500)]
        .iter()
        .map(|(x, y)| PointRecord::rgb(*x, *y, Rgb::new(255, 0, 0)))
        .collect();
    let mut writer = IldaWriter::new();
    writer.names("show", "tests");
    for _ in 0..frames {
        writer.frame(Format::TrueColor2d, &records);
    }
    let path = dir.join(name);
    std::fs::write(&path, writer.finish()).expect("write fixture");
    path
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("play").and(contains("inspect")));
    cmd().arg("play").arg("--help").assert().success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.ild");

    cmd()
        .arg("play")
        .arg(missing)
        .arg("--ip")
        .arg("127.0.0.1")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn zero_scan_rate_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_show(temp.path(), "show.ild", 1);

    cmd()
        .arg("play")
        .arg(input)
        .arg("--ip")
        .arg("127.0.0.1")
        .arg("--scan")
        .arg("0")
        .assert()
        .failure();
}

#[test]
fn file_without_frames_fails_before_sending() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("empty.ild");
    std::fs::write(&input, b"not an ilda file at all, just text").expect("write");

    cmd()
        .arg("play")
        .arg(&input)
        .arg("--ip")
        .arg("127.0.0.1")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("no frames decoded").and(contains("hint:")));
}

#[test]
fn wrong_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("show.txt");
    std::fs::write(&input, b"ILDA").expect("write");

    cmd()
        .arg("inspect")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format"));
}

#[test]
fn inspect_stdout_outputs_json() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_show(temp.path(), "show.ild", 3);

    let assert = cmd()
        .arg("inspect")
        .arg(input)
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["frames"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["points_total"], 12);
    assert_eq!(value["scan_complete"], true);
    assert_eq!(value["frames"][0]["format"], "true-color-2d");
}

#[test]
fn inspect_writes_report_file() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_show(temp.path(), "show.ild", 1);
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("inspect")
        .arg(&input)
        .arg("-o")
        .arg(&report)
        .arg("--pretty")
        .assert()
        .success()
        .stderr(contains("report written"));
    let text = std::fs::read_to_string(&report).expect("report");
    let _: Value = serde_json::from_str(&text).expect("valid json");
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_show(temp.path(), "show.ild", 1);
    let report = temp.path().join("report.json");

    cmd()
        .arg("inspect")
        .arg(input)
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure();
}

#[test]
fn report_path_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_show(temp.path(), "show.ild", 1);

    cmd()
        .arg("inspect")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("must differ from input"));
}

#[test]
fn strict_inspect_fails_on_truncated_file() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_show(temp.path(), "cut.ild", 2);
    let mut bytes = std::fs::read(&input).expect("read");
    bytes.truncate(bytes.len() - 4);
    std::fs::write(&input, bytes).expect("write");

    cmd()
        .arg("inspect")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .success();
    cmd()
        .arg("inspect")
        .arg(&input)
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("scan stopped early"));
}

#[test]
fn glob_input_resolves_single_match() {
    let temp = TempDir::new().expect("tempdir");
    write_show(temp.path(), "only.ild", 1);
    let pattern = temp.path().join("*.ild");

    cmd()
        .arg("inspect")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .success();
}

#[test]
fn glob_input_with_several_matches_fails() {
    let temp = TempDir::new().expect("tempdir");
    write_show(temp.path(), "a.ild", 1);
    write_show(temp.path(), "b.ild", 1);
    let pattern = temp.path().join("*.ild");

    cmd()
        .arg("inspect")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("multiple files match"));
}

#[test]
fn play_streams_to_loopback_controller() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_show(temp.path(), "show.ild", 2);
    let controller = UdpSocket::bind("127.0.0.1:0").expect("bind");
    controller
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("timeout");
    let port = controller.local_addr().expect("addr").port();

    cmd()
        .arg("play")
        .arg(&input)
        .arg("--ip")
        .arg("127.0.0.1")
        .arg("--port")
        .arg(port.to_string())
        .arg("--scan")
        .arg("30000")
        .arg("--repeat")
        .arg("2")
        .arg("--off-on-exit")
        .assert()
        .success()
        .stderr(contains("OK: streamed 4 frames"));

    let mut buf = [0u8; 2048];
    let mut datagrams = Vec::new();
    // Period, two passes over two frames, turn-off.
    for _ in 0..6 {
        let len = controller.recv(&mut buf).expect("datagram");
        datagrams.push(parse_datagram(&buf[..len]).expect("valid IWP"));
    }

    assert_eq!(datagrams[0], vec![IwpCommand::Period { micros: 33 }]);
    for packet in &datagrams[1..5] {
        assert_eq!(packet.len(), 4);
        assert!(matches!(packet[0], IwpCommand::PointRgb16(sample)
            if sample.x == 32268 && sample.y == 33268 && sample.r == 65535 && sample.g == 0));
    }
    assert_eq!(datagrams[5], vec![IwpCommand::TurnOff]);
}

#[test]
fn quiet_play_prints_nothing() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_show(temp.path(), "show.ild", 1);
    let controller = UdpSocket::bind("127.0.0.1:0").expect("bind");
    let port = controller.local_addr().expect("addr").port();

    cmd()
        .arg("--quiet")
        .arg("play")
        .arg(&input)
        .arg("--ip")
        .arg("127.0.0.1")
        .arg("--port")
        .arg(port.to_string())
        .arg("--depth")
        .arg("8")
        .assert()
        .success()
        .stderr(predicates::str::is_empty());
}
