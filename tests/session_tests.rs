//! End-to-end tests for preparing and launching a session.

use sshrc::archive::read_archive;
use sshrc::encoding::decode;
use sshrc::launcher::{Transport, TransportExit};
use sshrc::{Error, Result, SshrcConfig};
use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use tempfile::TempDir;

/// Transport double that records every launch and reports a fixed exit code.
struct RecordingTransport {
    code: Option<i32>,
    launches: RefCell<Vec<Vec<OsString>>>,
}

impl RecordingTransport {
    fn exiting_with(code: Option<i32>) -> Self {
        Self {
            code,
            launches: RefCell::new(Vec::new()),
        }
    }

    fn launch_count(&self) -> usize {
        self.launches.borrow().len()
    }
}

impl Transport for RecordingTransport {
    fn launch(&self, args: &[OsString]) -> Result<TransportExit> {
        self.launches.borrow_mut().push(args.to_vec());
        Ok(TransportExit { code: self.code })
    }
}

/// Helper to create a configuration home with a `.sshrc` of `primary_size` bytes.
fn setup_config_home(primary_size: usize) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let data: Vec<u8> = (0..primary_size).map(|i| b'a' + (i % 26) as u8).collect();
    fs::write(temp_dir.path().join(".sshrc"), &data).expect("Failed to write .sshrc");
    temp_dir
}

fn host_args() -> Vec<OsString> {
    vec![OsString::from("alice@example.com")]
}

#[test]
fn test_scenario_without_auxiliary_directory() {
    let home = setup_config_home(10);
    let config = SshrcConfig::new(home.path());
    let transport = RecordingTransport::exiting_with(Some(0));

    sshrc::run(&host_args(), &config, &transport).expect("session should succeed");

    assert_eq!(transport.launch_count(), 1);
    let launches = transport.launches.borrow();
    let args = &launches[0];
    assert_eq!(args[0], OsString::from("alice@example.com"));
    assert_eq!(args[1], OsString::from("-t"));
    assert_eq!(args[2], OsString::from("--"));

    let command = args[3].to_str().unwrap();
    assert!(!command.contains("tar "));
    assert!(command.contains("exec bash --rcfile"));

    let prepared = sshrc::prepare(&config).unwrap();
    assert!(prepared.bundle.auxiliary.is_empty());
    assert_eq!(decode(&prepared.bundle.primary.text).unwrap().len(), 10);
}

#[test]
fn test_scenario_with_auxiliary_file() {
    let home = setup_config_home(10);
    let aux = home.path().join(".sshrc.d");
    fs::create_dir(&aux).unwrap();
    let content = b"export FOO=0123456789"[..20].to_vec();
    fs::write(aux.join("foo.sh"), &content).unwrap();

    let prepared = sshrc::prepare(&SshrcConfig::new(home.path())).unwrap();

    let archive = decode(&prepared.bundle.auxiliary.text).unwrap();
    let entries = read_archive(&archive).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, "foo.sh");
    assert_eq!(entries[0].data, content);

    assert!(prepared.sizes.total() < 64 * 1024);
    assert!(prepared.command.contains(&prepared.bundle.auxiliary.text));
    assert!(prepared.command.contains("tar mxzf - -C \"$SSHHOME\" 2>/dev/null"));
}

#[test]
fn test_scenario_oversized_primary_aborts_before_launch() {
    // 50_000 bytes encode to 66_668 base64 characters
    let home = setup_config_home(50_000);
    let config = SshrcConfig::new(home.path());
    let transport = RecordingTransport::exiting_with(Some(0));

    let err = sshrc::run(&host_args(), &config, &transport).unwrap_err();

    match &err {
        Error::PayloadTooLarge(report) => {
            assert_eq!(report.primary, 66_668);
            assert_eq!(report.auxiliary, 0);
            assert!(!report.fits());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains(".sshrc (65.11 KiB)"));
    assert_eq!(transport.launch_count(), 0);
}

#[test]
fn test_missing_host_is_checked_first() {
    let missing = TempDir::new().unwrap();
    let config = SshrcConfig::new(missing.path().join("does-not-exist"));
    let transport = RecordingTransport::exiting_with(Some(0));

    let err = sshrc::run(&[], &config, &transport).unwrap_err();

    assert!(matches!(err, Error::Usage));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(transport.launch_count(), 0);
}

#[test]
fn test_missing_primary_file() {
    let home = TempDir::new().unwrap();
    let config = SshrcConfig::new(home.path());
    let transport = RecordingTransport::exiting_with(Some(0));

    let err = sshrc::run(&host_args(), &config, &transport).unwrap_err();

    match err {
        Error::MissingConfig(path) => assert_eq!(path, home.path().join(".sshrc")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(transport.launch_count(), 0);
}

#[test]
fn test_transport_failure_is_reported() {
    let home = setup_config_home(10);
    let config = SshrcConfig::new(home.path());
    let transport = RecordingTransport::exiting_with(Some(255));

    let err = sshrc::run(&host_args(), &config, &transport).unwrap_err();

    assert!(matches!(err, Error::TransportFailed { code: Some(255) }));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(transport.launch_count(), 1);
}

#[test]
fn test_passthrough_options_precede_forced_flags() {
    let home = setup_config_home(10);
    let config = SshrcConfig::new(home.path());
    let transport = RecordingTransport::exiting_with(Some(0));
    let args: Vec<OsString> = ["-p", "2222", "-A", "example.com"]
        .iter()
        .map(OsString::from)
        .collect();

    sshrc::run(&args, &config, &transport).unwrap();

    let launches = transport.launches.borrow();
    assert_eq!(&launches[0][..4], &args[..]);
    assert_eq!(&launches[0][4..6], &[OsString::from("-t"), OsString::from("--")]);
    assert_eq!(launches[0].len(), 7);
}

#[test]
fn test_budget_boundary_is_inclusive() {
    let home = setup_config_home(30);
    let prepared = sshrc::prepare(&SshrcConfig::new(home.path())).unwrap();
    let total = prepared.sizes.total();

    let at_limit = SshrcConfig::new(home.path()).with_max_payload_size(total);
    assert!(sshrc::prepare(&at_limit).is_ok());

    let below = SshrcConfig::new(home.path()).with_max_payload_size(total - 1);
    assert!(matches!(
        sshrc::prepare(&below),
        Err(Error::PayloadTooLarge(_))
    ));
}

#[cfg(unix)]
#[test]
fn test_unreadable_auxiliary_file_aborts() {
    use std::os::unix::fs::PermissionsExt;

    let home = setup_config_home(10);
    let aux = home.path().join(".sshrc.d");
    fs::create_dir(&aux).unwrap();
    let secret = aux.join("secret.sh");
    fs::write(&secret, b"echo secret").unwrap();
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();

    // root can read anything; nothing to check there
    if fs::read(&secret).is_ok() {
        return;
    }

    let transport = RecordingTransport::exiting_with(Some(0));
    let err = sshrc::run(&host_args(), &SshrcConfig::new(home.path()), &transport).unwrap_err();

    assert!(matches!(err, Error::Archive { .. }));
    assert_eq!(transport.launch_count(), 0);
}
