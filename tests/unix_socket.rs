#![cfg(unix)]

use std::{
    fs,
    io::{Read, Write},
    os::unix::net::UnixListener,
    thread,
};

use localnet::{Dialer, EndpointAddr, EndpointConfig, Listener, LocalnetCode, TransportKind, UnixSocket};
use tempfile::TempDir;

#[test]
fn native_transport_is_unix() {
    let dir = TempDir::new().unwrap();
    let listener = localnet::listen_with("svc", &EndpointConfig::in_dir(dir.path())).unwrap();

    assert_eq!(listener.kind(), TransportKind::Unix);
    assert_eq!(listener.artifact_path(), dir.path().join("svc.sock"));
    assert_eq!(
        listener.local_addr().unwrap(),
        EndpointAddr::Unix(dir.path().join("svc.sock"))
    );
}

#[test]
fn leftover_socket_is_taken_over() {
    let dir = TempDir::new().unwrap();
    let cfg = EndpointConfig::in_dir(dir.path());
    drop(UnixListener::bind(dir.path().join("svc.sock")).unwrap());

    let listener = Listener::<UnixSocket>::bind("svc", &cfg).unwrap();
    let server = thread::spawn(move || {
        let mut conn = listener.accept().unwrap();
        let mut buf = String::new();
        conn.read_to_string(&mut buf).unwrap();
        buf
    });

    let mut conn = Dialer::<UnixSocket>::with_config(cfg).dial("svc").unwrap();
    conn.write_all(b"after crash").unwrap();
    drop(conn);

    assert_eq!(server.join().unwrap(), "after crash");
}

#[test]
fn second_listen_dispossesses_first() {
    let dir = TempDir::new().unwrap();
    let cfg = EndpointConfig::in_dir(dir.path());

    let first = Listener::<UnixSocket>::bind("svc", &cfg).unwrap();
    let second = Listener::<UnixSocket>::bind("svc", &cfg).unwrap();

    let conn = Dialer::<UnixSocket>::with_config(cfg).dial("svc").unwrap();
    let accepted = second.accept().unwrap();
    drop((conn, accepted));

    // no exclusion: the first owner's close still unlinks the shared path
    drop(first);
    assert!(!second.artifact_path().exists());
}

#[test]
fn occupied_path_is_left_alone() {
    let dir = TempDir::new().unwrap();
    let cfg = EndpointConfig::in_dir(dir.path());
    fs::write(dir.path().join("svc.sock"), "not a socket").unwrap();

    let err = Listener::<UnixSocket>::bind("svc", &cfg).unwrap_err();
    assert_eq!(err.code(), LocalnetCode::ArtifactOccupied);
    assert_eq!(fs::read_to_string(dir.path().join("svc.sock")).unwrap(), "not a socket");
}

#[test]
fn cleanup_spares_non_socket_file() {
    let dir = TempDir::new().unwrap();
    let cfg = EndpointConfig::in_dir(dir.path());
    let path = dir.path().join("svc.sock");
    fs::write(&path, "not a socket").unwrap();

    let err = localnet::cleanup_on::<UnixSocket>("svc", &cfg).unwrap_err();
    assert_eq!(err.code(), LocalnetCode::ArtifactOccupied);
    assert_eq!(fs::read_to_string(&path).unwrap(), "not a socket");

    // a real leftover socket is still removed
    fs::remove_file(&path).unwrap();
    drop(UnixListener::bind(&path).unwrap());
    localnet::cleanup_on::<UnixSocket>("svc", &cfg).unwrap();
    assert!(!path.exists());
}

#[test]
fn dial_without_acceptor_fails() {
    let dir = TempDir::new().unwrap();
    let cfg = EndpointConfig::in_dir(dir.path());
    drop(UnixListener::bind(dir.path().join("svc.sock")).unwrap());

    let err = Dialer::<UnixSocket>::with_config(cfg).dial("svc").unwrap_err();
    assert_eq!(err.code(), LocalnetCode::Connect);
}

#[test]
fn runtime_dir_is_created_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let cfg = EndpointConfig::in_dir(dir.path().join("run"));
    let _listener = Listener::<UnixSocket>::bind("svc", &cfg).unwrap();

    let mode = fs::metadata(dir.path().join("run")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o700);
}
