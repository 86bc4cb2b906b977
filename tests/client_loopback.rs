//! End-to-end tests against a scripted server on a loopback socket.
//!
//! These drive the real connect → handshake → poll → dispatch path:
//! non-blocking connect, the capability/login burst on first write
//! readiness, automatic PONG replies, GLOBALUSERSTATE login caching,
//! and teardown on peer close.

use std::cell::RefCell;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use twirc::{Client, ClientConfig, Connection, ErrorKind, Event, EventKind};

const POLL: Option<Duration> = Some(Duration::from_millis(25));
const DEADLINE: Duration = Duration::from_secs(10);

fn local_config(port: u16) -> ClientConfig {
    let mut config = ClientConfig::new("mybot", "oauth:sekrit");
    config.host = "127.0.0.1".to_string();
    config.port = port;
    config
}

fn read_line(reader: &mut BufReader<TcpStream>) -> String {
    let mut line = String::new();
    reader.read_line(&mut line).expect("server read");
    line.trim_end_matches(['\r', '\n']).to_string()
}

struct ServerReport {
    handshake: Vec<String>,
    pong: String,
    quit: String,
}

/// Accept one client, verify its handshake, feed it a login burst, a
/// PING, and a chat line, then wait for QUIT.
fn scripted_server(listener: TcpListener, tx: mpsc::Sender<ServerReport>) {
    let (stream, _) = listener.accept().expect("accept");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("read timeout");
    let mut reader = BufReader::new(stream.try_clone().expect("clone"));
    let mut writer = stream.try_clone().expect("clone");

    let handshake = (0..3).map(|_| read_line(&mut reader)).collect();

    writer
        .write_all(b"@display-name=MyBot;user-id=77 GLOBALUSERSTATE\r\n")
        .expect("server write");
    writer
        .write_all(b"PING :tmi.twitch.tv\r\n")
        .expect("server write");

    let pong = read_line(&mut reader);

    writer
        .write_all(
            b"@display-name=Alice;user-id=42 :alice!alice@alice.tmi.twitch.tv PRIVMSG #foo :hello world\r\n",
        )
        .expect("server write");

    let quit = read_line(&mut reader);

    tx.send(ServerReport {
        handshake,
        pong,
        quit,
    })
    .expect("report");
}

#[test]
fn test_full_session_handshake_autopong_and_quit() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    let (tx, rx) = mpsc::channel();
    let server = thread::spawn(move || scripted_server(listener, tx));

    let events: Rc<RefCell<Vec<(EventKind, Option<String>)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let mut client = Client::new(local_config(port), move |_: &mut Connection, ev: &Event<'_>| {
        sink.borrow_mut()
            .push((ev.kind, ev.message.map(str::to_string)));
    })
    .expect("client");

    client.connect().expect("connect");
    assert!(client.conn().is_connecting());

    let deadline = Instant::now() + DEADLINE;
    let mut quit_sent = false;
    while Instant::now() < deadline && !quit_sent {
        client.poll_once(POLL).expect("poll");
        let saw_privmsg = events
            .borrow()
            .iter()
            .any(|(kind, _)| *kind == EventKind::Privmsg);
        if saw_privmsg {
            client.quit_and_disconnect().expect("quit");
            quit_sent = true;
        }
    }
    assert!(quit_sent, "never saw the PRIVMSG");

    let report = rx.recv_timeout(Duration::from_secs(5)).expect("report");
    server.join().expect("server thread");

    // Handshake burst, in order: capabilities, then credentials.
    assert_eq!(
        report.handshake,
        vec![
            "CAP REQ :twitch.tv/tags twitch.tv/commands twitch.tv/membership",
            "PASS oauth:sekrit",
            "NICK mybot",
        ]
    );

    // The PONG reply went out without the application's involvement.
    assert_eq!(report.pong, "PONG :tmi.twitch.tv");
    assert_eq!(report.quit, "QUIT");

    // Events arrived in wire order.
    let seen = events.borrow();
    let kinds: Vec<EventKind> = seen.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(
        kinds,
        vec![EventKind::GlobalUserState, EventKind::Ping, EventKind::Privmsg]
    );
    assert_eq!(seen[2].1.as_deref(), Some("hello world"));
    drop(seen);

    // Teardown cleared the status flags and session identity.
    assert!(client.conn().status().is_disconnected());
    assert!(client.conn().login().display_name.is_none());
    assert!(client.conn().login().user_id.is_none());
}

#[test]
fn test_login_cached_from_globaluserstate() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();

    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .expect("read timeout");
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        for _ in 0..3 {
            read_line(&mut reader);
        }
        let mut writer = stream.try_clone().expect("clone");
        writer
            .write_all(b"@display-name=MyBot;user-id=77 GLOBALUSERSTATE\r\n")
            .expect("server write");
        // Hold the socket open until the client has had time to observe.
        thread::sleep(Duration::from_millis(300));
    });

    let mut client = Client::new(local_config(port), |_: &mut Connection, _: &Event<'_>| {})
        .expect("client");
    client.connect().expect("connect");

    let deadline = Instant::now() + DEADLINE;
    while Instant::now() < deadline && !client.conn().is_logged_in() {
        client.poll_once(POLL).expect("poll");
    }

    assert!(client.conn().is_logged_in());
    assert!(client.conn().is_connected());
    assert_eq!(client.conn().login().display_name.as_deref(), Some("MyBot"));
    assert_eq!(client.conn().login().user_id.as_deref(), Some("77"));

    client.disconnect();
    server.join().expect("server thread");
}

#[test]
fn test_peer_close_surfaces_conn_closed() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();

    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .expect("read timeout");
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        for _ in 0..3 {
            read_line(&mut reader);
        }
        // Close without a word.
        drop(reader);
        drop(stream);
    });

    let mut client = Client::new(local_config(port), |_: &mut Connection, _: &Event<'_>| {})
        .expect("client");
    client.connect().expect("connect");

    let deadline = Instant::now() + DEADLINE;
    let mut failure = None;
    while Instant::now() < deadline && failure.is_none() {
        if let Err(err) = client.poll_once(POLL) {
            failure = Some(err);
        }
    }

    let kind = failure.expect("peer close must fail the poll").kind();
    assert!(
        matches!(kind, ErrorKind::ConnClosed | ErrorKind::ConnHangup),
        "unexpected error kind: {kind:?}"
    );
    assert_eq!(client.conn().last_error(), Some(kind));
    assert!(client.conn().status().is_disconnected());

    // Teardown already ran; calling it again is a no-op.
    client.disconnect();
    client.disconnect();
    assert!(client.conn().status().is_disconnected());

    server.join().expect("server thread");
}

#[test]
fn test_connection_refused_surfaces_socket_error() {
    // Bind then drop to find a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);

    let mut client = Client::new(local_config(port), |_: &mut Connection, _: &Event<'_>| {})
        .expect("client");
    client.connect().expect("connect initiation is non-blocking");

    let deadline = Instant::now() + DEADLINE;
    let mut failure = None;
    while Instant::now() < deadline && failure.is_none() {
        if let Err(err) = client.poll_once(POLL) {
            failure = Some(err);
        }
    }

    let kind = failure.expect("refused connect must fail the poll").kind();
    assert!(
        matches!(
            kind,
            ErrorKind::SocketConnect | ErrorKind::ConnSocket | ErrorKind::ConnHangup
        ),
        "unexpected error kind: {kind:?}"
    );
    assert!(client.conn().status().is_disconnected());
}

#[test]
fn test_oversized_line_surfaces_overflow() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();

    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .expect("read timeout");
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        for _ in 0..3 {
            read_line(&mut reader);
        }
        // One line larger than the read buffer, never terminated.
        let mut writer = stream.try_clone().expect("clone");
        writer.write_all(&[b'x'; 4096]).expect("server write");
        thread::sleep(Duration::from_millis(500));
    });

    let mut client = Client::new(local_config(port), |_: &mut Connection, _: &Event<'_>| {})
        .expect("client");
    client.connect().expect("connect");

    let deadline = Instant::now() + DEADLINE;
    let mut failure = None;
    while Instant::now() < deadline && failure.is_none() {
        if let Err(err) = client.poll_once(POLL) {
            failure = Some(err);
        }
    }

    let err = failure.expect("oversized line must fail the poll");
    assert_eq!(err.kind(), ErrorKind::LineOverflow);
    assert_eq!(client.conn().last_error(), Some(ErrorKind::LineOverflow));

    client.disconnect();
    server.join().expect("server thread");
}

#[test]
fn test_poll_without_connect_is_not_connected() {
    let mut client = Client::new(local_config(1), |_: &mut Connection, _: &Event<'_>| {})
        .expect("client");
    let err = client.poll_once(Some(Duration::ZERO)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotConnected);
}
