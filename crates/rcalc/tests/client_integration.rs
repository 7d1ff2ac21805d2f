//! End-to-end tests for the client against a live rcalcd server.
//!
//! Tests CAN use `.unwrap()` and `.expect()`.

use std::net::SocketAddr;

use rcalc_client::{CalcClient, ClientConfig, RelayEnd};
use rcalc_core::ErrorKind;
use rcalcd::server::{CalcServer, SessionLimits};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

// ============================================================================
// Test Helpers
// ============================================================================

struct TestServer {
    addr: SocketAddr,
    cancel_token: CancellationToken,
}

impl TestServer {
    async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let cancel_token = CancellationToken::new();

        let server =
            CalcServer::from_listener(listener, SessionLimits::default(), cancel_token.clone());
        let addr = server.local_addr().unwrap();

        tokio::spawn(async move {
            let _ = server.run().await;
        });

        TestServer { addr, cancel_token }
    }

    async fn connect(&self) -> CalcClient {
        let config = ClientConfig {
            addr: self.addr.to_string(),
            ..Default::default()
        };
        CalcClient::connect(&config).await.expect("connect to server")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_evaluate_values() {
    let server = TestServer::spawn().await;
    let mut client = server.connect().await;

    let reply = client.evaluate("ADD 2 3").await.unwrap();
    assert_eq!(reply.as_f64(), Some(5.0));

    let reply = client.evaluate("1 / 3").await.unwrap();
    assert_eq!(reply.to_string(), "OK 0.333333");

    let reply = client.evaluate("DIV 10 0").await.unwrap();
    assert_eq!(reply.error_kind(), Some(ErrorKind::DivisionByZero));

    let reply = client.evaluate("garbage text").await.unwrap();
    assert_eq!(reply.error_kind(), Some(ErrorKind::InvalidInput));

    client.quit().await.unwrap();
}

#[tokio::test]
async fn test_quit_then_server_closed() {
    let server = TestServer::spawn().await;
    let mut client = server.connect().await;

    assert_eq!(client.request("QUIT").await.unwrap(), None);
}

// ============================================================================
// Interactive Relay Tests
// ============================================================================

#[tokio::test]
async fn test_relay_until_quit_line() {
    let server = TestServer::spawn().await;
    let client = server.connect().await;

    let input: &[u8] = b"ADD 2 3\n2 * 4\nDIV 1 0\nquit\nADD 9 9\n";
    let mut output = Vec::new();
    let end = client.run_interactive(input, &mut output).await.unwrap();

    assert_eq!(end, RelayEnd::Quit);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "OK 5\nOK 8\nERR EZDV division_by_zero\n"
    );
}

#[tokio::test]
async fn test_relay_sends_quit_at_end_of_input() {
    let server = TestServer::spawn().await;
    let client = server.connect().await;

    // Last line has no terminator
    let input: &[u8] = b"SUB 1 3\nMUL 2 2";
    let mut output = Vec::new();
    let end = client.run_interactive(input, &mut output).await.unwrap();

    assert_eq!(end, RelayEnd::InputClosed);
    assert_eq!(String::from_utf8(output).unwrap(), "OK -2\nOK 4\n");
}

#[tokio::test]
async fn test_relay_empty_input() {
    let server = TestServer::spawn().await;
    let client = server.connect().await;

    let mut output = Vec::new();
    let end = client.run_interactive(&b""[..], &mut output).await.unwrap();

    assert_eq!(end, RelayEnd::InputClosed);
    assert!(output.is_empty());
}
