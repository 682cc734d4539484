//! Runs the built `persephone-host` binary over real pipes.

use persephone_host::host::{encode_message, read_message};
use serde_json::{json, Value};
use std::io::{Cursor, Write};
use std::process::{Command, Stdio};

fn run_host(stdin_bytes: &[u8]) -> Value {
    let mut child = Command::new(env!("CARGO_BIN_EXE_persephone-host"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn host");

    // Dropping stdin closes it so the host sees EOF.
    {
        let mut stdin = child.stdin.take().expect("stdin");
        stdin.write_all(stdin_bytes).expect("write stdin");
    }

    let output = child.wait_with_output().expect("wait host");
    assert!(output.status.success(), "host exited with {}", output.status);

    let mut cur = Cursor::new(output.stdout);
    let response = read_message(&mut cur)
        .expect("valid frame")
        .expect("one response");
    assert_eq!(
        cur.position() as usize,
        cur.get_ref().len(),
        "nothing after the response frame"
    );
    response
}

#[test]
fn no_input_yields_no_message_received() {
    assert_eq!(
        run_host(&[]),
        json!({"success": false, "error": "No message received"})
    );
}

#[test]
fn unknown_action_roundtrip() {
    let request = encode_message(&json!({"action": "bogus"})).unwrap();
    assert_eq!(
        run_host(&request),
        json!({"success": false, "error": "Unknown action: bogus"})
    );
}

#[test]
fn short_frame_yields_error_response() {
    let mut request = Vec::new();
    request.extend_from_slice(&(100u32).to_ne_bytes());
    request.extend_from_slice(b"0123456789");

    let response = run_host(&request);
    assert_eq!(response["success"], json!(false));
    assert!(response["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid message:"));
}
