// Loopback HTTP endpoints for driving the binary end to end.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Accepts one request, records it, and answers with a canned response.
pub struct CaptureServer {
    pub url: String,
    handle: JoinHandle<Option<CapturedRequest>>,
}

impl CaptureServer {
    pub fn respond_with(status: u16, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        listener.set_nonblocking(true).unwrap();

        let handle = thread::spawn(move || {
            let stream = accept_within(&listener, Duration::from_secs(10))?;
            Some(serve(stream, status, body))
        });
        CaptureServer { url, handle }
    }

    /// Wait for the recorded request. Panics if none arrived.
    pub fn request(self) -> CapturedRequest {
        self.handle
            .join()
            .unwrap()
            .expect("no request reached the capture server")
    }
}

/// A listener nothing is supposed to connect to.
pub struct SilentEndpoint {
    pub url: String,
    listener: TcpListener,
}

impl SilentEndpoint {
    pub fn new() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        listener.set_nonblocking(true).unwrap();
        SilentEndpoint { url, listener }
    }

    /// Call after the process has exited; any connection it made is
    /// already queued.
    pub fn assert_untouched(&self) {
        match self.listener.accept() {
            Err(e) if e.kind() == ErrorKind::WouldBlock => {}
            Ok((_, peer)) => panic!("unexpected connection from {peer}"),
            Err(e) => panic!("accept failed: {e}"),
        }
    }
}

/// Accepts one connection and never answers it.
pub struct StalledServer {
    pub url: String,
}

impl StalledServer {
    pub fn hold_for(duration: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        listener.set_nonblocking(true).unwrap();

        thread::spawn(move || {
            if let Some(stream) = accept_within(&listener, Duration::from_secs(10)) {
                thread::sleep(duration);
                drop(stream);
            }
        });
        StalledServer { url }
    }
}

/// URL of a loopback port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}

fn accept_within(listener: &TcpListener, timeout: Duration) -> Option<TcpStream> {
    let deadline = Instant::now() + timeout;
    loop {
        match listener.accept() {
            Ok((stream, _)) => return Some(stream),
            Err(e) if e.kind() == ErrorKind::WouldBlock && Instant::now() < deadline => {
                thread::sleep(Duration::from_millis(20));
            }
            Err(_) => return None,
        }
    }
}

fn serve(mut stream: TcpStream, status: u16, body: &str) -> CapturedRequest {
    stream.set_nonblocking(false).unwrap();
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let len = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(0);
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).unwrap();

    let response = format!(
        "HTTP/1.1 {status} Captured\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).unwrap();
    stream.flush().unwrap();

    CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8(buf).unwrap(),
    }
}
