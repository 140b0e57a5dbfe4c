#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Minimal one-shot HTTP stub: answers a fixed number of requests with a
/// canned status line and JSON body, and captures each request target so
/// tests can assert on the path and query string.
pub struct StubServer {
    pub base_url: String,
    requests: Receiver<String>,
}

impl StubServer {
    pub fn start(status: &'static str, body: impl Into<String>) -> Self {
        Self::start_n(1, status, body)
    }

    pub fn start_n(count: usize, status: &'static str, body: impl Into<String>) -> Self {
        let body = body.into();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for _ in 0..count {
                let (mut stream, _) = listener.accept().unwrap();
                let mut raw = Vec::new();
                let mut buf = [0u8; 1024];
                // A GET request ends with the blank line after the headers.
                while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    raw.extend_from_slice(&buf[..n]);
                }
                tx.send(String::from_utf8_lossy(&raw).into_owned()).unwrap();
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len(),
                );
                stream.write_all(response.as_bytes()).unwrap();
                let _ = stream.flush();
            }
        });
        Self {
            base_url: format!("http://{addr}"),
            requests: rx,
        }
    }

    /// Request target of the next captured request, e.g.
    /// `/api/1.0/org_location?format=json`.
    pub fn request_target(&self) -> String {
        let request = self.requests.recv().unwrap();
        request.split_whitespace().nth(1).unwrap().to_string()
    }
}

pub const SPENDING_THREE_MONTHS: &str = r#"[
  {"items":600,"quantity":10000.0,"actual_cost":12345.67,
   "date":"2022-01-01","row_id":"ABC","row_name":"ANOTHER LOCATION"},
  {"items":700,"quantity":20250.0,"actual_cost":23456.78,
   "date":"2022-02-01","row_id":"ABC","row_name":"ANOTHER LOCATION"},
  {"items":800,"quantity":30500.0,"actual_cost":34567.89,
   "date":"2022-03-01","row_id":"ABC","row_name":"ANOTHER LOCATION"}
]"#;

pub const BOUNDARIES_ONE_FEATURE: &str = r#"{
  "type": "FeatureCollection",
  "crs": {"type": "name", "properties": {"name": "EPSG:4326"}},
  "features": [
    {
      "type": "Feature",
      "properties": {"name": "NICE PLACE", "code": "DEADBEEF",
                     "ons_code": null, "org_type": "ABC"},
      "geometry": {"type": "Polygon",
                   "coordinates": [[[-0.495026, 52.640236],
                                    [-0.517397, 52.642379],
                                    [-0.540261, 52.625966]]]}
    }
  ]
}"#;
