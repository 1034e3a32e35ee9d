use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// One HTTP response the fake feed hands out.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

/// Raw-socket stand-in for the USGS feed.
///
/// Responses are served in order; the last one repeats once the queue is
/// drained. `set_responses` swaps the queue while the server is running.
pub struct FeedServer {
    port: u16,
    hits: Arc<AtomicUsize>,
    responses: Arc<Mutex<Vec<CannedResponse>>>,
}

impl FeedServer {
    pub fn start(responses: Vec<CannedResponse>) -> Self {
        assert!(!responses.is_empty(), "feed server needs a response");

        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind feed server");
        let port = listener.local_addr().unwrap().port();

        let hits = Arc::new(AtomicUsize::new(0));
        let responses = Arc::new(Mutex::new(responses));

        let thread_hits = hits.clone();
        let thread_responses = responses.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else {
                    continue;
                };

                let response = {
                    let mut queue = thread_responses.lock().unwrap();
                    if queue.len() > 1 {
                        queue.remove(0)
                    } else {
                        queue[0].clone()
                    }
                };
                thread_hits.fetch_add(1, Ordering::SeqCst);

                respond(stream, &response);
            }
        });

        Self {
            port,
            hits,
            responses,
        }
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}/summary/all_day.geojson", self.port)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn set_responses(&self, responses: Vec<CannedResponse>) {
        assert!(!responses.is_empty(), "feed server needs a response");
        *self.responses.lock().unwrap() = responses;
    }
}

fn respond(mut stream: TcpStream, response: &CannedResponse) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));

    // Drain the request head so the client never sees a reset.
    let mut reader = BufReader::new(&stream);
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" => break,
            Ok(_) => {}
        }
    }

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason(response.status),
        response.body.len()
    );

    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(response.body.as_bytes());
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// A localhost port with nothing listening on it.
pub fn closed_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
