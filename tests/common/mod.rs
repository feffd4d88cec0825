#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;
use tiny_http::{Header, Response, Server};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// A product service stand-in on an ephemeral local port.
///
/// Every request is recorded and answered by `handler(method, path, body)`,
/// which returns the status code and a JSON body.
pub struct FakeService {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeService {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&str, &str, &str) -> (u16, String) + Send + 'static,
    {
        let server = Server::http("127.0.0.1:0").expect("bind fake service");
        let addr = server
            .server_addr()
            .to_ip()
            .expect("fake service has an ip address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        thread::spawn(move || {
            while let Ok(mut request) = server.recv() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let method = request.method().to_string();
                let path = request.url().to_string();

                let (status, payload) = handler(&method, &path, &body);
                log.lock().unwrap().push(Recorded { method, path, body });

                let header =
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                let response = Response::from_string(payload)
                    .with_status_code(status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

pub const SEED_JSON: &str = r#"[
    {"id": 1, "name": "Phone", "description": "A smartphone", "price": 699.99, "quantity": 50},
    {"id": 2, "name": "Laptop", "description": "A powerful laptop", "price": 999.99, "quantity": 30},
    {"id": 3, "name": "Pen", "description": "A blue ink pen", "price": 1.99, "quantity": 100},
    {"id": 4, "name": "Table", "description": "A wooden table", "price": 199.99, "quantity": 20}
]"#;
