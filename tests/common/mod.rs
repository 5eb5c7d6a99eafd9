#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use httpsh::remote::{FetchError, HttpResponse, RemoteDirectoryService, Transport};
use httpsh::shell::ShellState;

pub const ORIGIN: &str = "http://origin.test/";

/// A canned reply for one request
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, String),
    /// Raw body bytes, not necessarily UTF-8
    Bytes(u16, Vec<u8>),
    ConnectionRefused,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Reply::Status(200, body.to_string())
    }

    pub fn not_found() -> Self {
        Reply::Status(404, "<html><body><h1>404 Not Found</h1></body></html>".to_string())
    }
}

/// Transport that answers from a per-URL script and records every request.
///
/// Each URL holds a queue of replies; the last one repeats. Unknown URLs
/// answer 404.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Script replies for a path relative to the origin
    pub fn route(&self, path: &str, replies: Vec<Reply>) {
        let url = format!("{ORIGIN}{}", path.trim_start_matches('/'));
        self.routes.lock().unwrap().insert(url, replies.into());
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        let reply = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(url) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply.unwrap_or_else(Reply::not_found) {
            Reply::Status(status, body) => Ok(HttpResponse::new(status, body)),
            Reply::Bytes(status, bytes) => Ok(HttpResponse::from_bytes(status, &bytes)),
            Reply::ConnectionRefused => Err(FetchError::Transport {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}

pub fn service(transport: &Arc<ScriptedTransport>) -> RemoteDirectoryService {
    RemoteDirectoryService::with_transport(ORIGIN, Arc::clone(transport) as Arc<dyn Transport>)
}

pub fn shell(transport: &Arc<ScriptedTransport>) -> ShellState {
    ShellState::with_service(Arc::new(service(transport)), "3VE")
}

/// An nginx-style HTML index for the given entry names
pub fn html_index(path: &str, names: &[&str]) -> String {
    let mut html = format!(
        "<html>\n<head><title>Index of {path}</title></head>\n<body>\n<h1>Index of {path}</h1><hr><pre><a href=\"../\">../</a>\n"
    );
    for name in names {
        html.push_str(&format!(
            "<a href=\"{name}\">{name}</a>                 12-Mar-2024 10:01       -\n"
        ));
    }
    html.push_str("</pre><hr></body>\n</html>\n");
    html
}

/// A JSON autoindex body for the given entry names
pub fn json_index(names: &[&str]) -> String {
    let records: Vec<serde_json::Value> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "name": name.trim_end_matches('/'),
                "type": if name.ends_with('/') { "directory" } else { "file" },
                "mtime": "Tue, 12 Mar 2024 10:01:00 GMT",
            })
        })
        .collect();
    serde_json::Value::Array(records).to_string()
}
