use std::future::Future;
use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::args::{PositiveU64, ProductsArgs, UsersArgs};
use crate::error::{AppError, AppResult};
use crate::http::{ApiClient, Credentials};

use super::{ProbeContext, Reporter};


const API_PREFIX: &str = "/api/v1";
const ADMIN_ID: &str = "85c4196f-b5ea-498a-ac39-3aa2678de542";
const JWT: &str = "aaa.bbb.ccc";

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

#[derive(Debug, Clone)]
pub(super) struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// Path below the API prefix, without the query string.
    pub fn route(&self) -> &str {
        let path = self.target.split('?').next().unwrap_or_default();
        path.strip_prefix(API_PREFIX).unwrap_or(path)
    }

    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, query)| query)
    }

    pub fn is(&self, method: &str, route: &str) -> bool {
        self.method == method && self.route() == route
    }

    pub fn json(&self) -> AppResult<serde_json::Value> {
        serde_json::from_str(&self.body).map_err(AppError::from)
    }
}

pub(super) struct MockReply {
    status: u16,
    body: String,
}

pub(super) fn reply(status: u16, body: impl Into<String>) -> MockReply {
    MockReply {
        status,
        body: body.into(),
    }
}

pub(super) fn login_ok() -> MockReply {
    reply(
        200,
        format!(
            r#"{{"accessToken":"{}","refreshToken":"r","userId":"admin","username":"mehdi"}}"#,
            JWT
        ),
    )
}

type Router = Arc<dyn Fn(&RecordedRequest) -> MockReply + Send + Sync>;

pub(super) struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl MockServer {
    /// `None` when the sandbox forbids binding a local port.
    pub async fn start<F>(router: F) -> AppResult<Option<Self>>
    where
        F: Fn(&RecordedRequest) -> MockReply + Send + Sync + 'static,
    {
        let listener = match TcpListener::bind("127.0.0.1:0").await {
            Ok(listener) => listener,
            Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => return Ok(None),
            Err(err) => return Err(AppError::from(err)),
        };
        let addr = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));
        let router: Router = Arc::new(router);

        let recorded = Arc::clone(&requests);
        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = Arc::clone(&recorded);
                let router = Arc::clone(&router);
                tokio::spawn(async move {
                    drop(handle_connection(stream, recorded, router).await);
                });
            }
        });

        Ok(Some(Self {
            base_url: format!("http://{}{}", addr, API_PREFIX),
            requests,
            task,
        }))
    }

    pub fn requests(&self) -> AppResult<Vec<RecordedRequest>> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_err| AppError::validation("request log poisoned"))
    }

    pub fn context(&self) -> AppResult<ProbeContext> {
        Ok(ProbeContext {
            client: ApiClient::new(&self.base_url)?,
            credentials: Credentials::new("mehdi@test.com".to_owned(), "123456".to_owned()),
        })
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    router: Router,
) -> std::io::Result<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];
    let header_end = loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(());
        }
        buffer.extend_from_slice(chunk.get(..read).unwrap_or_default());
        if let Some(pos) = find_header_end(&buffer) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(buffer.get(..header_end).unwrap_or_default()).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_owned();
    let target = request_line.next().unwrap_or_default().to_owned();
    let mut content_length = 0_usize;
    let mut authorization = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("authorization") {
                authorization = Some(value.trim().to_owned());
            }
        }
    }

    let body_start = header_end.saturating_add(4);
    while buffer.len().saturating_sub(body_start) < content_length {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(chunk.get(..read).unwrap_or_default());
    }
    let body = String::from_utf8_lossy(buffer.get(body_start..).unwrap_or_default()).into_owned();

    let request = RecordedRequest {
        method,
        target,
        authorization,
        body,
    };
    let response = (*router)(&request);
    if let Ok(mut guard) = recorded.lock() {
        guard.push(request);
    }

    let reason = StatusCode::from_u16(response.status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown");
    let raw = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason,
        response.body.len(),
        response.body
    );
    stream.write_all(raw.as_bytes()).await?;
    stream.flush().await?;
    stream.shutdown().await
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

pub(super) fn reporter() -> Reporter<Vec<u8>> {
    Reporter::new(Vec::new())
}

pub(super) fn output(out: Reporter<Vec<u8>>) -> AppResult<String> {
    String::from_utf8(out.into_inner())
        .map_err(|err| AppError::validation(format!("Report was not UTF-8: {}", err)))
}

pub(super) fn expect_contains(haystack: &str, needle: &str) -> AppResult<()> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Expected output to contain {:?}:\n{}",
            needle, haystack
        )))
    }
}

pub(super) fn products_args() -> AppResult<ProductsArgs> {
    Ok(ProductsArgs {
        page: PositiveU64::MIN,
        page_size: PositiveU64::try_from(10)?,
    })
}

pub(super) fn users_args() -> AppResult<UsersArgs> {
    Ok(UsersArgs {
        admin_user_id: ADMIN_ID.to_owned(),
        lookup_page_size: PositiveU64::try_from(50)?,
    })
}

pub(super) fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}
