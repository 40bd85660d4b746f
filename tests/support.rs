use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Status and body the mock API answers with for a given request line.
pub type Route = fn(method: &str, path: &str, authorized: bool) -> (u16, &'static str);

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a mock API server, or `None` when the sandbox forbids binding.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_api_server_or_skip(route: Route) -> Result<Option<(String, ServerHandle)>, String> {
    let listener = match TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => return Ok(None),
        Err(err) => return Err(format!("bind test server failed: {}", err)),
    };
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream, route));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok(Some((
        format!("http://{}/api/v1", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    )))
}

fn handle_client(mut stream: TcpStream, route: Route) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(read) => buffer.extend_from_slice(chunk.get(..read).unwrap_or_default()),
        }
        if let Some(pos) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos;
        }
    };
    let head = String::from_utf8_lossy(buffer.get(..head_end).unwrap_or_default()).into_owned();

    let mut content_length = 0usize;
    let mut authorized = false;
    for line in head.lines().skip(1) {
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("authorization") {
                authorized = value.trim().starts_with("Bearer ");
            }
        }
    }
    let body_start = head_end.saturating_add(4);
    while buffer.len().saturating_sub(body_start) < content_length {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(read) => buffer.extend_from_slice(chunk.get(..read).unwrap_or_default()),
        }
    }

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default();
    let target = request_line.next().unwrap_or_default();
    let path = target.split('?').next().unwrap_or_default();
    let path = path.strip_prefix("/api/v1").unwrap_or(path);

    let (status, body) = route(method, path, authorized);
    let response = format!(
        "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Run the `apiprobe` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_apiprobe<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_apiprobe_logging(args, None)
}

/// Run the `apiprobe` binary with `APIPROBE_LOG` set to `filter` and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_apiprobe_logging<I, S>(args: I, filter: Option<&str>) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = apiprobe_bin()?;
    let mut command = Command::new(bin);
    command.args(args).env("RUST_LOG", "error");
    match filter {
        Some(filter) => command.env("APIPROBE_LOG", filter),
        None => command.env_remove("APIPROBE_LOG"),
    };
    command
        .output()
        .map_err(|err| format!("run apiprobe failed: {}", err))
}

fn apiprobe_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_apiprobe").map_or_else(
        || Err("CARGO_BIN_EXE_apiprobe missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
