#![allow(missing_docs)]

use std::time::Duration;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
};

/// A bare bones FTP client that speaks the control channel line by line.
pub struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

/// One complete reply: its code and the text of every line.
#[derive(Debug)]
pub struct Response {
    pub code: u32,
    pub lines: Vec<String>,
}

impl Response {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl Client {
    /// Connects to `addr`, retrying while the server task is still starting up.
    pub async fn connect(addr: &str) -> Client {
        let mut attempts = 0;
        let stream = loop {
            match TcpStream::connect(addr).await {
                Ok(stream) => break stream,
                Err(_) if attempts < 50 => {
                    attempts += 1;
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
                Err(err) => panic!("could not connect to {}: {}", addr, err),
            }
        };
        let (read, writer) = stream.into_split();
        Client {
            lines: BufReader::new(read).lines(),
            writer,
        }
    }

    pub async fn send(&mut self, line: &str) {
        self.writer.write_all(format!("{}\r\n", line).as_bytes()).await.unwrap();
    }

    /// Reads one reply, following multi line replies up to their closing line.
    pub async fn read(&mut self) -> Response {
        let first = self.lines.next_line().await.unwrap().expect("connection closed");
        let code: u32 = first[..3].parse().unwrap();
        let mut lines = vec![first.get(4..).unwrap_or_default().to_string()];
        if first.as_bytes().get(3) == Some(&b'-') {
            let closing = format!("{} ", code);
            loop {
                let line = self.lines.next_line().await.unwrap().expect("connection closed");
                if let Some(text) = line.strip_prefix(&closing) {
                    lines.push(text.to_string());
                    break;
                }
                lines.push(line);
            }
        }
        Response { code, lines }
    }

    /// Sends `line` and reads the reply to it.
    pub async fn cmd(&mut self, line: &str) -> Response {
        self.send(line).await;
        self.read().await
    }

    /// Returns true once the server closed the connection.
    pub async fn is_closed(&mut self) -> bool {
        matches!(self.lines.next_line().await, Ok(None) | Err(_))
    }
}

/// A logger that drops everything, so test output stays readable.
pub fn quiet() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}
