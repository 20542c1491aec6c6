use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin, Stdout};

/// The person on the other end of the planning session.
#[async_trait]
pub trait UserChannel: Send {
    async fn say(&mut self, message: &str) -> io::Result<()>;

    /// Waits for the next reply, trimmed.
    async fn ask(&mut self) -> io::Result<String>;
}

pub struct StdioChannel {
    reader: BufReader<Stdin>,
    writer: Stdout,
}

impl StdioChannel {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
            writer: tokio::io::stdout(),
        }
    }
}

impl Default for StdioChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserChannel for StdioChannel {
    async fn say(&mut self, message: &str) -> io::Result<()> {
        self.writer.write_all(message.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    async fn ask(&mut self) -> io::Result<String> {
        self.writer.write_all(b"\nYou: ").await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }
}
