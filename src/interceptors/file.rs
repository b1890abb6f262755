use super::{Exchange, Interceptor};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Writes each exchange to `<base_path>/<purpose>_<timestamp>_a<attempt>.md`.
#[derive(Debug)]
pub struct FileInterceptor {
    base_path: PathBuf,
}

impl FileInterceptor {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }
}

fn render(exchange: &Exchange<'_>) -> String {
    let (heading, body) = match exchange.outcome {
        Ok(text) => ("Response", text),
        Err(error) => ("Error", error),
    };
    format!(
        "# {} ({}, attempt {})\n\n## Prompt\n\n{}\n\n## {}\n\n{}\n",
        exchange.purpose, exchange.topic, exchange.attempt, exchange.prompt, heading, body
    )
}

#[async_trait]
impl Interceptor for FileInterceptor {
    async fn save(&self, exchange: &Exchange<'_>) -> std::io::Result<()> {
        let timestamp = Utc::now();
        let filename = format!(
            "{}_{}_a{}.md",
            exchange.purpose,
            timestamp.format("%Y%m%d_%H%M%S_%6f"),
            exchange.attempt
        );
        let file_path = self.base_path.join(filename);

        fs::create_dir_all(&self.base_path).await?;

        let mut file = fs::File::create(&file_path).await?;
        file.write_all(render(exchange).as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}
