use clap::Parser;
use clipscribe::pipeline::{self, Context};
use futures_util::StreamExt;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "clipscribe-upload",
    about = "Convert a video to MP3, upload it, and request an AI transcription"
)]
struct Cli {
    /// Video file to process.
    input: PathBuf,

    /// Keyword hints forwarded to the speech recognizer.
    #[arg(short, long)]
    prompt: Option<String>,

    /// Prompt template for a follow-up completion; the first
    /// `{transcription}` marker is replaced with the transcript.
    #[arg(short, long)]
    generate: Option<String>,

    /// Sampling temperature for the completion.
    #[arg(short, long, default_value = "0.5")]
    temperature: f32,

    /// Backend base URL.
    #[arg(long, default_value = "http://localhost:3333")]
    api_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let ctx = Context::new(&cli.api_url)?;

    let video_id = pipeline::run(&ctx, Some(&cli.input), cli.prompt.as_deref(), |stage| {
        println!("[{}]", stage.label());
    })
    .await?;

    let Some(video_id) = video_id else {
        return Ok(());
    };

    println!("Video {} uploaded and transcribed.", video_id);

    if let Some(template) = cli.generate {
        let stream = ctx
            .api()
            .generate(video_id, &template, cli.temperature)
            .await?;
        let mut stream = Box::pin(stream);

        let mut stdout = std::io::stdout();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            stdout.write_all(&chunk)?;
            stdout.flush()?;
        }
        println!();
    }

    Ok(())
}
