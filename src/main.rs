use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use russian_hover::config::{self, Config};
use russian_hover::hover::{
    HoverContext, HoverEvent, HoverResolver, PopupModel, ResolverOptions, StreamKind,
};
use russian_hover::phonetics::Transliterator;
use russian_hover::recognition::NoRecognizer;
use russian_hover::translation::deepseek::DeepSeekFetcher;
use russian_hover::translation::mock::MockFetcher;
use russian_hover::translation::{TranslationCache, TranslationFetcher};

#[derive(Parser, Debug)]
#[command(version, about = "Hover-to-translate for Russian text", long_about = None)]
struct Args {
    /// Path to config.json (defaults to ./config.json, then the user config dir)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Use canned translations instead of the remote model
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a pronunciation guide for each word of TEXT
    Pronounce {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Translate a single word and print the entry as JSON
    Lookup { word: String },
    /// Simulate hovering over TEXT at a character OFFSET
    Hover {
        #[arg(short, long)]
        text: String,
        #[arg(short, long)]
        offset: usize,
    },
    /// Write a default config file
    InitConfig { path: Option<PathBuf> },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = args
        .config
        .as_deref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let config = Config::load(&config_path)?;
    config.validate().context("invalid configuration")?;

    match args.command {
        Command::Pronounce { text } => {
            let phonetics = Transliterator::new();
            for line in phonetics.pronunciation_guide(&text.join(" ")) {
                println!("{line}");
            }
        }
        Command::Lookup { word } => {
            let cache = TranslationCache::new(fetcher(&config, args.offline)?);
            let entry = cache.get(&word).await;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        Command::Hover { text, offset } => {
            let cache = Arc::new(TranslationCache::new(fetcher(&config, args.offline)?));
            hover(&config, Arc::clone(&cache), text, offset).await?;
            info!("Cache: {:?}", cache.stats());
        }
        Command::InitConfig { path } => {
            let path = path.unwrap_or_else(config::default_config_path);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            Config::default().save(&path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn fetcher(config: &Config, offline: bool) -> Result<Arc<dyn TranslationFetcher>> {
    if offline {
        info!("Offline mode: using canned translations");
        return Ok(Arc::new(MockFetcher::default()));
    }
    let fetcher =
        DeepSeekFetcher::new(config.translation.clone()).context("failed to build HTTP client")?;
    Ok(Arc::new(fetcher))
}

/// Drive a text-stream resolver through one hover and print every popup
/// state as a JSON line.
async fn hover(
    config: &Config,
    cache: Arc<TranslationCache>,
    text: String,
    offset: usize,
) -> Result<()> {
    let ctx = HoverContext {
        phonetics: Arc::new(Transliterator::new()),
        cache,
        recognizer: Arc::new(NoRecognizer),
    };
    let (events, rx) = mpsc::channel(config.hover.event_queue);
    let (sink, mut updates) = mpsc::unbounded_channel();
    let options = ResolverOptions::for_stream(StreamKind::Text, &config.hover);
    let handle = HoverResolver::new(StreamKind::Text, ctx, options, sink).spawn(rx);

    events.send(HoverEvent::TextChanged(text)).await?;
    events
        .send(HoverEvent::TextMotion {
            offset: Some(offset),
        })
        .await?;

    let mut popup = PopupModel::default();
    // A single motion either settles into a final state or leaves the
    // pointer off any Russian word, which never opens the popup.
    let settle = config.hover.local_debounce() * 2;
    loop {
        let update = match tokio::time::timeout(settle, updates.recv()).await {
            Ok(Some(update)) => update,
            Ok(None) => break,
            Err(_) if !popup.is_visible() => {
                println!("No Russian word at offset {offset}");
                break;
            }
            Err(_) => continue,
        };
        println!("{}", serde_json::to_string(&update)?);
        let done = update.presentation.is_final();
        popup.apply(update);
        if done {
            break;
        }
    }

    drop(events);
    handle.await.context("resolver task failed")?;
    Ok(())
}
