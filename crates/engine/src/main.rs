//! Light novel engine - generates one chapter from a story bundle.
//!
//! Usage: `lightnovel-engine <bundle.json> <chapter> <plot directive> [target words] [style preset]`
//!
//! The story is the first one in the bundle. Settings come from the JSON file
//! named by `LIGHTNOVEL_SETTINGS` (optional) and the environment.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lightnovel_engine::infrastructure::{
    ollama::OllamaClient,
    ports::{LlmPort, SystemClock},
    settings::EngineSettings,
    story_bundle::JsonStoryBundle,
};
use lightnovel_engine::prompt_templates::SystemPrompts;
use lightnovel_engine::use_cases::{
    ChapterGenerator, ChapterRequest, GenerationService, GenerationWorker, UseCaseError,
};

struct CliArgs {
    bundle: PathBuf,
    chapter_number: u32,
    plot_directive: String,
    target_words: Option<u32>,
    style_preset: Option<String>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        bail!(
            "usage: lightnovel-engine <bundle.json> <chapter> <plot directive> [target words] [style preset]"
        );
    }
    let chapter_number = args[1]
        .parse()
        .with_context(|| format!("chapter must be a positive number, got {:?}", args[1]))?;
    let target_words = args
        .get(3)
        .map(|raw| raw.parse::<u32>())
        .transpose()
        .context("target words must be a number")?;

    Ok(CliArgs {
        bundle: PathBuf::from(&args[0]),
        chapter_number,
        plot_directive: args[2].clone(),
        target_words,
        style_preset: args.get(4).cloned(),
    })
}

fn load_settings() -> anyhow::Result<EngineSettings> {
    let mut settings = match std::env::var("LIGHTNOVEL_SETTINGS") {
        Ok(path) => EngineSettings::load_from_file(Path::new(&path))?,
        Err(_) => EngineSettings::default(),
    };
    settings.apply_env_overrides(|key| std::env::var(key).ok())?;
    settings.validate()?;
    Ok(settings)
}

/// Creates a cancellation token and spawns a task that cancels it on Ctrl+C
fn setup_cancel_signal(cancel_token: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received Ctrl+C, cancelling generation...");
                cancel_token.cancel();
            }
            Err(e) => tracing::warn!(error = %e, "Failed to install Ctrl+C handler"),
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lightnovel_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args()?;
    let settings = load_settings()?;
    tracing::info!(
        base_url = %settings.ollama.base_url,
        model = %settings.ollama.model,
        "Starting light novel engine"
    );

    let bundle = JsonStoryBundle::load(&args.bundle).await?;
    let story_id = match bundle.stories().first() {
        Some(story) => story.id,
        None => bail!("bundle {} contains no stories", args.bundle.display()),
    };

    let llm: Arc<dyn LlmPort> = Arc::new(OllamaClient::from_settings(&settings));
    if !llm.check_availability().await {
        bail!(
            "Ollama is not reachable at {}. Make sure it's running.",
            settings.ollama.base_url
        );
    }

    let cancel_token = CancellationToken::new();
    setup_cancel_signal(cancel_token.clone());

    let generation = GenerationService::new(Arc::clone(&llm), SystemPrompts::from_env())
        .with_generation_defaults(&settings.generation)
        .with_worker(GenerationWorker::with_shutdown(Arc::clone(&llm), cancel_token));
    let generator = ChapterGenerator::new(
        Arc::new(bundle),
        Arc::new(generation),
        settings.generation.clone(),
        settings.style_presets.clone(),
        Arc::new(SystemClock),
    );

    let mut request = ChapterRequest::new(story_id, args.chapter_number, args.plot_directive);
    request.target_words = args.target_words;
    request.style_preset = args.style_preset;

    match generator.generate(&request).await {
        Ok(draft) => {
            tracing::info!(
                chapter = draft.chapter_number,
                words = draft.word_count,
                "Chapter generated"
            );
            println!("{}", draft.content);
            Ok(())
        }
        Err(e) => {
            if let UseCaseError::Llm(llm_error) = &e {
                eprintln!("{}", llm_error.display_text());
            }
            Err(e.into())
        }
    }
}
