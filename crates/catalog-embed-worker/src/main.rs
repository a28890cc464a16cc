use std::process::ExitCode;
use std::sync::Arc;

use catalog_embed::{DescriptionSynthesizer, DomainError, EmbeddingService};

mod adapters;
mod application;
mod config;
mod logging;

use adapters::{OpenAiEmbeddingService, SupabaseProductRepository};
use application::{ReindexService, RunSummary};
use config::{EmbeddingConfig, EmbeddingProvider, LogFormat, WorkerConfig};

/// Application service with the concrete repository; the model is chosen at runtime
pub type AppReindexService = ReindexService<SupabaseProductRepository, dyn EmbeddingService>;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before logging so LOG_FORMAT and RUST_LOG can come from it
    let env_file = config::load_env_file();
    logging::init(LogFormat::from_env());

    match env_file {
        Ok(Some(path)) => tracing::info!("📂 Reading configuration from {}", path.display()),
        Ok(None) => tracing::info!("📂 No .env file found, using process environment"),
        Err(e) => return abort(e),
    }

    match run().await {
        Ok(_summary) => ExitCode::SUCCESS,
        Err(e) => abort(e),
    }
}

async fn run() -> Result<RunSummary, DomainError> {
    let config = WorkerConfig::from_env()?;

    let repo = Arc::new(SupabaseProductRepository::new(
        config.supabase.clone(),
        config.request_timeout,
    )?);
    tracing::info!("🔌 Supabase client ready ({})", config.supabase.url);

    tracing::info!(
        provider = %config.embedding.provider,
        "⏳ Loading embedding model {}...",
        config.embedding.model
    );
    let embedder = load_embedder(&config).await?;
    match embedder.dimensions() {
        Some(dims) => tracing::info!("✅ Model {} ready ({} dims)", embedder.model_name(), dims),
        None => tracing::info!("✅ Model {} ready", embedder.model_name()),
    }

    let synthesizer = DescriptionSynthesizer::new(config.locale);
    tracing::info!("📝 Description template: {}", synthesizer.locale());

    let service: AppReindexService = ReindexService::new(
        repo,
        embedder,
        synthesizer,
        config.supabase.seller.clone(),
        config.retry.clone(),
    );

    service.run().await
}

async fn load_embedder(config: &WorkerConfig) -> Result<Arc<dyn EmbeddingService>, DomainError> {
    match config.embedding.provider {
        EmbeddingProvider::OpenAi => {
            let service =
                OpenAiEmbeddingService::connect(&config.embedding, config.request_timeout).await?;
            Ok(Arc::new(service))
        }
        EmbeddingProvider::Local => load_local(&config.embedding).await,
    }
}

#[cfg(feature = "local")]
async fn load_local(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingService>, DomainError> {
    let service = adapters::LocalEmbeddingService::load(&config.model).await?;
    Ok(Arc::new(service))
}

#[cfg(not(feature = "local"))]
async fn load_local(_config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingService>, DomainError> {
    Err(DomainError::Configuration(
        "EMBEDDING_PROVIDER=local needs a build with `--features local`".to_string(),
    ))
}

fn abort(e: DomainError) -> ExitCode {
    tracing::error!("❌ [{}] {}", e.category(), e);
    ExitCode::FAILURE
}
