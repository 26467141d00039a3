//! FastEmbed Local Model Loader
//!
//! Loads ONNX sentence-embedding models through the fastembed library. Each
//! loaded model is owned by a dedicated actor thread; callers talk to it
//! over a channel, so the model needs no lock and inference never blocks
//! the async runtime.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use async_trait::async_trait;
use fastembed::{EmbeddingModel as FastEmbedModelKind, InitOptions, TextEmbedding};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::{EmbeddingModel, ModelLoader};
use themis_domain::value_objects::Vector;

use crate::constants::{FASTEMBED_CACHE_SUBDIR, FASTEMBED_CHANNEL_CAPACITY};

/// Messages for the FastEmbed actor
enum FastEmbedMessage {
    EmbedBatch {
        texts: Vec<String>,
        tx: oneshot::Sender<Result<Vec<Vector>>>,
    },
}

/// Handle to a loaded FastEmbed model
pub struct FastEmbedModel {
    sender: mpsc::Sender<FastEmbedMessage>,
    model_name: String,
    dimensions: usize,
}

impl FastEmbedModel {
    /// Initialise `options`, measure the output dimension and start the actor
    ///
    /// Blocking: may download model files on first use.
    fn start(model_name: String, options: InitOptions) -> Result<Self> {
        let mut text_embedding = TextEmbedding::try_new(options).map_err(|e| {
            Error::model_unavailable(&model_name, format!("FastEmbed initialisation failed: {e}"))
        })?;

        let sample = text_embedding
            .embed(vec!["dimension check"], None)
            .map_err(|e| Error::model_unavailable(&model_name, format!("dimension check failed: {e}")))?;
        let dimensions = sample
            .first()
            .map(Vec::len)
            .ok_or_else(|| Error::model_unavailable(&model_name, "dimension check returned no vector"))?;

        let (tx, rx) = mpsc::channel(FASTEMBED_CHANNEL_CAPACITY);
        let mut actor = FastEmbedActor {
            receiver: rx,
            model: text_embedding,
        };
        thread::Builder::new()
            .name(format!("fastembed-{model_name}"))
            .spawn(move || actor.run())
            .map_err(|e| Error::model_unavailable(&model_name, format!("actor spawn failed: {e}")))?;

        info!(model = %model_name, dimensions, "FastEmbed model ready");
        Ok(Self {
            sender: tx,
            model_name,
            dimensions,
        })
    }
}

#[async_trait]
impl EmbeddingModel for FastEmbedModel {
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vector>> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(FastEmbedMessage::EmbedBatch {
                texts: texts.to_vec(),
                tx,
            })
            .await
            .map_err(|_| Error::embedding("FastEmbed actor channel closed"))?;

        rx.await
            .unwrap_or_else(|_| Err(Error::embedding("FastEmbed actor closed")))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Internal actor that processes embedding requests
struct FastEmbedActor {
    receiver: mpsc::Receiver<FastEmbedMessage>,
    model: TextEmbedding,
}

impl FastEmbedActor {
    fn run(&mut self) {
        while let Some(msg) = self.receiver.blocking_recv() {
            match msg {
                FastEmbedMessage::EmbedBatch { texts, tx } => {
                    debug!(texts = texts.len(), "FastEmbed batch");
                    let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
                    let result = self
                        .model
                        .embed(text_refs, None)
                        .map_err(|e| Error::embedding(format!("FastEmbed embedding failed: {e}")));
                    let _ = tx.send(result);
                }
            }
        }
    }
}

/// Loader for FastEmbed models, keyed by the names in [`parse_embedding_model`]
#[derive(Debug, Clone)]
pub struct FastEmbedModelLoader {
    cache_dir: PathBuf,
    show_download_progress: bool,
}

impl FastEmbedModelLoader {
    /// Create a loader storing model files under `cache_dir`
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            show_download_progress: false,
        }
    }

    /// Show model download progress on stderr
    #[must_use]
    pub fn with_download_progress(mut self, show: bool) -> Self {
        self.show_download_progress = show;
        self
    }

    /// Default model file directory: `<user cache>/themis/models`
    pub fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .map(|dir| dir.join(FASTEMBED_CACHE_SUBDIR))
            .unwrap_or_else(|| PathBuf::from(".fastembed_cache"))
    }
}

impl Default for FastEmbedModelLoader {
    fn default() -> Self {
        Self::new(Self::default_cache_dir())
    }
}

#[async_trait]
impl ModelLoader for FastEmbedModelLoader {
    async fn load(&self, model_name: &str) -> Result<Arc<dyn EmbeddingModel>> {
        let kind = parse_embedding_model(model_name).ok_or_else(|| {
            Error::model_unavailable(model_name, "not a supported FastEmbed model")
        })?;
        let options = InitOptions::new(kind)
            .with_cache_dir(self.cache_dir.clone())
            .with_show_download_progress(self.show_download_progress);

        let name = model_name.to_string();
        let model = tokio::task::spawn_blocking(move || FastEmbedModel::start(name, options))
            .await
            .map_err(|e| Error::model_unavailable(model_name, format!("loader task failed: {e}")))??;
        Ok(Arc::new(model))
    }

    fn provider_name(&self) -> &str {
        "fastembed"
    }
}

/// Map a configured model name to a FastEmbed model
///
/// Unknown names are rejected rather than replaced by a default model.
pub fn parse_embedding_model(model_name: &str) -> Option<FastEmbedModelKind> {
    let kind = match model_name.to_lowercase().as_str() {
        "multilingual-e5-large" | "intfloat/multilingual-e5-large" => {
            FastEmbedModelKind::MultilingualE5Large
        }
        "multilingual-e5-base" | "intfloat/multilingual-e5-base" => {
            FastEmbedModelKind::MultilingualE5Base
        }
        "multilingual-e5-small" | "intfloat/multilingual-e5-small" => {
            FastEmbedModelKind::MultilingualE5Small
        }
        "all-minilm-l6-v2" | "allminilml6v2" => FastEmbedModelKind::AllMiniLML6V2,
        "bge-small-en" | "bgesmallen" => FastEmbedModelKind::BGESmallENV15,
        "bge-base-en" | "bgebaseen" => FastEmbedModelKind::BGEBaseENV15,
        "bge-large-en" | "bgelargeen" => FastEmbedModelKind::BGELargeENV15,
        _ => return None,
    };
    Some(kind)
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use themis_application::ports::registry::{
    EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry,
};

/// Factory function for creating FastEmbed loader instances.
fn fastembed_factory(
    config: &EmbeddingProviderConfig,
) -> std::result::Result<Arc<dyn ModelLoader>, String> {
    let cache_dir = config
        .cache_dir
        .clone()
        .unwrap_or_else(FastEmbedModelLoader::default_cache_dir);
    Ok(Arc::new(
        FastEmbedModelLoader::new(cache_dir).with_download_progress(config.show_download_progress),
    ))
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static FASTEMBED_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "fastembed",
    description: "FastEmbed local ONNX models (multilingual-e5-large, multilingual-e5-small, ...)",
    factory: fastembed_factory,
};
