pub mod answer;
pub mod search;

use std::{future::Future, pin::Pin, sync::Arc};

pub use answer::{AnswerRequest, AnswerResponse};
pub use search::{SemanticSearchHit, SemanticSearchRequest, SemanticSearchResponse};

use sibyl_config::{Config, GenerationProviderConfig, ProviderConfig};
use sibyl_domain::fusion::KeywordRow;
use sibyl_providers::{
	documents::{self, DocumentRecord},
	generation, keyword,
	vector::{self, ChunkContext, VectorSearchResponse},
};

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait VectorSearchProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		namespace: &'a str,
		query: &'a str,
		limit: u32,
		chunk_context: ChunkContext,
	) -> BoxFuture<'a, color_eyre::Result<VectorSearchResponse>>;
}

pub trait KeywordSearchProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		limit: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<KeywordRow>>>;
}

pub trait DocumentStoreProvider
where
	Self: Send + Sync,
{
	fn get_by_id<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		document_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<DocumentRecord>>>;
}

pub trait GenerationProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a GenerationProviderConfig,
		system_prompt: &'a str,
		user_prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

#[derive(Debug)]
pub enum ServiceError {
	InvalidRequest { message: String },
	Provider { message: String },
}

impl std::fmt::Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidRequest { message } => write!(f, "Invalid request: {message}"),
			Self::Provider { message } => write!(f, "Provider error: {message}"),
		}
	}
}

impl std::error::Error for ServiceError {}

impl From<color_eyre::Report> for ServiceError {
	fn from(err: color_eyre::Report) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

#[derive(Clone)]
pub struct Providers {
	pub vector_search: Arc<dyn VectorSearchProvider>,
	pub keyword_search: Arc<dyn KeywordSearchProvider>,
	pub document_store: Arc<dyn DocumentStoreProvider>,
	pub generation: Arc<dyn GenerationProvider>,
}

pub struct SibylService {
	pub cfg: Config,
	pub providers: Providers,
}

struct DefaultProviders;

impl VectorSearchProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		namespace: &'a str,
		query: &'a str,
		limit: u32,
		chunk_context: ChunkContext,
	) -> BoxFuture<'a, color_eyre::Result<VectorSearchResponse>> {
		Box::pin(vector::search(cfg, namespace, query, limit, chunk_context))
	}
}

impl KeywordSearchProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		limit: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<KeywordRow>>> {
		Box::pin(keyword::search(cfg, query, limit))
	}
}

impl DocumentStoreProvider for DefaultProviders {
	fn get_by_id<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		document_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<DocumentRecord>>> {
		Box::pin(documents::get_by_id(cfg, document_id))
	}
}

impl GenerationProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a GenerationProviderConfig,
		system_prompt: &'a str,
		user_prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(generation::complete(cfg, system_prompt, user_prompt))
	}
}

impl Providers {
	pub fn new(
		vector_search: Arc<dyn VectorSearchProvider>,
		keyword_search: Arc<dyn KeywordSearchProvider>,
		document_store: Arc<dyn DocumentStoreProvider>,
		generation: Arc<dyn GenerationProvider>,
	) -> Self {
		Self { vector_search, keyword_search, document_store, generation }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self {
			vector_search: provider.clone(),
			keyword_search: provider.clone(),
			document_store: provider.clone(),
			generation: provider,
		}
	}
}

impl SibylService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}
}
