mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Answer, Config, GenerationProviderConfig, ProviderConfig, Providers, Search, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.search.namespace.trim().is_empty() {
		return Err(Error::Validation {
			message: "search.namespace must be non-empty.".to_string(),
		});
	}
	if cfg.search.vector_limit == 0 {
		return Err(Error::Validation {
			message: "search.vector_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.keyword_limit == 0 {
		return Err(Error::Validation {
			message: "search.keyword_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.answer.max_context_chars == 0 {
		return Err(Error::Validation {
			message: "answer.max_context_chars must be greater than zero.".to_string(),
		});
	}
	if !cfg.providers.generation.temperature.is_finite() {
		return Err(Error::Validation {
			message: "providers.generation.temperature must be a finite number.".to_string(),
		});
	}
	if !(0.0..=2.0).contains(&cfg.providers.generation.temperature) {
		return Err(Error::Validation {
			message: "providers.generation.temperature must be in the range 0.0-2.0.".to_string(),
		});
	}

	for (label, provider) in [
		("vector_search", &cfg.providers.vector_search),
		("keyword_search", &cfg.providers.keyword_search),
		("document_store", &cfg.providers.document_store),
	] {
		validate_provider(label, provider)?;
	}

	if cfg.providers.generation.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "Provider generation api_base must be non-empty.".to_string(),
		});
	}
	if cfg.providers.generation.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "Provider generation api_key must be non-empty.".to_string(),
		});
	}
	if cfg.providers.generation.model.trim().is_empty() {
		return Err(Error::Validation {
			message: "Provider generation model must be non-empty.".to_string(),
		});
	}
	if cfg.providers.generation.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "Provider generation timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn validate_provider(label: &str, provider: &ProviderConfig) -> Result<()> {
	if provider.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: format!("Provider {label} api_base must be non-empty."),
		});
	}
	if provider.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: format!("Provider {label} api_key must be non-empty."),
		});
	}
	if provider.timeout_ms == 0 {
		return Err(Error::Validation {
			message: format!("Provider {label} timeout_ms must be greater than zero."),
		});
	}

	Ok(())
}
