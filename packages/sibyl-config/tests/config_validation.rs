use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use sibyl_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with<F>(mutate: F) -> String
where
	F: FnOnce(&mut toml::Table),
{
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let root = value.as_table_mut().expect("Template config must be a table.");

	mutate(root);

	toml::to_string(&value).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("sibyl_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn vector_limit_must_be_positive() {
	let payload = sample_toml_with(|root| {
		let search = root
			.get_mut("search")
			.and_then(Value::as_table_mut)
			.expect("Template config must include [search].");

		search.insert("vector_limit".to_string(), Value::Integer(0));
	});
	let path = write_temp_config(payload);
	let result = sibyl_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected vector_limit validation error.");

	assert!(
		err.to_string().contains("search.vector_limit must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn api_keys_must_be_non_empty() {
	let mut cfg = base_config();

	cfg.providers.keyword_search.api_key = "   ".to_string();

	let err = sibyl_config::validate(&cfg).expect_err("Expected api_key validation error.");

	assert!(
		err.to_string().contains("Provider keyword_search api_key must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn generation_temperature_must_be_finite() {
	let mut cfg = base_config();

	cfg.providers.generation.temperature = f32::NAN;

	let err = sibyl_config::validate(&cfg).expect_err("Expected temperature validation error.");

	assert!(
		err.to_string().contains("providers.generation.temperature must be a finite number."),
		"Unexpected error: {err}"
	);
}

#[test]
fn generation_temperature_must_be_in_range() {
	let mut cfg = base_config();

	cfg.providers.generation.temperature = 2.5;

	let err =
		sibyl_config::validate(&cfg).expect_err("Expected temperature range validation error.");

	assert!(
		err.to_string().contains("providers.generation.temperature must be in the range 0.0-2.0."),
		"Unexpected error: {err}"
	);
}

#[test]
fn max_context_chars_must_be_positive() {
	let mut cfg = base_config();

	cfg.answer.max_context_chars = 0;

	let err =
		sibyl_config::validate(&cfg).expect_err("Expected max_context_chars validation error.");

	assert!(
		err.to_string().contains("answer.max_context_chars must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn missing_generation_model_is_a_parse_error() {
	let payload = sample_toml_with(|root| {
		let generation = root
			.get_mut("providers")
			.and_then(Value::as_table_mut)
			.and_then(|providers| providers.get_mut("generation"))
			.and_then(Value::as_table_mut)
			.expect("Template config must include [providers.generation].");

		generation.remove("model");
	});
	let path = write_temp_config(payload);
	let result = sibyl_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let message = match result.expect_err("Expected missing model parse error.") {
		Error::ParseConfig { source, .. } => source.to_string(),
		err => panic!("Expected parse config error, got {err}"),
	};

	assert!(message.contains("missing field `model`"), "Unexpected error: {message}");
}

#[test]
fn sibyl_example_toml_is_valid() {
	let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

	path.push("../../sibyl.example.toml");

	sibyl_config::load(&path).expect("Expected sibyl.example.toml to be a valid config.");
}
