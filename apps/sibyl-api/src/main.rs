use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = sibyl_api::Args::parse();

	sibyl_api::run(args).await
}
