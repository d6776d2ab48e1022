use crate::config::AppConfig;
use crate::error::Result;
use crate::runtime::build_engine;
use crate::server;

pub async fn execute(config: &AppConfig) -> Result<()> {
	let addr = config.bind_addr()?;
	let engine = build_engine(config)?;
	server::serve(engine, addr).await?;
	Ok(())
}
