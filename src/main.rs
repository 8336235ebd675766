// ==========================================
// Backend de Medições - Bootstrap
// ==========================================

use anyhow::Context;
use medicao_api::config::AppConfig;
use medicao_api::{db, logging, APP_NAME, VERSION};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    info!("{} v{} iniciando", APP_NAME, VERSION);

    let config = AppConfig::from_env();
    info!("banco de dados: {}", config.db_path);

    let conn = db::open_connection(&config.db_path)
        .with_context(|| format!("falha ao abrir o banco em {}", config.db_path))?;
    db::init_schema(&conn).context("falha ao criar o schema")?;

    info!("schema pronto; serviço inicializado");
    Ok(())
}
