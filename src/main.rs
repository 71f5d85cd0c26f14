use boletin_marcas::errors::{AppError, AppResult};
use boletin_marcas::{cli, logging};

fn main() -> AppResult<()> {
    logging::init_logging();

    let rt = tokio::runtime::Runtime::new().map_err(|e| AppError::IoError(e.to_string()))?;
    rt.block_on(cli::cli())
}
