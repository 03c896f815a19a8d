mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use fund_diagnosis::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
