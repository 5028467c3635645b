mod cli;
mod demo;
mod infra;
mod narrator;
mod routes;
mod server;

use coverage_gap::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
