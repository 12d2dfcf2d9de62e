mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use networking_lab::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
