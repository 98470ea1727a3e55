mod cli;
mod infra;
mod routes;
mod server;
mod submit;

use ictaaa_site::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
