mod catalog;
mod cli;
mod matcher;
mod server;
mod util;
mod vision;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::Cli::new().run().await
}
