use clap::Parser;
use nutrilens_api::cli::{CliArgs, run};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let output = run(CliArgs::parse()).await?;
    println!("{output}");

    Ok(())
}
