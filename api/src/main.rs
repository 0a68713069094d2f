use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use nutrilens_api::{
    application::http::server::http_server::{router, state, with_metrics},
    args::Args,
    logging::init_logger,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log);

    let app_state = state(args.clone()).await?;
    let app = with_metrics(router(app_state)?, &args.server.root_path)
        .into_make_service_with_connect_info::<SocketAddr>();

    let addr: SocketAddr = format!("{}:{}", args.server.host, args.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                args.server.host, args.server.port
            )
        })?;

    match (&args.server.tls_cert, &args.server.tls_key) {
        (Some(cert), Some(key)) => {
            rustls::crypto::aws_lc_rs::default_provider()
                .install_default()
                .map_err(|_| anyhow::anyhow!("failed to install rustls crypto provider"))?;

            let tls = RustlsConfig::from_pem_file(cert, key)
                .await
                .context("failed to load TLS certificate")?;

            info!("NutriLens API listening on https://{}", addr);
            axum_server::bind_rustls(addr, tls).serve(app).await?;
        }
        _ => {
            info!("NutriLens API listening on http://{}", addr);
            axum_server::bind(addr).serve(app).await?;
        }
    }

    Ok(())
}
