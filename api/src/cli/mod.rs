use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::Bytes;
use clap::Parser;
use nutrilens_core::{
    domain::{
        capture::{CapturePhase, CaptureSession},
        food_analysis::value_objects::ImageFile,
        nutrition_view::{CalorieScale, RenderOptions, ResultView},
    },
    infrastructure::api_client::HttpAnalysisGateway,
};
use url::Url;

pub mod render;

pub use render::render_text;

#[derive(Debug, Clone, Parser)]
#[command(name = "nutrilens-cli", version, about = "Analyse a meal photo with a NutriLens server")]
pub struct CliArgs {
    #[arg(long, env = "NUTRILENS_API_BASE", default_value = "http://localhost:8083")]
    pub api_base: Url,

    /// Daily calorie target used for the calorie ring
    #[arg(long, default_value_t = CalorieScale::DEFAULT_DAILY_TARGET_KCAL)]
    pub calorie_target: f64,

    /// Path to the meal photo
    pub image: PathBuf,
}

pub fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

pub async fn run(args: CliArgs) -> Result<String, anyhow::Error> {
    let data = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("cannot read {}", args.image.display()))?;

    let photo = ImageFile::new(
        args.image
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string),
        mime_for(&args.image).map(str::to_string),
        Bytes::from(data),
    );

    let gateway = HttpAnalysisGateway::new(&args.api_base);
    let mut session = CaptureSession::new();
    session.capture(photo)?;
    session.submit_with(&gateway).await?;

    match session.phase() {
        CapturePhase::Showing { result, .. } => {
            let options = RenderOptions {
                calorie_scale: CalorieScale::new(args.calorie_target),
                ..RenderOptions::default()
            };
            Ok(render_text(&ResultView::from_result(result, &options)))
        }
        CapturePhase::Failed { message, .. } => Err(anyhow::anyhow!(message.clone())),
        other => Err(anyhow::anyhow!("unexpected capture state: {:?}", other)),
    }
}
