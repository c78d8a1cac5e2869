use anyhow::Result;
use clap::Parser;
use food_analyzer::ai::OpenAiFoodAnalysisClient;
use food_analyzer::image::CapturedImage;
use food_analyzer::models::{AnalysisResult, Config};
use food_analyzer::session::{
    user_message, CaptureSession, PhotoSelection, SessionState, Submission,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "food-analyzer")]
#[command(about = "Estimate the calories of the main food in a photo")]
struct CliArgs {
    /// Path to a food photo (JPEG, PNG, WebP, ...).
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Print the result as JSON instead of a sentence.
    #[arg(long)]
    json: bool,
}

fn format_result(result: &AnalysisResult, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(result)?)
    } else {
        Ok(format!(
            "{}: {} kcal (estimate)",
            result.food_name, result.calories
        ))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "food_analyzer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let image = match CapturedImage::open(&args.image) {
        Ok(image) => image,
        Err(e) => {
            error!("Failed to read {}: {}", args.image.display(), e);
            eprintln!("{}", user_message(&e));
            std::process::exit(1);
        }
    };

    info!("Analyzing {} with {}", args.image.display(), config.model);
    let session = CaptureSession::new(Arc::new(OpenAiFoodAnalysisClient::from_config(&config)));

    match session.submit(PhotoSelection::Captured(image)).await {
        Submission::Completed(SessionState::Analyzed(result)) => {
            println!("{}", format_result(&result, args.json)?);
            Ok(())
        }
        Submission::Completed(SessionState::Failed(message)) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
        other => {
            error!("Analysis ended in unexpected state: {:?}", other);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> AnalysisResult {
        AnalysisResult {
            food_name: "Apple".to_string(),
            calories: 95,
        }
    }

    #[test]
    fn test_format_result_sentence() {
        assert_eq!(
            format_result(&apple(), false).unwrap(),
            "Apple: 95 kcal (estimate)"
        );
    }

    #[test]
    fn test_format_result_json() {
        assert_eq!(
            format_result(&apple(), true).unwrap(),
            r#"{"food_name":"Apple","calories":95}"#
        );
    }

    #[test]
    fn test_cli_requires_image() {
        assert!(CliArgs::try_parse_from(["food-analyzer"]).is_err());

        let args = CliArgs::try_parse_from(["food-analyzer", "--json", "lunch.jpg"]).unwrap();
        assert!(args.json);
        assert_eq!(args.image, PathBuf::from("lunch.jpg"));
    }
}
