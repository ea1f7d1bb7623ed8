//! Developer CLI for driving the analysis gateway.
//!
//! Usage:
//!     trulogo analyze logo.png --brand "Acme" --context "coffee shop"
//!     trulogo generate --description "batik textile brand" --style minimalist
//!     trulogo advise --risk-level High --context "shield shape"
//!     trulogo remedy --risk-level Medium

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use trulogo_gateway::{AnalysisGateway, GeminiBackend, GeminiConfig};
use trulogo_model::{AnalysisResult, AppView, RiskLevel, SupportedLanguage};
use trulogo_payload::{read_image_file, ImagePayload};
use trulogo_remedy::{remedy_for, remedy_for_result, summarize_risk, Remedy};
use trulogo_session::{Completion, Session};

#[derive(Parser)]
#[command(name = "trulogo")]
#[command(about = "Trademark risk analysis for logos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the Gemini API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Display language code (en, id, vi, th, ms)
    #[arg(long, global = true, default_value = "en")]
    language: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a logo image for trademark risk
    Analyze {
        /// Path to the logo image
        image: PathBuf,

        /// Brand name shown with the logo
        #[arg(short, long)]
        brand: String,

        /// Extra context (industry, market)
        #[arg(short, long, default_value = "")]
        context: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate trademark-safe logo alternatives
    Generate {
        /// What the company does
        #[arg(short, long)]
        description: String,

        /// Visual style
        #[arg(short, long, default_value = "modern minimalist")]
        style: String,

        /// Directory to write images to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Ask for AI legal advice, followed by offline guidance
    Advise {
        /// Risk level (Low, Medium, High, Critical)
        #[arg(short, long)]
        risk_level: RiskLevel,

        /// Issues found
        #[arg(short, long, default_value = "")]
        context: String,
    },

    /// Show offline remedy guidance for a risk level
    Remedy {
        /// Risk level (Low, Medium, High, Critical)
        #[arg(short, long)]
        risk_level: RiskLevel,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trulogo=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let language = SupportedLanguage::from_code(&cli.language)
        .with_context(|| format!("unsupported language code: {}", cli.language))?;

    let mut config = GeminiConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let gateway = AnalysisGateway::gemini(config)?;
    if gateway.service().config().api_key().is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; AI calls will return fallback values");
    }

    match cli.command {
        Commands::Analyze {
            image,
            brand,
            context,
            format,
        } => {
            run_analyze(&gateway, &image, &brand, &context, language, format).await?;
        }
        Commands::Generate {
            description,
            style,
            out_dir,
        } => {
            run_generate(&gateway, &description, &style, &out_dir).await?;
        }
        Commands::Advise {
            risk_level,
            context,
        } => {
            run_advise(&gateway, risk_level, &context).await;
        }
        Commands::Remedy { risk_level } => {
            print_remedy(&remedy_for(risk_level));
        }
    }

    Ok(())
}

async fn run_analyze(
    gateway: &AnalysisGateway<GeminiBackend>,
    image: &Path,
    brand: &str,
    context: &str,
    language: SupportedLanguage,
    format: OutputFormat,
) -> Result<()> {
    let payload = read_image_file(image)
        .await
        .with_context(|| format!("reading {}", image.display()))?;

    let mut session = Session::new();
    session.set_language(language);
    session.navigate(AppView::Analysis);

    if let Completion::Stale { sequence, latest } = session
        .run_analysis(gateway, &payload.data, brand, context)
        .await
    {
        anyhow::bail!("analysis {} superseded by {}", sequence, latest);
    }
    let result = session
        .current_result()
        .context("analysis produced no result")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_analysis(brand, session.language(), &result),
    }

    Ok(())
}

fn print_analysis(brand: &str, language: SupportedLanguage, result: &AnalysisResult) {
    println!("Brand: {}", brand);
    println!("Language: {}", language.label());
    println!("---");
    println!("{}", summarize_risk(result));
    println!("\nSummary: {}", result.summary);

    if !result.visual_features.is_empty() {
        println!("Visual features: {}", result.visual_features.join(", "));
    }

    for (i, m) in result.similar_trademarks.iter().enumerate() {
        println!(
            "\n{}. {} ({:.0}% similar)",
            i + 1,
            m.name,
            m.similarity_score
        );
        println!("   {} | {:?} | {}", m.class_id, m.status, m.owner);
    }

    println!("\nRecommendation: {}", result.recommendation_summary);
    println!("---");
    print_remedy(&remedy_for_result(result));
}

async fn run_generate(
    gateway: &AnalysisGateway<GeminiBackend>,
    description: &str,
    style: &str,
    out_dir: &Path,
) -> Result<()> {
    let images = gateway.generate_safe_logo(description, style).await;

    if images.is_empty() {
        println!("No images generated.");
        return Ok(());
    }

    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("creating {}", out_dir.display()))?;

    for (i, url) in images.iter().enumerate() {
        let payload = ImagePayload::from_data_url(url)?;
        let path = out_dir.join(format!("logo-{}.{}", i + 1, payload.extension()));
        tokio::fs::write(&path, payload.decode()?)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

async fn run_advise(gateway: &AnalysisGateway<GeminiBackend>, risk_level: RiskLevel, context: &str) {
    let advice = gateway.get_legal_advice(risk_level, context).await;
    println!("{}", advice);
    println!("\n---");
    print_remedy(&remedy_for(risk_level));
}

fn print_remedy(remedy: &Remedy) {
    println!("{} - {}", remedy.status, remedy.action);
    for (i, step) in remedy.steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    for warning in &remedy.specific_warnings {
        println!("  ! {}", warning);
    }
    println!("Note: {}", remedy.warning);
}
