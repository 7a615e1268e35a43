use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promo_palette::cli::{Args, OutputFormat};
use promo_palette::pipeline::extract::extract_palette;
use promo_palette::preview::print_swatches;
use promo_palette::theme::PromoTheme;
use promo_palette::ImageSource;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promo_palette=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let palette = match &args.assign {
        Some(colors) => colors.clone(),
        None => {
            let sources: Vec<ImageSource> =
                args.sources.iter().map(|s| ImageSource::from(s.as_str())).collect();
            let opts = args.extract_options();
            info!(
                sources = sources.len(),
                clusters = opts.clusters,
                seeding = ?opts.seeding,
                "extracting palette"
            );
            extract_palette(&sources, &opts)
                .await
                .context("palette extraction failed")?
        }
    };

    let theme = PromoTheme::from_palette(palette);

    if args.preview {
        print_swatches(&mut std::io::stderr(), &theme).context("failed to print preview")?;
    }

    let rendered = match args.format {
        OutputFormat::Text => theme.to_text(),
        OutputFormat::Json => theme.to_json()? + "\n",
        OutputFormat::Css => theme.to_css(),
    };

    match &args.output {
        Some(path) => {
            PromoTheme::write_to(&rendered, path)?;
            info!(path = %path.display(), "wrote theme");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
