use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use pdf_image_grid::{
    ConversionEvent, ConversionOptions, ImageEntry, LayoutStyle, PageSize, spawn_conversion,
};
use std::path::PathBuf;

mod files;

#[derive(Parser)]
#[command(
    name = "img2pdf",
    about = "Lay out SVG and raster images on a 3x3 grid per PDF page",
    version
)]
struct Cli {
    /// Image files (.svg, .png, .jpg, .jpeg, .webp)
    files: Vec<PathBuf>,

    /// Add every supported image in this folder
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Folder for the generated PDF; a free name is picked inside it
    #[arg(long, conflicts_with = "output")]
    out_dir: Option<PathBuf>,

    /// Exact output PDF file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Images per page (1-12)
    #[arg(long)]
    per_page: Option<usize>,

    /// Output paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Layout style
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// Faster, uncompressed output without the upscale limit
    #[arg(long)]
    draft: bool,

    /// JSON options file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A3,
    A2,
    A1,
    A0,
    Letter,
    Legal,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// Margins and padding, SVG only
    Framed,
    /// Edge to edge, all formats
    Borderless,
}

impl From<PaperArg> for PageSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A3 => Self::A3,
            PaperArg::A2 => Self::A2,
            PaperArg::A1 => Self::A1,
            PaperArg::A0 => Self::A0,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

impl From<LayoutArg> for LayoutStyle {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Framed => Self::Framed,
            LayoutArg::Borderless => Self::Borderless,
        }
    }
}

impl Cli {
    async fn options(&self) -> Result<ConversionOptions> {
        let mut options = match &self.config {
            Some(path) => ConversionOptions::load(path).await?,
            None => ConversionOptions::default(),
        };

        if let Some(per_page) = self.per_page {
            options.images_per_page = per_page;
        }
        if let Some(paper) = self.paper {
            options.page_size = paper.into();
        }
        if let Some(layout) = self.layout {
            options.layout = layout.into();
        }
        if self.draft {
            options.high_quality = false;
        }

        options.validate()?;
        Ok(options)
    }

    fn entries(&self, layout: LayoutStyle) -> Result<Vec<ImageEntry>> {
        let mut paths = self.files.clone();
        if let Some(dir) = &self.dir {
            let found = files::scan_folder(dir, layout)?;
            if found.is_empty() {
                log::warn!("No supported images in {}", dir.display());
            }
            paths.extend(found);
        }
        Ok(ImageEntry::collect_unique(paths))
    }

    fn output_path(&self, layout: LayoutStyle) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let dir = self.out_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        files::unique_output_path(&dir, layout.default_output_stem())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let options = cli.options().await?;
    let entries = cli.entries(options.layout)?;
    let output = cli.output_path(options.layout);

    println!(
        "Converting {} image(s) → {} ({}, {} per page)",
        entries.len(),
        output.display(),
        options.page_size.name(),
        options.images_per_page
    );

    let mut handle = spawn_conversion(entries, output.clone(), options);
    while let Some(event) = handle.events.recv().await {
        match event {
            ConversionEvent::Progress(percent) => log::debug!("{}%", percent),
            ConversionEvent::Status(message) => println!("  {}", message),
            ConversionEvent::Complete(_) => {}
        }
    }

    let result = handle.wait().await;
    if !result.success {
        bail!(result.message);
    }

    let stats = result.statistics;
    println!("{}", result.message);
    println!("  Images drawn: {} of {}", stats.drawn, stats.total);
    println!("  Skipped: {}", stats.skipped);
    println!("  Failed: {}", stats.failed);
    println!("  Pages: {}", stats.pages);
    println!("Saved → {}", output.display());

    Ok(())
}
