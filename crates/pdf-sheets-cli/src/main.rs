use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdf_sheets::{AnalysisOptions, BatchReport, ReportOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfsheets", about = "Print sheet analysis for batches of PDF files", version)]
struct Cli {
    /// Log every pairing decision
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a folder (or .zip archive) of PDF files and write the report
    Analyze {
        /// Folder or .zip archive containing the PDF files
        input: PathBuf,

        /// Output directory (default: sheet_report_<input name> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Analysis options file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Largest size difference in mm for two pages to form a sheet
        #[arg(long)]
        tolerance: Option<f64>,

        /// Also analyze PDF files in subfolders
        #[arg(long)]
        recursive: bool,

        /// Also write the full report as JSON
        #[arg(long)]
        json: bool,

        /// Show the summary only, don't write report files
        #[arg(long)]
        summary_only: bool,
    },

    /// Show the pages and sheets of a single PDF file
    Inspect {
        /// PDF file
        file: PathBuf,

        /// Largest size difference in mm for two pages to form a sheet
        #[arg(long, default_value = "0")]
        tolerance: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            config,
            tolerance,
            recursive,
            json,
            summary_only,
        } => {
            let mut options = match config {
                Some(path) => AnalysisOptions::load(&path)
                    .await
                    .with_context(|| format!("loading {}", path.display()))?,
                None => AnalysisOptions::default(),
            };
            if let Some(tolerance) = tolerance {
                options.tolerance_mm = tolerance;
            }
            options.recursive |= recursive;
            options.validate()?;

            // The unpacked archive is removed when `_unpacked` drops
            let (folder, _unpacked) = if pdf_sheets::is_zip(&input) {
                let dir = pdf_sheets::unpack_archive(&input)
                    .await
                    .with_context(|| format!("unpacking {}", input.display()))?;
                (dir.path().to_path_buf(), Some(dir))
            } else {
                (input.clone(), None)
            };

            let report = pdf_sheets::analyze_folder(&folder, &options)
                .await
                .with_context(|| format!("analyzing {}", input.display()))?;
            print_summary(&report);

            if summary_only {
                return Ok(());
            }

            let report_options = ReportOptions {
                output_dir: output.unwrap_or_else(|| default_output_dir(&input)),
                write_json: json,
            };
            let written = pdf_sheets::write_report(&report, &report_options).await?;
            println!(
                "Report ({} files) → {}",
                written.len(),
                report_options.output_dir.display()
            );
        }

        Commands::Inspect { file, tolerance } => {
            AnalysisOptions {
                tolerance_mm: tolerance,
                ..Default::default()
            }
            .validate()?;

            let pages = pdf_sheets::read_document(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let sheets = pdf_sheets::pair_pages(&pages, tolerance);

            println!("{}: {} pages", file.display(), pages.len());
            for page in &pages {
                println!("  page {}: {}", page.index, page.dimensions);
            }
            println!("Sheets: {}", sheets.len());
            for sheet in &sheets {
                match sheet.second_page {
                    Some(second) => {
                        println!("  pages {}-{}: {}", sheet.first_page, second, sheet.format)
                    }
                    None => println!("  page {} (orphan): {}", sheet.first_page, sheet.format),
                }
            }
        }
    }

    Ok(())
}

fn print_summary(report: &BatchReport) {
    let summary = &report.summary;
    println!("Sheet Analysis:");
    println!("  Documents: {}", report.inventory.len());
    println!("  Unreadable documents: {}", report.failed_count());
    println!("  Total pages: {}", summary.total_pages);
    println!("  Total sheets: {}", summary.total_sheets);
    println!("  Orphan sheets: {}", summary.total_orphans);
    for entry in summary.formats_by_frequency() {
        println!("  {}: {}", entry.format, entry.count);
    }
}

/// `sheet_report_<name>` beside the input folder or archive
fn default_output_dir(input: &Path) -> PathBuf {
    let name = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "batch".to_string());
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("sheet_report_{name}"))
}
