//! invoice-pdf CLI - invoice to PDF rendering tool

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use invoice_pdf::inspect::{inspect_bytes, stream_length_matches};
use invoice_pdf::pdf::{CONTENT_OBJECT, OBJECT_COUNT};
use invoice_pdf::{
    load_invoice, load_settings, render_batch, AccountSettings, BatchJob, BatchOptions,
    ControlCharPolicy, InvoicePdf, JsonFormat, LayoutOptions, PdfDocumentBuilder, PdfResponse,
};

#[derive(Parser)]
#[command(name = "invoice-pdf")]
#[command(version)]
#[command(about = "Render invoices to minimal single-page PDF files", long_about = None)]
struct Cli {
    /// Invoice JSON file
    #[arg(value_name = "INVOICE")]
    input: Option<PathBuf>,

    /// Output PDF file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Account settings JSON file
    #[arg(short, long, env = "INVOICE_PDF_SETTINGS", global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an invoice to PDF
    Render {
        /// Invoice JSON file
        #[arg(value_name = "INVOICE")]
        input: PathBuf,

        /// Output file (invoice-<id>.pdf if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Replace control characters with spaces instead of failing
        #[arg(long)]
        lenient: bool,

        /// Invoice date when the invoice has no creation time (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        issue_date: Option<String>,
    },

    /// Print the lines an invoice renders to, as JSON
    Lines {
        /// Invoice JSON file
        #[arg(value_name = "INVOICE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Build a PDF from a plain text file, one line per row
    Text {
        /// Text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Replace control characters with spaces instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Render many invoices from a JSON array of {invoice, settings} jobs
    Batch {
        /// Jobs JSON file
        #[arg(value_name = "JOBS")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Render one invoice at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show the structure of a PDF file and verify its cross-reference table
    Info {
        /// PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let settings = cli.settings.as_deref();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            output,
            lenient,
            issue_date,
        }) => cmd_render(
            &input,
            output.as_deref(),
            settings,
            lenient,
            issue_date.as_deref(),
        )
        .map(|_| ()),
        Some(Commands::Lines {
            input,
            output,
            compact,
        }) => cmd_lines(&input, output.as_deref(), settings, compact),
        Some(Commands::Text {
            input,
            output,
            lenient,
        }) => cmd_text(&input, &output, lenient),
        Some(Commands::Batch {
            input,
            output,
            sequential,
        }) => cmd_batch(&input, output.as_deref(), sequential),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render if input is provided
            if let Some(input) = cli.input {
                cmd_render(&input, cli.output.as_deref(), settings, false, None).map(|_| ())
            } else {
                println!("{}", "Usage: invoice-pdf <INVOICE> [OUTPUT]".yellow());
                println!("       invoice-pdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_settings(path: Option<&Path>) -> invoice_pdf::Result<AccountSettings> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(AccountSettings::default()),
    }
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    settings: Option<&Path>,
    lenient: bool,
    issue_date: Option<&str>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let invoice = load_invoice(input)?;
    let settings = read_settings(settings)?;

    let mut builder = InvoicePdf::new();
    if lenient {
        builder = builder.lenient();
    }
    if let Some(date) = issue_date {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| format!("Invalid issue date {}: {}", date, e))?;
        builder = builder.with_issue_date(date);
    }

    let rendered = builder.render(&invoice, &settings)?;
    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(rendered.filename()));
    rendered.save(&path)?;

    println!(
        "{} {} ({} lines, {} bytes)",
        "Saved to".green(),
        path.display(),
        rendered.lines().len(),
        rendered.as_bytes().len()
    );

    Ok(path)
}

fn cmd_lines(
    input: &Path,
    output: Option<&Path>,
    settings: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let invoice = load_invoice(input)?;
    let settings = read_settings(settings)?;
    let lines = invoice_pdf::invoice_lines(&invoice, &settings);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = invoice_pdf::render::to_json(&lines, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_text(input: &Path, output: &Path, lenient: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let lines: Vec<&str> = text.lines().collect();

    let mut layout = LayoutOptions::new();
    if lenient {
        layout = layout.with_control_chars(ControlCharPolicy::Replace);
    }

    let bytes = PdfDocumentBuilder::with_options(layout).build(&lines)?;
    fs::write(output, &bytes)?;

    println!(
        "{} {} ({} lines, {} bytes)",
        "Saved to".green(),
        output.display(),
        lines.len(),
        bytes.len()
    );

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let jobs: Vec<BatchJob> = serde_json::from_slice(&fs::read(input)?)?;

    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(jobs.len() as u64 + 1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message(format!("Rendering {} invoices...", jobs.len()));
    let options = BatchOptions::new().with_parallel(!sequential);
    let outputs = render_batch(&jobs, &options);
    pb.inc(1);

    let mut failed = Vec::new();
    for rendered in outputs {
        pb.set_message(format!("Writing {}...", rendered.invoice_id));
        match rendered.result {
            Ok(bytes) => {
                let path = output_dir.join(PdfResponse::filename_for(&rendered.invoice_id));
                log::debug!("Writing {} bytes to {}", bytes.len(), path.display());
                fs::write(&path, &bytes)?;
            }
            Err(e) => {
                log::debug!("Invoice {} failed: {}", rendered.invoice_id, e);
                failed.push((rendered.invoice_id, e));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} invoices written to {}",
        "Done!".green().bold(),
        jobs.len() - failed.len(),
        jobs.len(),
        output_dir.display()
    );
    for (id, e) in &failed {
        println!("  {} {}: {}", "✗".red(), id, e);
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(format!("{} invoices failed to render", failed.len()).into())
    }
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let report = inspect_bytes(&data)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), report.version);
    println!("{}: {} bytes", "Size".bold(), data.len());
    println!("{}: {}", "Objects".bold(), report.object_count());
    println!("{}: {}", "Xref offset".bold(), report.xref_offset);
    if let Some(root) = report.root {
        println!("{}: {} 0 R", "Root".bold(), root);
    }

    println!();
    println!("{}", "Cross-Reference Table".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for entry in report.in_use() {
        println!(
            "  {} {:>3} {} {}",
            "├─".dimmed(),
            entry.object_number,
            "@".dimmed(),
            entry.offset
        );
    }

    println!();
    match report.verify(&data) {
        Ok(()) => println!("{}", "Offsets verified".green().bold()),
        Err(e) => println!("{}: {}", "Offsets invalid".red().bold(), e),
    }

    if report.object_count() == OBJECT_COUNT {
        let length_ok = stream_length_matches(&data, &report, CONTENT_OBJECT)?;
        if length_ok {
            println!("{}", "Content stream length verified".green().bold());
        } else {
            println!("{}", "Content stream /Length mismatch".red().bold());
        }
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "invoice-pdf".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Invoice to PDF rendering tool");
    println!();
    println!("License: MIT");
}
