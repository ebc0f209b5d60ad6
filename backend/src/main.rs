//! Rejoinder CLI - Turn review spreadsheets into LaTeX or Typst rejoinders
//!
//! # Commands
//!
//! ```bash
//! rejoinder generate reviews.csv                 # Pick columns interactively
//! rejoinder generate reviews.xlsx -c ID -c Comment -c Response -f typst
//! rejoinder columns reviews.csv                  # List the header row
//! rejoinder templates                            # List output formats
//! rejoinder serve --port 8080                    # Start HTTP server
//! ```

use clap::{Parser, Subcommand};
use dialoguer::MultiSelect;
use rejoinder::config::{AppConfig, ENV_TEMPLATE_DIR};
use rejoinder::pipeline::{
    check_selection, file_stem, generate, GenerateOptions, MIN_SELECTED_COLUMNS,
};
use rejoinder::reader::{read_file, ReadResult};
use rejoinder::{OutputFormat, TabularData};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rejoinder")]
#[command(about = "Generate rejoinder documents from review spreadsheets", long_about = None)]
struct Cli {
    /// Directory with rejoinder.tex.j2 / rejoinder.typ.j2 overrides
    #[arg(long, global = true, env = ENV_TEMPLATE_DIR)]
    template_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a rejoinder from a CSV or spreadsheet file
    Generate {
        /// Input file (.csv, .xlsx, .xlsm, .xls, .ods)
        input: PathBuf,

        /// Column to include (repeatable; interactive selection if omitted)
        #[arg(short, long = "column")]
        columns: Vec<String>,

        /// Output format: latex or typst
        #[arg(short, long, default_value = "latex")]
        format: String,

        /// Output file (default: input name with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Show the header row of an input file
    Columns {
        /// Input file
        input: PathBuf,
    },

    /// List available output formats
    Templates,

    /// Start HTTP server
    Serve {
        /// Port to listen on (default: $PORT or 8080)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env().with_template_dir(cli.template_dir);

    let result = match cli.command {
        Commands::Generate {
            input,
            columns,
            format,
            output,
            stdout,
        } => cmd_generate(
            &config,
            &input,
            columns,
            OutputFormat::from_name(&format),
            output.as_deref(),
            stdout,
        ),

        Commands::Columns { input } => cmd_columns(&input),

        Commands::Templates => cmd_templates(),

        Commands::Serve { port } => cmd_serve(config.with_port(port)).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_generate(
    config: &AppConfig,
    input: &Path,
    columns: Vec<String>,
    format: OutputFormat,
    output: Option<&Path>,
    to_stdout: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Reading: {}", input.display());

    let result = read_file(input)?;
    print_read_info(&result);
    warn_duplicates(&result.table);

    let columns = if columns.is_empty() && std::io::stdin().is_terminal() {
        select_columns(&result.table.headers)?
    } else {
        columns
    };

    check_selection(&columns)?;
    for unknown in unknown_columns(&result.table, &columns) {
        eprintln!("   ⚠️  Unknown column ignored: {}", unknown);
    }

    let engine = config.template_engine()?;
    let options = GenerateOptions::new(columns).with_format(format);
    let rejoinder = generate(&result.table, &options, &engine)?;

    eprintln!("⚙️  Rendered {} rejoinder", format);

    if to_stdout {
        println!("{}", rejoinder.content);
        return Ok(());
    }

    let path = match output {
        Some(p) => p.to_path_buf(),
        None => default_output_path(input, rejoinder.extension),
    };
    fs::write(&path, &rejoinder.content)?;
    eprintln!("💾 Output written to: {}", path.display());

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_columns(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Reading: {}", input.display());

    let result = read_file(input)?;
    print_read_info(&result);

    for (i, header) in result.table.headers.iter().enumerate() {
        println!("{:>3}  {}", i + 1, header);
    }
    warn_duplicates(&result.table);

    Ok(())
}

fn cmd_templates() -> Result<(), Box<dyn std::error::Error>> {
    for name in OutputFormat::available() {
        let format = OutputFormat::from_name(name);
        println!("  📄 {} ({})", format, format.file_extension());
    }
    Ok(())
}

async fn cmd_serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    rejoinder::server::start_server(config).await
}

fn print_read_info(result: &ReadResult) {
    if let Some(ref encoding) = result.encoding {
        eprintln!("   Encoding: {}", encoding);
    }
    if let Some(delimiter) = result.delimiter {
        eprintln!("   Delimiter: '{}'", format_delimiter(delimiter));
    }
    eprintln!("   Rows: {}", result.table.row_count());
    eprintln!("   Columns: {}", result.table.headers.join(", "));
    if !result.table.has_data() {
        eprintln!("   ⚠️  No data rows");
    }
}

fn warn_duplicates(table: &TabularData) {
    for duplicate in table.duplicate_headers() {
        eprintln!(
            "   ⚠️  Duplicate header '{}': only its first column is used",
            duplicate
        );
    }
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

/// Ask for columns until enough are picked or the prompt is cancelled.
fn select_columns(headers: &[String]) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    loop {
        let selection = MultiSelect::new()
            .with_prompt(format!(
                "Select at least {} columns (space to toggle, enter to confirm)",
                MIN_SELECTED_COLUMNS
            ))
            .items(headers)
            .interact_opt()?;

        let Some(indices) = selection else {
            return Err("Selection cancelled".into());
        };

        let selected: Vec<String> = indices.iter().map(|&i| headers[i].clone()).collect();
        if selected.len() >= MIN_SELECTED_COLUMNS {
            return Ok(selected);
        }
        eprintln!(
            "   ⚠️  Please select at least {} columns ({} selected)",
            MIN_SELECTED_COLUMNS,
            selected.len()
        );
    }
}

/// Selected names that match no header.
fn unknown_columns<'a>(table: &TabularData, columns: &'a [String]) -> Vec<&'a str> {
    columns
        .iter()
        .filter(|c| !table.headers.contains(c))
        .map(String::as_str)
        .collect()
}

/// `<dir>/<input stem><extension>`, next to the input.
fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    let file_name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("rejoinder");
    input.with_file_name(format!("{}{}", file_stem(file_name), extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("data/reviews.csv"), ".tex"),
            PathBuf::from("data/reviews.tex")
        );
        assert_eq!(
            default_output_path(Path::new("round.2.xlsx"), ".typ"),
            PathBuf::from("round.2.typ")
        );
    }

    #[test]
    fn test_unknown_columns() {
        let table = TabularData::new(
            vec!["ID".into(), "Comment".into(), "Response".into()],
            vec![],
        );
        let columns = vec!["ID".to_string(), "Coment".to_string(), "Response".to_string()];
        assert_eq!(unknown_columns(&table, &columns), vec!["Coment"]);
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "rejoinder", "generate", "reviews.csv", "-c", "ID", "-c", "Comment", "--column",
            "Response", "-f", "typst", "--stdout",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate { columns, format, stdout, .. } => {
                assert_eq!(columns, vec!["ID", "Comment", "Response"]);
                assert_eq!(OutputFormat::from_name(&format), OutputFormat::Typst);
                assert!(stdout);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_cli_stdout_conflicts_with_output() {
        let result = Cli::try_parse_from([
            "rejoinder", "generate", "reviews.csv", "-o", "out.tex", "--stdout",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_delimiter() {
        assert_eq!(format_delimiter('\t'), "\\t");
        assert_eq!(format_delimiter(';'), ";");
    }
}
