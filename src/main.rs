use anyhow::Context;
use clap::Parser;
use std::{
    io::{self, BufRead, Write},
    num::NonZeroUsize,
    path::PathBuf,
    process::ExitCode,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use txt_report::{Config, Pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "txt-report",
    version,
    author,
    about = "Count lines and words of the .txt files in a directory",
    long_about = "Count lines and words of the .txt files in a directory.\n\n\
    Every .txt file directly inside the directory is counted concurrently and \
    a report sorted by file name is written to export/relatorio.txt. A file \
    that cannot be read is listed as an error line and does not stop the others.\n\n\
    USAGE EXAMPLES:\n  \
      # Ask for the directory interactively\n  \
      txt-report\n\n  \
      # Count a specific directory\n  \
      txt-report ./notes\n\n  \
      # Limit concurrency and write the report elsewhere\n  \
      txt-report ./notes --jobs 4 --out ./reports"
)]
struct Cli {
    /// Directory containing .txt files (prompted for when omitted)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Directory the report is written to
    #[arg(short, long, default_value = "export", value_name = "PATH")]
    out: PathBuf,

    /// Maximum number of files counted at the same time
    #[arg(short, long, value_name = "N")]
    jobs: Option<NonZeroUsize>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_tracing(cli.verbose) {
        eprintln!("Failed to initialise logging: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\nOcorreu um erro inesperado: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    println!("=== Processador de Arquivos de Texto ===");

    let dir = match cli.dir {
        Some(dir) => dir,
        None => prompt_directory().context("Failed to read directory from stdin")?,
    };

    let mut builder = Config::builder().input_dir(dir).output_dir(cli.out);
    if let Some(jobs) = cli.jobs {
        builder = builder.max_workers(jobs.get());
    }

    let config = match builder.build() {
        Err(e) if e.is_invalid_directory() => {
            eprintln!("Caminho inválido ou diretório não encontrado.");
            return Ok(ExitCode::FAILURE);
        }
        result => result.context("Failed to build configuration")?,
    };

    let pipeline = Pipeline::new(config).context("Failed to create pipeline")?;

    let files = match pipeline.discover() {
        Err(e) if e.is_no_files() => {
            println!("Nenhum arquivo .txt foi encontrado no diretório especificado.");
            return Ok(ExitCode::SUCCESS);
        }
        result => result.context("Failed to list input directory")?,
    };

    println!("\n{} arquivo(s) .txt encontrado(s):", files.len());
    for file in &files {
        if let Some(name) = file.file_name() {
            println!("- {}", name.to_string_lossy());
        }
    }
    println!("\nIniciando processamento...");

    let summary = pipeline
        .process(&files)
        .context("Failed to write report")?;

    println!("\nProcessamento concluído com sucesso!");
    println!("Relatório gerado em: {}", summary.report_path.display());

    Ok(ExitCode::SUCCESS)
}

fn prompt_directory() -> anyhow::Result<PathBuf> {
    println!("Informe o caminho de um diretório contendo arquivos .txt:");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(PathBuf::from(line.trim_end_matches(['\r', '\n'])))
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("txt_report=info"),
        1 => EnvFilter::new("txt_report=debug"),
        _ => EnvFilter::new("txt_report=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .try_init()?;

    Ok(())
}
