use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use doxy_commands_core::Command as CommandRecord;
use doxy_commands_extract::extract_from_html;
use doxy_commands_extract::output::{
    CSharpOptions, OutputFormat, format_commands, render_csharp, render_dump,
};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Csharp,
    Json,
    Dump,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Csharp => Self::CSharp,
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Dump => Self::Dump,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "doxy-commands")]
#[command(about = "Convert the Doxygen commands help page into typed command data")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a saved help page into a single output format.
    Convert(ConvertArgs),
    /// Generate the C# source file and an optional debug dump.
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
struct ConvertArgs {
    /// Path to the saved help page HTML.
    input: PathBuf,
    /// Output format (default: json).
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Output file (stdout when omitted).
    #[arg(long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    csharp: CSharpArgs,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Path to the saved help page HTML.
    input: PathBuf,
    /// Output path for the generated C# source file.
    #[arg(long)]
    output: PathBuf,
    /// Optional path for a plain-text debug dump of the extracted data.
    #[arg(long)]
    dump: Option<PathBuf>,
    #[command(flatten)]
    csharp: CSharpArgs,
}

#[derive(Debug, Args)]
struct CSharpArgs {
    /// Namespace wrapping the generated C# class.
    #[arg(long, default_value = "VSDoxyHighlighter")]
    namespace: String,
    /// Name of the generated C# class.
    #[arg(long, default_value = "DoxygenCommandsGeneratedFromHelpPage")]
    class_name: String,
    /// Base URL of the online help page, used for documentation deep links.
    #[arg(long, default_value = "https://www.doxygen.nl/manual/commands.html")]
    source_url: String,
}

impl From<CSharpArgs> for CSharpOptions {
    fn from(args: CSharpArgs) -> Self {
        Self {
            namespace: args.namespace,
            class_name: args.class_name,
            source_url: args.source_url,
            generated_at: None,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Convert(args) => run_convert(args),
        Command::Generate(args) => run_generate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_convert(args: ConvertArgs) -> Result<(), String> {
    let commands = load_commands(&args.input)?;
    let rendered = format_commands(&commands, args.format.into(), &args.csharp.into())?;
    write_output(args.output.as_deref(), &rendered)
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let commands = load_commands(&args.input)?;
    let options = CSharpOptions::from(args.csharp);

    write_file(&args.output, &render_csharp(&commands, &options))?;
    if let Some(path) = &args.dump {
        write_file(path, &render_dump(&commands))?;
    }

    println!(
        "Generated {} with {} commands",
        args.output.display(),
        commands.len()
    );
    Ok(())
}

fn load_commands(input: &Path) -> Result<Vec<CommandRecord>, String> {
    let html = fs::read_to_string(input)
        .map_err(|err| format!("Failed to read '{}': {err}", input.display()))?;
    extract_from_html(&html).map_err(|err| err.to_string())
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<(), String> {
    match path {
        Some(path) => write_file(path, contents),
        None => {
            print!("{contents}");
            Ok(())
        }
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), String> {
    fs::write(path, contents)
        .map_err(|err| format!("Failed to write '{}': {err}", path.display()))
}
