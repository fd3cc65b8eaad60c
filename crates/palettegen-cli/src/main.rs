use clap::{Parser, Subcommand};
use palettegen_codegen::summary::Summary;
use palettegen_codegen::ProcessOptions;
use std::path::{Path, PathBuf};

const DEFAULT_INPUT: &str = "styles/base/theme.css";

#[derive(Parser)]
#[command(name = "palettegen")]
#[command(about = "palettegen — OKLCH design-token generator for CSS custom properties")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the palette into a stylesheet and write the result
    Build {
        /// Input stylesheet
        #[arg(default_value = DEFAULT_INPUT)]
        path: String,

        /// Output file (defaults to `<stem>-generated.css` next to the input)
        #[arg(short, long)]
        output: Option<String>,

        /// Also write a source map next to the output
        #[arg(long)]
        map: bool,
    },

    /// Parse a stylesheet and run the generator without writing anything
    Check {
        /// Input stylesheet
        #[arg(default_value = DEFAULT_INPUT)]
        path: String,
    },

    /// Print the generated variables
    Tokens {
        /// Print as JSON instead of CSS declarations
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build { path, output, map } => cmd_build(&path, output.as_deref(), map),
        Command::Check { path } => cmd_check(&path),
        Command::Tokens { json } => cmd_tokens(json),
    }
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

/// `styles/base/theme.css` → `styles/base/theme-generated.css`
fn default_output(path: &str) -> PathBuf {
    let p = Path::new(path);
    let stem = p
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let dir = p.parent().unwrap_or(Path::new("."));
    dir.join(format!("{stem}-generated.css"))
}

fn write_file(path: &Path, contents: &str) {
    if let Err(e) = std::fs::write(path, contents) {
        eprintln!("Error writing {}: {e}", path.display());
        std::process::exit(1);
    }
}

fn cmd_build(path: &str, output: Option<&str>, map: bool) {
    let source = read_source(path);
    let out_path = output.map_or_else(|| default_output(path), PathBuf::from);

    let options = ProcessOptions {
        from: Some(path.to_string()),
        to: Some(out_path.display().to_string()),
        map,
    };

    let result = match palettegen_codegen::process(&source, &options) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Generation failed: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "palette rule {}, {} declarations emitted, {} replaced",
        if result.stats.created_rule { "created" } else { "reused" },
        result.stats.emitted,
        result.stats.replaced
    );

    write_file(&out_path, &result.css);
    if let Some(map) = &result.map {
        let map_path = PathBuf::from(format!("{}.map", out_path.display()));
        write_file(&map_path, map);
    }

    let summary = Summary::from_css(&result.css);
    println!("Generated {}", out_path.display());
    println!("{} lines", summary.lines);
    println!("{} CSS variables", summary.variable_count());
    println!();
    println!("Example variables:");
    for line in summary.examples() {
        println!("   {line}");
    }
}

fn cmd_check(path: &str) {
    let source = read_source(path);

    if let Err(e) = palettegen_codegen::process(&source, &ProcessOptions::default()) {
        eprintln!("Generation failed: {e}");
        std::process::exit(1);
    }

    eprintln!("OK: {path}");
}

fn cmd_tokens(json: bool) {
    let tokens = palettegen_codegen::tokens();

    if json {
        match serde_json::to_string_pretty(&tokens) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error serializing tokens: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    for token in tokens {
        println!("{}: {};", token.name, token.value);
    }
}
