//! schemamap CLI - compile GraphQL schemas into selection descriptors.
//!
//! Usage:
//!   schemamap generate <schema>             # Emit Rust descriptors to stdout
//!   schemamap generate <schema> -o maps.rs  # ...or to a file
//!   schemamap order <schema>                # Emission order
//!   schemamap render <schema> <operation>   # Render a root operation
//!   schemamap classify <schema>             # Flag/enum argument sets

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use schemamap::render::arguments_from_json;
use schemamap::{emit, Arguments, Compiler, CompilerConfig, Renderer, Schema, SchemaMapError};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemamap")]
#[command(about = "Selection descriptors and query rendering for GraphQL schemas", long_about = None)]
struct Cli {
    /// Compiler config (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a schema and emit its descriptors
    Generate {
        /// Schema file (.graphql SDL or .json introspection)
        schema: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Format::Rust)]
        format: Format,
    },

    /// Print composite types in emission order
    Order {
        schema: PathBuf,
    },

    /// Render the query text for a root operation
    Render {
        schema: PathBuf,

        /// Root field name, e.g. loadItem
        operation: String,

        /// Call arguments as a JSON object
        #[arg(short, long)]
        args: Option<String>,

        /// Resolution depth (default: the root's compiled depth)
        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// Show which argument names render as flags or enums
    Classify {
        schema: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Rust,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => CompilerConfig::load(path)?,
        None => CompilerConfig::default(),
    };

    match cli.command {
        Commands::Generate {
            schema,
            out,
            format,
        } => generate(&load_schema(&schema)?, config, out.as_deref(), format),
        Commands::Order { schema } => {
            let compilation = Compiler::new(config).compile(&load_schema(&schema)?);
            for name in compilation.order() {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Render {
            schema,
            operation,
            args,
            depth,
        } => render(&load_schema(&schema)?, config, &operation, args.as_deref(), depth),
        Commands::Classify { schema } => {
            let renderer = Renderer::for_schema(&load_schema(&schema)?, &config.extra_flags);
            let classification = renderer.classification();
            println!("Flags:");
            for flag in classification.flags() {
                println!("  {}", flag);
            }
            println!("Enums:");
            for name in classification.enums() {
                println!("  {}", name);
            }
            Ok(())
        }
    }
}

fn load_schema(path: &Path) -> Result<Schema> {
    Schema::load(path).with_context(|| format!("loading schema {}", path.display()))
}

fn generate(
    schema: &Schema,
    config: CompilerConfig,
    out: Option<&Path>,
    format: Format,
) -> Result<()> {
    let compiler = Compiler::new(config);
    let output = match format {
        Format::Rust => compiler.generate_rust(schema),
        Format::Json => emit::json(&compiler.compile(schema))?,
    };

    match out {
        Some(path) => {
            emit::write_atomic(path, &output)?;
            eprintln!("✓ Wrote {}", path.display());
        }
        None => print!("{}", output),
    }
    Ok(())
}

fn render(
    schema: &Schema,
    config: CompilerConfig,
    operation: &str,
    args: Option<&str>,
    depth: Option<usize>,
) -> Result<()> {
    let renderer = Renderer::for_schema(schema, &config.extra_flags);
    let compilation = Compiler::new(config).compile(schema);

    let root = compilation
        .root(operation)
        .ok_or_else(|| SchemaMapError::UnknownOperation(operation.to_string()))?;
    let selection = compilation.resolve(&root.selection, depth.unwrap_or(root.depth));

    let arguments = match args {
        Some(raw) => {
            let value: serde_json::Value =
                serde_json::from_str(raw).context("--args must be a JSON object")?;
            arguments_from_json(&value)
        }
        None => Arguments::new(),
    };

    println!("{}", renderer.render(operation, &selection, &arguments));
    Ok(())
}
