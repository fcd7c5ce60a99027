//! Tablegrid CLI - build, check and edit span-aware tables

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read};
#[cfg(feature = "cli")]
use tablegrid::{
    diagnostics::{check_table, format_diagnostics},
    records::{build_from_str, rendered_to_json, RecordFormat},
    render::{render_table, table_to_html},
    AnchorHint, BuildOutput, CommandLine, Document, GridError, GridOptions, GridResult,
    RenderOptions, Table,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tgrid")]
#[command(version)]
#[command(about = "Tablegrid - span-aware table grid model and structural editor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log repairs and edits to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Largest accepted colspan
    #[arg(long, global = true, default_value_t = 1000)]
    max_colspan: usize,

    /// Largest accepted rowspan
    #[arg(long, global = true, default_value_t = 65534)]
    max_rowspan: usize,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build a table from JSON/YAML records and print it
    Render {
        /// Record file (reads JSON from stdin if not provided)
        input: Option<String>,

        /// Print the rendered rows as JSON instead of HTML
        #[arg(long)]
        json: bool,

        /// Single-line HTML without thead/tbody
        #[arg(long)]
        compact: bool,
    },

    /// Build a table and report grid problems
    Check {
        /// Record file (reads JSON from stdin if not provided)
        input: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Apply edit commands in order and print the result
    Edit {
        /// Record file (reads JSON from stdin if not provided)
        input: Option<String>,

        /// Command line, e.g. "mergeCells 0,0 1,1" (repeatable)
        #[arg(short, long = "command", required = true)]
        commands: Vec<String>,

        /// Single-line HTML without thead/tbody
        #[arg(long)]
        compact: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let options = GridOptions::new()
        .with_max_colspan(cli.max_colspan)
        .with_max_rowspan(cli.max_rowspan);

    match run(cli.command, &options) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(2);
        }
    }
}

#[cfg(feature = "cli")]
fn run(command: Commands, options: &GridOptions) -> GridResult<i32> {
    match command {
        Commands::Render {
            input,
            json,
            compact,
        } => {
            let output = load(input.as_deref(), options)?;
            report_warnings(&output);
            if json {
                println!("{}", rendered_to_json(&render_table(&output.table))?);
            } else {
                print!("{}", html(&output.table, compact));
            }
            Ok(0)
        }

        Commands::Check { input, no_color } => {
            let output = load(input.as_deref(), options)?;
            report_warnings(&output);
            let result = check_table(&output.table);
            println!("{}", format_diagnostics(&result, !no_color));
            Ok(if result.has_errors() { 1 } else { 0 })
        }

        Commands::Edit {
            input,
            commands,
            compact,
        } => {
            let lines = commands
                .iter()
                .map(|line| CommandLine::parse(line))
                .collect::<GridResult<Vec<_>>>()?;

            let output = load(input.as_deref(), options)?;
            report_warnings(&output);
            let mut doc = Document::new();
            let block = doc.push_table(output.table);

            for line in &lines {
                let Some(table) = doc.table(block) else {
                    eprintln!("table removed, skipping '{}'", line.command);
                    continue;
                };
                let selection = line.selection(table, block);
                match doc.execute(line.command, &selection) {
                    None => eprintln!("{}: no change", line.command),
                    Some(AnchorHint::Cell { cell, .. }) => {
                        let pos = doc.table(block).and_then(|t| t.position(cell));
                        match pos {
                            Some(pos) => eprintln!("{}: caret at {}", line.command, pos),
                            None => eprintln!("{}: done", line.command),
                        }
                    }
                    Some(_) => eprintln!("{}: done", line.command),
                }
            }

            match doc.table(block) {
                Some(table) => print!("{}", html(table, compact)),
                None => eprintln!("table was deleted"),
            }
            Ok(0)
        }
    }
}

#[cfg(feature = "cli")]
fn load(path: Option<&str>, options: &GridOptions) -> GridResult<BuildOutput> {
    let (input, format) = match path {
        Some(path) => (fs::read_to_string(path)?, RecordFormat::from_path(path)),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (buffer, RecordFormat::Json)
        }
    };
    if input.trim().is_empty() {
        return Err(GridError::invalid("no table records given"));
    }
    build_from_str(&input, format, options)
}

#[cfg(feature = "cli")]
fn report_warnings(output: &BuildOutput) {
    for warning in &output.warnings {
        eprintln!("warning: {}", warning);
    }
}

#[cfg(feature = "cli")]
fn html(table: &Table, compact: bool) -> String {
    let options = if compact {
        RenderOptions::compact()
    } else {
        RenderOptions::default()
    };
    let mut out = table_to_html(table, &options);
    if compact {
        out.push('\n');
    }
    out
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  tgrid render [FILE]");
    eprintln!("  tgrid check [FILE]");
    eprintln!("  tgrid edit [FILE] -c \"<command> [row,col [row,col]]\"");
}
