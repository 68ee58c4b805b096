use huffman_text::{logging::setup_logging, container::{read_header, Encoder}, ContainerProperties, Result};

use std::{fs, path::Path, process::ExitCode, time::Instant};

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(about = "Compress text files with a canonical Huffman code")]
struct Args {
    #[command(subcommand)]
    command: Command,
    /// Log filter directives, overridden by RUST_LOG
    #[arg(long = "log", global = true, default_value = "info")]
    log: String,
    /// Log JSON lines instead of plain text
    #[arg(long = "json-logs", global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a text file into a container
    #[command(alias = "codify")]
    Compress {
        /// Source text file
        source_name: String,
        /// Destination container
        dest_name: String,
        /// Also write <dest_name>.properties
        #[arg(short, long = "properties", default_value_t = false)]
        properties: bool,
    },
    /// Restore the text stored in a container
    #[command(alias = "decodify")]
    Decompress {
        /// Source container
        source_name: String,
        /// Destination text file
        dest_name: String,
    },
    /// Print the code table of a container
    Table {
        source_name: String,
        /// Print the table as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the properties of a container
    Info {
        source_name: String,
    },
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.contains(&e))
}

fn compress(source_name: &str, dest_name: &str, properties: bool) -> Result<()> {
    if !has_extension(source_name, &["txt"]) {
        warn!(source_name, "expected a .txt source");
    }

    let text = fs::read_to_string(source_name)?;

    let comp_time = Instant::now();
    let bytes = Encoder::new(&text)?.encode(&text)?;
    let comp_time = comp_time.elapsed().as_nanos();

    fs::write(dest_name, &bytes)?;
    info!(input_bytes = text.len(), output_bytes = bytes.len(), "compressed {} in {}ns", source_name, comp_time);

    if properties {
        let props_name = format!("{}.properties", dest_name);
        ContainerProperties::inspect(&bytes)?.store(&props_name)?;
        info!("wrote {}", props_name);
    }

    Ok(())
}

fn decompress(source_name: &str, dest_name: &str) -> Result<()> {
    if !has_extension(source_name, &["bin", "dat"]) {
        warn!(source_name, "expected a .bin or .dat source");
    }

    let bytes = fs::read(source_name)?;

    let decomp_time = Instant::now();
    let text = huffman_text::decode(&bytes)?;
    let decomp_time = decomp_time.elapsed().as_nanos();

    fs::write(dest_name, &text)?;
    info!(input_bytes = bytes.len(), output_bytes = text.len(), "decompressed {} in {}ns", source_name, decomp_time);

    Ok(())
}

fn table(source_name: &str, json: bool) -> Result<()> {
    let bytes = fs::read(source_name)?;
    let (table, _) = read_header(&bytes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(table.entries())?);
        return Ok(());
    }

    for entry in table.entries() {
        println!("{:?}\t{}\t{}", entry.symbol, entry.length, entry);
    }

    Ok(())
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Compress { source_name, dest_name, properties } => compress(&source_name, &dest_name, properties),
        Command::Decompress { source_name, dest_name } => decompress(&source_name, &dest_name),
        Command::Table { source_name, json } => table(&source_name, json),
        Command::Info { source_name } => {
            let props = ContainerProperties::inspect(&fs::read(&source_name)?)?;
            print!("{}", String::from(&props));
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(&args.log, !args.json_logs);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
