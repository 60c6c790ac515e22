//! Analyse a circuit described in JSON and print its truth table and expressions.
//!
//! Run with:
//! ```bash
//! cargo run --example analyze -- circuit.json --max-inputs 8
//! ```

use std::path::PathBuf;

use clap::Parser;
use logic_rs::analysis::analyze_json;
use logic_rs::config::{AnalysisConfig, DEFAULT_MAX_INPUTS};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to the JSON graph description.
    path: PathBuf,

    /// Refuse enumeration above this many distinct inputs.
    #[arg(long, default_value_t = DEFAULT_MAX_INPUTS)]
    max_inputs: usize,

    /// Reject malformed graphs instead of defaulting missing values to 0.
    #[arg(long)]
    strict: bool,

    /// Print the analysis as JSON.
    #[arg(long)]
    json: bool,

    /// Log minimization and enumeration steps.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    simplelog::TermLogger::init(
        if cli.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut config = AnalysisConfig::default().with_max_inputs(cli.max_inputs);
    if cli.strict {
        config = config.strict();
    }

    let text = std::fs::read_to_string(&cli.path)?;
    let analysis = analyze_json(&text, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    let table = &analysis.table;
    if let Some(warning) = &table.warning {
        println!("warning: {}", warning);
        return Ok(());
    }

    println!("{} | {}", table.input_names.join(" "), table.output_names.join(" "));
    for row in table.rows.iter() {
        let bits = |m: &std::collections::BTreeMap<String, bool>| {
            m.values().map(|&b| if b { "1" } else { "0" }).collect::<Vec<_>>().join(" ")
        };
        println!("{} | {}", bits(&row.inputs), bits(&row.outputs));
    }

    for forms in analysis.outputs.iter() {
        println!();
        println!("{}:", forms.output);
        println!("  minterms      = {:?}", forms.minterms);
        println!("  maxterms      = {:?}", forms.maxterms);
        println!("  SOP           = {}", forms.sop);
        println!("  POS           = {}", forms.pos);
        println!("  minimized SOP = {}", forms.minimized_sop);
        println!("  minimized POS = {}", forms.minimized_pos);
    }

    Ok(())
}
