use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_format::{Locale, ToFormattedString};
use open_prescribing::{DataProvider, HttpDataProvider, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "oprs",
    version,
    about = "Query UK prescribing spend, drug codes & Sub-ICB Location boundaries"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the boundaries of all Sub-ICB Locations.
    Boundaries(BoundariesArgs),
    /// Fetch monthly spending for a chemical in a location.
    Spending(SpendingArgs),
    /// Search BNF sections, chemicals and presentations by name or code.
    Search(SearchArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct BoundariesArgs {
    /// Save the raw GeoJSON feature collection to file.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SpendingArgs {
    /// BNF chemical code (e.g., 0212000AA for rosuvastatin calcium)
    #[arg(short, long)]
    chemical: String,
    /// ODS code of the Sub-ICB Location (e.g., 14L)
    #[arg(short, long)]
    org: String,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Name fragment (case-insensitive) or BNF code
    query: String,
    /// Match the name or code exactly.
    #[arg(long, default_value_t = false)]
    exact: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let provider = HttpDataProvider::default();
    match cli.cmd {
        Command::Boundaries(args) => cmd_boundaries(&provider, args),
        Command::Spending(args) => cmd_spending(&provider, args),
        Command::Search(args) => cmd_search(&provider, args),
    }
}

fn cmd_boundaries(provider: &impl DataProvider, args: BoundariesArgs) -> Result<()> {
    let boundaries = provider.location_boundaries()?;
    for feature in boundaries.features() {
        println!("{}  {}", feature.properties.code, feature.properties.name);
    }
    eprintln!("{} locations ({})", boundaries.len(), boundaries.crs());
    if let Some(path) = args.out.as_ref() {
        let s = serde_json::to_string_pretty(boundaries.as_feature_collection())?;
        std::fs::write(path, s)?;
        eprintln!("Saved GeoJSON to {}", path.display());
    }
    Ok(())
}

fn cmd_spending(provider: &impl DataProvider, args: SpendingArgs) -> Result<()> {
    let records = provider.chemical_spending_for_location(&args.chemical, &args.org)?;

    for r in &records {
        println!(
            "{}  items={:>10}  quantity={:>14.1}  cost=£{:.2}  {}",
            r.date(),
            r.items().to_formatted_string(&Locale::en),
            r.quantity(),
            r.actual_cost(),
            r.row_name()
        );
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&records, path)?,
            "json" => storage::save_json(&records, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", records.len(), path.display());
    }

    Ok(())
}

fn cmd_search(provider: &impl DataProvider, args: SearchArgs) -> Result<()> {
    let drugs = provider.drug_details(&args.query, args.exact)?;
    for d in &drugs {
        println!("{:<14}  {:<16}  {}", d.kind(), d.id(), d.name());
    }
    eprintln!("{} matches", drugs.len());
    Ok(())
}
