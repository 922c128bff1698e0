use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use covid_boroughs::data::loader;
use covid_boroughs::data::model::{Borough, DateRange, NumericField, SortKey, DATE_FORMAT};
use covid_boroughs::data::stats::{AggregateResult, Statistic};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Query London borough COVID-19 mobility and case records"
)]
struct Args {
    /// Source CSV file
    #[arg(default_value = "covid_london.csv")]
    file: PathBuf,

    /// Start of the date range (YYYY-MM-DD, inclusive)
    #[arg(long)]
    from: String,

    /// End of the date range (YYYY-MM-DD, inclusive)
    #[arg(long)]
    to: String,

    /// Restrict to one borough, by exact name (e.g. "Tower Hamlets")
    #[arg(long)]
    borough: Option<String>,

    /// Sort the listing: date, parks, transit, new-cases, total-deaths, ...
    #[arg(long, conflicts_with = "stat")]
    sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, conflicts_with = "stat")]
    descending: bool,

    /// Print a statistic over the selection instead of the listing:
    /// "average", "total", or "count"
    #[arg(long)]
    stat: Option<String>,

    /// Field the statistic applies to
    #[arg(long, default_value = "parks")]
    field: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let range = DateRange::new(
        parse_date(&args.from).context("--from")?,
        parse_date(&args.to).context("--to")?,
    )?;

    let borough = args
        .borough
        .as_deref()
        .map(str::parse::<Borough>)
        .transpose()?;

    let dataset =
        loader::load(&args.file).with_context(|| format!("loading {}", args.file.display()))?;

    if let Some(stat) = &args.stat {
        let statistic: Statistic = stat.parse().map_err(anyhow::Error::msg)?;
        let field: NumericField = args.field.parse().map_err(anyhow::Error::msg)?;

        // Borough restriction applies to statistics too, so compute over
        // the same selection the listing would show.
        let matched = dataset.query(range, borough, None, true);
        match statistic.compute(&matched, field) {
            AggregateResult::Value(value) => match statistic {
                Statistic::Average => println!("Average of {field} ({range}): {value:.2}"),
                Statistic::Total => println!("Total of {field} ({range}): {value:.0}"),
                Statistic::Count => println!("Records in range ({range}): {value:.0}"),
            },
            AggregateResult::NoData => {
                println!("There are no records of {field} available for this time period");
            }
        }
        return Ok(());
    }

    let sort = args
        .sort
        .as_deref()
        .map(str::parse::<SortKey>)
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let records = dataset.query(range, borough, sort, !args.descending);
    if records.is_empty() {
        match borough {
            Some(b) => println!("There are no records found for this date range in {b}"),
            None => println!("There are no records found for this date range"),
        }
        return Ok(());
    }

    println!("{}", dataset.columns.join(","));
    for record in &records {
        println!("{record}");
    }
    eprintln!("{} record(s)", records.len());

    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .with_context(|| format!("'{s}' is not a YYYY-MM-DD date"))
}
