//! Remove reseau marks from a scanned Apollo frame.
//!
//! Usage:
//! ```
//! reseau_remove FROM=located.cub TO=clean.cub ACTION=PATCH WIDTH=5
//! cargo run --bin reseau_remove -- --from located.cub --to clean.cub
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use apollo::{remove_reseaus, PatchAction, RemovalParams, ValidityFilter};
use shared::shared_args::{normalize_parameter_args, parse_bool};
use shared::{PvlGroup, PvlKeyword};

#[derive(Parser, Debug)]
#[command(
    name = "reseau_remove",
    about = "Null or patch the reseau marks of an Apollo metric or Hasselblad frame",
    long_about = None
)]
struct Args {
    /// Input cube with located reseaus
    #[arg(long)]
    from: PathBuf,

    /// Output cube
    #[arg(long)]
    to: PathBuf,

    /// Only remove reseaus flagged valid
    #[arg(long, default_value = "true", value_parser = parse_bool)]
    resvalid: bool,

    /// NULL or PATCH
    #[arg(long, default_value = "NULL")]
    action: PatchAction,

    /// Width of the band covering each arm of a mark, in pixels
    #[arg(long, default_value_t = 3)]
    width: i32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse_from(normalize_parameter_args(std::env::args()));

    let params = RemovalParams {
        from: args.from,
        to: args.to,
        filter: ValidityFilter::from_valid_only(args.resvalid),
        action: args.action,
        width: args.width,
    };
    let report = remove_reseaus(&params)
        .with_context(|| format!("Reseau removal failed for {}", params.from.display()))?;

    let mut results = PvlGroup::new("Results");
    results.add_keyword(PvlKeyword::new("Reseaus", report.reseaus));
    results.add_keyword(PvlKeyword::new("Modified", report.modified));
    results.add_keyword(PvlKeyword::new("Skipped", report.skipped));
    results.add_keyword(PvlKeyword::new("Action", params.action));
    results.add_keyword(PvlKeyword::new("Output", params.to.display()));
    print!("{results}");
    Ok(())
}
