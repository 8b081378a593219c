//! Replace control point radii with values sampled from a DEM.
//!
//! Usage:
//! ```
//! cnet_new_radii CNET=in.net MODEL=dem.cub TO=out.net GETLATLON=ADJUSTED
//! cnet_new_radii CNET=in.net MODEL=dem.cub TO=out.net GETLATLON=APRIORI ERRORS=radii.log
//! ```

use clap::Parser;
use std::path::PathBuf;

use control::{new_radii, NewRadiiParams};
use shared::shared_args::normalize_parameter_args;

#[derive(Parser, Debug)]
#[command(
    name = "cnet_new_radii",
    about = "Recompute ground point radii of a control network from a DEM",
    long_about = None
)]
struct Args {
    /// Input control network
    #[arg(long)]
    cnet: PathBuf,

    /// Elevation model cube with a Mapping group
    #[arg(long)]
    model: PathBuf,

    /// Output control network
    #[arg(long)]
    to: PathBuf,

    /// Surface coordinate to sample at: ADJUSTED or APRIORI
    #[arg(long)]
    getlatlon: Option<String>,

    /// Failure log; defaults to failures.log when any point fails
    #[arg(long)]
    errors: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse_from(normalize_parameter_args(std::env::args()));

    let params = NewRadiiParams {
        cnet: args.cnet,
        model: args.model,
        to: args.to,
        getlatlon: args.getlatlon,
        errors: args.errors,
    };
    let summary = new_radii(&params)?;

    print!("{}", summary.summary);
    Ok(())
}
