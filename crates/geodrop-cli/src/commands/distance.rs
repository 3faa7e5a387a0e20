//! Distance command implementation.

use crate::cli::DistanceArgs;
use crate::error::Result;
use crate::output::Formatter;
use geodrop_domain::{DistanceMethod, GeoPoint};

/// Execute the distance command.
pub fn execute_distance(args: DistanceArgs, formatter: &Formatter) -> Result<()> {
    let method: DistanceMethod = args.method.into();
    let meters = measure(&args, method)?;
    println!("{}", formatter.format_distance(meters, method)?);
    Ok(())
}

fn measure(args: &DistanceArgs, method: DistanceMethod) -> Result<f64> {
    let from = GeoPoint::new(args.from_lat, args.from_lon)?;
    let to = GeoPoint::new(args.to_lat, args.to_lon)?;
    Ok(method.checked(from, to)?)
}
