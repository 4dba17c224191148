pub mod dedup;
pub mod query;

use anyhow::Result;
use geodedup::{io, PointType, PointVec, PointVecConfig};

use crate::cli::BuildArgs;

/// Read the input file and build the deduplicated point set.
pub fn build(args: &BuildArgs) -> Result<PointVec> {
    let set = io::read_point_set(&args.input)?;

    let mut config = match &args.config {
        Some(path) => PointVecConfig::from_path(path)?,
        None => PointVecConfig::default(),
    };
    if config.name.is_empty() { config.name = set.name; }
    if let Some(name) = &args.name { config.name = name.clone(); }
    if let Some(rel_eps) = args.rel_eps { config.rel_eps = rel_eps; }
    if args.station { config.point_type = PointType::Station; }

    Ok(PointVec::new(config, set.points, Some(set.names))?)
}
