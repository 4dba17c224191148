use std::time::Instant;

use anyhow::Result;
use geodedup::io;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::DedupArgs) -> Result<()> {
    let out_path = &args.output.clone().unwrap_or("./points.json".into());

    if cli.verbose > 0 { eprintln!("[dedup] reading {}", args.build.input.display()); }
    let start = Instant::now();
    let vec = super::build(&args.build)?;
    let elapsed = start.elapsed();

    eprintln!(
        "[dedup] {} points -> {} unique ({} merged, tolerance {:e}) in {:.3}s",
        vec.id_map().len(), vec.len(), vec.num_merged(), vec.tolerance(), elapsed.as_secs_f64(),
    );

    if cli.verbose > 0 { eprintln!("[dedup] writing {}", out_path.display()); }
    io::write_point_vec(&vec, out_path, args.force)?;

    Ok(())
}
