use anyhow::{bail, Result};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::QueryArgs) -> Result<()> {
    let vec = super::build(&args.build)?;

    let id = match (&args.point_name, args.id) {
        (Some(name), _) => vec.id_by_name(name)?,
        (None, Some(id)) => id,
        (None, None) => bail!("either --id or --point-name is required"),
    };
    let point = vec.point(id)?;
    match vec.name_of_point(id) {
        Some(name) => println!("{id}\t{name}\t{point}"),
        None => println!("{id}\t\t{point}"),
    }

    Ok(())
}
