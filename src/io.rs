use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::point::Point;
use crate::point_vec::PointVec;

/// One entry of an input point-set file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Raw input: points in file order plus `name -> index` for named ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    pub name:   String,
    pub points: Vec<Point>,
    pub names:  BTreeMap<String, usize>,
}

#[derive(Debug, Deserialize)]
struct PointSetFile {
    #[serde(default)]
    name:   String,
    points: Vec<PointRecord>,
}

#[derive(Debug, Serialize)]
struct PointVecFile<'a> {
    name:       &'a str,
    tolerance:  f64,
    points:     Vec<PointRecord>,
    id_map:     &'a [usize],
}

pub fn parse_point_set(data: &str) -> Result<PointSet> {
    let file: PointSetFile = serde_json::from_str(data).context("parse point set")?;

    let mut set = PointSet { name: file.name, ..PointSet::default() };
    for (index, record) in file.points.into_iter().enumerate() {
        set.points.push(Point::new(record.x, record.y, record.z));
        if let Some(name) = record.name {
            if let Some(first) = set.names.insert(name.clone(), index) {
                bail!("name '{name}' is used by points {first} and {index}");
            }
        }
    }
    Ok(set)
}

pub fn read_point_set(path: &Path) -> Result<PointSet> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_point_set(&data).with_context(|| format!("in {}", path.display()))
}

pub fn to_json(vec: &PointVec) -> Result<String> {
    let file = PointVecFile {
        name:      vec.name(),
        tolerance: vec.tolerance(),
        points:    vec.points().iter().enumerate().map(|(id, p)| PointRecord {
            x: p.x,
            y: p.y,
            z: p.z,
            name: vec.name_of_point(id).map(str::to_owned),
        }).collect(),
        id_map:    vec.id_map(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Write `vec` as JSON to `target` via a temp file and rename.
pub fn write_point_vec(vec: &PointVec, target: &Path, force: bool) -> Result<()> {
    if target == Path::new("-") {
        bail!("stdout is not supported; provide a real file path.");
    }
    let mut pending = open_for_write(target, force)?;
    pending.writer.write_all(to_json(vec)?.as_bytes())?;
    pending.finalize()
}

struct PendingWrite {
    target: PathBuf,
    writer: BufWriter<NamedTempFile>,
}

fn open_for_write(target: &Path, force: bool) -> Result<PendingWrite> {
    let parent = target.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    if !force && target.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
    }
    let tmp = NamedTempFile::new_in(parent).context("create temp file")?;
    Ok(PendingWrite { target: target.to_path_buf(), writer: BufWriter::new(tmp) })
}

impl PendingWrite {
    fn finalize(self) -> Result<()> {
        let tmp = self.writer.into_inner().context("flush temp file")?;
        tmp.as_file().sync_all().ok(); // best-effort fsync
        tmp.persist(&self.target)
            .with_context(|| format!("rename to {}", self.target.display()))?;
        Ok(())
    }
}
