use std::fs::File;
use std::path::{Path, PathBuf};
use std::{env, io};

use flate2::write::GzEncoder;
use flate2::Compression;

const RES_DIR: &str = "res";

/// Packs the starter site into `$OUT_DIR/res.tar.gz` for `folio-tool bootstrap`.
fn compress_dir(src: &Path, archive_path: &Path) -> io::Result<()> {
    let tar_gz = File::create(archive_path)?;
    let enc = GzEncoder::new(tar_gz, Compression::best());
    let mut tar = tar::Builder::new(enc);
    tar.follow_symlinks(false);
    tar.append_dir_all(".", src)?;
    tar.into_inner()?.finish()?;
    Ok(())
}

fn main() -> io::Result<()> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(io::Error::other)?;
    let out_dir = env::var("OUT_DIR").map_err(io::Error::other)?;

    let res_dir = PathBuf::from(manifest_dir).join(RES_DIR);
    let archive_path = PathBuf::from(out_dir).join(format!("{}.tar.gz", RES_DIR));

    println!("cargo:rerun-if-changed={}", RES_DIR);
    compress_dir(&res_dir, &archive_path)
}
