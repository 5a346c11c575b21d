use std::io;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

/// Starter site packed by the build script.
const STARTER_SITE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/res.tar.gz"));

pub fn decompress_files(output: &Path) -> io::Result<()> {
    let tar = GzDecoder::new(STARTER_SITE);
    let mut archive = Archive::new(tar);
    archive.unpack(output)
}
