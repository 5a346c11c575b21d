use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Local;
use lazy_static::lazy_static;
use regex::Regex;

use crate::decompress::decompress_files;
use crate::BootstrapArgs;

const SAMPLE_BLOG_START: &str = "blog_start_date = 2025-01-01";

lazy_static! {
    static ref RES_PATH_RE: Regex = Regex::new(r#""res/(\w+)"#).unwrap();
}

fn get_sample_cfg() -> &'static str {
    include_str!("../../../folio.toml")
}

fn write_folio_cfg(out_dir: &Path) -> Result<()> {
    let cfg_path = out_dir.join("folio.toml");
    let file = File::create(&cfg_path)
        .with_context(|| format!("Error creating {}", cfg_path.display()))?;
    let mut writer = BufWriter::new(file);

    let sample_cfg = replace_paths(out_dir, get_sample_cfg());
    let sample_cfg = replace_date(&sample_cfg, &get_current_date());

    writer.write_all(sample_cfg.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Points the `res/...` paths of the sample config to `prefix`.
fn replace_paths(prefix: &Path, config_data: &str) -> String {
    let prefix = prefix.to_string_lossy();
    let prefix = prefix.trim_end_matches('/');

    RES_PATH_RE
        .replace_all(config_data, |captures: &regex::Captures| format!("\"{}/{}", prefix, &captures[1]))
        .to_string()
}

fn get_current_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

fn replace_date(config_data: &str, today: &str) -> String {
    config_data.replace(SAMPLE_BLOG_START, &format!("blog_start_date = {}", today))
}

pub fn bootstrap_cmd(args: BootstrapArgs) -> Result<()> {
    let out_path = fs::canonicalize(&args.out_dir)
        .with_context(|| format!("Error converting path to absolute: {}", &args.out_dir))?;

    if !out_path.is_dir() {
        bail!("Output path must be a directory: {}", out_path.display());
    }

    decompress_files(&out_path).context("Error bootstrapping")?;
    write_folio_cfg(&out_path).context("Error writing Folio configuration")?;

    println!("Site created in {}", out_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use folio::config::parse_config;

    use super::*;

    #[test]
    fn test_sample_cfg() {
        let cfg = get_sample_cfg();
        let res = replace_paths(&PathBuf::from("/abs/path/"), cfg);
        assert!(res.contains(r##"template_dir = "/abs/path/template""##));
        assert!(res.contains(r##"public_dir = "/abs/path/public""##));
        assert!(res.contains(r##"content_dir = "/abs/path/content/blogs""##));

        let res = replace_date(&res, "2026-05-04");
        assert!(res.contains("blog_start_date = 2026-05-04"));

        let config = parse_config(&res).unwrap();
        assert_eq!(config.paths.content_dir, PathBuf::from("/abs/path/content/blogs"));
    }
}
