use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::util::toml_date::TomlDate;

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub content_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct Personal {
    pub name: String,
    pub email: String,
    pub career_start_date: TomlDate,
    pub blog_start_date: TomlDate,
}

#[derive(Deserialize)]
pub struct Site {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(default = "default_language")]
    pub language: String,
    pub logo: Option<String>,
    pub favicon: Option<String>,
    pub resume_path: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Deserialize)]
pub struct Defaults {
    pub page_size: u32,
    pub related_limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Auth {
    pub session_cookie: Option<String>,
    pub session_token: Option<String>,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub personal: Personal,
    pub site: Site,
    pub paths: Paths,
    pub defaults: Defaults,
    pub server: Server,
    pub auth: Option<Auth>,
    pub log: Option<Log>,
}

pub const DEFAULT_RELATED_LIMIT: usize = 3;
pub const DEFAULT_SESSION_COOKIE: &str = "folio_session";

impl Config {
    pub fn related_limit(&self) -> usize {
        self.defaults.related_limit.unwrap_or(DEFAULT_RELATED_LIMIT)
    }

    pub fn session_cookie(&self) -> &str {
        self.auth.as_ref()
            .and_then(|a| a.session_cookie.as_deref())
            .unwrap_or(DEFAULT_SESSION_COOKIE)
    }

    pub fn session_token(&self) -> Option<&str> {
        self.auth.as_ref()
            .and_then(|a| a.session_token.as_deref())
            .filter(|t| !t.is_empty())
    }

    /// Site url without the trailing slash, ready to be joined with a path.
    pub fn site_url(&self) -> &str {
        self.site.url.trim_end_matches('/')
    }
}

fn parse_path(path: PathBuf) -> PathBuf {
    let Some(str_path) = path.to_str() else {
        return path;
    };

    if !str_path.starts_with("${exe_dir}") {
        return path;
    }

    match env::current_exe().ok().as_deref().and_then(Path::parent) {
        Some(exe_dir) => PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())),
        None => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir),
        public_dir: parse_path(cfg.paths.public_dir),
        content_dir: parse_path(cfg.paths.content_dir),
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::test_data::CONFIG_DATA;

    use super::*;

    #[test]
    fn test_parse_config() {
        let cfg = parse_config(CONFIG_DATA).unwrap();
        assert_eq!(cfg.site.title, "Jane Doe - Engineering Blog");
        assert_eq!(cfg.site.language, "en");
        assert_eq!(cfg.site_url(), "https://janedoe.dev");
        assert_eq!(cfg.paths.content_dir, PathBuf::from("content/blogs"));
        assert_eq!(cfg.personal.blog_start_date, TomlDate(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()));
        assert_eq!(cfg.defaults.page_size, 2);
        assert_eq!(cfg.related_limit(), 3);
        assert_eq!(cfg.session_cookie(), "folio_session");
        assert_eq!(cfg.session_token(), Some("s3cret"));
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_missing_auth_section() {
        let cfg_str = CONFIG_DATA.replace("[auth]\nsession_token = \"s3cret\"\n", "");
        let cfg = parse_config(&cfg_str).unwrap();
        assert!(cfg.auth.is_none());
        assert_eq!(cfg.session_token(), None);
        assert_eq!(cfg.session_cookie(), DEFAULT_SESSION_COOKIE);
    }

    #[test]
    fn test_exe_dir_prefix() {
        let path = parse_path(PathBuf::from("${exe_dir}/content"));
        assert!(!path.to_string_lossy().contains("${exe_dir}"));
        assert!(path.ends_with("content"));

        let path = parse_path(PathBuf::from("content"));
        assert_eq!(path, PathBuf::from("content"));
    }

    #[test]
    fn test_invalid_config() {
        let res = parse_config("[site]\ntitle = 1");
        assert_eq!(res.err().map(|e| e.kind()), Some(ErrorKind::InvalidData));
    }
}
