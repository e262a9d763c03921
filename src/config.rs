use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::page_range::{ButtonBudget, MIN_BUTTONS};

#[derive(Deserialize)]
pub struct Site {
    pub name: String,
}

#[derive(Deserialize)]
pub struct Api {
    pub base_url: String,
    #[serde(default = "default_slug_lookup")]
    pub slug_lookup: bool,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_wide_buttons")]
    pub wide_buttons: u32,
    #[serde(default = "default_narrow_buttons")]
    pub narrow_buttons: u32,
    #[serde(default = "default_narrow_breakpoint")]
    pub narrow_breakpoint: u32,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
    /// Daily files kept before the oldest is removed
    pub max_files: Option<usize>,
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
    pub site: Site,
    pub api: Api,
    #[serde(default)]
    pub pagination: Pagination,
    pub server: Server,
    pub log: Option<Log>,
}

fn default_slug_lookup() -> bool { true }
fn default_page_size() -> u32 { 6 }
fn default_wide_buttons() -> u32 { 7 }
fn default_narrow_buttons() -> u32 { 5 }
fn default_narrow_breakpoint() -> u32 { 768 }

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page_size: default_page_size(),
            wide_buttons: default_wide_buttons(),
            narrow_buttons: default_narrow_buttons(),
            narrow_breakpoint: default_narrow_breakpoint(),
        }
    }
}

impl Pagination {
    pub fn button_budget(&self) -> ButtonBudget {
        ButtonBudget {
            wide: self.wide_buttons,
            narrow: self.narrow_buttons,
            narrow_breakpoint: self.narrow_breakpoint,
        }
    }
}

fn parse_path(path: PathBuf) -> PathBuf {
    let Some(str_path) = path.to_str() else {
        return path;
    };
    if !str_path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match exe_dir {
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

    let pagination = &cfg.pagination;
    if pagination.wide_buttons < MIN_BUTTONS || pagination.narrow_buttons < MIN_BUTTONS {
        return Err(io::Error::new(ErrorKind::InvalidData, format!(
            "Pagination needs at least {} buttons, got wide_buttons = {} and narrow_buttons = {}",
            MIN_BUTTONS, pagination.wide_buttons, pagination.narrow_buttons)));
    }

    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path);
    }

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
    use super::*;

    const FULL_CONFIG: &str = r#"
[site]
name = "Money Notes"

[api]
base_url = "https://blog.example.com/api"
slug_lookup = false
timeout_secs = 5

[pagination]
page_size = 9
wide_buttons = 9
narrow_buttons = 5
narrow_breakpoint = 640

[server]
address = "127.0.0.1"
port = 8080

[log]
level = "Debug"
log_to_console = true
location = "${exe_dir}/log/server.log"
max_files = 7
"#;

    const MINIMAL_CONFIG: &str = r#"
[site]
name = "Money Notes"

[api]
base_url = "https://blog.example.com/api"

[server]
address = "0.0.0.0"
port = 8001
"#;

    #[test]
    fn test_full_config() {
        let cfg = parse_config(FULL_CONFIG).unwrap();
        assert_eq!(cfg.site.name, "Money Notes");
        assert!(!cfg.api.slug_lookup);
        assert_eq!(cfg.api.timeout_secs, Some(5));
        assert_eq!(cfg.pagination.page_size, 9);
        assert_eq!(cfg.pagination.button_budget(), ButtonBudget { wide: 9, narrow: 5, narrow_breakpoint: 640 });
        assert_eq!(cfg.server.port, 8080);

        let log = cfg.log.unwrap();
        assert!(matches!(log.level, LogLevel::Debug));
        assert_eq!(log.max_files, Some(7));
        let location = log.location.unwrap();
        assert!(!location.to_string_lossy().contains("${exe_dir}"));
        assert!(location.ends_with("log/server.log"));
    }

    #[test]
    fn test_defaults() {
        let cfg = parse_config(MINIMAL_CONFIG).unwrap();
        assert!(cfg.api.slug_lookup);
        assert_eq!(cfg.api.timeout_secs, None);
        assert_eq!(cfg.pagination.page_size, 6);
        assert_eq!(cfg.pagination.button_budget(), ButtonBudget::default());
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[site]\nname = 1").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_too_few_buttons() {
        let cfg = MINIMAL_CONFIG.to_string() + "\n[pagination]\nnarrow_buttons = 3\n";
        let err = parse_config(&cfg).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("narrow_buttons = 3"));

        let cfg = MINIMAL_CONFIG.to_string() + "\n[pagination]\nwide_buttons = 5\nnarrow_buttons = 5\n";
        assert!(parse_config(&cfg).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = read_config(Path::new("/definitely/not/here/blogfront.toml")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
