//! Optional config from .parcolrc or ~/.parcolrc (JSON). Merged with env and CLI.

use std::path::Path;

/// Optional config from file. CLI and env override these.
#[derive(Default, Debug)]
pub struct Config {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub delay_ms: Option<u64>,
    pub workers: Option<Vec<usize>>,
    pub seed: Option<u64>,
}

/// Load config from .parcolrc in dir, then ~/.parcolrc. Missing or invalid file = default.
pub fn load_config(dir: &Path) -> Config {
    let mut cfg = Config::default();
    let home = dirs_home();
    let candidates = [
        dir.join(".parcolrc"),
        home.map(|h| h.join(".parcolrc")).unwrap_or_else(|| dir.join(".none")),
    ];
    for path in &candidates {
        if path.is_file() {
            if let Ok(s) = std::fs::read_to_string(path) {
                if let Ok(v) = serde_json::from_str::<serde_json::Value>(&s) {
                    if let Some(n) = v.get("rows").and_then(|x| x.as_u64()) {
                        cfg.rows = Some(n as usize);
                    }
                    if let Some(n) = v.get("cols").and_then(|x| x.as_u64()) {
                        cfg.cols = Some(n as usize);
                    }
                    if let Some(n) = v.get("delayMs").and_then(|x| x.as_u64()) {
                        cfg.delay_ms = Some(n);
                    }
                    if let Some(list) = v.get("workers").and_then(|x| x.as_array()) {
                        let parsed: Vec<usize> =
                            list.iter().filter_map(|x| x.as_u64()).map(|n| n as usize).collect();
                        if !parsed.is_empty() {
                            cfg.workers = Some(parsed);
                        }
                    }
                    if let Some(n) = v.get("seed").and_then(|x| x.as_u64()) {
                        cfg.seed = Some(n);
                    }
                }
            }
            break;
        }
    }
    cfg
}

fn dirs_home() -> Option<std::path::PathBuf> {
    #[cfg(unix)]
    {
        std::env::var("HOME").ok().map(std::path::PathBuf::from)
    }
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(std::path::PathBuf::from)
    }
}
