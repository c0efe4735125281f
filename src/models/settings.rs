use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "trade_data.json";
pub const DEFAULT_PAIRS: [&str; 2] = ["USDJPY", "EURUSD"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub data_file: PathBuf,
    pub default_pairs: Vec<String>,
    pub export_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            default_pairs: DEFAULT_PAIRS.iter().map(|p| p.to_string()).collect(),
            export_dir: PathBuf::from("."),
        }
    }
}

/// Overrides collected from the command line / environment. `None` keeps the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettingsInput {
    pub data_file: Option<PathBuf>,
    pub default_pairs: Option<Vec<String>>,
    pub export_dir: Option<PathBuf>,
}

impl Settings {
    pub fn with_overrides(mut self, input: UpdateSettingsInput) -> Self {
        if let Some(val) = input.data_file {
            self.data_file = val;
        }
        if let Some(val) = input.default_pairs {
            let pairs: Vec<String> = val
                .iter()
                .map(|p| p.trim().to_uppercase())
                .filter(|p| !p.is_empty())
                .fold(Vec::new(), |mut acc, p| {
                    if !acc.contains(&p) {
                        acc.push(p);
                    }
                    acc
                });
            if !pairs.is_empty() {
                self.default_pairs = pairs;
            }
        }
        if let Some(val) = input.export_dir {
            self.export_dir = val;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.data_file, PathBuf::from("trade_data.json"));
        assert_eq!(settings.default_pairs, vec!["USDJPY", "EURUSD"]);
    }

    #[test]
    fn test_overrides_normalize_pairs() {
        let settings = Settings::default().with_overrides(UpdateSettingsInput {
            data_file: Some(PathBuf::from("/tmp/journal.json")),
            default_pairs: Some(vec![" gbpusd".into(), "GBPUSD".into(), "".into(), "xauusd".into()]),
            export_dir: None,
        });
        assert_eq!(settings.data_file, PathBuf::from("/tmp/journal.json"));
        assert_eq!(settings.default_pairs, vec!["GBPUSD", "XAUUSD"]);
        assert_eq!(settings.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_empty_pair_override_keeps_defaults() {
        let settings = Settings::default().with_overrides(UpdateSettingsInput {
            default_pairs: Some(vec!["  ".into()]),
            ..Default::default()
        });
        assert_eq!(settings.default_pairs, vec!["USDJPY", "EURUSD"]);
    }
}
