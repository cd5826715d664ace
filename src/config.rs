//! 运行配置
//!
//! 默认值可由 JSON 配置文件覆盖，数据文件路径还可以由命令行参数覆盖。

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::Parser;
use error::PortraitError;
use serde::Deserialize;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "SENSORY_PORTRAIT_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortraitConfig {
    /// 房间数据 CSV 路径
    pub data_path: PathBuf,
    /// 逻辑画布边长
    pub canvas_size: f64,
    pub frame_rate: u32,
    /// 新粒子为特殊粒子的概率
    pub special_chance: f64,
    /// 粒子数量上限
    pub max_particles: usize,
    /// 日志文件；终端被界面占用，日志不能写到 stderr
    pub log_file: PathBuf,
}

impl Default for PortraitConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/rooms.csv"),
            canvas_size: 720.0,
            frame_rate: 60,
            special_chance: crate::particles::SPECIAL_CHANCE,
            max_particles: 1000,
            log_file: PathBuf::from("sensory_portrait.log"),
        }
    }
}

impl PortraitConfig {
    /// 从 JSON 文件加载，缺失字段使用默认值
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PortraitError> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        Ok(config.sanitized())
    }

    /// Replaces values the renderer cannot work with by their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.canvas_size.is_finite() && self.canvas_size > 0.0) {
            self.canvas_size = defaults.canvas_size;
        }
        if self.frame_rate == 0 {
            self.frame_rate = defaults.frame_rate;
        }
        if !self.special_chance.is_finite() {
            self.special_chance = defaults.special_chance;
        }
        self.special_chance = self.special_chance.clamp(0.0, 1.0);
        self
    }
}

/// Command line: `sensory_portrait [DATA_CSV] [--config FILE]`.
#[derive(Debug, Clone, Default, PartialEq, Parser)]
#[command(name = "sensory_portrait", about = "Animated portrait of room sensor readings")]
pub struct CliArgs {
    /// Room data CSV; overrides `data_path` from the config
    pub data_path: Option<PathBuf>,
    /// JSON config file
    #[arg(short, long, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// 合成最终配置：配置文件（或默认值），再用命令行的数据路径覆盖
    pub fn resolve(&self) -> Result<PortraitConfig, PortraitError> {
        let mut config = match &self.config {
            Some(path) => PortraitConfig::load(path)?,
            None => PortraitConfig::default(),
        };
        if let Some(data_path) = &self.data_path {
            config.data_path = data_path.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(list: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("sensory_portrait").chain(list.iter().copied()))
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: PortraitConfig =
            serde_json::from_str(r#"{ "frame_rate": 30, "data_path": "rooms.csv" }"#).unwrap();
        assert_eq!(
            config,
            PortraitConfig {
                frame_rate: 30,
                data_path: PathBuf::from("rooms.csv"),
                ..PortraitConfig::default()
            }
        );
    }

    #[test]
    fn test_sanitized_replaces_unusable_values() {
        let config = PortraitConfig {
            canvas_size: -5.0,
            frame_rate: 0,
            special_chance: 4.0,
            ..PortraitConfig::default()
        }
        .sanitized();
        assert_eq!(config.canvas_size, 720.0);
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.special_chance, 1.0);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_positional_and_config() {
        let parsed = parse(&["office.csv", "--config", "p.json"]).unwrap();
        assert_eq!(parsed.data_path, Some(PathBuf::from("office.csv")));
        assert_eq!(parsed.config, Some(PathBuf::from("p.json")));

        let parsed = parse(&["-c", "p.json"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("p.json")));
        assert_eq!(parsed.data_path, None);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--fps", "30"]).is_err());
        assert!(parse(&["a.csv", "b.csv"]).is_err());
    }

    #[test]
    fn test_resolve_layers_file_and_cli() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "data_path": "from_file.csv", "max_particles": 64 }}"#).unwrap();

        let cli = CliArgs {
            config: Some(file.path().to_path_buf()),
            ..CliArgs::default()
        };
        let config = cli.resolve().unwrap();
        assert_eq!(config.data_path, PathBuf::from("from_file.csv"));
        assert_eq!(config.max_particles, 64);

        // 命令行数据路径优先
        let cli = CliArgs {
            data_path: Some(PathBuf::from("cli.csv")),
            config: Some(file.path().to_path_buf()),
        };
        let config = cli.resolve().unwrap();
        assert_eq!(config.data_path, PathBuf::from("cli.csv"));
        assert_eq!(config.max_particles, 64);

        assert_eq!(CliArgs::default().resolve().unwrap(), PortraitConfig::default());
    }

    #[test]
    fn test_resolve_reports_broken_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let cli = CliArgs {
            config: Some(file.path().to_path_buf()),
            ..CliArgs::default()
        };
        assert!(matches!(cli.resolve(), Err(PortraitError::Config(_))));
    }
}
