use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use config::Config;
use serde::{Deserialize, Serialize};

use crate::error::ShsError;

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ShsConfig {
    // maximum creatable threads
    pub threads: usize,

    // byte size, inputs larger than this are rejected before hashing
    pub max_input_size: usize,

    // display digest in upper case
    pub upper: bool,
}

impl Default for ShsConfig {
    fn default() -> Self {
        Self {
            threads: (num_cpus::get() >> 1).max(1),
            max_input_size: 1 << 30,
            upper: false,
        }
    }
}

static CONFIG: OnceLock<ShsConfig> = OnceLock::new();

impl ShsConfig {
    /// 未经`ShsConfig::init`初始化时, 加载默认配置文件, 失败时记录警告并使用默认配置.
    pub fn config() -> &'static Self {
        CONFIG.get_or_init(|| {
            Self::load(Self::default_file().as_deref(), false).unwrap_or_else(|e| {
                log::warn!("{e}, fallback to the default config");
                Self::default()
            })
        })
    }

    /// 加载配置, 之后`ShsConfig::config`返回该配置. <br>
    /// 指定的`f`必须存在; 未指定时使用`~/.shs/config.json`, 该文件可不存在. 加载失败返回错误.
    pub fn init(f: Option<&Path>) -> Result<&'static Self, ShsError> {
        let config = match f {
            Some(f) => Self::load(Some(f), true)?,
            None => Self::load(Self::default_file().as_deref(), false)?,
        };

        Ok(CONFIG.get_or_init(|| config))
    }

    /// `~/.shs/config.json`
    pub fn default_file() -> Option<PathBuf> {
        home::home_dir().map(|h| h.join(".shs").join("config.json"))
    }

    /// 默认值 -> 配置文件`f` -> `SHS__`前缀的环境变量, 后者覆盖前者.
    /// `required`为`false`时`f`可不存在.
    pub fn load(f: Option<&Path>, required: bool) -> Result<Self, ShsError> {
        let default_config =
            Config::try_from(&ShsConfig::default()).map_err(|e| ShsError::Config(e.to_string()))?;

        let mut config = Config::builder().add_source(default_config);

        if let Some(f) = f {
            config = config.add_source(config::File::from(f).required(required));
        }

        let config = config
            .add_source(
                config::Environment::with_prefix("SHS")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()
            .map_err(|e| ShsError::Config(e.to_string()))?;

        let mut shs_config: ShsConfig = config
            .try_deserialize()
            .map_err(|e| ShsError::Config(e.to_string()))?;

        shs_config.threads = shs_config.threads.max(1);

        log::trace!("{:?}", shs_config);

        Ok(shs_config)
    }
}

#[cfg(test)]
mod tests {
    use super::ShsConfig;
    use crate::error::ShsError;
    use std::path::PathBuf;

    fn tmp_file(name: &str, content: &str) -> PathBuf {
        let p = std::env::temp_dir().join(format!("shs-{}-{name}", std::process::id()));
        std::fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn config_default() {
        let c = ShsConfig::default();
        assert!(c.threads >= 1);
        assert_eq!(c.max_input_size, 1 << 30);
        assert!(!c.upper);

        let c = ShsConfig::load(None, false).unwrap();
        assert!(c.threads >= 1);
    }

    #[test]
    fn config_missing_file() {
        let p = std::env::temp_dir().join("shs-not-exist-config.json");

        // 默认配置文件可不存在
        let c = ShsConfig::load(Some(&p), false).unwrap();
        assert_eq!(c.max_input_size, ShsConfig::default().max_input_size);

        assert!(matches!(
            ShsConfig::load(Some(&p), true),
            Err(ShsError::Config(_))
        ));
        assert!(ShsConfig::init(Some(&p)).is_err());
    }

    #[test]
    fn config_from_file() {
        let p = tmp_file(
            "config.json",
            r#"{"threads": 0, "max_input_size": 1024, "upper": true}"#,
        );
        let c = ShsConfig::load(Some(&p), true).unwrap();
        std::fs::remove_file(&p).unwrap();

        assert_eq!(c.threads, 1);
        assert_eq!(c.max_input_size, 1024);
        assert!(c.upper);
    }

    #[test]
    fn config_invalid_file() {
        let p = tmp_file("invalid.json", r#"{"threads": "many"}"#);
        let c = ShsConfig::load(Some(&p), true);
        let init = ShsConfig::init(Some(&p));
        std::fs::remove_file(&p).unwrap();

        assert!(matches!(c, Err(ShsError::Config(_))));
        assert!(init.is_err());
    }
}
