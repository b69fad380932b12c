use crate::common::*;

use crate::utils_modules::io_utils::*;

use crate::env_configuration::env_config::*;

fn default_timeout_sec() -> u64 {
    30
}

#[derive(Serialize, Deserialize, Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct ElasticConfig {
    pub hosts: Vec<String>,
    #[serde(default)]
    pub es_id: String,
    #[serde(default)]
    pub es_pw: String,
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
    #[serde(default)]
    pub disable_proxy: bool,
}

impl ElasticConfig {
    #[doc = "Reads the connection information from a toml file."]
    pub fn from_toml_file(file_path: &str) -> anyhow::Result<Self> {
        let config: ElasticConfig = read_toml_from_file::<ElasticConfig>(file_path)?;

        if config.hosts.is_empty() {
            return Err(anyhow!(
                "[ElasticConfig::from_toml_file] '{}' does not define any hosts",
                file_path
            ));
        }

        Ok(config)
    }

    #[doc = "Builds the connection information from the ES_URL / ES_ID / ES_PW variables."]
    pub fn from_env() -> Self {
        ElasticConfig::new(
            vec![ES_URL.to_string()],
            ES_ID.to_string(),
            ES_PW.to_string(),
            default_timeout_sec(),
            false,
        )
    }

    #[doc = "ELASTIC_CONFIG_PATH 가 있으면 toml 파일을, 없으면 환경변수를 사용한다."]
    pub fn load() -> anyhow::Result<Self> {
        match ELASTIC_CONFIG_PATH.as_deref() {
            Some(path) => {
                info!("[ElasticConfig::load] reading '{}'", path);
                Self::from_toml_file(path)
            }
            None => {
                info!("[ElasticConfig::load] using ES_URL={}", ES_URL.as_str());
                Ok(Self::from_env())
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }
}
