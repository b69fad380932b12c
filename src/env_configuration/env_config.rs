use crate::common::*;

pub const DEFAULT_ES_URL: &str = "http://localhost:9200";
pub const DEFAULT_PROBE_INDEX: &str = "elastic-proxy-probe";

#[doc = "env 헬퍼함수 정의 - 값이 없으면 None"]
fn get_env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|val| !val.is_empty())
}

#[doc = "env 헬퍼함수 정의 - 값이 없으면 기본값"]
fn get_env_or_default(key: &str, default: &str) -> String {
    get_env_opt(key).unwrap_or_else(|| default.to_string())
}

#[doc = "Path of the toml file holding the Elasticsearch connection information (optional)"]
pub static ELASTIC_CONFIG_PATH: once_lazy<Option<String>> =
    once_lazy::new(|| get_env_opt("ELASTIC_CONFIG_PATH"));

#[doc = "Elasticsearch endpoint used when no config file is given"]
pub static ES_URL: once_lazy<String> =
    once_lazy::new(|| get_env_or_default("ES_URL", DEFAULT_ES_URL));

pub static ES_ID: once_lazy<String> = once_lazy::new(|| get_env_or_default("ES_ID", ""));

pub static ES_PW: once_lazy<String> = once_lazy::new(|| get_env_or_default("ES_PW", ""));

#[doc = "Index the probe binary writes to and deletes afterwards"]
pub static ES_PROBE_INDEX: once_lazy<String> =
    once_lazy::new(|| get_env_or_default("ES_PROBE_INDEX", DEFAULT_PROBE_INDEX));
