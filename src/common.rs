pub use std::collections::HashMap;
pub use std::fmt::{self, Display};
pub use std::io::Write;
pub use std::str::FromStr;

pub use tokio::io::{AsyncRead, AsyncReadExt};
pub use tokio::time::Duration;

pub use log::{error, info, warn};

pub use flexi_logger::{
    Age, Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle, Naming,
    Record,
};

pub use serde::de::DeserializeOwned;
pub use serde::{Deserialize, Deserializer, Serialize, Serializer};
pub use serde_json::{json, Value};

pub use elasticsearch::auth::Credentials as EsCredentials;
pub use elasticsearch::http::headers::{HeaderMap, HeaderValue, CONTENT_TYPE};
pub use elasticsearch::http::response::Response;
pub use elasticsearch::http::transport::{
    MultiNodeConnectionPool, Transport as EsTransport, TransportBuilder,
};
pub use elasticsearch::http::{Method, Url};
pub use elasticsearch::indices::{IndicesDeleteParts, IndicesRefreshParts};
pub use elasticsearch::Elasticsearch;

pub use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeZone, Utc};

pub use anyhow::{anyhow, Context, Result};

pub use getset::Getters;
pub use derive_new::new;

pub use async_trait::async_trait;

pub use once_cell::sync::Lazy as once_lazy;
