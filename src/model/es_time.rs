use crate::common::*;

use crate::utils_modules::time_utils::*;

/// Timestamp as Elasticsearch stores it: `YYYY-MM-DDTHH:MM:SS.mmmZ`, UTC only.
///
/// Anything below a millisecond is dropped when the value is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EsTime(DateTime<Utc>);

impl EsTime {
    #[doc = "Current time truncated to milliseconds."]
    pub fn now() -> Self {
        EsTime(Utc::now().trunc_subsecs(3))
    }

    #[doc = "Parses the fixed millisecond wire format."]
    /// # Arguments
    /// * `time` - e.g. `2015-01-23T16:49:17.889Z`
    ///
    /// # Returns
    /// * anyhow::Result<EsTime> - format error if `time` does not match exactly
    pub fn parse(time: &str) -> anyhow::Result<Self> {
        convert_str_millis_to_datetime(time).map(EsTime)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn into_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for EsTime {
    fn from(dt: DateTime<Utc>) -> Self {
        EsTime(dt)
    }
}

impl From<EsTime> for DateTime<Utc> {
    fn from(ts: EsTime) -> Self {
        ts.0
    }
}

impl Display for EsTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&convert_date_to_str_millis(self.0))
    }
}

impl FromStr for EsTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EsTime::parse(s)
    }
}

impl Serialize for EsTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EsTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: String = String::deserialize(deserializer)?;
        EsTime::parse(&raw).map_err(serde::de::Error::custom)
    }
}
