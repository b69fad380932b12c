use crate::common::*;

#[derive(Debug, Deserialize)]
pub struct SearchHit<T> {
    #[serde(default)]
    pub _index: Option<String>,
    #[serde(default)]
    pub _id: Option<String>,
    #[serde(default)]
    pub _score: Option<f64>,
    pub _source: T,
}

/// `hits.total` is a plain integer up to 6.x and `{ "value", "relation" }` from 7.x on.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum HitsTotal {
    Count(u64),
    Detailed { value: u64, relation: String },
}

impl HitsTotal {
    pub fn value(&self) -> u64 {
        match self {
            HitsTotal::Count(count) => *count,
            HitsTotal::Detailed { value, .. } => *value,
        }
    }
}

impl Default for HitsTotal {
    fn default() -> Self {
        HitsTotal::Count(0)
    }
}

#[derive(Debug, Deserialize)]
pub struct HitsWrapper<T> {
    #[serde(default)]
    pub total: HitsTotal,
    #[serde(default = "Vec::new")]
    pub hits: Vec<SearchHit<T>>,
}

#[doc = "Search / aggregation response envelope"]
#[derive(Debug, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct EsSearchResults<T = Value> {
    #[serde(default)]
    pub took: Option<u64>,
    #[serde(default)]
    pub timed_out: Option<bool>,
    pub hits: HitsWrapper<T>,
    /* raw aggregation payloads, decoded on demand */
    #[serde(rename = "aggregations", default)]
    pub aggs: HashMap<String, Value>,
}

impl<T> EsSearchResults<T> {
    pub fn total(&self) -> u64 {
        self.hits.total.value()
    }

    pub fn hits_len(&self) -> usize {
        self.hits.hits.len()
    }

    #[doc = "Consumes the envelope and returns the `_source` of every hit, in order."]
    pub fn into_sources(self) -> Vec<T> {
        self.hits.hits.into_iter().map(|hit| hit._source).collect()
    }

    #[doc = "Decodes the named aggregation result into the caller's expected shape."]
    /// # Arguments
    /// * `agg_name` - name used under `aggs` in the request
    ///
    /// # Returns
    /// * anyhow::Result<A> - error if the aggregation is absent or has a different shape
    pub fn aggregation<A: DeserializeOwned>(&self, agg_name: &str) -> anyhow::Result<A> {
        let raw: &Value = self.aggs.get(agg_name).ok_or_else(|| {
            anyhow!(
                "[EsSearchResults->aggregation] no aggregation named '{}'",
                agg_name
            )
        })?;

        A::deserialize(raw).map_err(|e| {
            anyhow!(
                "[EsSearchResults->aggregation] '{}' could not be decoded: {:?}",
                agg_name,
                e
            )
        })
    }
}

#[doc = "Single-value metric aggregation (sum, avg, min, max, cardinality ...)"]
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ValueAggregation {
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DateHistogramAggregation {
    pub buckets: Vec<DateHistogramBucket>,
}

#[derive(Debug, Deserialize)]
pub struct DateHistogramBucket {
    pub key_as_string: Option<String>,
    pub key: i64,
    pub doc_count: i64,
}
