use crate::common::*;

#[doc = "Wire format of timestamps exchanged with Elasticsearch (millisecond precision, UTC)"]
pub const ES_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3fZ";

#[doc = "Standard Function of Datetime"]
fn convert_date_to_str<Tz>(
    time: DateTime<Tz>,
    tz: Tz, // Timezone (Utc, Local, FixedOffset ...)
    format: &str,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.with_timezone(&tz).format(format).to_string()
}

#[doc = "Converts a datetime into the Elasticsearch millisecond wire format."]
pub fn convert_date_to_str_millis<Tz>(time: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    convert_date_to_str(time.with_timezone(&Utc), Utc, ES_TIME_FORMAT)
}

#[doc = "Converts a datetime into an index name suffix (yyyymmdd)."]
pub fn convert_date_to_str_ymd<Tz>(
    time: DateTime<Tz>,
    tz: Tz, // Timezone (Utc, Local, FixedOffset ...)
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    convert_date_to_str(time, tz, "%Y%m%d")
}

#[doc = "Parses a string in the Elasticsearch millisecond wire format into a UTC datetime."]
/// # Arguments
/// * `time` - e.g. `2015-01-23T16:49:17.889Z`
///
/// # Returns
/// * anyhow::Result<DateTime<Utc>> - fails when the string does not match the format exactly
pub fn convert_str_millis_to_datetime(time: &str) -> anyhow::Result<DateTime<Utc>> {
    let naive: NaiveDateTime = NaiveDateTime::parse_from_str(time, ES_TIME_FORMAT)
        .with_context(|| {
            format!(
                "[time_utils.rs -> convert_str_millis_to_datetime] '{}' does not match '{}'",
                time, ES_TIME_FORMAT
            )
        })?;

    Ok(Utc.from_utc_datetime(&naive))
}
