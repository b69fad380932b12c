use crate::common::*;

#[doc = "Cause of a failed request as reported by Elasticsearch"]
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ErrorCause {
    /* 2.x and later: { "type": ..., "reason": ... } */
    Detailed {
        #[serde(rename = "type")]
        ty: String,
        #[serde(default)]
        reason: Option<String>,
    },
    /* 1.x: plain message string */
    Message(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorCause,
}

#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct EsServerError {
    status_code: u16,
    cause: ErrorCause,
}

impl EsServerError {
    pub fn reason(&self) -> &str {
        match &self.cause {
            ErrorCause::Detailed { ty, reason } => reason.as_deref().unwrap_or(ty),
            ErrorCause::Message(msg) => msg,
        }
    }
}

impl Display for EsServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            ErrorCause::Detailed { ty, reason } => write!(
                f,
                "Elasticsearch returned {} [{}]: {}",
                self.status_code,
                ty,
                reason.as_deref().unwrap_or("")
            ),
            ErrorCause::Message(msg) => {
                write!(f, "Elasticsearch returned {}: {}", self.status_code, msg)
            }
        }
    }
}

impl std::error::Error for EsServerError {}

#[doc = "Status and body of one completed round trip"]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct EsResponse {
    status_code: u16,
    body: String,
}

impl EsResponse {
    #[doc = "Drains the transport response so no connection stays checked out."]
    pub async fn from_response(response: Response) -> anyhow::Result<Self> {
        let status_code: u16 = response.status_code().as_u16();
        let body: String = response
            .text()
            .await
            .map_err(|e| anyhow!("[EsResponse::from_response] failed to read body: {:?}", e))?;

        Ok(EsResponse::new(status_code, body))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    #[doc = "Decodes the body. Failures surface here, never at request time."]
    pub fn json<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            anyhow!(
                "[EsResponse->json] failed to decode response (status {}): {:?}",
                self.status_code,
                e
            )
        })
    }

    #[doc = "Error reported by the server, if the status is not 2xx."]
    /// A body Elasticsearch did not format as an error object is kept verbatim as the reason.
    pub fn server_error(&self) -> Option<EsServerError> {
        if self.is_success() {
            return None;
        }

        let cause: ErrorCause = match serde_json::from_str::<ErrorBody>(&self.body) {
            Ok(parsed) => parsed.error,
            Err(_) => ErrorCause::Message(self.body.clone()),
        };

        Some(EsServerError::new(self.status_code, cause))
    }

    #[doc = "Turns a server-reported error into a hard failure."]
    pub fn error_for_status(self) -> anyhow::Result<Self> {
        match self.server_error() {
            Some(err) => Err(err.into()),
            None => Ok(self),
        }
    }
}
