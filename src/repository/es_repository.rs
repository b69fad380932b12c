use crate::common::*;

use crate::model::configs::elastic_config::*;
use crate::model::elastic_dto::es_response::*;

use crate::utils_modules::io_utils::*;

use crate::traits::repository::es_repository_trait::*;

const DEFAULT_DOC_TYPE: &str = "_doc";
const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";
const INDEX_NOT_FOUND: u16 = 404;

#[derive(Debug, Getters, Clone)]
#[getset(get = "pub")]
pub struct EsRepositoryImpl {
    pub es_client: Elasticsearch,
    pub hosts: Vec<String>,
    pub es_id: Option<String>,
    pub es_pw: Option<String>,
}

impl EsRepositoryImpl {
    #[doc = "Elasticsearch connection 생성자"]
    /// # Arguments
    /// * `hosts`         - Elasticsearch host 주소 벡터 (`host:port` or full URL)
    /// * `es_id`         - Elasticsearch 계정정보 - 아이디 (empty: no auth)
    /// * `es_pw`         - Elasticsearch 계정정보 - 비밀번호
    /// * `timeout`       - transport timeout per request
    /// * `disable_proxy` - bypass any system proxy
    ///
    /// # Returns
    /// * Result<Self, anyhow::Error>
    pub fn new(
        hosts: Vec<String>,
        es_id: &str,
        es_pw: &str,
        timeout: Duration,
        disable_proxy: bool,
    ) -> Result<Self, anyhow::Error> {
        let es_id_opt: Option<String> = (!es_id.is_empty()).then(|| es_id.to_string());
        let es_pw_opt: Option<String> = (!es_pw.is_empty()).then(|| es_pw.to_string());

        let es_client: Elasticsearch = Self::create_es_conn_pool(
            &hosts,
            es_id_opt.as_deref(),
            es_pw_opt.as_deref(),
            timeout,
            disable_proxy,
        )
        .map_err(|e| anyhow!("[EsRepositoryImpl::new] {:?}", e))?;

        Ok(Self {
            es_client,
            hosts,
            es_id: es_id_opt,
            es_pw: es_pw_opt,
        })
    }

    #[doc = "Builds the client handle from loaded connection information."]
    pub fn from_config(config: &ElasticConfig) -> anyhow::Result<Self> {
        Self::new(
            config.hosts().clone(),
            config.es_id(),
            config.es_pw(),
            config.timeout(),
            *config.disable_proxy(),
        )
    }

    #[doc = "Function that creates an Elasticsearch connection pool."]
    fn create_es_conn_pool(
        hosts: &[String],
        es_id_opt: Option<&str>,
        es_pw_opt: Option<&str>,
        timeout: Duration,
        disable_proxy: bool,
    ) -> anyhow::Result<Elasticsearch> {
        if hosts.is_empty() {
            return Err(anyhow!("[EsRepositoryImpl::create_es_conn_pool] no hosts given"));
        }

        let cluster_urls: Vec<Url> = hosts
            .iter()
            .map(|host| Self::build_es_url(host))
            .collect::<Result<_, _>>()?;

        /* Using MultiNodeConnectionPool */
        let conn_pool: MultiNodeConnectionPool =
            MultiNodeConnectionPool::round_robin(cluster_urls, None);

        let mut builder: TransportBuilder = TransportBuilder::new(conn_pool).timeout(timeout);

        /* Authentication */
        if let (Some(id), Some(pw)) = (es_id_opt, es_pw_opt) {
            builder = builder.auth(EsCredentials::Basic(id.to_string(), pw.to_string()));
        }

        if disable_proxy {
            builder = builder.disable_proxy();
        }

        let transport: EsTransport = builder
            .build()
            .map_err(|e| anyhow!("[EsRepositoryImpl::create_es_conn_pool] {:?}", e))?;

        Ok(Elasticsearch::new(transport))
    }

    #[doc = "Function that create elasticsearch url"]
    fn build_es_url(host: &str) -> anyhow::Result<Url> {
        let url: String = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };

        Url::parse(&url).map_err(|e| anyhow!("[build_es_url] invalid url '{}': {}", host, e))
    }

    #[doc = "Sends one request with a raw body and drains the response."]
    /// # Arguments
    /// * `caller`  - operation name (for logging)
    /// * `method`  - HTTP method
    /// * `path`    - request path relative to the host
    /// * `headers` - extra headers; they replace the transport defaults
    /// * `params`  - query string pairs
    /// * `body`    - forwarded verbatim
    ///
    /// # Returns
    /// * anyhow::Result<EsResponse> - Err only when the request never completes
    async fn send_raw<B>(
        &self,
        caller: &str,
        method: Method,
        path: &str,
        headers: HeaderMap,
        params: &[(&str, &str)],
        body: Option<B>,
    ) -> anyhow::Result<EsResponse>
    where
        B: elasticsearch::http::request::Body + Send,
    {
        let response: Response = self
            .es_client
            .send(method, path, headers, Some(params), body, None)
            .await
            .map_err(|e| {
                error!("[EsRepositoryImpl->{}] transport error on {}: {:?}", caller, path, e);
                anyhow!("[EsRepositoryImpl->{}] {:?}", caller, e)
            })?;

        self.complete(caller, response, &[]).await
    }

    #[doc = "Drains the response and logs any server-reported error not listed in `expected`."]
    async fn complete(
        &self,
        caller: &str,
        response: Response,
        expected: &[u16],
    ) -> anyhow::Result<EsResponse> {
        let es_response: EsResponse = EsResponse::from_response(response).await?;

        if let Some(err) = es_response.server_error() {
            if !expected.contains(err.status_code()) {
                warn!("[EsRepositoryImpl->{}] {}", caller, err);
            }
        }

        Ok(es_response)
    }
}

#[async_trait]
impl EsRepository for EsRepositoryImpl {
    #[doc = "특정 인덱스에 문서 하나를 insert 해주는 함수."]
    /// # Arguments
    /// * `index_name` - 인덱스 이름
    /// * `doc_type`   - document type path segment; empty means `_doc`
    /// * `json_body`  - 색인할 내용, not validated locally
    /// * `refresh`    - make the document searchable before returning
    ///
    /// # Returns
    /// * Result<EsResponse, anyhow::Error>
    async fn insert(
        &self,
        index_name: &str,
        doc_type: &str,
        json_body: &str,
        refresh: bool,
    ) -> Result<EsResponse, anyhow::Error> {
        let doc_type: &str = if doc_type.is_empty() {
            DEFAULT_DOC_TYPE
        } else {
            doc_type
        };
        let path: String = format!("/{}/{}", index_name, doc_type);
        let params: &[(&str, &str)] = if refresh { &[("refresh", "true")] } else { &[] };

        self.send_raw(
            "insert",
            Method::Post,
            &path,
            HeaderMap::new(),
            params,
            Some(json_body.to_string()),
        )
        .await
    }

    #[doc = "인덱스를 삭제해주는 함수. 존재하지 않는 인덱스도 성공으로 취급한다."]
    async fn delete_index(&self, index_name: &str) -> Result<EsResponse, anyhow::Error> {
        let response: Response = self
            .es_client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index_name]))
            .ignore_unavailable(true)
            .send()
            .await
            .map_err(|e| anyhow!("[EsRepositoryImpl->delete_index] {:?}", e))?;

        /* missing index is expected */
        if response.status_code().as_u16() == INDEX_NOT_FOUND {
            info!(
                "[EsRepositoryImpl->delete_index] index '{}' did not exist",
                index_name
            );
        }

        self.complete("delete_index", response, &[INDEX_NOT_FOUND])
            .await
    }

    #[doc = "Function that makes pending writes visible to search."]
    async fn refresh(&self, index_name: &str) -> Result<EsResponse, anyhow::Error> {
        let response: Response = self
            .es_client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index_name]))
            .send()
            .await
            .map_err(|e| anyhow!("[EsRepositoryImpl->refresh] {:?}", e))?;

        self.complete("refresh", response, &[]).await
    }

    #[doc = "특정 인덱스에 search/aggregation 쿼리를 보내주는 함수"]
    /// # Arguments
    /// * `index_name` - 인덱스 이름
    /// * `params`     - query string, e.g. `[("size", "0")]`
    /// * `json_query` - Elasticsearch 쿼리, forwarded verbatim
    ///
    /// # Returns
    /// * Result<EsResponse, anyhow::Error> - decode with `EsResponse::json::<EsSearchResults>()`
    async fn search(
        &self,
        index_name: &str,
        params: &[(&str, &str)],
        json_query: &str,
    ) -> Result<EsResponse, anyhow::Error> {
        let path: String = format!("/{}/_search", index_name);

        self.send_raw(
            "search",
            Method::Post,
            &path,
            HeaderMap::new(),
            params,
            Some(json_query.to_string()),
        )
        .await
    }

    #[doc = "Function that sends a newline-delimited bulk payload read from `payload`."]
    async fn bulk<R>(&self, index_name: &str, payload: R) -> Result<EsResponse, anyhow::Error>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut body: Vec<u8> = read_stream_to_end(payload).await?;

        /* the bulk API rejects a payload whose last line is not terminated */
        if body.last().is_some_and(|b| *b != b'\n') {
            body.push(b'\n');
        }

        let mut headers: HeaderMap = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(NDJSON_CONTENT_TYPE));

        let path: String = format!("/{}/_bulk", index_name);

        let es_response: EsResponse = self
            .send_raw("bulk", Method::Post, &path, headers, &[], Some(body))
            .await?;

        /* 2xx with "errors": true means some items failed */
        if es_response.is_success() {
            if let Ok(summary) = es_response.json::<Value>() {
                if summary["errors"].as_bool().unwrap_or(false) {
                    warn!(
                        "[EsRepositoryImpl->bulk] some items failed in '{}'",
                        index_name
                    );
                }
            }
        }

        Ok(es_response)
    }

    #[doc = "Cluster 내의 모든 호스트들을 반환해주는 함수."]
    fn get_cluster_all_host_infos(&self) -> Vec<String> {
        self.hosts.clone()
    }
}
