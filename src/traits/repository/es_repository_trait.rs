use crate::common::*;

use crate::model::elastic_dto::es_response::*;

#[async_trait]
pub trait EsRepository {
    async fn insert(
        &self,
        index_name: &str,
        doc_type: &str,
        json_body: &str,
        refresh: bool,
    ) -> Result<EsResponse, anyhow::Error>;
    async fn delete_index(&self, index_name: &str) -> Result<EsResponse, anyhow::Error>;
    async fn refresh(&self, index_name: &str) -> Result<EsResponse, anyhow::Error>;
    async fn search(
        &self,
        index_name: &str,
        params: &[(&str, &str)],
        json_query: &str,
    ) -> Result<EsResponse, anyhow::Error>;
    async fn bulk<R>(&self, index_name: &str, payload: R) -> Result<EsResponse, anyhow::Error>
    where
        R: AsyncRead + Unpin + Send;
    fn get_cluster_all_host_infos(&self) -> Vec<String>;
}
