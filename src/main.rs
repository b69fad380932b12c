/*
Create date : 2026-10-14
Description : Elasticsearch 클러스터에 insert / refresh / search / aggregation / bulk 를 차례로 요청해서
              클라이언트 어댑터가 정상 동작하는지 확인해주는 probe 프로그램

History     : 2026-10-14    # [v.0.1.0] first create
*/
use elastic_proxy_rust::common::*;

use elastic_proxy_rust::env_configuration::env_config::*;
use elastic_proxy_rust::model::configs::elastic_config::*;
use elastic_proxy_rust::model::elastic_dto::{elastic_source_parser::*, es_response::*};
use elastic_proxy_rust::model::es_time::*;
use elastic_proxy_rust::repository::es_repository::*;
use elastic_proxy_rust::traits::repository::es_repository_trait::*;
use elastic_proxy_rust::utils_modules::{logger_utils::*, time_utils::*};

#[doc = "Runs every adapter operation once against `index_name`."]
async fn run_probe<R: EsRepository + Sync>(es: &R, index_name: &str) -> anyhow::Result<()> {
    es.delete_index(index_name).await?;

    let doc: String = json!({ "value": 2, "@timestamp": EsTime::now() }).to_string();
    es.insert(index_name, "", &doc, true)
        .await?
        .error_for_status()
        .context("[run_probe] insert")?;

    let doc: String = json!({ "value": 3, "@timestamp": EsTime::now() }).to_string();
    es.insert(index_name, "", &doc, false)
        .await?
        .error_for_status()
        .context("[run_probe] insert")?;

    let bulk_payload: String = format!(
        "{}\n{}\n",
        json!({ "index": {} }),
        json!({ "value": 0, "@timestamp": EsTime::now() })
    );
    es.bulk(index_name, bulk_payload.as_bytes())
        .await?
        .error_for_status()
        .context("[run_probe] bulk")?;

    es.refresh(index_name).await?;

    let query: String = json!({
        "size": 10,
        "aggs": { "value_sum": { "sum": { "field": "value" } } }
    })
    .to_string();

    let resp: EsResponse = es
        .search(index_name, &[], &query)
        .await?
        .error_for_status()
        .context("[run_probe] search")?;

    let results: EsSearchResults = resp.json()?;
    let value_sum: ValueAggregation = results.aggregation("value_sum")?;

    info!(
        "[run_probe] '{}' holds {} documents, value_sum = {:?}",
        index_name,
        results.total(),
        value_sum.value
    );

    es.delete_index(index_name).await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    /* config 설정 전역 적용 */
    dotenv::dotenv().ok();

    /* 전역 로거설정 */
    let _logger: LoggerHandle = match set_global_logger() {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("[main()] Failed to initialize logger: {:?}", e);
            return;
        }
    };

    info!("Start Elasticsearch probe");

    let es_config: ElasticConfig = ElasticConfig::load().unwrap_or_else(|e| {
        error!(
            "[main()] Unable to retrieve 'Elasticsearch' connection information.: {:?}",
            e
        );
        panic!(
            "[main()] Unable to retrieve 'Elasticsearch' connection information.: {:?}",
            e
        )
    });

    let es_repo: EsRepositoryImpl = EsRepositoryImpl::from_config(&es_config).unwrap_or_else(|e| {
        error!("[main()] Unable to create 'Elasticsearch' client.: {:?}", e);
        panic!("[main()] Unable to create 'Elasticsearch' client.: {:?}", e)
    });

    let index_name: String = format!(
        "{}-{}",
        ES_PROBE_INDEX.as_str(),
        convert_date_to_str_ymd(Utc::now(), Utc)
    );

    info!(
        "[main()] probing {:?} with index '{}'",
        es_repo.get_cluster_all_host_infos(),
        index_name
    );

    match run_probe(&es_repo, &index_name).await {
        Ok(()) => info!("[main()] probe finished"),
        Err(e) => error!("[main()] probe failed: {:?}", e),
    }
}
