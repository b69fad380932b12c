pub mod elastic_source_parser;
pub mod es_response;
