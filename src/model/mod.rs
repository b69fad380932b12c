pub mod configs;
pub mod elastic_dto;
pub mod es_time;
