pub mod es_repository_trait;
