// Résumé/job matching engine.
// Taxonomy and extraction feed the scorer; the engine ranks a batch; the
// service and handlers wire it to storage and HTTP.

pub mod engine;
pub mod extractor;
pub mod handlers;
pub mod repository;
pub mod scorer;
pub mod service;
pub mod taxonomy;
