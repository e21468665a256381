pub mod candidate_service;
pub mod candidate_store;
pub mod memory_candidate_store;
pub mod pg_candidate_store;
pub mod upload_service;
