pub mod activity;
pub mod daily;
pub mod ingest;
