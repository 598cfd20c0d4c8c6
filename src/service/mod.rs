pub mod calendar_service;
pub mod ingest_service;
pub mod mailbox_service;
