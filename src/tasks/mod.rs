pub mod ingest_loop;
