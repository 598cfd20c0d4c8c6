pub mod combine;
pub mod date_parser;
pub mod extractor;
