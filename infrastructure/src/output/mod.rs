//! Test record output adapters.

mod jsonl_record_writer;

pub use jsonl_record_writer::JsonlRecordWriter;
