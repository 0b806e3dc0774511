pub mod result_writer;
pub mod submission_reader;
