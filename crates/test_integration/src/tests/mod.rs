pub mod test_analyze;
pub mod test_batch;
