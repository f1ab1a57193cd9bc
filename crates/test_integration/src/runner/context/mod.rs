pub mod fake_services;
pub mod test_context;
