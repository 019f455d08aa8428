//! Smart contract test modules

// Test modules converted from the reference unit tests
mod application_engine_tests;
mod binary_serializer_tests;
mod contract_manifest_tests;
mod contract_parameter_context_tests;
mod cryptolib_tests;
mod interop_prices_tests;
mod interop_service_tests;
mod key_builder_tests;
mod log_event_args_tests;
mod method_token_tests;
mod stdlib_tests;
mod syscalls_tests;
