mod transfer_tests;
mod validate_tests;
