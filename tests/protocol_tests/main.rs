//! Protocol and shell test suite

mod parser_tests;
mod shell_tests;
