//! Unit-level tests against the public library API.

mod catalog_tests;
mod cli_command_parse_tests;
mod config_tests;
mod edge_table_tests;
mod graph_tests;
mod query_tests;
mod session_tests;
mod storage_tests;
