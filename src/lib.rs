pub mod account;
pub mod arguments;
pub mod constants;
pub mod endpoints;
pub mod errors;
pub mod logger;
pub mod prompt;
pub mod rpc;
pub mod selection;
pub mod sweep;
pub mod wallet;
