pub mod address_book;
pub mod cmd;
pub mod common;
pub mod contracts;
pub mod formatter;
pub mod payload;
pub mod utils;

#[cfg(test)]
mod tests;
