pub mod address_book;
pub mod decode;
pub mod payload;
pub mod simulate;
pub(crate) mod utils;
