//! Text analysis for raw address strings.
//!
//! Splits an address line into word tokens, removes stop words, and pulls out
//! the house numbers and postal codes that the query layer matches
//! separately from address-object names.

pub mod extract;
pub mod stop;
pub mod tokenizer;

pub use extract::{extract_house_numbers, extract_postal_codes};
pub use stop::StopFilter;
pub use tokenizer::AddressTokenizer;
