//! Pulls the private and access IP addresses of provisioned VMs out of a JSON
//! dump and checks that every one of them is a real address.

pub mod error;
pub mod extract;
pub mod validate;

pub use error::ExtractError;
pub use extract::{extract, extract_from_str, merge, VmAddresses};
pub use validate::{is_valid_ip, parse_ip};
