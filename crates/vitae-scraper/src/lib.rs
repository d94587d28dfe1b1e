pub mod assemble;
pub mod client;
pub mod country;
pub mod dates;
pub mod decode;
pub mod error;
pub mod experience;
pub mod fields;
mod json_nav;
pub mod location;
mod retry;

pub use assemble::{extract_profile, parse_cards_payload, ProfileContext, RawPayloads};
pub use client::{ProfileClient, SessionCookies};
pub use dates::parse_date_range;
pub use decode::decode_payload;
pub use error::ScraperError;
pub use experience::{dedup_experiences, extract_experiences, CompanyLogoIndex};
pub use location::resolve_location;
