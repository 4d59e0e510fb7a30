//! Link header module
//!
//! Parses RFC 8288 `Link` header values into ordered (URL, relation) pairs.
//!
//! # Overview
//!
//! Servers that paginate advertise the following page with an entry such as
//! `<https://api.example.com/items?page=2>; rel="next"`. Parsing is
//! permissive: entries that do not parse are dropped and never fail the
//! whole header.

mod parser;

pub use parser::{Link, LinkSet};

#[cfg(test)]
mod tests;
