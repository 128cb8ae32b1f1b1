//! Input module for reading the ranked URL list
//!
//! The ranked list is a loosely comma-separated text file, for example:
//!
//! ```text
//! "Rank","URL","Linking Root Domains"
//! 1,"facebook.com/",9616487
//! 2,"twitter.com/",6454936
//! ```

mod reader;

pub use reader::{parse_ranked_list, read_ranked_list, InputError};
