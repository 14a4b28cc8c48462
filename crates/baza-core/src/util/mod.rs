//! String and list utilities shared by the storage engine, SQL front end,
//! and CLI driver.

mod rowset;
mod str;
mod strlist;

pub use rowset::RowSet;
pub use str::{count_utf8_glyphs, parse_int, parse_int32, str_ieq};
pub use strlist::split_quoted;
