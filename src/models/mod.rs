//! Data model types shared across the application.

mod entry;
mod route;

pub use entry::{DiskStat, Entry, Listing, MetaInfo, Resp, SortField, Thumb};
pub use route::Route;
