//! Consumer side of the listing/search contract: a thin HTTP client plus
//! the view-state container the browser application drives.

pub mod api;
pub mod view_state;
