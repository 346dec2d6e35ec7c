pub mod coerce;
pub mod error;
pub mod forest;
pub mod fuse;
pub mod path_select;
pub mod pipeline;
pub mod thread_builder;
pub mod tweet_store;

pub use error::*;
