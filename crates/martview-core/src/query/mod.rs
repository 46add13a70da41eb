//! Request construction: option maps and fetch descriptors.

mod options;
mod request;

pub use options::{OptionValue, RequestOptions, RequestOptionsBuilder};
pub use request::{FetchIntent, FetchMode, FetchRequest, IntentKind};
