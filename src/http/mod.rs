//! HTTP protocol layer module
//!
//! Query decoding, MIME lookup, body types and response builders, kept apart
//! from the handlers.

pub mod body;
pub mod mime;
pub mod query;
pub mod response;

pub use body::ResponseBody;
pub use query::get_param;
pub use response::{
    build_404_response, build_405_response, build_500_response, build_ok_response,
    build_options_response,
};
