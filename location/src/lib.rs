//! Shared map-view model and validation for the share/view protocol.
//!
//! This crate owns the values exchanged between `server` and `cli`: the
//! [`MapView`] a sharer publishes, the [`User`] identifier it is published
//! under, and the parsers that turn untrusted JSON into a [`MapView`].
//!
//! WIRE FORMAT
//! ===========
//! Publishing sends stringified numbers (`{"latitude":"45.0"}`), the shape a
//! browser form serializer produces, sent either as JSON or as a form post.
//! Fetching returns native JSON numbers.
//! [`parse_map_view`] accepts the first shape, [`parse_map_view_response`]
//! the second. Both reject with a [`ValidationError`] and never return a
//! partial value.

mod parse;
mod user;
mod view;

pub use parse::{
    BodyEncoding, ValidationError, parse_map_view, parse_map_view_body, parse_map_view_bytes, parse_map_view_response,
};
pub use user::{ShareLink, User, UserId};
pub use view::{Location, MapView, WireLocation, WireMapView};
