//! Domain types and pure logic for the aozora aggregation service.
//!
//! Everything in this crate is I/O-free: upstream wire shapes, the static
//! remap/override tables, episode-list resolution rules, and the
//! normalization step that turns heterogeneous upstream fields into the
//! stable response shapes served by `aozora-server`.

pub mod episodes;
pub mod models;
pub mod normalize;
pub mod remap;
