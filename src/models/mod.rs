pub mod place;

pub use place::{PlaceResult, PlaceResults};
