pub mod nominatim;

pub use nominatim::NominatimClient;

use crate::error::Result;
use crate::models::Coordinates;

/// Free-text place lookup.
///
/// `Ok(None)` means the service answered but knew no such place; transport
/// and parse failures come back as errors.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Option<Coordinates>>;
}
