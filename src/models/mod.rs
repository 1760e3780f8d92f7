pub mod festival;
pub mod forecast;
pub mod geo;
pub mod observation;
pub mod recommendation;
pub mod travel;

pub use festival::*;
pub use forecast::*;
pub use geo::*;
pub use observation::*;
pub use recommendation::*;
pub use travel::*;
