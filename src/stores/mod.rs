pub mod feed;
pub mod registry;
pub mod retailers;
pub mod synthetic;
pub mod traits;

pub use feed::FeedAdapter;
pub use registry::StoreRegistry;
pub use retailers::{RetailerProfile, SyntheticRetailer};
pub use synthetic::{SyntheticMode, SyntheticPricing};
pub use traits::{RawListing, RawPrice, StoreAdapter};
