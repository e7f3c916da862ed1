pub mod owner;
pub mod profile;
pub mod property;

pub use owner::{NewOwner, Owner, OwnerStatus, OwnerUpdate};
pub use profile::{Role, UserProfile};
pub use property::{Property, PropertyMetrics, PropertyStatus};
