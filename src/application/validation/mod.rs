mod body;
pub mod listing;
pub mod numeric;
pub mod query;
pub mod violations;

pub use listing::{CreateListingInput, UpdateListingInput};
pub use numeric::NumericInput;
pub use query::{ListingQueryInput, QueryDefaults};
pub use violations::{FieldViolation, ValidationFailure};
