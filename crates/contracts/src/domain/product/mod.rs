pub mod aggregate;
pub mod normalize;
pub mod patch;

pub use aggregate::{Product, ProductStatus};
pub use patch::ProductPatch;
