pub mod dataset;
pub mod user;

pub use dataset::{Dataset, DatasetInput, DatasetPatch, ValidDataset, ValidationErrors};
pub use user::{OwnerRef, User, UserProfile};
