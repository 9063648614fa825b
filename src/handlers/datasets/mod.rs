pub mod collection;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::get as datasets_get;
pub use collection::post as datasets_post;

pub use record::delete as dataset_delete;
pub use record::get as dataset_get;
pub use record::put as dataset_put;
