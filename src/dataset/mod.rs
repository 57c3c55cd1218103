//! @ai:module:intent Question datasets and their loading
//! @ai:module:layer domain
//! @ai:module:public_api QuestionItem, Dataset, DatasetInfo, DatasetLoader

pub mod loader;
pub mod question;

pub use loader::{DatasetLoader, DatasetLoaderTrait};
pub use question::{Dataset, DatasetInfo, QuestionItem};
