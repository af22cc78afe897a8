pub mod article;
pub mod extraction;
pub mod loading;

pub use article::ArticleRef;
pub use extraction::{ExtractionResult, Provider};
pub use loading::{LoadingState, Stage};
