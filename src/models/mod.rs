pub mod catalog;
pub mod course;
pub mod document;
pub mod loaders;
pub mod question;

pub use catalog::{Catalog, CatalogEntry};
pub use course::{Certification, CertificationMetadata, LearningPath, Module, Unit};
pub use document::Document;
pub use loaders::{load_document, save_document};
pub use question::{CertificationQuestions, LearningPathQuestions, Question, Questions};
