//! Decode dispatch, report assembly and annotation

mod annotate;
mod builder;
mod dispatch;
mod error;
pub mod native;

pub use annotate::Annotator;
pub use builder::ReportBuilder;
pub use dispatch::Dispatcher;
pub use error::ReportError;
