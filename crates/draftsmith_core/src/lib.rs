pub mod domain;
pub mod export;
pub mod oracle;
pub mod ports;

pub use domain::{
    Feedback, Project, ProjectDraft, Refinement, Section, SectionStatus, User, UserCredentials,
};
pub use export::{export_project, DocFormat, ExportError};
pub use oracle::ContentOracle;
pub use ports::{ContentGeneration, PortError, PortResult, ProjectStore, TextCompletion};
