pub mod application;
pub mod document;
pub mod loaders;
pub mod round;
pub mod snapshot;
pub mod status;
pub mod user;

pub use application::{
    Application, ApplicationChoice, ApplicationDocument, ApplicationFilter, EducationRecord,
    FacultyDecision, Program, ProgramRef, ResearchRecord, UniversityDecision,
};
pub use document::DocumentType;
pub use loaders::{load_all_snapshots, load_snapshot_file};
pub use round::{DegreeLevel, Gender, RoundType};
pub use snapshot::{
    ApplicationSnapshot, DocumentEntry, EducationEntry, PersonalInfo, ProgramChoice,
    ResearchEntry,
};
pub use status::ApplicationStatus;
pub use user::{User, UserRole};
