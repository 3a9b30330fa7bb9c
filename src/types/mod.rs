//! Immutable input entities. Constructed once by an ingester
//! and held for the lifetime of a solve; nothing here is mutated by the
//! solver.

mod coupling;
mod pin;
mod room;
mod school_class;
mod school_data;
mod solver_config;
mod subject;
mod teacher;
mod time_grid;

pub use coupling::{Coupling, CouplingGroup, CouplingType};
pub use pin::PinnedLesson;
pub use room::{Room, UNLIMITED_ROOM_CAPACITY, room_capacity};
pub use school_class::SchoolClass;
pub use school_data::SchoolData;
pub use solver_config::SolverConfig;
pub use subject::{Subject, SubjectCategory};
pub use teacher::Teacher;
pub use time_grid::{DoubleBlock, LessonSlot, Pause, TimeGrid};
