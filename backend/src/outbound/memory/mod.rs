//! Process-local adapters used when no database is configured and in tests.

mod course_repository;

pub use course_repository::InMemoryCourseRepository;
