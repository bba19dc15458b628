//! `CourseRepository` kept in a mutex-guarded map.
//!
//! Data is lost on restart. The revision check runs under the same lock as
//! the write, giving the same first-writer-wins outcome as the PostgreSQL
//! adapter.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseId, CourseStatusKind, UserId};

/// In-memory implementation of the `CourseRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryCourseRepository {
    courses: Mutex<HashMap<CourseId, Course>>,
}

impl InMemoryCourseRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<CourseId, Course>>, CourseRepositoryError> {
        self.courses
            .lock()
            .map_err(|_| CourseRepositoryError::query("course store lock poisoned"))
    }

    fn collect_newest_first(
        &self,
        keep: impl Fn(&Course) -> bool,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut selected: Vec<Course> = self.lock()?.values().filter(|c| keep(c)).cloned().collect();
        selected.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(selected)
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut courses = self.lock()?;
        if courses.contains_key(&course.id) {
            return Err(CourseRepositoryError::query("duplicate record"));
        }
        courses.insert(course.id, course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    async fn save_decision(
        &self,
        course: &Course,
        expected_revision: u32,
    ) -> Result<(), CourseRepositoryError> {
        let mut courses = self.lock()?;
        let stored = courses
            .get_mut(&course.id)
            .ok_or_else(|| CourseRepositoryError::not_found(course.id.to_string()))?;
        if stored.revision != expected_revision {
            return Err(CourseRepositoryError::revision_mismatch(
                expected_revision,
                stored.revision,
            ));
        }
        *stored = course.clone();
        Ok(())
    }

    async fn list_by_status(
        &self,
        status: CourseStatusKind,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        self.collect_newest_first(|course| course.status.kind() == status)
    }

    async fn list_by_submitter(
        &self,
        teacher_id: &UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        self.collect_newest_first(|course| &course.submitter.teacher_id == teacher_id)
    }
}
