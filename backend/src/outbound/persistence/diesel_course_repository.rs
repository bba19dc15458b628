//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.
//!
//! Decisions are written with `UPDATE ... WHERE id = $1 AND revision = $2`.
//! When no row matches, the current row is re-read to tell a lost race apart
//! from a missing course.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{
    Course, CourseDraft, CourseId, CourseStatus, CourseStatusKind, Price, RejectionFeedback,
    SubmitterSnapshot, UserId, VerificationStamp,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CourseDecisionUpdate, CourseRow, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::courses;

/// Diesel-backed implementation of the `CourseRepository` port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CourseRepositoryError {
    map_pool_error(error, CourseRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_diesel_error(
        error,
        CourseRepositoryError::query,
        CourseRepositoryError::connection,
    )
}

#[expect(
    clippy::cast_possible_wrap,
    reason = "revision values are always small positive integers"
)]
fn cast_revision_for_db(revision: u32) -> i32 {
    revision as i32
}

#[expect(
    clippy::cast_sign_loss,
    reason = "revision is constrained to be positive in the database"
)]
fn cast_revision_from_db(revision: i32) -> u32 {
    revision as u32
}

fn corrupt_row(id: Uuid, what: &str) -> CourseRepositoryError {
    CourseRepositoryError::query(format!("course {id} has invalid {what}"))
}

/// Rebuild the tagged status from the flat status columns.
fn row_status(row: &CourseRow) -> Result<CourseStatus, CourseRepositoryError> {
    let kind: CourseStatusKind = row
        .status
        .parse()
        .map_err(|_| corrupt_row(row.id, "status"))?;

    let stamp = || match (row.verifier_id, row.verified_at) {
        (Some(verifier_id), Some(verified_at)) => Ok(VerificationStamp {
            verifier_id: UserId::from_uuid(verifier_id),
            verified_at,
        }),
        _ => Err(corrupt_row(row.id, "verification stamp")),
    };

    Ok(match kind {
        CourseStatusKind::Draft => CourseStatus::Draft,
        CourseStatusKind::PendingVerification => CourseStatus::PendingVerification,
        CourseStatusKind::Approved => CourseStatus::Approved(stamp()?),
        CourseStatusKind::Rejected => {
            let feedback = row
                .rejection_feedback
                .as_deref()
                .ok_or_else(|| corrupt_row(row.id, "rejection feedback"))
                .and_then(|text| {
                    RejectionFeedback::new(text)
                        .map_err(|_| corrupt_row(row.id, "rejection feedback"))
                })?;
            CourseStatus::Rejected {
                stamp: stamp()?,
                feedback,
            }
        }
    })
}

fn row_to_course(row: CourseRow) -> Result<Course, CourseRepositoryError> {
    let status = row_status(&row)?;
    let price = Price::new(row.price).map_err(|_| corrupt_row(row.id, "price"))?;

    Ok(Course {
        id: CourseId::from_uuid(row.id),
        content: CourseDraft {
            title: row.title,
            description: row.description,
            category: row.category,
            level: row.level,
            language: row.language,
            price,
        },
        submitter: SubmitterSnapshot {
            teacher_id: UserId::from_uuid(row.teacher_id),
            teacher_name: row.teacher_name,
            teacher_email: row.teacher_email,
        },
        status,
        revision: cast_revision_from_db(row.revision),
        submitted_at: row.submitted_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_courses(rows: Vec<CourseRow>) -> Result<Vec<Course>, CourseRepositoryError> {
    rows.into_iter().map(row_to_course).collect()
}

fn decision_update(course: &Course) -> CourseDecisionUpdate<'_> {
    let stamp = course.status.stamp();
    CourseDecisionUpdate {
        status: course.status.kind().as_str(),
        rejection_feedback: course
            .status
            .rejection_feedback()
            .map(RejectionFeedback::as_str),
        verifier_id: stamp.map(|s| *s.verifier_id.as_uuid()),
        verified_at: stamp.map(|s| s.verified_at),
        revision: cast_revision_for_db(course.revision),
        updated_at: course.updated_at,
    }
}

/// Classify an update that matched no rows.
async fn handle_decision_update_failure<C>(
    conn: &mut C,
    course_id: Uuid,
    expected_revision: u32,
) -> CourseRepositoryError
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let current = courses::table
        .filter(courses::id.eq(course_id))
        .select(courses::revision)
        .first::<i32>(conn)
        .await
        .optional()
        .map_err(diesel_error);

    match current {
        Ok(Some(actual)) => CourseRepositoryError::revision_mismatch(
            expected_revision,
            cast_revision_from_db(actual),
        ),
        Ok(None) => CourseRepositoryError::not_found(course_id.to_string()),
        Err(err) => err,
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewCourseRow {
            id: *course.id.as_uuid(),
            title: &course.content.title,
            description: &course.content.description,
            category: &course.content.category,
            level: course.content.level.as_deref(),
            language: course.content.language.as_deref(),
            price: course.content.price.value(),
            teacher_id: *course.submitter.teacher_id.as_uuid(),
            teacher_name: &course.submitter.teacher_name,
            teacher_email: &course.submitter.teacher_email,
            status: course.status.kind().as_str(),
            revision: cast_revision_for_db(course.revision),
            submitted_at: course.submitted_at,
            updated_at: course.updated_at,
        };

        diesel::insert_into(courses::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<CourseRow> = courses::table
            .filter(courses::id.eq(id.as_uuid()))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_course).transpose()
    }

    async fn save_decision(
        &self,
        course: &Course,
        expected_revision: u32,
    ) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let course_id = *course.id.as_uuid();

        let updated = diesel::update(
            courses::table.filter(
                courses::id
                    .eq(course_id)
                    .and(courses::revision.eq(cast_revision_for_db(expected_revision))),
            ),
        )
        .set(&decision_update(course))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        if updated == 0 {
            debug!(%course_id, expected_revision, "conditional course update matched no rows");
            return Err(handle_decision_update_failure(&mut conn, course_id, expected_revision).await);
        }
        Ok(())
    }

    async fn list_by_status(
        &self,
        status: CourseStatusKind,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<CourseRow> = courses::table
            .filter(courses::status.eq(status.as_str()))
            .order((courses::submitted_at.desc(), courses::id.desc()))
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_courses(rows)
    }

    async fn list_by_submitter(
        &self,
        teacher_id: &UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<CourseRow> = courses::table
            .filter(courses::teacher_id.eq(teacher_id.as_uuid()))
            .order((courses::submitted_at.desc(), courses::id.desc()))
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_courses(rows)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; database round trips live in
    //! `tests/diesel_course_repository.rs`.
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn pending_row() -> CourseRow {
        let at = Utc
            .with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        CourseRow {
            id: Uuid::new_v4(),
            title: "Tajwid Foundations".to_owned(),
            description: "Rules of recitation".to_owned(),
            category: "quran".to_owned(),
            level: Some("beginner".to_owned()),
            language: None,
            price: 25.0,
            teacher_id: Uuid::new_v4(),
            teacher_name: "Ustadh Yusuf".to_owned(),
            teacher_email: "teacher@deenify.test".to_owned(),
            status: "pending_verification".to_owned(),
            rejection_feedback: None,
            verifier_id: None,
            verified_at: None,
            revision: 1,
            submitted_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    fn pending_row_converts(pending_row: CourseRow) {
        let course = row_to_course(pending_row).expect("row converts");
        assert_eq!(course.status, CourseStatus::PendingVerification);
        assert_eq!(course.revision, 1);
        assert_eq!(course.content.level.as_deref(), Some("beginner"));
    }

    #[rstest]
    fn rejected_row_restores_feedback(mut pending_row: CourseRow) {
        pending_row.status = "rejected".to_owned();
        pending_row.rejection_feedback = Some("Add a syllabus".to_owned());
        pending_row.verifier_id = Some(Uuid::new_v4());
        pending_row.verified_at = Some(pending_row.submitted_at);
        pending_row.revision = 2;

        let course = row_to_course(pending_row).expect("row converts");
        assert_eq!(course.status.kind(), CourseStatusKind::Rejected);
        assert_eq!(
            course.status.rejection_feedback().map(RejectionFeedback::as_str),
            Some("Add a syllabus")
        );
    }

    #[rstest]
    #[case("approved", None, None)]
    #[case("rejected", Some(Uuid::nil()), None)]
    #[case("archived", None, None)]
    fn inconsistent_rows_are_query_errors(
        mut pending_row: CourseRow,
        #[case] status: &str,
        #[case] verifier_id: Option<Uuid>,
        #[case] feedback: Option<&str>,
    ) {
        pending_row.status = status.to_owned();
        pending_row.verifier_id = verifier_id;
        pending_row.verified_at = verifier_id.map(|_| pending_row.submitted_at);
        pending_row.rejection_feedback = feedback.map(str::to_owned);

        let err = row_to_course(pending_row).expect_err("row must be rejected");
        assert!(matches!(err, CourseRepositoryError::Query { .. }));
    }

    #[rstest]
    fn decision_update_clears_feedback_on_approval(pending_row: CourseRow) {
        let course = row_to_course(pending_row).expect("row converts");
        let verifier = UserId::random();
        let approved = course
            .apply_decision(
                crate::domain::VerificationDecision::Approve,
                &verifier,
                course.submitted_at,
            )
            .expect("pending course accepts a decision");

        let update = decision_update(&approved);
        assert_eq!(update.status, "approved");
        assert_eq!(update.rejection_feedback, None);
        assert_eq!(update.verifier_id, Some(*verifier.as_uuid()));
        assert_eq!(update.revision, 2);
    }
}
