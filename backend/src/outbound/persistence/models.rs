//! Internal Diesel row structs. Never exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, courses};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: Option<String>,
    pub language: Option<String>,
    pub price: f64,
    pub teacher_id: Uuid,
    pub teacher_name: String,
    pub teacher_email: String,
    pub status: String,
    pub rejection_feedback: Option<String>,
    pub verifier_id: Option<Uuid>,
    pub verified_at: Option<DateTime<Utc>>,
    pub revision: i32,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub level: Option<&'a str>,
    pub language: Option<&'a str>,
    pub price: f64,
    pub teacher_id: Uuid,
    pub teacher_name: &'a str,
    pub teacher_email: &'a str,
    pub status: &'a str,
    pub revision: i32,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Columns touched by a verification decision.
///
/// `None` writes `NULL` so a changeset always describes the whole status.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseDecisionUpdate<'a> {
    pub status: &'a str,
    pub rejection_feedback: Option<&'a str>,
    pub verifier_id: Option<Uuid>,
    pub verified_at: Option<DateTime<Utc>>,
    pub revision: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub display_name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}
