//! Wire types for the course endpoints.
//!
//! Request bodies keep every field optional so missing values reach domain
//! validation and come back as field-level errors instead of opaque JSON
//! extractor failures.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Course, CourseDraftInput};

/// Body of `POST /api/v1/courses`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCourseBody {
    #[schema(example = "Tajweed 101")]
    pub title: Option<String>,
    #[schema(example = "Rules of Quranic recitation for beginners")]
    pub description: Option<String>,
    #[schema(example = "quran")]
    pub category: Option<String>,
    #[schema(example = "beginner")]
    pub level: Option<String>,
    #[schema(example = "Arabic")]
    pub language: Option<String>,
    #[schema(example = 0.0)]
    pub price: Option<f64>,
}

impl From<SubmitCourseBody> for CourseDraftInput {
    fn from(body: SubmitCourseBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            category: body.category,
            level: body.level,
            language: body.language,
            price: body.price,
        }
    }
}

/// Body of `POST /api/v1/courses/{id}/verification`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationBody {
    /// `approve` or `reject`.
    #[schema(example = "reject")]
    pub action: Option<String>,
    /// Required when rejecting.
    #[schema(example = "needs citations")]
    pub feedback: Option<String>,
}

/// Query string of `GET /api/v1/verification/queue`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QueueParams {
    /// Status filter; defaults to `pending_verification`.
    #[param(example = "pending_verification")]
    pub status: Option<String>,
}

/// Course as returned by every course endpoint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub price: f64,
    pub teacher_id: String,
    pub teacher_name: String,
    pub teacher_email: String,
    #[schema(example = "pending_verification")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<String>,
    pub submitted_at: String,
    pub updated_at: String,
    pub revision: u32,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        let stamp = course.status.stamp();
        Self {
            id: course.id.to_string(),
            teacher_id: course.submitter.teacher_id.to_string(),
            status: course.status.kind().to_string(),
            rejection_feedback: course
                .status
                .rejection_feedback()
                .map(|feedback| feedback.as_ref().to_owned()),
            verifier_id: stamp.map(|stamp| stamp.verifier_id.to_string()),
            verified_at: stamp.map(|stamp| stamp.verified_at.to_rfc3339()),
            title: course.content.title,
            description: course.content.description,
            category: course.content.category,
            level: course.content.level,
            language: course.content.language,
            price: course.content.price.value(),
            teacher_name: course.submitter.teacher_name,
            teacher_email: course.submitter.teacher_email,
            submitted_at: course.submitted_at.to_rfc3339(),
            updated_at: course.updated_at.to_rfc3339(),
            revision: course.revision,
        }
    }
}
