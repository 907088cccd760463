use crate::messages::problem_report::ProblemReport;

pub const PROBLEM_CODE_ISSUANCE_ABANDONED: &str = "issuance-abandoned";
pub const PROBLEM_CODE_REQUEST_NOT_CREATED: &str = "request-not-created";
pub const PROBLEM_CODE_CREDENTIAL_NOT_PROCESSED: &str = "credential-not-processed";

pub fn build_problem_report_msg(code: &str, comment: Option<String>, thread_id: &str) -> ProblemReport {
    ProblemReport::new(uuid::Uuid::new_v4().to_string(), thread_id, code, comment)
}
