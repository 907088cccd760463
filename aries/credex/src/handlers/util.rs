use crate::messages::problem_report::ProblemReport;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub enum Status {
    #[default]
    Undefined,
    Success,
    Failed(ProblemReport),
    Declined(ProblemReport),
    Rejected(ProblemReport),
}

impl Status {
    pub fn code(&self) -> u32 {
        match self {
            Status::Undefined => 0,
            Status::Success => 1,
            Status::Failed(_) => 2,
            Status::Declined(_) => 3,
            Status::Rejected(_) => 4,
        }
    }

    pub fn problem_report(&self) -> Option<&ProblemReport> {
        match self {
            Status::Failed(report) | Status::Declined(report) | Status::Rejected(report) => {
                Some(report)
            }
            Status::Undefined | Status::Success => None,
        }
    }
}
