pub mod candidate_api;

pub use candidate_api::{
    ApiError, CandidateApi, CandidateSubmission, HttpCandidateApi, ResumeFile,
};
