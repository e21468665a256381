use crate::models::candidate::Candidate;

pub const NO_CANDIDATES: &str = "No candidates yet. Add your first candidate!";
pub const NO_MATCHES: &str = "No candidates match your search.";

/// Case-insensitive substring match on name, job title or status.
pub fn matches_query(candidate: &Candidate, query: &str) -> bool {
    let query = query.to_lowercase();
    [
        candidate.name.as_str(),
        candidate.job_title.as_str(),
        candidate.status.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&query))
}

pub fn filter_candidates<'a>(candidates: &'a [Candidate], query: &str) -> Vec<&'a Candidate> {
    candidates
        .iter()
        .filter(|candidate| matches_query(candidate, query))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    /// Nothing stored at all.
    Empty,
    /// Records exist but the query hides all of them.
    NoMatches,
    Showing(usize),
}

impl ListView {
    pub fn of(total: usize, visible: usize) -> Self {
        match (total, visible) {
            (0, _) => ListView::Empty,
            (_, 0) => ListView::NoMatches,
            (_, n) => ListView::Showing(n),
        }
    }

    pub fn heading(&self) -> String {
        match self {
            ListView::Empty => NO_CANDIDATES.to_string(),
            ListView::NoMatches => NO_MATCHES.to_string(),
            ListView::Showing(n) => format!("Candidates ({})", n),
        }
    }
}
