use crate::db::Question;

/// A non-empty search term. Matching ignores case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// `None` for an absent or empty term; an empty search is not "match everything".
    pub fn parse(term: Option<String>) -> Option<SearchTerm> {
        term.filter(|t| !t.is_empty())
            .map(|t| SearchTerm(t.to_lowercase()))
    }

    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0)
    }
}

/// Questions whose text contains `term`, in the order given.
pub fn search<'a>(questions: &'a [Question], term: &SearchTerm) -> Vec<&'a Question> {
    questions
        .iter()
        .filter(|question| term.matches(&question.question))
        .collect()
}
