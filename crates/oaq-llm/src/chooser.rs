use log::warn;

use oaq_core::rank::{Candidate, Choice};
use oaq_core::spec::HttpMethod;

use crate::client::{BackendError, ChatBackend, OllamaClient};
use crate::config::LlmConfig;

/// What the backend's reply amounted to after parsing and validation.
/// Splitting this out of the I/O path lets tests exercise every branch
/// without a live backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The reply named a candidate present in the input list.
    Confirmed { route: String, method: HttpMethod },
    /// The reply was the explicit NONE token.
    NoMatch,
    /// The reply was empty, malformed, or named an unknown operation.
    Fallback,
}

/// Format the disambiguation prompt: the question, the numbered candidate
/// list, and the reply instruction.
pub fn format_prompt(question: &str, candidates: &[Candidate]) -> String {
    let mut prompt =
        String::from("You are given a user question and a list of candidate API endpoints.\n");
    prompt.push_str("User question:\n");
    prompt.push_str(question.trim());
    prompt.push_str("\n\nCandidates:\n");

    for (i, candidate) in candidates.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. route={} method={} summary={}\n",
            i + 1,
            candidate.route,
            candidate.method.as_upper(),
            candidate.summary.as_deref().unwrap_or_default()
        ));
    }

    prompt.push_str(
        "\nChoose the single candidate that best matches the user's intent.\n\
         Reply with only: <route> <method>\n\
         If none match, reply: NONE\n",
    );
    prompt
}

/// Parse and validate a raw reply against the candidate list.
///
/// The first whitespace token is the route, the second the method. The
/// method tolerates `method=get` forms (text after the last `=`) and junk
/// characters (everything but lowercase ASCII letters is stripped after
/// lower-casing), but must land in the fixed method set. The pair must then
/// match a candidate exactly; a reply can never introduce an operation that
/// was not offered.
pub fn parse_reply(text: &str, candidates: &[Candidate]) -> ReplyOutcome {
    let text = text.trim();
    if text.is_empty() {
        return ReplyOutcome::Fallback;
    }
    if text.to_uppercase().starts_with("NONE") {
        return ReplyOutcome::NoMatch;
    }

    let mut parts = text.split_whitespace();
    let (Some(route), Some(raw_method)) = (parts.next(), parts.next()) else {
        return ReplyOutcome::Fallback;
    };

    let lowered = raw_method.to_lowercase();
    let after_eq = lowered.rsplit('=').next().unwrap_or(&lowered);
    let cleaned: String = after_eq.chars().filter(char::is_ascii_lowercase).collect();

    let Some(method) = HttpMethod::parse(&cleaned) else {
        warn!("invalid method in backend reply: {raw_method:?}");
        return ReplyOutcome::Fallback;
    };

    for candidate in candidates {
        if candidate.route == route && candidate.method == method {
            return ReplyOutcome::Confirmed {
                route: candidate.route.clone(),
                method,
            };
        }
    }
    ReplyOutcome::Fallback
}

/// Deterministic safety net: the first maximum-score candidate in the
/// ranked order, or NoMatch when even the best score is non-positive.
pub fn fallback_choice(candidates: &[Candidate]) -> Choice {
    let mut best: Option<&Candidate> = None;
    for candidate in candidates {
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    match best {
        Some(best) if best.score > 0.0 => Choice::Operation {
            route: best.route.clone(),
            method: best.method,
        },
        _ => Choice::NoMatch,
    }
}

/// Picks one candidate for a question by asking the chat backend, with the
/// deterministic fallback absorbing every backend failure mode.
pub struct Chooser {
    backend: Box<dyn ChatBackend>,
}

impl Chooser {
    pub fn new(backend: Box<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Build a chooser over an Ollama client configured from the
    /// environment.
    pub fn from_env() -> Result<Self, BackendError> {
        let client = OllamaClient::new(&LlmConfig::from_env())?;
        Ok(Self::new(Box::new(client)))
    }

    /// Choose one candidate, or NoMatch. An empty candidate list
    /// short-circuits without any backend call. A non-NoMatch result always
    /// names a candidate from the input list.
    pub async fn choose(&self, question: &str, candidates: &[Candidate]) -> Choice {
        if candidates.is_empty() {
            return Choice::NoMatch;
        }

        let prompt = format_prompt(question, candidates);
        let reply = match self.backend.chat(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                warn!("chat backend call failed: {err}");
                String::new()
            }
        };

        match parse_reply(&reply, candidates) {
            ReplyOutcome::Confirmed { route, method } => Choice::Operation { route, method },
            ReplyOutcome::NoMatch => Choice::NoMatch,
            ReplyOutcome::Fallback => fallback_choice(candidates),
        }
    }
}
