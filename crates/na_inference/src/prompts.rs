//! Prompt templates sent to the completion model.
//!
//! Every template embeds the article text cut to a fixed number of
//! characters. The cut is a plain character count: no sentence or token
//! awareness, only a guarantee that a multi-byte character is never split.

/// Article text budget for stored articles.
pub const ARTICLE_MAX_CHARS: usize = 7000;

/// Article text budget for pages fetched by URL.
pub const PAGE_MAX_CHARS: usize = 5000;

const JSON_ONLY_RULE: &str = "\
The output must be ONLY the JSON object below. Do not add any sentence, \
explanation or code fence before or after it.";

const DESCRIBED_KEYWORDS_SKELETON: &str = r#"{
    "summary": "",
    "keywords": [
        {"keyword": "", "description": ""}
    ],
    "quizzes": [
        {
            "question": "",
            "options": ["", "", "", ""],
            "answer": "",
            "explanation": ""
        }
    ]
}"#;

const PLAIN_KEYWORDS_SKELETON: &str = r#"{
    "summary": "",
    "keywords": ["", ""],
    "quizzes": [
        {
            "question": "",
            "options": ["", "", "", ""],
            "answer": "",
            "explanation": ""
        }
    ]
}"#;

/// Shape of the `keywords` section requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordStyle {
    /// `{"keyword": ..., "description": ...}` pairs
    Described,
    /// bare keyword strings
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Summary, keywords and quizzes as a single JSON object
    Json(KeywordStyle),
    /// Sectioned free text: summary, keywords, interview questions, quiz
    Narrative,
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    max_chars: usize,
}

impl PromptBuilder {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn build(&self, template: Template, article_text: &str) -> String {
        let text = truncate_chars(article_text, self.max_chars);
        match template {
            Template::Json(style) => json_prompt(style, text),
            Template::Narrative => narrative_prompt(text),
        }
    }
}

/// Returns the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn json_prompt(style: KeywordStyle, text: &str) -> String {
    let (keywords, skeleton) = match style {
        KeywordStyle::Described => (
            "keywords: extract up to 10 core technical concepts or current technology trends from the \
             article that a job seeker must understand, each with a reliable and precise description.",
            DESCRIBED_KEYWORDS_SKELETON,
        ),
        KeywordStyle::Plain => (
            "keywords: list up to 10 core technical terms from the article as plain strings.",
            PLAIN_KEYWORDS_SKELETON,
        ),
    };

    format!(
        "Carry out the tasks below based on the following news article. \
         The audience is job seekers preparing for IT positions.\n\n\
         summary: summarize everything the article reports, focusing on the technology trends, \
         market shifts and company strategies that matter most to IT job seekers.\n\n\
         {keywords}\n\n\
         quizzes: write 5 multiple-choice questions that check understanding of the article. \
         Each quiz has a question, exactly 4 options, 1 correct answer, and an explanation \
         covering why the answer is right and the other options are wrong.\n\n\
         {JSON_ONLY_RULE}\n\n\
         Format:\n{skeleton}\n\n\
         News article:\n\"\"\"{text}\"\"\"\n"
    )
}

fn narrative_prompt(text: &str) -> String {
    format!(
        "You are a career mentor helping IT job seekers learn from the news. \
         Read the article below and write a response with these sections:\n\n\
         1. Summary: a concise summary of the article.\n\
         2. Keywords: the key technical terms with a short explanation of each.\n\
         3. Interview questions: 3 questions an interviewer could ask about this topic. \
         After each question add an \"Interview point:\" line describing what a strong answer covers.\n\
         4. Quiz: 3 multiple-choice questions with 4 options each, followed by the answer \
         and a one-line explanation.\n\n\
         News article:\n\"\"\"{text}\"\"\"\n"
    )
}
