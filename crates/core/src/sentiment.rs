//! Keyword-based sentiment scoring for free-text session feedback.
//!
//! Comments are tokenized on whitespace and matched against fixed word lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "awesome", "fantastic", "wonderful", "perfect",
    "outstanding", "brilliant", "superb", "impressive", "helpful", "useful", "valuable",
    "informative", "professional", "clear", "engaging", "interesting", "love", "like", "enjoy",
    "appreciate", "thank", "thanks",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "poor", "disappointing", "boring", "confusing",
    "unclear", "difficult", "problems", "issues", "waste", "useless", "hate", "dislike",
    "frustrated", "annoying", "disappointed",
];

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "was", "are", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "can", "this", "that", "these", "those", "i",
    "you", "he", "she", "it", "we", "they",
];

const KEYWORDS_PER_COMMENT: usize = 5;
const COMMON_KEYWORDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Emotion {
    Excited,
    Happy,
    Impressed,
    #[default]
    Neutral,
    Concerned,
    Disappointed,
    Frustrated,
}

impl Emotion {
    /// Categories in detection priority order (earlier wins ties).
    pub const ALL: [Emotion; 7] = [
        Self::Excited,
        Self::Happy,
        Self::Impressed,
        Self::Neutral,
        Self::Concerned,
        Self::Disappointed,
        Self::Frustrated,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Excited => "excited",
            Emotion::Happy => "happy",
            Emotion::Impressed => "impressed",
            Emotion::Neutral => "neutral",
            Emotion::Concerned => "concerned",
            Emotion::Disappointed => "disappointed",
            Emotion::Frustrated => "frustrated",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Emotion::Excited => &[
                "amazing", "fantastic", "awesome", "incredible", "outstanding", "excellent",
                "brilliant", "superb", "wonderful", "thrilled", "excited", "love", "loved",
            ],
            Emotion::Happy => &[
                "good", "great", "nice", "pleased", "satisfied", "happy", "glad", "enjoyed",
                "appreciate", "positive", "thank", "thanks",
            ],
            Emotion::Impressed => &[
                "impressed", "impressive", "professional", "insightful", "valuable", "useful",
                "helpful", "informative", "learned", "educational",
            ],
            Emotion::Neutral => &[
                "okay", "fine", "average", "normal", "standard", "regular", "typical", "usual",
            ],
            Emotion::Concerned => &[
                "concerned", "worried", "confused", "unclear", "difficult", "challenging",
                "issues", "problems", "questions",
            ],
            Emotion::Disappointed => &[
                "disappointed", "bad", "poor", "terrible", "awful", "horrible", "waste",
                "boring", "dull", "useless",
            ],
            Emotion::Frustrated => &[
                "frustrated", "annoying", "annoyed", "irritated", "angry", "mad", "upset", "hate",
                "dislike",
            ],
        }
    }
}

/// Scoring of a single comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAnalysis {
    pub sentiment: Sentiment,
    pub emotion: Emotion,
    /// Positive word hits minus negative word hits.
    pub score: i32,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

/// Aggregate over all comments of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub overall: Sentiment,
    pub emotions: BTreeMap<Emotion, usize>,
    pub common_keywords: Vec<KeywordCount>,
    pub comments: Vec<(String, CommentAnalysis)>,
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect()
        })
        .collect()
}

/// Score one comment.
#[must_use]
pub fn analyze_comment(text: &str) -> CommentAnalysis {
    let words = tokenize(text);

    let mut positive = 0_i32;
    let mut negative = 0_i32;
    for word in &words {
        if POSITIVE_WORDS.contains(&word.as_str()) {
            positive += 1;
        }
        if NEGATIVE_WORDS.contains(&word.as_str()) {
            negative += 1;
        }
    }

    let mut emotion = Emotion::Neutral;
    let mut best = 0_usize;
    for candidate in Emotion::ALL {
        let matches = candidate
            .keywords()
            .iter()
            .filter(|keyword| words.iter().any(|word| word.contains(*keyword)))
            .count();
        if matches > best {
            best = matches;
            emotion = candidate;
        }
    }

    let sentiment = match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    };

    let keywords = words
        .into_iter()
        .filter(|word| word.len() > 2 && !STOP_WORDS.contains(&word.as_str()))
        .take(KEYWORDS_PER_COMMENT)
        .collect();

    CommentAnalysis {
        sentiment,
        emotion,
        score: positive - negative,
        keywords,
    }
}

/// Score a batch of comments and aggregate the results.
#[must_use]
pub fn summarize<S: AsRef<str>>(comments: &[S]) -> SentimentSummary {
    if comments.is_empty() {
        return SentimentSummary::default();
    }

    let analyses: Vec<(String, CommentAnalysis)> = comments
        .iter()
        .map(|comment| {
            let comment = comment.as_ref();
            (comment.to_owned(), analyze_comment(comment))
        })
        .collect();

    let (mut positive, mut negative, mut neutral) = (0_usize, 0_usize, 0_usize);
    let mut emotions = BTreeMap::new();
    // Insertion-ordered so equal counts keep first-seen order after the stable sort.
    let mut keyword_counts: Vec<KeywordCount> = Vec::new();

    for (_, analysis) in &analyses {
        match analysis.sentiment {
            Sentiment::Positive => positive += 1,
            Sentiment::Negative => negative += 1,
            Sentiment::Neutral => neutral += 1,
        }
        *emotions.entry(analysis.emotion).or_insert(0) += 1;
        for keyword in &analysis.keywords {
            match keyword_counts.iter_mut().find(|entry| &entry.word == keyword) {
                Some(entry) => entry.count += 1,
                None => keyword_counts.push(KeywordCount {
                    word: keyword.clone(),
                    count: 1,
                }),
            }
        }
    }

    let overall = if positive > negative && positive > neutral {
        Sentiment::Positive
    } else if negative > positive && negative > neutral {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    keyword_counts.sort_by(|a, b| b.count.cmp(&a.count));
    keyword_counts.truncate(COMMON_KEYWORDS);

    SentimentSummary {
        overall,
        emotions,
        common_keywords: keyword_counts,
        comments: analyses,
    }
}
