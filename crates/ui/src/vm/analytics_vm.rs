use event_core::sentiment::{Emotion, Sentiment};
use services::{AnalyticsOverview, SessionStats};

use crate::vm::time_fmt::format_percent;

const KEYWORDS_SHOWN: usize = 8;

#[must_use]
pub fn sentiment_label(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "😊 Positive",
        Sentiment::Negative => "😞 Negative",
        Sentiment::Neutral => "😐 Neutral",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverviewVm {
    pub sessions_with_feedback: usize,
    pub total_responses: usize,
    pub overall_rating: String,
    pub overall_sentiment: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionRowVm {
    pub rating: u8,
    pub count: usize,
    pub width: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentVm {
    pub text: String,
    pub sentiment: &'static str,
    pub emotion: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionStatsCardVm {
    pub session_name: String,
    pub speaker: String,
    pub total_responses: usize,
    pub average_label: String,
    /// Highest rating first.
    pub distribution: Vec<DistributionRowVm>,
    pub overall_sentiment: &'static str,
    pub emotions: Vec<(&'static str, usize)>,
    pub keywords: Vec<String>,
    pub comments: Vec<CommentVm>,
}

impl From<&SessionStats> for SessionStatsCardVm {
    fn from(stats: &SessionStats) -> Self {
        let distribution = (1..=5_u8)
            .rev()
            .map(|rating| {
                let count = stats.distribution[usize::from(rating - 1)];
                #[allow(clippy::cast_precision_loss)]
                let pct = if stats.total_responses == 0 {
                    0.0
                } else {
                    count as f64 / stats.total_responses as f64 * 100.0
                };
                DistributionRowVm {
                    rating,
                    count,
                    width: format_percent(pct),
                }
            })
            .collect();

        let emotions = Emotion::ALL
            .iter()
            .filter_map(|emotion| {
                stats
                    .sentiment
                    .emotions
                    .get(emotion)
                    .map(|count| (emotion.as_str(), *count))
            })
            .collect();

        let keywords = stats
            .sentiment
            .common_keywords
            .iter()
            .take(KEYWORDS_SHOWN)
            .map(|k| format!("{} ({})", k.word, k.count))
            .collect();

        let comments = stats
            .sentiment
            .comments
            .iter()
            .map(|(text, analysis)| CommentVm {
                text: text.clone(),
                sentiment: analysis.sentiment.as_str(),
                emotion: analysis.emotion.as_str(),
            })
            .collect();

        Self {
            session_name: stats.session_name.clone(),
            speaker: stats.speaker.clone(),
            total_responses: stats.total_responses,
            average_label: format!("{}/5.0", stats.average_rating),
            distribution,
            overall_sentiment: sentiment_label(stats.sentiment.overall),
            emotions,
            keywords,
            comments,
        }
    }
}

/// Everything the unlocked analytics page renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsVm {
    pub overview: OverviewVm,
    /// Only sessions that received feedback.
    pub cards: Vec<SessionStatsCardVm>,
}

impl AnalyticsVm {
    #[must_use]
    pub fn from_stats(stats: &[SessionStats]) -> Self {
        let overview = AnalyticsOverview::from_stats(stats);
        Self {
            overview: OverviewVm {
                sessions_with_feedback: overview.sessions_with_feedback,
                total_responses: overview.total_responses,
                overall_rating: format!("{:.1}", overview.overall_rating),
                overall_sentiment: sentiment_label(overview.overall_sentiment),
            },
            cards: stats
                .iter()
                .filter(|s| s.total_responses > 0)
                .map(SessionStatsCardVm::from)
                .collect(),
        }
    }
}
