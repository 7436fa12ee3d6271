use std::sync::Arc;

use event_core::model::{Rating, Schedule, SessionFeedback};
use event_core::sentiment::{Sentiment, SentimentSummary, summarize};
use storage::repository::FeedbackRepository;
use tracing::{info, warn};

use crate::error::AnalyticsError;

/// Proof that the analytics password was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsAccess {
    _private: (),
}

/// Aggregated feedback for one agenda entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub session_name: String,
    pub speaker: String,
    pub total_responses: usize,
    /// Mean rating rounded to two decimals; `0.0` without responses.
    pub average_rating: f64,
    /// Counts for ratings 1 through 5.
    pub distribution: [usize; 5],
    /// Non-blank comments in submission order.
    pub comments: Vec<String>,
    pub sentiment: SentimentSummary,
}

impl SessionStats {
    fn from_feedback(name: &str, speaker: &str, entries: &[&SessionFeedback]) -> Self {
        let mut distribution = [0_usize; 5];
        let mut sum = 0_u32;
        for entry in entries {
            let value = entry.rating.value();
            sum += u32::from(value);
            distribution[usize::from(value - Rating::MIN)] += 1;
        }

        let average_rating = if entries.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let mean = f64::from(sum) / entries.len() as f64;
            (mean * 100.0).round() / 100.0
        };

        let comments: Vec<String> = entries
            .iter()
            .filter(|entry| !entry.comment.trim().is_empty())
            .map(|entry| entry.comment.clone())
            .collect();
        let sentiment = summarize(&comments);

        Self {
            session_name: name.to_owned(),
            speaker: speaker.to_owned(),
            total_responses: entries.len(),
            average_rating,
            distribution,
            comments,
            sentiment,
        }
    }
}

/// Conference-wide summary shown above the per-session cards.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsOverview {
    pub sessions_with_feedback: usize,
    pub total_responses: usize,
    /// Response-weighted mean of the session averages.
    pub overall_rating: f64,
    /// Most common per-session sentiment among sessions with comments.
    pub overall_sentiment: Sentiment,
}

impl AnalyticsOverview {
    #[must_use]
    pub fn from_stats(stats: &[SessionStats]) -> Self {
        let total_responses: usize = stats.iter().map(|s| s.total_responses).sum();
        #[allow(clippy::cast_precision_loss)]
        let overall_rating = if total_responses == 0 {
            0.0
        } else {
            stats
                .iter()
                .map(|s| s.average_rating * s.total_responses as f64)
                .sum::<f64>()
                / total_responses as f64
        };

        let mut counts = [
            (Sentiment::Positive, 0_usize),
            (Sentiment::Negative, 0),
            (Sentiment::Neutral, 0),
        ];
        for stat in stats.iter().filter(|s| !s.comments.is_empty()) {
            if let Some(slot) = counts.iter_mut().find(|(s, _)| *s == stat.sentiment.overall) {
                slot.1 += 1;
            }
        }
        // Stable sort keeps positive ahead of negative ahead of neutral on ties.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        let overall_sentiment = if counts[0].1 == 0 {
            Sentiment::Neutral
        } else {
            counts[0].0
        };

        Self {
            sessions_with_feedback: stats.iter().filter(|s| s.total_responses > 0).count(),
            total_responses,
            overall_rating,
            overall_sentiment,
        }
    }
}

/// Password-gated feedback analytics.
#[derive(Clone)]
pub struct AnalyticsService {
    schedule: Arc<Schedule>,
    feedback: Arc<dyn FeedbackRepository>,
    admin_password: String,
}

impl AnalyticsService {
    #[must_use]
    pub fn new(
        schedule: Arc<Schedule>,
        feedback: Arc<dyn FeedbackRepository>,
        admin_password: impl Into<String>,
    ) -> Self {
        Self {
            schedule,
            feedback,
            admin_password: admin_password.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidPassword` unless `password` matches exactly.
    pub fn unlock(&self, password: &str) -> Result<AnalyticsAccess, AnalyticsError> {
        if password == self.admin_password {
            info!("analytics unlocked");
            Ok(AnalyticsAccess { _private: () })
        } else {
            warn!("analytics unlock rejected");
            Err(AnalyticsError::InvalidPassword)
        }
    }

    /// One entry per agenda item, in agenda order.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::Storage` if feedback cannot be loaded.
    pub async fn session_stats(
        &self,
        _access: &AnalyticsAccess,
    ) -> Result<Vec<SessionStats>, AnalyticsError> {
        let feedback = self.feedback.list_feedback().await?;

        Ok(self
            .schedule
            .sessions()
            .iter()
            .map(|session| {
                let name = session.name().trim();
                let entries: Vec<&SessionFeedback> = feedback
                    .iter()
                    .filter(|f| f.session_name.trim() == name)
                    .collect();
                SessionStats::from_feedback(session.name(), session.speaker(), &entries)
            })
            .collect())
    }
}
