//! Sequential staged pipeline: extract, clean, score, summarize, assess,
//! rank, finalize. Stage state is tracked per run and streamed to an
//! optional progress callback as owned snapshots.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use url::Url;

use crate::analysis::keywords::KeywordExtractor;
use crate::analysis::lexicon::Lexicon;
use crate::analysis::quality;
use crate::analysis::sentiment::SentimentScorer;
use crate::analysis::stats;
use crate::analysis::types::{
    DataQualityMetrics, KeywordStat, SentimentResult, StatisticalMetrics,
};
use crate::error::{RaterError, RaterResult};
use crate::extract::{ContentExtractor, ExtractedContent};

/// Stage names in execution order. Part of the report surface.
pub const STAGE_NAMES: [&str; 7] = [
    "Extract: fetch content",
    "Transform: clean text",
    "Transform: sentiment analysis",
    "Transform: statistical analysis",
    "Load: quality assessment",
    "Load: keyword ranking",
    "Complete: finalize report",
];

/// Lifecycle of one stage. Created Pending, moved to Running, then exactly
/// one of Completed or Failed; never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// One stage's progress record.
#[derive(Debug, Clone, Serialize)]
pub struct Stage {
    pub name: &'static str,
    pub status: StageStatus,
    pub progress: u8,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub records_processed: usize,
    pub error_message: Option<String>,
}

impl Stage {
    fn pending(name: &'static str) -> Self {
        Self {
            name,
            status: StageStatus::Pending,
            progress: 0,
            started_at: None,
            finished_at: None,
            records_processed: 0,
            error_message: None,
        }
    }
}

/// Everything one pipeline run produces.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub source_url: String,
    pub domain: String,
    pub content: ExtractedContent,
    pub sentiment: Vec<SentimentResult>,
    pub statistics: StatisticalMetrics,
    pub keywords: Vec<KeywordStat>,
    pub quality: DataQualityMetrics,
    pub stages: Vec<Stage>,
    pub completed_at: DateTime<Utc>,
}

/// Invoked with a snapshot of the full stage list after every transition.
pub type ProgressCallback = Box<dyn Fn(Vec<Stage>) + Send + Sync>;

/// Tunables for one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Review texts at or under this many characters are dropped by the
    /// cleaning stage.
    pub min_review_len: usize,
    /// Keywords kept in the final ranking.
    pub top_keywords: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_review_len: 10,
            top_keywords: KeywordExtractor::DEFAULT_TOP_N,
        }
    }
}

/// Number of records a stage's output stands for: collection length for
/// collections, 1 for everything else.
trait StageRecords {
    fn record_count(&self) -> usize {
        1
    }
}

impl<T> StageRecords for Vec<T> {
    fn record_count(&self) -> usize {
        self.len()
    }
}

impl StageRecords for ExtractedContent {}
impl StageRecords for StatisticalMetrics {}
impl StageRecords for DataQualityMetrics {}
impl StageRecords for String {}

/// Owns the stage list, the progress callback, and the cancellation token,
/// separate from the pipeline's components so stage bookkeeping can be
/// mutated while a stage future borrows those components.
struct StageTracker {
    stages: Vec<Stage>,
    on_progress: Option<ProgressCallback>,
    cancel: CancellationToken,
}

impl StageTracker {
    fn new() -> Self {
        Self {
            stages: STAGE_NAMES.iter().map(|&name| Stage::pending(name)).collect(),
            on_progress: None,
            cancel: CancellationToken::new(),
        }
    }

    fn notify(&self) {
        if let Some(callback) = &self.on_progress {
            callback(self.stages.clone());
        }
    }

    /// Runs one stage's unit of work with full lifecycle bookkeeping. The
    /// work future is raced against the cancellation token, so a hung fetch
    /// aborts along with everything else.
    async fn run_stage<T, F>(&mut self, index: usize, task: F) -> RaterResult<T>
    where
        T: StageRecords,
        F: Future<Output = RaterResult<T>>,
    {
        let name = self.stages[index].name;

        self.stages[index].status = StageStatus::Running;
        self.stages[index].started_at = Some(Utc::now());
        self.notify();
        info!(stage = name, "Stage started");

        let cancel = self.cancel.clone();
        let outcome = if cancel.is_cancelled() {
            Err(RaterError::Cancelled)
        } else {
            tokio::select! {
                _ = cancel.cancelled() => Err(RaterError::Cancelled),
                result = task => result,
            }
        };

        match outcome {
            Ok(output) => {
                let stage = &mut self.stages[index];
                stage.status = StageStatus::Completed;
                stage.progress = 100;
                stage.finished_at = Some(Utc::now());
                stage.records_processed = output.record_count();
                self.notify();
                info!(
                    stage = name,
                    records = output.record_count(),
                    "Stage completed"
                );
                Ok(output)
            }
            Err(e) => {
                let stage = &mut self.stages[index];
                stage.status = StageStatus::Failed;
                stage.error_message = Some(e.to_string());
                self.notify();
                error!(stage = name, error = %e, "Stage failed, aborting run");

                if matches!(e, RaterError::Cancelled) {
                    Err(e)
                } else {
                    Err(e.in_stage(name))
                }
            }
        }
    }
}

/// Sequential ETL runner over one URL. Components are injected at
/// construction; [`Pipeline::execute`] consumes the pipeline, so a run can
/// never be re-entered.
pub struct Pipeline<E> {
    extractor: E,
    scorer: SentimentScorer,
    keywords: KeywordExtractor,
    tracker: StageTracker,
    config: PipelineConfig,
}

impl<E: ContentExtractor> Pipeline<E> {
    pub fn new(extractor: E, lexicon: Arc<Lexicon>, config: PipelineConfig) -> Self {
        Self {
            extractor,
            scorer: SentimentScorer::new(Arc::clone(&lexicon)),
            keywords: KeywordExtractor::new(lexicon),
            tracker: StageTracker::new(),
            config,
        }
    }

    /// Registers the progress callback. Each invocation receives an owned
    /// snapshot of every stage, never a live reference.
    pub fn on_progress(mut self, callback: impl Fn(Vec<Stage>) + Send + Sync + 'static) -> Self {
        self.tracker.on_progress = Some(Box::new(callback));
        self
    }

    /// Installs a token that aborts the run when cancelled. The running
    /// stage is marked failed and the run returns [`RaterError::Cancelled`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.tracker.cancel = token;
        self
    }

    /// Runs every stage in order and assembles the final result. One stage
    /// failure aborts the whole run; there is no retry and no partial
    /// result.
    pub async fn execute(self, url: &str) -> RaterResult<AnalysisResult> {
        let Self {
            extractor,
            scorer,
            keywords,
            mut tracker,
            config,
        } = self;

        info!(source = url, "Pipeline run started");

        let content = tracker.run_stage(0, extractor.extract(url)).await?;

        let cleaned = tracker
            .run_stage(1, async {
                let kept: Vec<String> = content
                    .reviews
                    .iter()
                    .map(|r| r.text.clone())
                    .filter(|t| t.chars().count() > config.min_review_len)
                    .collect();
                Ok(kept)
            })
            .await?;

        let sentiment = tracker
            .run_stage(2, async { Ok(scorer.score_batch(&cleaned)) })
            .await?;

        let statistics = tracker
            .run_stage(3, async {
                let polarities: Vec<f64> = sentiment.iter().map(|r| r.polarity).collect();
                stats::summarize(&polarities)
            })
            .await?;

        let quality = tracker
            .run_stage(4, async { quality::assess(&sentiment) })
            .await?;

        let keywords = tracker
            .run_stage(5, async { Ok(keywords.extract(&cleaned, config.top_keywords)) })
            .await?;

        let domain = tracker
            .run_stage(6, async {
                let parsed = Url::parse(url)?;
                Ok(parsed.host_str().map(str::to_string).unwrap_or_default())
            })
            .await?;

        info!(source = url, domain = %domain, "Pipeline run finished");

        Ok(AnalysisResult {
            source_url: url.to_string(),
            domain,
            content,
            sentiment,
            statistics,
            keywords,
            quality,
            stages: tracker.stages,
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_list_order() {
        let tracker = StageTracker::new();

        assert_eq!(tracker.stages.len(), 7);
        assert_eq!(tracker.stages[0].name, "Extract: fetch content");
        assert_eq!(tracker.stages[6].name, "Complete: finalize report");
        assert!(tracker
            .stages
            .iter()
            .all(|s| s.status == StageStatus::Pending && s.progress == 0));
    }

    #[test]
    fn test_stage_status_serializes_lowercase() {
        let json = serde_json::to_string(&StageStatus::Running).unwrap();
        assert_eq!(json, "\"running\"");
    }

    #[test]
    fn test_record_counts() {
        assert_eq!(vec![1, 2, 3].record_count(), 3);
        assert_eq!(Vec::<String>::new().record_count(), 0);
        assert_eq!("domain".to_string().record_count(), 1);
    }

    #[tokio::test]
    async fn test_run_stage_completes_with_timestamps() {
        let mut tracker = StageTracker::new();

        let out: Vec<u8> = tracker
            .run_stage(0, async { Ok(vec![7u8, 8, 9]) })
            .await
            .unwrap();

        assert_eq!(out.len(), 3);
        let stage = &tracker.stages[0];
        assert_eq!(stage.status, StageStatus::Completed);
        assert_eq!(stage.progress, 100);
        assert_eq!(stage.records_processed, 3);
        assert!(stage.started_at.is_some());
        assert!(stage.finished_at.is_some());
        assert!(stage.started_at <= stage.finished_at);
    }

    #[tokio::test]
    async fn test_run_stage_failure_is_wrapped_with_stage_name() {
        let mut tracker = StageTracker::new();

        let result: RaterResult<String> = tracker
            .run_stage(3, async { Err(RaterError::EmptySample("no values to summarize")) })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.stage(), Some("Transform: statistical analysis"));

        let stage = &tracker.stages[3];
        assert_eq!(stage.status, StageStatus::Failed);
        assert!(stage.error_message.as_ref().unwrap().contains("no values"));
        assert!(stage.finished_at.is_none());
    }

    #[tokio::test]
    async fn test_cancelled_token_fails_stage_without_running_task() {
        let mut tracker = StageTracker::new();
        tracker.cancel.cancel();

        let result: RaterResult<String> = tracker
            .run_stage(0, async {
                panic!("task must not run after cancellation");
            })
            .await;

        assert!(matches!(result, Err(RaterError::Cancelled)));
        let stage = &tracker.stages[0];
        assert_eq!(stage.status, StageStatus::Failed);
        assert_eq!(
            stage.error_message.as_deref(),
            Some("Pipeline cancelled")
        );
    }
}
