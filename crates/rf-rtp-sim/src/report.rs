//! Report generation for simulation runs

use std::fs;
use std::path::Path;

use rf_slot_math::{GameMode, RtpStats, TrialAccumulator, WinBand};
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::runner::WorkerResult;

/// Per-worker figures, kept to show spread between streams
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerSummary {
    pub worker: usize,
    pub trials: u64,
    pub rtp: f64,
    pub rtp_base: f64,
    pub rtp_free: f64,
    pub capped: u64,
    pub elapsed_ms: u64,
}

/// Result of a full simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    pub mode: GameMode,
    /// Master seed, enough to reproduce the run
    pub seed: u64,
    pub trials_per_worker: u64,
    pub total_trials: u64,
    pub elapsed_ms: u64,

    /// Pooled statistics over all workers
    pub stats: RtpStats,

    /// Standard error of the pooled RTP
    pub rtp_std_error: f64,

    /// Reduced sums behind `stats`
    pub accumulator: TrialAccumulator,

    pub workers: Vec<WorkerSummary>,
}

impl SimReport {
    /// Reduce worker results into a report
    pub fn from_workers(
        config: &SimConfig,
        seed: u64,
        mut results: Vec<WorkerResult>,
        elapsed_ms: u64,
    ) -> Self {
        results.sort_by_key(|r| r.worker);

        let mut accumulator = TrialAccumulator::default();
        let mut workers = Vec::with_capacity(results.len());
        for result in &results {
            accumulator.merge(&result.accumulator);
            let stats = result.accumulator.stats();
            workers.push(WorkerSummary {
                worker: result.worker,
                trials: result.accumulator.trials,
                rtp: stats.rtp,
                rtp_base: stats.rtp_base,
                rtp_free: stats.rtp_free,
                capped: stats.capped,
                elapsed_ms: result.elapsed_ms,
            });
        }

        let stats = accumulator.stats();
        let rtp_std_error = if accumulator.trials > 0 {
            stats.std_dev / (accumulator.trials as f64).sqrt()
        } else {
            0.0
        };

        Self {
            mode: config.mode,
            seed,
            trials_per_worker: config.trials_per_worker,
            total_trials: accumulator.trials,
            elapsed_ms,
            stats,
            rtp_std_error,
            accumulator,
            workers,
        }
    }

    /// 95% confidence interval of the RTP
    pub fn rtp_confidence_95(&self) -> (f64, f64) {
        let half = 1.96 * self.rtp_std_error;
        (self.stats.rtp - half, self.stats.rtp + half)
    }

    /// Trials per second over the whole run
    pub fn throughput(&self) -> f64 {
        if self.elapsed_ms == 0 {
            return 0.0;
        }
        self.total_trials as f64 * 1000.0 / self.elapsed_ms as f64
    }

    /// Generate text report: one line per headline statistic, then detail
    pub fn to_text(&self) -> String {
        let s = &self.stats;
        let mut output = String::new();

        output.push_str(&format!("rtp = {:.6}\n", s.rtp));
        output.push_str(&format!("rtp bg = {:.6}\n", s.rtp_base));
        output.push_str(&format!("rtp fg = {:.6}\n", s.rtp_free));
        output.push_str(&format!("stdev = {:.6}\n", s.std_dev));
        output.push_str(&format!("plus = {:.6}\n", s.plus));
        output.push_str(&format!("ncap = {}\n", s.capped));

        output.push('\n');
        output.push_str(&format!(
            "Run: mode {}, seed {}, {} workers x {} trials = {} trials in {} ms\n",
            self.mode,
            self.seed,
            self.workers.len(),
            self.trials_per_worker,
            self.total_trials,
            self.elapsed_ms
        ));
        let (lo, hi) = self.rtp_confidence_95();
        output.push_str(&format!("  RTP 95% CI: [{lo:.6}, {hi:.6}]\n"));
        output.push_str(&format!("  Hit rate: {:.4}\n", s.hit_rate));
        output.push_str(&format!(
            "  Free games: 1 in {:.1}, {:.2} spins avg, {:.2}x avg win, {} retriggers\n",
            s.trigger_frequency(),
            s.avg_free_spins,
            s.avg_free_win,
            s.retriggers
        ));
        output.push_str(&format!("  Max win: {:.1}x\n", s.max_win));

        output.push_str("  Final level:");
        for (level, share) in s.final_levels.iter().enumerate() {
            output.push_str(&format!(" L{level} {:.2}%", share * 100.0));
        }
        output.push('\n');

        output.push_str("  Win bands:\n");
        for band in WinBand::ALL {
            output.push_str(&format!(
                "    {:>11}: {:.6}\n",
                band.label(),
                s.win_bands[band as usize]
            ));
        }

        if self.workers.len() > 1 {
            output.push_str("  Workers:\n");
            for w in &self.workers {
                output.push_str(&format!(
                    "    #{:<3} rtp {:.6} (bg {:.6}, fg {:.6}) cap {} in {} ms\n",
                    w.worker, w.rtp, w.rtp_base, w.rtp_free, w.capped, w.elapsed_ms
                ));
            }
        }

        output
    }

    /// Generate JSON report
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".into())
    }

    /// Generate markdown report
    pub fn to_markdown(&self) -> String {
        let s = &self.stats;
        let mut output = String::new();

        output.push_str(&format!("# RTP Simulation ({})\n\n", self.mode));
        output.push_str(&format!(
            "**Seed:** {} | **Trials:** {} | **Duration:** {} ms\n\n",
            self.seed, self.total_trials, self.elapsed_ms
        ));

        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!("| RTP | {:.6} |\n", s.rtp));
        output.push_str(&format!("| RTP base | {:.6} |\n", s.rtp_base));
        output.push_str(&format!("| RTP free | {:.6} |\n", s.rtp_free));
        output.push_str(&format!("| Std dev | {:.6} |\n", s.std_dev));
        output.push_str(&format!("| Capped | {} |\n", s.capped));
        output.push_str(&format!("| Hit rate | {:.4} |\n", s.hit_rate));
        output.push_str(&format!("| Trigger | 1 in {:.1} |\n", s.trigger_frequency()));
        output.push_str(&format!("| Max win | {:.1}x |\n", s.max_win));
        output.push('\n');

        output
    }

    /// Save report to file
    pub fn save<P: AsRef<Path>>(&self, path: P, format: ReportFormat) -> std::io::Result<()> {
        let content = match format {
            ReportFormat::Text => self.to_text(),
            ReportFormat::Json => self.to_json(),
            ReportFormat::Markdown => self.to_markdown(),
        };
        fs::write(path, content)
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    /// Pick a format from a file extension, defaulting to text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ReportFormat::Json,
            Some("md") => ReportFormat::Markdown,
            _ => ReportFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rf_slot_math::TrialOutcome;

    fn worker(index: usize, wins: &[u64]) -> WorkerResult {
        let mut accumulator = TrialAccumulator::new(10);
        for &win in wins {
            accumulator.record(&TrialOutcome {
                base_win: win,
                total_win: win,
                ..Default::default()
            });
        }
        WorkerResult {
            worker: index,
            accumulator,
            elapsed_ms: 5,
        }
    }

    fn sample_report() -> SimReport {
        let config = SimConfig::quick().with_trials(4).with_workers(2);
        let results = vec![worker(1, &[0, 10, 0, 30]), worker(0, &[20, 0, 0, 0])];
        SimReport::from_workers(&config, 99, results, 10)
    }

    #[test]
    fn test_pooled_stats() {
        let report = sample_report();
        assert_eq!(report.total_trials, 8);
        assert_relative_eq!(report.stats.rtp, 60.0 / 80.0);
        assert_eq!(report.workers[0].worker, 0);
        assert_relative_eq!(report.workers[0].rtp, 0.5);
        assert_relative_eq!(report.workers[1].rtp, 1.0);
    }

    #[test]
    fn test_confidence_interval_brackets_rtp() {
        let report = sample_report();
        let (lo, hi) = report.rtp_confidence_95();
        assert!(lo < report.stats.rtp && report.stats.rtp < hi);
        assert_relative_eq!(hi - lo, 2.0 * 1.96 * report.rtp_std_error);
    }

    #[test]
    fn test_text_headline_lines() {
        let text = sample_report().to_text();
        let headline: Vec<&str> = text.lines().take(6).collect();
        assert_eq!(headline[0], "rtp = 0.750000");
        assert!(headline[1].starts_with("rtp bg = "));
        assert!(headline[2].starts_with("rtp fg = "));
        assert!(headline[3].starts_with("stdev = "));
        assert_eq!(headline[4], "plus = 0.000000");
        assert_eq!(headline[5], "ncap = 0");
        assert!(text.contains("Workers:"));
    }

    #[test]
    fn test_json_report() {
        let report = sample_report();
        let parsed: SimReport = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(parsed.seed, 99);
        assert_eq!(parsed.accumulator, report.accumulator);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ReportFormat::from_path(Path::new("a.json")), ReportFormat::Json);
        assert_eq!(ReportFormat::from_path(Path::new("a.md")), ReportFormat::Markdown);
        assert_eq!(ReportFormat::from_path(Path::new("a.txt")), ReportFormat::Text);
    }

    #[test]
    fn test_save_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        sample_report()
            .save(&path, ReportFormat::from_path(&path))
            .unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# RTP Simulation (normal)"));
    }
}
