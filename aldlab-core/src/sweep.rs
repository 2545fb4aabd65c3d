//! Parallel parameter sweep.
//!
//! Runs are pure functions of (input, config), so independent configs can
//! execute concurrently — each run clones the input and owns its series.
//! That per-run ownership is the only concurrency granularity the pipeline
//! supports; stages within one run stay strictly sequential.

use rayon::prelude::*;

use crate::config::BacktestConfig;
use crate::domain::Bar;
use crate::error::PipelineError;
use crate::pipeline::{self, RunResult};

/// Run the pipeline once per config, in parallel. Output order matches
/// config order.
pub fn run_sweep(
    bars: &[Bar],
    configs: &[BacktestConfig],
) -> Vec<Result<RunResult, PipelineError>> {
    configs
        .par_iter()
        .map(|config| pipeline::run(bars.to_vec(), config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn small_config(reward_multiple: f64) -> BacktestConfig {
        BacktestConfig {
            sma_window: 3,
            atr_window: 3,
            rsi_period: 3,
            bucket_count: 20,
            reward_multiple,
            ..BacktestConfig::default()
        }
    }

    #[test]
    fn sweep_preserves_config_order() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 5) as f64).collect();
        let bars = make_bars(&closes);
        let configs = vec![small_config(1.0), small_config(2.0), small_config(3.0)];
        let results = run_sweep(&bars, &configs);
        assert_eq!(results.len(), 3);
        for (cfg, result) in configs.iter().zip(&results) {
            let result = result.as_ref().unwrap();
            assert_eq!(result.config.reward_multiple, cfg.reward_multiple);
        }
    }

    #[test]
    fn sweep_matches_sequential_runs() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + ((i * 7) % 9) as f64).collect();
        let bars = make_bars(&closes);
        let configs = vec![small_config(2.0), small_config(3.0)];
        let parallel = run_sweep(&bars, &configs);
        for (cfg, result) in configs.iter().zip(parallel) {
            let sequential = pipeline::run(bars.clone(), cfg).unwrap();
            let parallel = result.unwrap();
            assert_eq!(sequential.fingerprint, parallel.fingerprint);
            assert_eq!(sequential.trades, parallel.trades);
        }
    }

    #[test]
    fn sweep_surfaces_per_config_errors() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let bad = BacktestConfig {
            risk_fraction: 0.0,
            ..small_config(2.0)
        };
        let results = run_sweep(&bars, &[small_config(2.0), bad]);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
