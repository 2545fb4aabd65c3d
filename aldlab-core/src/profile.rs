//! Volume profile: per-price-bucket volume aggregation and HVN/LVN flags.
//!
//! The observed price range [min low, max high] is split into equal-width
//! buckets; each bar's mid-price contributes its full volume to exactly one
//! bucket (half-open `[edge, next)` intervals, top edge closed, out-of-range
//! values clipped into the end buckets), so per-bucket volume always sums to
//! total input volume. The `node_count` occupied buckets with the most
//! volume form the HVN set, the `node_count` with the least the LVN set;
//! per-bar flags are bucket-index set membership, never price equality.
//!
//! A degenerate range (every price identical) collapses to a single bucket
//! instead of failing; with one bucket the HVN and LVN sets coincide and
//! carry no distinction.

use std::collections::BTreeSet;

use crate::domain::Bar;

/// Aggregated volume profile over one series.
#[derive(Debug, Clone)]
pub struct VolumeProfile {
    /// Strictly increasing bucket edges. `edges.len() == 1` marks the
    /// degenerate single-bucket case.
    pub edges: Vec<f64>,
    /// Total traded volume per bucket.
    pub volume: Vec<f64>,
    /// Bars assigned per bucket (occupancy).
    pub count: Vec<usize>,
    /// Bucket indices of the high-volume nodes.
    pub hvn: BTreeSet<usize>,
    /// Bucket indices of the low-volume nodes.
    pub lvn: BTreeSet<usize>,
}

impl VolumeProfile {
    /// Build the profile from the series and flag each bar's mid-price
    /// bucket for HVN/LVN membership. Returns the profile plus the per-bar
    /// flag columns.
    pub fn build(
        bars: &[Bar],
        bucket_count: usize,
        node_count: usize,
    ) -> (VolumeProfile, Vec<bool>, Vec<bool>) {
        if bars.is_empty() {
            let profile = VolumeProfile {
                edges: Vec::new(),
                volume: Vec::new(),
                count: Vec::new(),
                hvn: BTreeSet::new(),
                lvn: BTreeSet::new(),
            };
            return (profile, Vec::new(), Vec::new());
        }

        let lo = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let hi = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let edges = bucket_edges(lo, hi, bucket_count);
        let n_buckets = edges.len().saturating_sub(1).max(1);

        let mut volume = vec![0.0; n_buckets];
        let mut count = vec![0usize; n_buckets];
        let mut assignment = Vec::with_capacity(bars.len());
        for bar in bars {
            let idx = bucket_index(&edges, bar.mid());
            volume[idx] += bar.volume;
            count[idx] += 1;
            assignment.push(idx);
        }

        let (hvn, lvn) = select_nodes(&volume, &count, node_count);

        let hvn_flags = assignment.iter().map(|i| hvn.contains(i)).collect();
        let lvn_flags = assignment.iter().map(|i| lvn.contains(i)).collect();
        let profile = VolumeProfile {
            edges,
            volume,
            count,
            hvn,
            lvn,
        };
        (profile, hvn_flags, lvn_flags)
    }

    /// Representative price of a bucket: its left edge, the price the
    /// profile reports per level.
    pub fn bucket_price(&self, idx: usize) -> f64 {
        self.edges[idx.min(self.edges.len() - 1)]
    }

    pub fn bucket_len(&self) -> usize {
        self.volume.len()
    }

    /// Total volume across all buckets; equals the input's total volume.
    pub fn total_volume(&self) -> f64 {
        self.volume.iter().sum()
    }
}

/// Equal-width edges over [lo, hi], deduplicated to strict monotonicity.
/// A flat range yields a single edge (one collapsed bucket).
fn bucket_edges(lo: f64, hi: f64, bucket_count: usize) -> Vec<f64> {
    debug_assert!(bucket_count >= 2);
    debug_assert!(hi >= lo);
    let mut edges = Vec::with_capacity(bucket_count);
    let step = (hi - lo) / (bucket_count - 1) as f64;
    for k in 0..bucket_count {
        let edge = if k + 1 == bucket_count {
            hi
        } else {
            lo + step * k as f64
        };
        // Dedupe: tiny or flat ranges produce repeated edges.
        if edges.last().map_or(true, |&last| edge > last) {
            edges.push(edge);
        }
    }
    edges
}

/// Assign a price to a bucket: half-open intervals, top edge closed,
/// out-of-range prices clipped into the end buckets.
fn bucket_index(edges: &[f64], price: f64) -> usize {
    let n_buckets = edges.len().saturating_sub(1).max(1);
    // partition_point: number of edges <= price.
    let below = edges.partition_point(|e| *e <= price);
    below.saturating_sub(1).min(n_buckets - 1)
}

/// Top/bottom `node_count` occupied buckets by volume. Ties broken by
/// bucket index (stable sort over the ascending index order).
fn select_nodes(
    volume: &[f64],
    count: &[usize],
    node_count: usize,
) -> (BTreeSet<usize>, BTreeSet<usize>) {
    let occupied: Vec<usize> = (0..volume.len()).filter(|&i| count[i] > 0).collect();

    let mut by_desc = occupied.clone();
    by_desc.sort_by(|&a, &b| volume[b].partial_cmp(&volume[a]).unwrap());
    let hvn = by_desc.into_iter().take(node_count).collect();

    let mut by_asc = occupied;
    by_asc.sort_by(|&a, &b| volume[a].partial_cmp(&volume[b]).unwrap());
    let lvn = by_asc.into_iter().take(node_count).collect();

    (hvn, lvn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn volume_is_conserved() {
        let bars = make_bars(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0]);
        let total: f64 = bars.iter().map(|b| b.volume).sum();
        let (profile, _, _) = VolumeProfile::build(&bars, 50, 5);
        assert!((profile.total_volume() - total).abs() < 1e-9);
        assert_eq!(profile.count.iter().sum::<usize>(), bars.len());
    }

    #[test]
    fn degenerate_flat_range_collapses_to_one_bucket() {
        let mut bars = make_bars(&[100.0; 3]);
        // Make the bars literally flat so min low == max high.
        for bar in &mut bars {
            bar.open = 100.0;
            bar.high = 100.0;
            bar.low = 100.0;
        }
        let (profile, hvn, lvn) = VolumeProfile::build(&bars, 1000, 5);
        assert_eq!(profile.bucket_len(), 1);
        assert_eq!(profile.edges, vec![100.0]);
        // One bucket: HVN and LVN coincide, no distinction possible.
        assert_eq!(profile.hvn, profile.lvn);
        assert!(hvn.iter().all(|&f| f));
        assert!(lvn.iter().all(|&f| f));
        assert!((profile.total_volume() - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn boundary_prices_are_not_dropped() {
        let bars = make_bars(&[100.0, 200.0]);
        let (profile, _, _) = VolumeProfile::build(&bars, 10, 2);
        // Mid-prices sit strictly inside, but the extreme edges themselves
        // must also land in a bucket.
        let lo = profile.edges[0];
        let hi = *profile.edges.last().unwrap();
        assert_eq!(bucket_index(&profile.edges, lo), 0);
        assert_eq!(bucket_index(&profile.edges, hi), profile.bucket_len() - 1);
        // Clipping for out-of-range values.
        assert_eq!(bucket_index(&profile.edges, lo - 10.0), 0);
        assert_eq!(bucket_index(&profile.edges, hi + 10.0), profile.bucket_len() - 1);
    }

    #[test]
    fn hvn_picks_heaviest_bucket() {
        // Cluster most volume at one price.
        let mut closes = vec![100.0; 8];
        closes.extend_from_slice(&[150.0, 200.0]);
        let mut bars = make_bars(&closes);
        for bar in &mut bars {
            // Pin each bar's range around its close so mid == close.
            bar.high = bar.close + 1.0;
            bar.low = bar.close - 1.0;
            bar.open = bar.close;
        }
        let (profile, hvn_flags, lvn_flags) = VolumeProfile::build(&bars, 100, 1);
        assert_eq!(profile.hvn.len(), 1);
        assert_eq!(profile.lvn.len(), 1);
        // The 100.0 cluster carries 8x volume: those bars are HVN, not LVN.
        for i in 0..8 {
            assert!(hvn_flags[i], "bar {i} should be in the HVN bucket");
            assert!(!lvn_flags[i]);
        }
    }

    #[test]
    fn node_ties_resolve_by_bucket_index() {
        // Two buckets with identical volume: the lower index wins the tie.
        let mut bars = make_bars(&[100.0, 200.0]);
        for bar in &mut bars {
            bar.high = bar.close + 1.0;
            bar.low = bar.close - 1.0;
        }
        let (profile, _, _) = VolumeProfile::build(&bars, 10, 1);
        let first_occupied = (0..profile.bucket_len())
            .find(|&i| profile.count[i] > 0)
            .unwrap();
        assert!(profile.hvn.contains(&first_occupied));
        assert!(profile.lvn.contains(&first_occupied));
    }

    #[test]
    fn empty_series_produces_empty_profile() {
        let (profile, hvn, lvn) = VolumeProfile::build(&[], 1000, 5);
        assert_eq!(profile.bucket_len(), 0);
        assert!(hvn.is_empty());
        assert!(lvn.is_empty());
    }
}
