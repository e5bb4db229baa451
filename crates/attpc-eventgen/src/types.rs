use attpc_common::array1d_getter_impl;
use ndarray::Array1;

/// Sparse per-pad time-domain signal: parallel arrays of pad id and
/// amplitude vector, rather than a nested map, for the hot-path sample;
/// map-style lookup is still offered via [`PadSignal::amplitude`] for
/// API-boundary convenience.
#[derive(Debug, Clone, Default)]
pub struct PadSignal {
    pub(crate) pad_ids: Vec<u16>,
    pub(crate) amplitudes: Vec<Vec<f64>>,
}

impl PadSignal {
    /// The pads that received any charge this event, in ascending order.
    pub fn pad_ids(&self) -> &[u16] {
        &self.pad_ids
    }

    /// The per-time-bucket amplitude series for `pad_id`, or `None` if that
    /// pad received no charge.
    pub fn amplitude(&self, pad_id: u16) -> Option<&[f64]> {
        self.pad_ids
            .binary_search(&pad_id)
            .ok()
            .map(|i| self.amplitudes[i].as_slice())
    }

    /// Iterates `(pad_id, amplitude_series)` pairs in ascending pad id order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &[f64])> {
        self.pad_ids
            .iter()
            .copied()
            .zip(self.amplitudes.iter().map(|v| v.as_slice()))
    }

    /// Number of distinct pads that received charge.
    pub fn num_pads_hit(&self) -> usize {
        self.pad_ids.len()
    }
}

/// One row per pad touched: its centroid, the time bucket of peak
/// amplitude, and the integrated (peak) amplitude.
#[derive(Debug, Clone, Default)]
pub struct PeaksTable {
    pad_id: Vec<u16>,
    x: Vec<f64>,
    y: Vec<f64>,
    time_bucket: Vec<usize>,
    amplitude: Vec<f64>,
}

impl PeaksTable {
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self {
            pad_id: Vec::with_capacity(cap),
            x: Vec::with_capacity(cap),
            y: Vec::with_capacity(cap),
            time_bucket: Vec::with_capacity(cap),
            amplitude: Vec::with_capacity(cap),
        }
    }

    pub(crate) fn push(&mut self, pad_id: u16, x: f64, y: f64, time_bucket: usize, amplitude: f64) {
        self.pad_id.push(pad_id);
        self.x.push(x);
        self.y.push(y);
        self.time_bucket.push(time_bucket);
        self.amplitude.push(amplitude);
    }

    /// Number of rows (one per pad touched).
    pub fn rows(&self) -> usize {
        self.pad_id.len()
    }

    /// The pad id of each row.
    pub fn pad_id(&self) -> &[u16] {
        &self.pad_id
    }

    /// The time bucket of peak amplitude for each row.
    pub fn time_bucket(&self) -> &[usize] {
        &self.time_bucket
    }

    array1d_getter_impl!(x, x);
    array1d_getter_impl!(y, y);
    array1d_getter_impl!(amplitude, amplitude);
}

/// Per-pad integrated amplitude for one event, indexed by pad id as a
/// fixed-length vector rather than a map.
#[derive(Debug, Clone)]
pub struct HitPattern(pub(crate) Array1<f64>);

impl HitPattern {
    /// The integrated amplitude of `pad_id`.
    pub fn get(&self, pad_id: u16) -> f64 {
        self.0[pad_id as usize]
    }

    /// The full length-`num_pads` amplitude vector.
    pub fn as_array(&self) -> &Array1<f64> {
        &self.0
    }

    /// Consumes `self`, returning the underlying vector.
    pub fn into_array(self) -> Array1<f64> {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pad_signal_lookup_round_trips() {
        let sig = PadSignal {
            pad_ids: vec![3, 7, 20],
            amplitudes: vec![vec![1.0], vec![2.0], vec![3.0]],
        };
        assert_eq!(sig.amplitude(7), Some(&[2.0][..]));
        assert_eq!(sig.amplitude(8), None);
        assert_eq!(sig.num_pads_hit(), 3);
    }

    #[test]
    fn peaks_table_rows_track_pushes() {
        let mut table = PeaksTable::with_capacity(2);
        table.push(1, 0.1, 0.2, 5, 10.0);
        table.push(2, 0.3, 0.4, 6, 20.0);
        assert_eq!(table.rows(), 2);
        assert_eq!(table.pad_id(), &[1, 2]);
        assert_eq!(table.time_bucket(), &[5, 6]);
    }
}
