//! Row-streaming area reduction.
//!
//! Rows are fed one at a time and summed into a single band of accumulators,
//! so only one output row of sums and the reduced pixels are ever held.

/// Averages `factor x factor` blocks of interleaved 8-bit samples.
///
/// Source columns and rows past the last whole output pixel are dropped, except
/// when an axis is shorter than `factor`, in which case the whole axis folds
/// into a single output pixel.
pub(crate) struct BoxReducer {
    channels: usize,
    factor: u32,
    out_height: u32,
    column_counts: Vec<u32>,
    sums: Vec<u64>,
    band: u32,
    band_rows: u32,
    rows_seen: u32,
    pixels: Vec<u8>,
}

impl BoxReducer {
    pub(crate) fn new(
        width: u32,
        channels: usize,
        factor: u32,
        out_width: u32,
        out_height: u32,
    ) -> Self {
        let factor = factor.max(1);
        let mut column_counts = vec![0u32; out_width as usize];
        for x in 0..width {
            if let Some(count) = column_counts.get_mut((x / factor) as usize) {
                *count += 1;
            }
        }

        Self {
            channels,
            factor,
            out_height,
            column_counts,
            sums: vec![0; out_width as usize * channels],
            band: 0,
            band_rows: 0,
            rows_seen: 0,
            pixels: Vec::with_capacity(out_width as usize * out_height as usize * channels),
        }
    }

    /// Add the next source row, `width * channels` samples long.
    pub(crate) fn push_row(&mut self, row: &[u8]) {
        let band = self.rows_seen / self.factor;
        self.rows_seen += 1;
        if band >= self.out_height {
            return;
        }
        if band != self.band {
            self.flush();
            self.band = band;
        }

        let out_width = self.column_counts.len();
        for (x, pixel) in row.chunks_exact(self.channels).enumerate() {
            let column = x / self.factor as usize;
            if column >= out_width {
                break;
            }
            let sums = &mut self.sums[column * self.channels..][..self.channels];
            for (sum, &sample) in sums.iter_mut().zip(pixel) {
                *sum += u64::from(sample);
            }
        }
        self.band_rows += 1;
    }

    /// Emit the pending band and return the reduced samples.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.flush();
        self.pixels
    }

    fn flush(&mut self) {
        if self.band_rows == 0 {
            return;
        }

        let channels = self.channels;
        for (column, &count) in self.column_counts.iter().enumerate() {
            let area = (u64::from(count) * u64::from(self.band_rows)).max(1);
            for sum in &mut self.sums[column * channels..(column + 1) * channels] {
                self.pixels.push(((*sum + area / 2) / area) as u8);
                *sum = 0;
            }
        }
        self.band_rows = 0;
    }
}
