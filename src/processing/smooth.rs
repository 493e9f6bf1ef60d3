use crate::image::{Image, PixelMath};

impl<T: PixelMath> Image<T> {
    /// Run `steps` iterations of 4-neighbour Laplacian smoothing.
    ///
    /// Each valid pixel becomes `(n * p + sum) / (2 * n)` where `sum` adds up
    /// its `n` valid in-bounds neighbours. Every step reads a snapshot of the
    /// previous one. Invalid pixels stay untouched, as do valid pixels without
    /// any valid neighbour.
    pub fn smooth(&mut self, steps: u32) {
        let width = self.width() as usize;
        let height = self.height() as usize;
        let invalid = self.invalid_value();
        let mut snapshot = Image::<T>::empty();

        for _ in 0..steps {
            snapshot.clone_from(self);
            let src = snapshot.as_slice();
            for (i, px) in self.as_mut_slice().iter_mut().enumerate() {
                let center = src[i];
                if center == invalid {
                    continue;
                }
                let (x, y) = (i % width, i / width);
                let neighbours = [
                    x.checked_sub(1).map(|nx| (nx, y)),
                    (x + 1 < width).then_some((x + 1, y)),
                    (y + 1 < height).then_some((x, y + 1)),
                    y.checked_sub(1).map(|ny| (x, ny)),
                ];

                let mut valid = 0u32;
                let mut sum = T::accum_zero();
                for (nx, ny) in neighbours.into_iter().flatten() {
                    let n = src[ny * width + nx];
                    if n != invalid {
                        valid += 1;
                        sum = sum + n.widen();
                    }
                }
                if valid > 0 {
                    let n = valid as f32;
                    *px = T::narrow((center.widen() * n + sum) / (2.0 * n));
                }
            }
        }
    }
}
