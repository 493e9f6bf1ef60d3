use crate::image::{Image, ImageViewMut, PixelMath};

/// Sum of the block members that differ from `invalid`, divided by their count.
fn average_valid<T: PixelMath>(block: [T; 4], invalid: T) -> T {
    let mut valid = 0u32;
    let mut sum = T::accum_zero();
    for px in block.into_iter().filter(|&px| px != invalid) {
        valid += 1;
        sum = sum + px.widen();
    }
    if valid == 0 {
        invalid
    } else {
        T::narrow(sum / valid as f32)
    }
}

fn average_all<T: PixelMath>(block: [T; 4]) -> T {
    let sum = block
        .into_iter()
        .fold(T::accum_zero(), |acc, px| acc + px.widen());
    T::narrow(sum / 4.0)
}

impl<T: PixelMath> Image<T> {
    /// Next mip level: half width and height (integer division), each output
    /// pixel averaging its 2×2 source block. The result keeps the sentinel.
    pub fn mip_map(&self, ignore_invalid: bool) -> Image<T> {
        let invalid = self.invalid_value();
        let mut out = Image::<T>::new(self.width() / 2, self.height() / 2).with_invalid(invalid);
        let src_w = self.width() as usize;
        let src = self.as_slice();
        for (y, dst_row) in out.rows_mut().enumerate() {
            let top = &src[2 * y * src_w..(2 * y + 1) * src_w];
            let bottom = &src[(2 * y + 1) * src_w..(2 * y + 2) * src_w];
            for (x, dst_px) in dst_row.iter_mut().enumerate() {
                let block = [top[2 * x], top[2 * x + 1], bottom[2 * x], bottom[2 * x + 1]];
                *dst_px = if ignore_invalid {
                    average_valid(block, invalid)
                } else {
                    average_all(block)
                };
            }
        }
        out
    }
}
