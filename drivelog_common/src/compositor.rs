use image::{imageops, RgbImage};

use crate::resize::resize_to_width;

/// Stacks `top` above `bottom`, both scaled to the narrower of the two widths.
///
/// Heights scale with the widths. An image already at the common width is copied
/// unchanged.
pub fn stack_vertical(top: &RgbImage, bottom: &RgbImage) -> anyhow::Result<RgbImage> {
    let width = top.width().min(bottom.width());
    let top = resize_to_width(top, width)?;
    let bottom = resize_to_width(bottom, width)?;

    let mut combined = RgbImage::new(width, top.height() + bottom.height());
    imageops::replace(&mut combined, &*top, 0, 0);
    imageops::replace(&mut combined, &*bottom, 0, top.height() as i64);
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use image::{GenericImageView, Rgb};

    use super::*;
    use crate::test_utils::solid;

    #[test]
    fn test_same_width_is_a_plain_stack() {
        let mut top = solid(4, 2, 10);
        top.put_pixel(3, 1, Rgb([1, 2, 3]));
        let bottom = solid(4, 3, 20);
        let combined = stack_vertical(&top, &bottom).unwrap();

        assert_eq!(combined.dimensions(), (4, 5));
        assert_eq!(combined.view(0, 0, 4, 2).to_image(), top);
        assert_eq!(combined.view(0, 2, 4, 3).to_image(), bottom);
    }

    #[test]
    fn test_wider_image_is_scaled_down() {
        let top = solid(300, 100, 10);
        let bottom = solid(200, 50, 20);
        let combined = stack_vertical(&top, &bottom).unwrap();

        // 100 * 200 / 300 truncates to 66
        assert_eq!(combined.dimensions(), (200, 66 + 50));
        assert_eq!(combined.get_pixel(0, 65), &Rgb([10, 10, 10]));
        assert_eq!(combined.get_pixel(0, 66), &Rgb([20, 20, 20]));
    }

    #[test]
    fn test_narrower_top_scales_bottom() {
        let top = solid(100, 40, 10);
        let bottom = solid(400, 400, 20);
        let combined = stack_vertical(&top, &bottom).unwrap();
        assert_eq!(combined.dimensions(), (100, 140));
    }
}
