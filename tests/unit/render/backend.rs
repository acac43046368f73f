use super::*;

fn frame(data: Vec<u8>, width: u32, height: u32) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data,
        premultiplied: true,
    }
}

#[test]
fn pixel_reads_row_major() {
    let f = frame((0u8..16).collect(), 2, 2);
    assert_eq!(f.pixel(0, 0), Some([0, 1, 2, 3]));
    assert_eq!(f.pixel(1, 0), Some([4, 5, 6, 7]));
    assert_eq!(f.pixel(0, 1), Some([8, 9, 10, 11]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 2), None);
}

#[test]
fn unpremultiply_restores_straight_colors() {
    let mut f = frame(vec![128, 64, 0, 128, 10, 20, 30, 255, 0, 0, 0, 0], 3, 1);
    f.unpremultiply();
    assert!(!f.premultiplied);
    assert_eq!(f.pixel(0, 0), Some([255, 128, 0, 128]));
    assert_eq!(f.pixel(1, 0), Some([10, 20, 30, 255]));
    assert_eq!(f.pixel(2, 0), Some([0, 0, 0, 0]));
}

#[test]
fn unpremultiply_is_idempotent() {
    let mut f = frame(vec![100, 50, 25, 200], 1, 1);
    f.unpremultiply();
    let once = f.clone();
    f.unpremultiply();
    assert_eq!(f, once);
}
