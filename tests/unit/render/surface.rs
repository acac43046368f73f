use super::*;

fn px(s: &Surface, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * s.canvas().width + x) * 4) as usize;
    let b = s.frame_bytes();
    [b[i], b[i + 1], b[i + 2], b[i + 3]]
}

fn surface(w: u32, h: u32) -> Surface {
    Surface::new(Canvas {
        width: w,
        height: h,
    })
}

#[test]
fn new_surface_is_transparent() {
    let s = surface(8, 4);
    assert_eq!(s.frame_bytes().len(), 8 * 4 * 4);
    assert!(s.frame_bytes().iter().all(|&b| b == 0));
}

#[test]
fn out_of_range_canvas_is_clamped() {
    let s = Surface::new(Canvas {
        width: 70_000,
        height: 0,
    });
    assert_eq!(
        s.canvas(),
        Canvas {
            width: Canvas::MAX_EDGE,
            height: 1,
        }
    );
    assert_eq!(s.frame_bytes().len(), Canvas::MAX_EDGE as usize * 4);
}

#[test]
fn fill_rect_covers_interior() {
    let mut s = surface(16, 16);
    s.draw_layer(BlendMode::Normal, 1.0, |p| {
        p.fill_rect(Rect::new(0.0, 0.0, 16.0, 16.0), Rgba8::rgb(255, 0, 0));
    })
    .unwrap();
    assert_eq!(px(&s, 0, 0), [255, 0, 0, 255]);
    assert_eq!(px(&s, 15, 15), [255, 0, 0, 255]);
}

#[test]
fn layer_opacity_scales_alpha() {
    let mut s = surface(4, 4);
    s.draw_layer(BlendMode::Normal, 0.5, |p| {
        p.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8::rgb(255, 255, 255));
    })
    .unwrap();
    let a = px(&s, 1, 1)[3];
    assert!((126..=129).contains(&a), "alpha {a}");
}

#[test]
fn circle_fills_center_not_corners() {
    let mut s = surface(32, 32);
    s.draw_layer(BlendMode::Normal, 1.0, |p| {
        p.fill_circle(Point::new(16.0, 16.0), 8.0, Rgba8::rgb(0, 255, 0));
    })
    .unwrap();
    assert_eq!(px(&s, 16, 16), [0, 255, 0, 255]);
    assert_eq!(px(&s, 0, 0), [0, 0, 0, 0]);
    assert_eq!(px(&s, 31, 31), [0, 0, 0, 0]);
}

#[test]
fn zero_radius_circle_draws_nothing() {
    let mut s = surface(8, 8);
    s.draw_layer(BlendMode::Normal, 1.0, |p| {
        p.fill_circle(Point::new(4.0, 4.0), 0.0, Rgba8::rgb(255, 255, 255));
        p.fill_circle(Point::new(4.0, 4.0), f64::NAN, Rgba8::rgb(255, 255, 255));
    })
    .unwrap();
    assert!(s.frame_bytes().iter().all(|&b| b == 0));
}

#[test]
fn stroke_rect_leaves_hole() {
    let mut s = surface(40, 40);
    s.draw_layer(BlendMode::Normal, 1.0, |p| {
        p.stroke_rect(Rect::new(4.0, 4.0, 36.0, 36.0), 8.0, Rgba8::rgb(0, 0, 255));
    })
    .unwrap();
    assert_eq!(px(&s, 1, 20), [0, 0, 255, 255]);
    assert_eq!(px(&s, 20, 38), [0, 0, 255, 255]);
    assert_eq!(px(&s, 20, 20), [0, 0, 0, 0]);
}

#[test]
fn thick_stroke_fills_everything() {
    let mut s = surface(10, 10);
    s.draw_layer(BlendMode::Normal, 1.0, |p| {
        p.stroke_rect(Rect::new(5.0, 5.0, 5.0, 5.0), 20.0, Rgba8::rgb(9, 9, 9));
    })
    .unwrap();
    assert_eq!(px(&s, 5, 5), [9, 9, 9, 255]);
    assert_eq!(px(&s, 0, 9), [9, 9, 9, 255]);
}

#[test]
fn shade_layer_receives_pixel_centers() {
    let mut s = surface(40, 20);
    s.shade_layer(BlendMode::Normal, 1.0, |x, y| {
        assert!(x.fract() == 0.5 && y.fract() == 0.5);
        [x as u8, y as u8, 0, 255]
    })
    .unwrap();
    assert_eq!(px(&s, 0, 0), [0, 0, 0, 255]);
    assert_eq!(px(&s, 39, 19), [39, 19, 0, 255]);
    assert_eq!(px(&s, 7, 17), [7, 17, 0, 255]);
}

#[test]
fn layers_stack_with_blend_modes() {
    let mut s = surface(4, 4);
    s.shade_layer(BlendMode::Normal, 1.0, |_, _| [100, 100, 100, 255])
        .unwrap();
    s.shade_layer(BlendMode::Multiply, 1.0, |_, _| [0, 0, 0, 255])
        .unwrap();
    assert_eq!(px(&s, 2, 2), [0, 0, 0, 255]);

    s.clear();
    assert!(s.frame_bytes().iter().all(|&b| b == 0));
}

#[test]
fn scratch_layer_is_reset_between_draws() {
    let mut s = surface(8, 8);
    s.draw_layer(BlendMode::Normal, 1.0, |p| {
        p.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba8::rgb(255, 0, 0));
    })
    .unwrap();
    s.clear();
    s.draw_layer(BlendMode::Normal, 1.0, |_| {}).unwrap();
    assert!(s.frame_bytes().iter().all(|&b| b == 0));
}
