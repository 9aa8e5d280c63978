//! Colour arithmetic shared by matching and rendering

/// Euclidean colour distance and pairwise distance matrices
pub mod distance;

/// RGB colour with real-valued channels in `0.0..=255.0`
pub type Color = [f64; 3];

/// Widen an 8-bit pixel to a real-valued colour
pub fn color_from_rgb(pixel: image::Rgb<u8>) -> Color {
    let [r, g, b] = pixel.0;
    [f64::from(r), f64::from(g), f64::from(b)]
}

/// Truncate a real-valued colour to an 8-bit pixel
pub fn rgb_from_color(color: Color) -> image::Rgb<u8> {
    image::Rgb(color.map(|channel| channel.clamp(0.0, 255.0) as u8))
}
