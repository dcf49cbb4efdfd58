use palette::Srgb;

pub type Color = Srgb;

pub const OBJECT: Color = Color::new(1.0, 0.5, 0.31);
pub const BACKGROUND: Color = Color::new(0.1, 0.1, 0.1);

pub trait ColorExt {
    fn from_named(color: Srgb<u8>) -> Self;
    fn to_rgb_array(self) -> [f32; 3];
}

impl ColorExt for Color {
    fn from_named(named: Srgb<u8>) -> Color {
        Srgb::<f32>::from_format(named)
    }

    fn to_rgb_array(self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_white_is_unit() {
        let white = Color::from_named(palette::named::WHITE);

        assert_eq!(white.to_rgb_array(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn object_color_components() {
        assert_eq!(OBJECT.to_rgb_array(), [1.0, 0.5, 0.31]);
    }
}
