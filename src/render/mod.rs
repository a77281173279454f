pub mod blur;
pub mod canvas;
pub mod composite;
pub mod primitives;
pub mod texture;

pub use canvas::Canvas;
pub use primitives::{
    BulletStyle, ShadowStyle, draw_bullet_list, draw_decorations, draw_rotated_square,
    draw_underline, rounded_rect, rounded_rect_with_shadow,
};
pub use texture::apply_noise;
