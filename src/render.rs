//! Screen renderer
//!
//! Draws the session's drawables with macroquad. World space is normalized
//! (x: 0..1 across the screen, y: upward in screen heights); the camera
//! height is the world y that lands on the bottom edge.

use macroquad::prelude::*;

use crate::game::{Drawable, SpriteId};

/// Tile size in the sprite sheets (pixels)
pub const TILE_SIZE: f32 = 8.0;

/// World units of camera height per background palette step
const BACKGROUND_STEP: f32 = 50.0;

/// Background gradient stops, cycled as the camera climbs
const BACKGROUND_PALETTE: [[u8; 3]; 6] = [
    [0x4b, 0x2e, 0x2a],
    [0xcf, 0xa1, 0x7a],
    [0x2f, 0x5d, 0x35],
    [0x8f, 0xcf, 0x8a],
    [0x24, 0x6b, 0x6b],
    [0x6a, 0xd1, 0xd1],
];

/// Fill for drawables whose texture is missing
const PLACEHOLDER: Color = PINK;
const HITBOX: Color = GREEN;
const FONT_SIZE: f32 = 24.0;

/// A sprite sheet of fixed-size tiles. `texture` is None if loading failed.
pub struct Tileset {
    pub texture: Option<Texture2D>,
    pub tile_width: f32,
    pub tile_height: f32,
}

impl Tileset {
    pub fn new(texture: Option<Texture2D>) -> Self {
        if let Some(tex) = &texture {
            tex.set_filter(FilterMode::Nearest);
        }
        Self { texture, tile_width: TILE_SIZE, tile_height: TILE_SIZE }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    Platforms,
    Knight,
    Coin,
}

/// Region of a sheet in tile units: (start_x, start_y, count_x, count_y)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRect {
    pub sheet: Sheet,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

const fn tiles(sheet: Sheet, x: f32, y: f32, w: f32, h: f32) -> TileRect {
    TileRect { sheet, x, y, w, h }
}

/// Sheet location of every sprite
pub fn tile_rect(sprite: SpriteId) -> TileRect {
    match sprite {
        SpriteId::GreenPlatform => tiles(Sheet::Platforms, 2.0, 0.0, 4.0, 1.0),
        SpriteId::BrownPlatform => tiles(Sheet::Platforms, 2.0, 2.0, 4.0, 1.0),
        SpriteId::YellowPlatform => tiles(Sheet::Platforms, 2.0, 4.0, 4.0, 1.0),
        SpriteId::IcePlatform => tiles(Sheet::Platforms, 2.0, 6.0, 4.0, 1.0),
        SpriteId::KnightJump => tiles(Sheet::Knight, 1.0, 1.0, 2.0, 3.0),
        SpriteId::KnightFall => tiles(Sheet::Knight, 9.0, 1.0, 2.0, 3.0),
        SpriteId::Coin(frame) => tiles(Sheet::Coin, frame as f32 * 2.0, 0.0, 2.0, 2.0),
    }
}

/// Background colour for a camera height.
pub fn background_color(camera_height: f32) -> Color {
    let offset = (camera_height / BACKGROUND_STEP).max(0.0);
    let n = offset.floor();
    let t = offset - n;
    let idx = (n as usize) % BACKGROUND_PALETTE.len();
    let start = BACKGROUND_PALETTE[idx];
    let end = BACKGROUND_PALETTE[(idx + 1) % BACKGROUND_PALETTE.len()];

    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color::from_rgba(
        lerp(start[0], end[0]),
        lerp(start[1], end[1]),
        lerp(start[2], end[2]),
        255,
    )
}

/// Screen rect (top-left origin, pixels) of a body's sprite.
pub fn sprite_screen_rect(d: &Drawable, camera_height: f32, screen_w: f32, screen_h: f32) -> Rect {
    let b = &d.body;
    Rect::new(
        (b.x + b.offset_x) * screen_w,
        screen_h - (b.y + b.offset_y - camera_height + b.height) * screen_h,
        b.width * screen_w,
        b.height * screen_h,
    )
}

/// Screen rect of a body's hitbox (no visual offset).
fn hitbox_screen_rect(d: &Drawable, camera_height: f32, screen_w: f32, screen_h: f32) -> Rect {
    let b = &d.body;
    Rect::new(
        b.x * screen_w,
        screen_h - (b.y - camera_height + b.height) * screen_h,
        b.width * screen_w,
        b.height * screen_h,
    )
}

pub struct Renderer {
    platforms: Tileset,
    knight: Tileset,
    coin: Tileset,
    /// Draw hitboxes under sprites
    pub debug: bool,
}

impl Renderer {
    pub fn new(platforms: Tileset, knight: Tileset, coin: Tileset) -> Self {
        Self { platforms, knight, coin, debug: false }
    }

    fn sheet(&self, sheet: Sheet) -> &Tileset {
        match sheet {
            Sheet::Platforms => &self.platforms,
            Sheet::Knight => &self.knight,
            Sheet::Coin => &self.coin,
        }
    }

    /// Redraw the frame. `drawables` must already be in z order.
    pub fn render(&self, drawables: &[Drawable], camera_height: f32) {
        let (w, h) = (screen_width(), screen_height());
        clear_background(background_color(camera_height));

        for d in drawables {
            if self.debug {
                let hb = hitbox_screen_rect(d, camera_height, w, h);
                draw_rectangle(hb.x, hb.y, hb.w, hb.h, HITBOX);
            }

            let dest = sprite_screen_rect(d, camera_height, w, h);
            let sprite = d.sprite.map(tile_rect);
            let sheet = sprite.and_then(|r| {
                let tileset = self.sheet(r.sheet);
                tileset.texture.as_ref().map(|tex| (r, tileset, tex))
            });

            match sheet {
                Some((r, tileset, texture)) => {
                    let source = Rect::new(
                        r.x * tileset.tile_width,
                        r.y * tileset.tile_height,
                        r.w * tileset.tile_width,
                        r.h * tileset.tile_height,
                    );
                    draw_texture_ex(
                        texture,
                        dest.x,
                        dest.y,
                        WHITE,
                        DrawTextureParams {
                            dest_size: Some(vec2(dest.w, dest.h)),
                            source: Some(source),
                            flip_x: d.body.mirror_x,
                            ..Default::default()
                        },
                    );
                }
                None => draw_rectangle(dest.x, dest.y, dest.w, dest.h, PLACEHOLDER),
            }
        }
    }

    pub fn show_score(&self, score: u32) {
        let text = score.to_string();
        let dims = measure_text(&text, None, FONT_SIZE as u16, 1.0);
        draw_text(&text, (screen_width() - dims.width) / 2.0, 10.0 + dims.offset_y, FONT_SIZE, WHITE);
    }

    pub fn show_title_screen(&self) {
        let text = "Press A/D or \u{2190}/\u{2192} to move";
        let dims = measure_text(text, None, FONT_SIZE as u16, 1.0);
        draw_text(
            text,
            (screen_width() - dims.width) / 2.0,
            screen_height() - (dims.height - dims.offset_y),
            FONT_SIZE,
            WHITE,
        );
    }
}
