//! Drawing detected objects onto tile images.
//!
//! Each region gets its outline in the category color, then, when a centroid
//! exists, its label written just left of the centroid. Later regions draw
//! over earlier ones.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::models::DetectedRegion;

/// Outline stroke width in pixels
pub const OUTLINE_THICKNESS: u32 = 2;

/// Horizontal shift of the label's left edge from the centroid
pub const LABEL_OFFSET_X: i32 = 20;

const GLYPH_WIDTH: i32 = 5;
const GLYPH_HEIGHT: i32 = 7;
const GLYPH_ADVANCE: i32 = GLYPH_WIDTH + 1;

/// Draw every region onto `image` in order
pub fn annotate_tile(image: &mut RgbImage, regions: &[DetectedRegion]) {
    for region in regions {
        annotate_region(image, region);
    }
}

pub fn annotate_region(image: &mut RgbImage, region: &DetectedRegion) {
    let color = region.object_type.color();
    draw_outline(image, region, color);

    if let Some((cx, cy)) = region.centroid {
        let x = cx as i32 - LABEL_OFFSET_X;
        let y = cy as i32;
        draw_label(image, region.object_type.label(), x, y, color);
    }
}

/// Stamp an `OUTLINE_THICKNESS` square on every boundary pixel
fn draw_outline(image: &mut RgbImage, region: &DetectedRegion, color: Rgb<u8>) {
    for p in &region.contour {
        draw_filled_rect_mut(
            image,
            Rect::at(p.x, p.y).of_size(OUTLINE_THICKNESS, OUTLINE_THICKNESS),
            color,
        );
    }
}

/// Write `text` with its baseline-left corner at (`x`, `y`).
/// Characters without a glyph advance the cursor but draw nothing.
pub fn draw_label(image: &mut RgbImage, text: &str, x: i32, y: i32, color: Rgb<u8>) {
    let top = y - GLYPH_HEIGHT + 1;
    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else {
            continue;
        };
        let left = x + i as i32 * GLYPH_ADVANCE;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    draw_filled_rect_mut(
                        image,
                        Rect::at(left + col, top + row as i32).of_size(1, 1),
                        color,
                    );
                }
            }
        }
    }
}

/// 5x7 bitmaps, one byte per row, most significant of the low 5 bits leftmost
fn glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        _ => return None,
    };
    Some(rows)
}
